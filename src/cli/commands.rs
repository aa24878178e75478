use crate::analyzers::SalesAnalyzer;
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::error::Result;
use crate::models::{DailySales, RegionFilter};
use crate::processors::{Normalizer, SalesQuery};
use crate::readers::CanonicalReader;
use crate::settings::Settings;
use crate::utils::money::{format_sales, round_sales};
use crate::utils::progress::ProgressReporter;
use crate::writers::CanonicalWriter;
use std::path::PathBuf;

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            input_dir,
            output_file,
            product,
            validate_only,
        } => {
            let settings = settings
                .with_input_dir(input_dir)
                .with_output_file(output_file)
                .with_product(product)
                .validated()?;

            println!("Normalizing '{}' sales...", settings.product);
            println!("Input directory: {}", settings.input_dir.display());

            let progress = ProgressReporter::new(0, "Reading extracts...", cli.quiet);
            let normalizer =
                Normalizer::new(&settings.product).with_file_prefix(&settings.file_prefix);
            let (table, report) = normalizer.normalize(&settings.input_dir, Some(&progress))?;
            progress.finish_with_message(&format!("Retained {} line items", table.len()));

            println!("\n{}", report.summary());

            if validate_only {
                println!("Validation complete - no output file written");
                return Ok(());
            }

            CanonicalWriter::new().write(&table, &settings.output_file)?;
            println!("Canonical table written to {}", settings.output_file.display());
        }

        Commands::Regions { file } => {
            let table = CanonicalReader::new().load(&canonical_path(&settings, file))?;
            for option in SalesQuery::new(&table).region_options() {
                println!("{}", option);
            }
        }

        Commands::Query {
            file,
            regions,
            format,
        } => {
            let table = CanonicalReader::new().load(&canonical_path(&settings, file))?;
            let filter = RegionFilter::from_selection(&regions);
            let daily = SalesQuery::new(&table).aggregate(&filter);

            println!("{}", render(&daily, format)?);
        }

        Commands::Info { file, marker_date } => {
            let path = canonical_path(&settings, file);
            println!("Analyzing canonical table: {}", path.display());

            let progress = ProgressReporter::new_spinner("Loading canonical table...", cli.quiet);
            let table = CanonicalReader::new().load(&path)?;
            progress.finish_with_message(&format!("Loaded {} line items", table.len()));

            let analyzer = match marker_date {
                Some(date) => SalesAnalyzer::with_marker_date(date),
                None => SalesAnalyzer::new(),
            };

            println!("\n{}", analyzer.analyze(&table).summary());
        }
    }

    Ok(())
}

fn canonical_path(settings: &Settings, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| settings.output_file.clone())
}

fn render(daily: &[DailySales], format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => {
            let rounded: Vec<DailySales> = daily
                .iter()
                .map(|d| DailySales::new(d.date, round_sales(d.total_sales)))
                .collect();
            serde_json::to_string_pretty(&rounded)?
        }
        OutputFormat::Csv => {
            let mut lines = vec!["Date,Sales".to_string()];
            lines.extend(
                daily
                    .iter()
                    .map(|d| format!("{},{}", d.date, format_sales(d.total_sales))),
            );
            lines.join("\n")
        }
        OutputFormat::Table => {
            if daily.is_empty() {
                return Ok("No sales for the selected regions".to_string());
            }
            let mut lines = vec![format!("{:<12}{:>14}", "Date", "Sales ($)")];
            lines.extend(
                daily
                    .iter()
                    .map(|d| format!("{:<12}{:>14}", d.date.to_string(), format_sales(d.total_sales))),
            );
            lines.join("\n")
        }
    };

    Ok(output)
}
