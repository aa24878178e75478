use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "morsel-sales")]
#[command(about = "Normalize regional sales extracts and query daily totals")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: morsel-sales.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge raw daily extracts into the canonical sales table
    Process {
        #[arg(short, long, help = "Directory containing daily_sales_data_*.csv extracts")]
        input_dir: Option<PathBuf>,

        #[arg(short, long, help = "Canonical table output path")]
        output_file: Option<PathBuf>,

        #[arg(short, long, help = "Product to retain (case-insensitive)")]
        product: Option<String>,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// List the selectable region options
    Regions {
        #[arg(short, long, help = "Canonical table path")]
        file: Option<PathBuf>,
    },

    /// Print total sales per day, optionally restricted to regions
    Query {
        #[arg(short, long, help = "Canonical table path")]
        file: Option<PathBuf>,

        #[arg(
            short,
            long = "region",
            help = "Region to include; repeat for several, 'all' or none for every region"
        )]
        regions: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Summarize the canonical table around the price change
    Info {
        #[arg(short, long, help = "Canonical table path")]
        file: Option<PathBuf>,

        #[arg(long, help = "Marker date (YYYY-MM-DD) [default: 2021-01-15]")]
        marker_date: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_args() {
        let cli = Cli::try_parse_from([
            "morsel-sales",
            "query",
            "-r",
            "north",
            "--region",
            "south",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Query {
                file,
                regions,
                format,
            } => {
                assert!(file.is_none());
                assert_eq!(regions, ["north", "south"]);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "morsel-sales",
            "process",
            "-i",
            "data",
            "--validate-only",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Process {
                validate_only: true,
                ..
            }
        ));
    }

    #[test]
    fn test_info_marker_date() {
        let cli =
            Cli::try_parse_from(["morsel-sales", "info", "--marker-date", "2021-02-01"]).unwrap();

        match cli.command {
            Commands::Info { marker_date, .. } => {
                assert_eq!(marker_date, NaiveDate::from_ymd_opt(2021, 2, 1));
            }
            _ => panic!("expected info command"),
        }
    }
}
