use chrono::NaiveDate;
use morsel_sales::models::region_options;
use morsel_sales::processors::Normalizer;
use morsel_sales::writers::CanonicalWriter;
use morsel_sales::{aggregate, load, normalize, ProcessingError, RegionFilter, SalesQuery};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::TempDir;

const HEADER: &str = "product,price,quantity,date,region\n";

fn write_extract(dir: &Path, name: &str, rows: &[&str]) {
    let mut content = HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join(name), content).expect("Failed to write extract");
}

fn seed_extracts(dir: &Path) {
    write_extract(
        dir,
        "daily_sales_data_0.csv",
        &[
            "pink morsel,$3.00,2,2021-01-10,north",
            "gold morsel,$9.99,5,2021-01-10,north",
            "Pink Morsel,$3.00,1,2021-01-11,south",
        ],
    );
    write_extract(
        dir,
        "daily_sales_data_1.csv",
        &[
            "pink morsel,$1.50,3,2021-01-10,south",
            " PINK MORSEL,$5.00,2,2021-01-15,east",
            "magenta morsel,$1.00,1,2021-01-15,east",
        ],
    );
    write_extract(
        dir,
        "daily_sales_data_2.csv",
        &["pink morsel,$5.00,1,2021-01-16,west"],
    );
}

fn run_ingestion(input: &Path, output: &Path) -> morsel_sales::Result<()> {
    let table = normalize(input, "pink morsel")?;
    CanonicalWriter::new().write(&table, output)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
}

fn totals(daily: &[morsel_sales::DailySales]) -> Vec<(NaiveDate, String)> {
    daily
        .iter()
        .map(|d| (d.date, d.total_sales.to_string()))
        .collect()
}

#[test]
fn test_end_to_end_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("data");
    fs::create_dir(&input).unwrap();
    seed_extracts(&input);

    let output = temp_dir.path().join("out").join("pink_morsels_sales.csv");
    run_ingestion(&input, &output).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Sales,Date,Region\n\
         6.00,2021-01-10,north\n\
         3.00,2021-01-11,south\n\
         4.50,2021-01-10,south\n\
         10.00,2021-01-15,east\n\
         5.00,2021-01-16,west\n"
    );

    let table = load(&output).unwrap();
    let query = SalesQuery::new(&table);

    assert_eq!(query.region_options(), ["all", "east", "north", "south", "west"]);
    assert_eq!(
        totals(&query.aggregate(&RegionFilter::All)),
        [
            (day(10), "10.50".to_string()),
            (day(11), "3.00".to_string()),
            (day(15), "10.00".to_string()),
            (day(16), "5.00".to_string()),
        ]
    );
    assert_eq!(
        totals(&query.aggregate(&RegionFilter::from_selection(["south"]))),
        [(day(10), "4.50".to_string()), (day(11), "3.00".to_string())]
    );
}

#[test]
fn test_scenario_from_canonical_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sales.csv");
    fs::write(
        &path,
        "Sales,Date,Region\n6.00,2021-01-10,north\n4.50,2021-01-10,south\n3.00,2021-01-11,north\n",
    )
    .unwrap();

    let table = load(&path).unwrap();

    assert_eq!(
        totals(&aggregate(&table, &RegionFilter::from_selection(["all"]))),
        [(day(10), "10.50".to_string()), (day(11), "3.00".to_string())]
    );
    assert_eq!(
        totals(&aggregate(&table, &RegionFilter::from_selection(["north"]))),
        [(day(10), "6.00".to_string()), (day(11), "3.00".to_string())]
    );
    assert!(aggregate(&table, &RegionFilter::from_selection(["east"])).is_empty());
}

#[test]
fn test_ingestion_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data");
    fs::create_dir(&input).unwrap();
    seed_extracts(&input);

    let first = temp_dir.path().join("first.csv");
    let second = temp_dir.path().join("second.csv");
    run_ingestion(&input, &first).unwrap();
    run_ingestion(&input, &second).unwrap();
    run_ingestion(&input, &first).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_grand_total_and_partition_properties() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data");
    fs::create_dir(&input).unwrap();
    seed_extracts(&input);

    let output = temp_dir.path().join("sales.csv");
    run_ingestion(&input, &output).unwrap();
    let table = load(&output).unwrap();

    let all = aggregate(&table, &RegionFilter::All);
    let grand: Decimal = all.iter().map(|d| d.total_sales).sum();
    assert_eq!(grand, table.records().iter().map(|r| r.sales).sum::<Decimal>());
    assert_eq!(grand, dec("28.50"));

    let left = aggregate(&table, &RegionFilter::from_selection(["east", "north"]));
    let right = aggregate(&table, &RegionFilter::from_selection(["south", "west"]));
    for entry in &all {
        let part: Decimal = left
            .iter()
            .chain(right.iter())
            .filter(|d| d.date == entry.date)
            .map(|d| d.total_sales)
            .sum();
        assert_eq!(part, entry.total_sales, "mismatch on {}", entry.date);
    }
}

#[test]
fn test_empty_input_writes_header_only() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("notes.txt"), "not an extract").unwrap();

    let output = temp_dir.path().join("sales.csv");
    run_ingestion(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "Sales,Date,Region\n");

    let table = load(&output).unwrap();
    assert!(aggregate(&table, &RegionFilter::All).is_empty());
    assert_eq!(region_options(&table), ["all"]);
}

#[test]
fn test_failed_ingestion_keeps_previous_table() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data");
    fs::create_dir(&input).unwrap();
    seed_extracts(&input);

    let output = temp_dir.path().join("sales.csv");
    run_ingestion(&input, &output).unwrap();
    let before = fs::read(&output).unwrap();

    write_extract(
        &input,
        "daily_sales_data_3.csv",
        &["pink morsel,3.00 USD,1,2021-01-17,north"],
    );

    match run_ingestion(&input, &output) {
        Err(ProcessingError::MalformedInput { file, line, .. }) => {
            assert!(file.ends_with("daily_sales_data_3.csv"));
            assert_eq!(line, 2);
        }
        other => panic!("expected MalformedInput, got {:?}", other),
    }

    assert_eq!(fs::read(&output).unwrap(), before);
    let leftovers: Vec<PathBuf> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file())
        .collect();
    assert_eq!(leftovers, [output]);
}

#[test]
fn test_missing_input_directory() {
    let temp_dir = TempDir::new().unwrap();
    let result = run_ingestion(
        &temp_dir.path().join("absent"),
        &temp_dir.path().join("sales.csv"),
    );

    assert!(matches!(result, Err(ProcessingError::MissingInput(_))));
    assert!(!temp_dir.path().join("sales.csv").exists());
}

#[test]
fn test_other_product_normalizer() {
    let temp_dir = TempDir::new().unwrap();
    seed_extracts(temp_dir.path());

    let (table, report) = Normalizer::new("Gold Morsel")
        .normalize(temp_dir.path(), None)
        .unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].sales, dec("49.95"));
    assert_eq!(report.rows_read, 7);
    assert_eq!(report.rows_dropped, 6);
}
