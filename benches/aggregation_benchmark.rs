use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morsel_sales::models::{CanonicalRecord, CanonicalTable, RegionFilter};
use morsel_sales::processors::aggregate;
use rust_decimal::Decimal;

const REGIONS: [&str; 4] = ["east", "north", "south", "west"];

// One line item per region per day, over `days` days
fn create_test_table(days: usize) -> CanonicalTable {
    let base_date = NaiveDate::from_ymd_opt(2018, 2, 6).unwrap();
    let mut records = Vec::with_capacity(days * REGIONS.len());

    for day in 0..days {
        let date = base_date + chrono::Duration::days(day as i64);
        for (i, region) in REGIONS.iter().enumerate() {
            let cents = 300 * (1 + (day + i) as i64 % 500);
            records.push(CanonicalRecord::new(
                Decimal::new(cents, 2),
                date,
                region.to_string(),
            ));
        }
    }

    CanonicalTable::from_records(records)
}

fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for days in [365, 1_000, 5_000] {
        let table = create_test_table(days);

        group.bench_with_input(BenchmarkId::new("all_regions", days), &table, |b, table| {
            b.iter(|| aggregate(black_box(table), black_box(&RegionFilter::All)))
        });

        let north = RegionFilter::region("north");
        group.bench_with_input(BenchmarkId::new("single_region", days), &table, |b, table| {
            b.iter(|| aggregate(black_box(table), black_box(&north)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_aggregate);
criterion_main!(benches);
