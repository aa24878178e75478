use crate::models::{region_options, CanonicalTable, DailySales, RegionFilter};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sum sales per calendar day over the rows selected by `filter`,
/// ascending by date. Regions absent from the table select nothing.
pub fn aggregate(table: &CanonicalTable, filter: &RegionFilter) -> Vec<DailySales> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for record in table.records().iter().filter(|r| filter.matches(&r.region)) {
        *totals.entry(record.date).or_insert(Decimal::ZERO) += record.sales;
    }

    totals
        .into_iter()
        .map(|(date, total)| DailySales::new(date, total))
        .collect()
}

/// Read-only query surface handed to presentation code.
#[derive(Debug, Clone, Copy)]
pub struct SalesQuery<'a> {
    table: &'a CanonicalTable,
}

impl<'a> SalesQuery<'a> {
    pub fn new(table: &'a CanonicalTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a CanonicalTable {
        self.table
    }

    pub fn region_options(&self) -> Vec<String> {
        region_options(self.table)
    }

    pub fn aggregate(&self, filter: &RegionFilter) -> Vec<DailySales> {
        aggregate(self.table, filter)
    }
}
