use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use validator::Validate;

use crate::utils::constants::DATE_FORMAT;
use crate::utils::money::{format_sales, round_sales};

/// One retained line item of the target product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct CanonicalRecord {
    pub sales: Decimal,
    pub date: NaiveDate,

    #[validate(length(min = 1))]
    pub region: String,
}

impl CanonicalRecord {
    /// Build a record from an exact amount; the stored value is rounded
    /// half-up to two fractional digits.
    pub fn new(amount: Decimal, date: NaiveDate, region: String) -> Self {
        Self {
            sales: round_sales(amount),
            date,
            region,
        }
    }

    /// Fields in canonical column order, rendered for the CSV writer.
    pub fn to_row(&self) -> [String; 3] {
        [
            format_sales(self.sales),
            self.date.format(DATE_FORMAT).to_string(),
            self.region.clone(),
        ]
    }
}

/// The full canonical fact table. Built once and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    records: Vec<CanonicalRecord>,
    regions: Vec<String>,
}

impl CanonicalTable {
    pub fn from_records(records: Vec<CanonicalRecord>) -> Self {
        let regions: BTreeSet<&str> = records.iter().map(|r| r.region.as_str()).collect();
        let regions = regions.into_iter().map(str::to_string).collect();

        Self { records, regions }
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// Distinct regions in lexicographic order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_sales(&self) -> Decimal {
        self.records.iter().map(|r| r.sales).sum()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}
