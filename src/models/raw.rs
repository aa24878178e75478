use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::region::is_all_regions;
use crate::models::CanonicalRecord;
use crate::utils::constants::DATE_FORMAT;
use crate::utils::money::{line_amount, parse_price, parse_quantity};

/// One row of a raw daily sales extract, fields kept as written.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub product: String,
    pub price: String,
    pub quantity: String,
    pub date: String,
    pub region: String,
}

/// Product names compare trimmed and case-folded.
pub fn normalize_product(name: &str) -> String {
    name.trim().to_lowercase()
}

impl RawRecord {
    pub fn is_product(&self, normalized_target: &str) -> bool {
        normalize_product(&self.product) == normalized_target
    }

    /// Parse and validate into a canonical line item.
    ///
    /// The error is a human-readable description of the first bad field;
    /// callers attach file and line context.
    pub fn to_canonical(&self) -> std::result::Result<CanonicalRecord, String> {
        let price = parse_price(&self.price)
            .ok_or_else(|| format!("invalid price: '{}'", self.price))?;

        let quantity = parse_quantity(&self.quantity)
            .ok_or_else(|| format!("invalid quantity: '{}'", self.quantity))?;

        let amount = line_amount(price, quantity).ok_or_else(|| {
            format!(
                "sales amount overflows: {} x {}",
                self.price.trim(),
                quantity
            )
        })?;

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| format!("invalid date: '{}'", self.date))?;

        let region = self.region.trim();
        if region.is_empty() {
            return Err("empty region".to_string());
        }
        if is_all_regions(region) {
            return Err(format!(
                "region '{}' collides with the all-regions option",
                region
            ));
        }

        Ok(CanonicalRecord::new(amount, date, region.to_string()))
    }
}
