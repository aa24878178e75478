use crate::models::{display_label, CanonicalTable, RegionFilter};
use crate::processors::aggregate;
use crate::utils::constants::{PRICE_CHANGE_DAY, PRICE_CHANGE_MONTH, PRICE_CHANGE_YEAR};
use crate::utils::money::format_sales;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Daily totals on one side of the marker date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodStats {
    pub days: usize,
    pub total_sales: Decimal,
}

impl PeriodStats {
    pub fn average_daily(&self) -> Option<Decimal> {
        if self.days == 0 {
            return None;
        }
        self.total_sales.checked_div(Decimal::from(self.days))
    }
}

#[derive(Debug, Clone)]
pub struct SalesStatistics {
    pub total_records: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub total_sales: Decimal,
    pub region_totals: Vec<(String, Decimal)>,
    pub marker_date: NaiveDate,
    pub before: PeriodStats,
    pub after: PeriodStats,
}

/// Compares sales before and after a marker date (the price increase by
/// default). The marker day itself counts as "after".
pub struct SalesAnalyzer {
    marker_date: NaiveDate,
}

pub fn price_change_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(PRICE_CHANGE_YEAR, PRICE_CHANGE_MONTH, PRICE_CHANGE_DAY)
        .unwrap_or(NaiveDate::MIN)
}

impl SalesAnalyzer {
    pub fn new() -> Self {
        Self::with_marker_date(price_change_date())
    }

    pub fn with_marker_date(marker_date: NaiveDate) -> Self {
        Self { marker_date }
    }

    pub fn analyze(&self, table: &CanonicalTable) -> SalesStatistics {
        let mut before = PeriodStats::default();
        let mut after = PeriodStats::default();

        for day in aggregate(table, &RegionFilter::All) {
            let period = if day.date < self.marker_date {
                &mut before
            } else {
                &mut after
            };
            period.days += 1;
            period.total_sales += day.total_sales;
        }

        let mut region_totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for record in table.records() {
            *region_totals.entry(record.region.as_str()).or_insert(Decimal::ZERO) += record.sales;
        }

        SalesStatistics {
            total_records: table.len(),
            date_range: table.date_range(),
            total_sales: table.total_sales(),
            region_totals: region_totals
                .into_iter()
                .map(|(region, total)| (region.to_string(), total))
                .collect(),
            marker_date: self.marker_date,
            before,
            after,
        }
    }
}

impl Default for SalesAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesStatistics {
    /// Relative change of average daily sales across the marker date, in percent.
    pub fn average_change_percent(&self) -> Option<Decimal> {
        let before = self.before.average_daily()?;
        let after = self.after.average_daily()?;
        if before.is_zero() {
            return None;
        }
        (after - before)
            .checked_div(before)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }

    pub fn summary(&self) -> String {
        let range = match self.date_range {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "No records".to_string(),
        };

        let mut lines = vec![
            format!("Records: {} line items", self.total_records),
            format!("Date Range: {}", range),
            format!("Total Sales: ${}", format_sales(self.total_sales)),
            "Sales by Region:".to_string(),
        ];
        for (region, total) in &self.region_totals {
            lines.push(format!("  - {}: ${}", display_label(region), format_sales(*total)));
        }

        let average = |stats: &PeriodStats| {
            stats
                .average_daily()
                .map_or_else(|| "n/a".to_string(), |avg| format!("${}", format_sales(avg)))
        };

        lines.push(format!("Price change marker: {}", self.marker_date));
        lines.push(format!(
            "  - Before: {} days, average daily {}",
            self.before.days,
            average(&self.before)
        ));
        lines.push(format!(
            "  - After: {} days, average daily {}",
            self.after.days,
            average(&self.after)
        ));
        if let Some(change) = self.average_change_percent() {
            let sign = if change.is_sign_positive() && !change.is_zero() {
                "+"
            } else {
                ""
            };
            lines.push(format!("  - Change: {}{:.1}%", sign, change.round_dp(1)));
        }

        lines.join("\n")
    }
}
