use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Total sales of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: Decimal,
}

impl DailySales {
    pub fn new(date: NaiveDate, total_sales: Decimal) -> Self {
        Self { date, total_sales }
    }
}
