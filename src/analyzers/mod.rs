pub mod sales_analyzer;

pub use sales_analyzer::{price_change_date, PeriodStats, SalesAnalyzer, SalesStatistics};
