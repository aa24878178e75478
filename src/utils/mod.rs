pub mod constants;
pub mod money;
pub mod progress;

pub use constants::*;
pub use money::{format_sales, parse_price, parse_quantity, round_sales};
pub use progress::ProgressReporter;
