pub mod canonical;
pub mod daily;
pub mod raw;
pub mod region;

pub use canonical::{CanonicalRecord, CanonicalTable};
pub use daily::DailySales;
pub use raw::{normalize_product, RawRecord};
pub use region::{display_label, region_options, RegionFilter};
