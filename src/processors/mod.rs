pub mod aggregator;
pub mod normalizer;

pub use aggregator::{aggregate, SalesQuery};
pub use normalizer::{normalize, IngestReport, Normalizer};
