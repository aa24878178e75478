pub mod canonical_reader;
pub mod sales_reader;

pub use canonical_reader::{load, CanonicalReader};
pub use sales_reader::{RawRecordIterator, SalesReader};
