pub mod canonical_writer;

pub use canonical_writer::CanonicalWriter;
