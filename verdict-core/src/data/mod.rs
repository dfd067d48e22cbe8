//! Raw market-data normalization.

pub mod ingest;

pub use ingest::{ingest, parse_timestamp, IngestError, RawBar};
