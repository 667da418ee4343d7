//! Dataset sinks.
//!
//! Available backends:
//! - `CsvDatasetStore` - timestamped CSV files in an output directory
//! - `MemoryStore` - in-memory datasets for tests and dry runs

pub mod csv;
pub mod memory;

pub use self::csv::{decode_csv, encode_csv, CsvDatasetStore, COLUMNS, DEFAULT_OUTPUT_DIR};
pub use memory::MemoryStore;
