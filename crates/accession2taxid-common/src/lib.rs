//! accession2taxid Common Library
//!
//! Shared types, logging setup and error handling for the accession2taxid
//! workspace.
//!
//! - **Error Handling**: [`Accession2TaxidError`] and the [`Result`] alias
//! - **Types**: [`AccessionRecord`] and the [`RecordFormat`] descriptor
//! - **Logging**: `tracing` subscriber configuration
//!
//! # Example
//!
//! ```
//! use accession2taxid_common::{AccessionRecord, RecordFormat};
//!
//! let record = RecordFormat::Legacy.parse_line("ABC123\t9606", 2).unwrap();
//! assert_eq!(record, AccessionRecord::new("ABC123", "9606"));
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Accession2TaxidError, Result};
pub use types::{AccessionRecord, FormatSelection, RecordFormat};
