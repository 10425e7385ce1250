//! Archive inspection and selective extraction.
//!
//! `arcsift-core` recognizes ZIP, RAR, 7z and gzip files by their
//! signature, lists their entries, narrows the list with name, type and
//! pattern filters, and extracts the selection either with its internal
//! layout or flattened into a single directory.
//!
//! # Examples
//!
//! ```no_run
//! use arcsift_core::Destination;
//! use arcsift_core::ExtractionRequest;
//! use arcsift_core::FilterCriteria;
//! use arcsift_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ExtractionRequest::new()
//!     .with_destination(Destination::SiblingFolder)
//!     .with_files_only(true)
//!     .with_criteria(FilterCriteria::default().with_types(vec![".pdf".into()]));
//! let report = extract_archive("downloads/papers.zip", &request)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod formats;
pub mod paths;
pub mod planner;
pub mod report;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract_archive;
pub use api::extract_archive_with_progress;
pub use api::list_archive;
pub use api::move_archive;
pub use archive::ArchiveFile;
pub use config::Destination;
pub use config::ExtractionRequest;
pub use error::ArchiveError;
pub use error::Result;
pub use filter::FilterCriteria;
pub use filter::filter_entries;
pub use formats::ArchiveFormat;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
