//! Resolve a URL to a local file, download it, and unzip archives.
//!
//! The two halves are independent:
//! - [`download::Download`] probes a URL (HEAD) for its filename and size, then
//!   fetches it (GET) into an output directory.
//! - [`unzip::extract_single`] / [`unzip::extract_multiple`] extract a zip archive,
//!   optionally reassembled from part files.
//!
//! Everything is blocking and single-threaded.

pub mod config;
pub mod logging;

pub mod download;
pub mod error;
pub mod fetch_head;
pub mod http;
pub mod storage;
pub mod unzip;
pub mod url_model;

pub use download::Download;
pub use error::{Error, ErrorKind, Result};
pub use http::HttpOptions;
