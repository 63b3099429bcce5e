//! CLI command handlers, one per file.

mod get;
mod resolve;
mod unzip;

pub use get::run_get;
pub use resolve::run_resolve;
pub use unzip::run_unzip;
