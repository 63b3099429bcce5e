//! URL modeling and filename derivation.
//!
//! Picks the local filename for a download from the `Content-Disposition`
//! header or, failing that, the URL path.

mod content_disposition;
mod path;
mod sanitize;

pub use content_disposition::{ContentDisposition, DispositionError};
pub use path::filename_from_url_path;
pub use sanitize::sanitize_file_name;

use url::Url;

/// Default filename when URL path and Content-Disposition yield nothing usable.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives the filename for saving a download.
///
/// - No `content_disposition`: last path segment of `url`.
/// - Header parses and has a `filename` parameter: that value.
/// - Header parses but has no `filename` parameter: last path segment of `url`.
/// - Header does not parse: error. There is no fallback in this case.
///
/// The result is passed through [`sanitize_file_name`]; an empty, `.` or `..`
/// result becomes [`DEFAULT_FILENAME`].
pub fn derive_file_name(
    url: &Url,
    content_disposition: Option<&str>,
) -> Result<String, DispositionError> {
    let from_header = match content_disposition {
        Some(value) => ContentDisposition::parse(value)?
            .filename()
            .map(str::to_string),
        None => None,
    };
    let candidate = from_header.or_else(|| filename_from_url_path(url));

    let name = candidate
        .map(|raw| sanitize_file_name(&raw))
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
    Ok(name)
}
