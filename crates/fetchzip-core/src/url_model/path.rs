//! Filename extraction from URL path.

use url::Url;

use super::content_disposition::percent_decode;

/// Extracts the last non-empty path segment from a URL for use as a filename hint.
///
/// The segment is percent-decoded; query and fragment are ignored. Returns `None`
/// for an empty or root path.
pub fn filename_from_url_path(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    Some(percent_decode(segment))
}
