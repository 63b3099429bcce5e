//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers and read
//! `Content-Length` and `Content-Disposition` without transferring the body.

mod parse;

use crate::error::{Error, Result};
use crate::http::{easy_for, response_code, HttpOptions};

/// Headers of interest from the final response of a HEAD request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// Raw `Content-Disposition` value, if present (filename hint).
    pub content_disposition: Option<String>,
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects; only the headers of the last response are kept. The
/// status code is not checked, so a 403 or 405 still yields whatever headers
/// came back. Blocks the current thread.
pub fn probe(url: &str, opts: &HttpOptions) -> Result<HeadResult> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = easy_for("HEAD", url, opts)?;
    let curl_err = |source| Error::Curl {
        method: "HEAD",
        url: url.to_string(),
        source,
    };
    easy.nobody(true).map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                headers.push(parse::header_line(data));
                true
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let status = response_code("HEAD", url, &mut easy)?;
    tracing::debug!(url, status, header_lines = headers.len(), "HEAD probe complete");

    parse::parse_headers(&headers)
}
