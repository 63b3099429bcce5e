//! Parse HTTP response header lines into HeadResult.

use crate::error::{Error, Result};

use super::HeadResult;

/// One raw header line as delivered by libcurl, without its line terminator.
///
/// Bytes that are not UTF-8 (e.g. a Latin-1 filename) become U+FFFD instead of
/// dropping the header.
pub(crate) fn header_line(data: &[u8]) -> String {
    String::from_utf8_lossy(data).trim_end().to_string()
}

/// Parse collected header lines into HeadResult.
///
/// A status line (`HTTP/...`) starts a new response, so after redirects only the
/// final response's headers count. The first occurrence of a header wins.
/// A `Content-Length` that is not an unsigned integer is an error.
pub(crate) fn parse_headers(lines: &[String]) -> Result<HeadResult> {
    let mut content_length: Option<&str> = None;
    let mut content_disposition: Option<&str> = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_length = None;
            content_disposition = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") && content_length.is_none() {
                content_length = Some(value);
            }
            if name.eq_ignore_ascii_case("content-disposition") && content_disposition.is_none() {
                content_disposition = Some(value);
            }
        }
    }

    let content_length = content_length
        .map(|v| {
            v.parse::<u64>().map_err(|source| Error::ContentLength {
                value: v.to_string(),
                source,
            })
        })
        .transpose()?;

    Ok(HeadResult {
        content_length,
        content_disposition: content_disposition.map(str::to_string),
    })
}
