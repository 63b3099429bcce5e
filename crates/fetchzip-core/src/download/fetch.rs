//! Single-stream HTTP GET into a file.
//!
//! Writes the response body sequentially to `out` as it arrives.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::http::{easy_for, response_code, HttpOptions};

/// Downloads `url` with a single GET (no Range), writing the body to `out`.
/// Returns the number of bytes written.
///
/// A write failure aborts the transfer and is reported as an I/O error on `dest`.
/// The status code is not checked: an error page is saved like any other body.
pub(crate) fn fetch_to_file(
    url: &str,
    out: &mut File,
    dest: &Path,
    opts: &HttpOptions,
) -> Result<u64> {
    let mut written: u64 = 0;
    let mut write_err: Option<io::Error> = None;

    let mut easy = easy_for("GET", url, opts)?;
    let curl_err = |source| Error::Curl {
        method: "GET",
        url: url.to_string(),
        source,
    };

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match out.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(curl_err)?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(Error::io("write", dest, e));
    }
    performed.map_err(curl_err)?;
    response_code("GET", url, &mut easy)?;

    out.flush().map_err(|e| Error::io("flush", dest, e))?;
    Ok(written)
}
