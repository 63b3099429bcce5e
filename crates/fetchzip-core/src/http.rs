//! Transport options shared by the HEAD probe and the GET download.

use std::time::Duration;

use crate::error::{Error, Result};

/// libcurl knobs applied to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub max_redirections: u32,
    /// `None` keeps libcurl's default (no User-Agent header).
    pub user_agent: Option<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            max_redirections: 10,
            user_agent: None,
        }
    }
}

/// Builds an Easy handle for `url` with redirects followed and `opts` applied.
pub(crate) fn easy_for(
    method: &'static str,
    url: &str,
    opts: &HttpOptions,
) -> Result<curl::easy::Easy> {
    let curl_err = |source| Error::Curl {
        method,
        url: url.to_string(),
        source,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.max_redirections(opts.max_redirections).map_err(curl_err)?;
    easy.connect_timeout(opts.connect_timeout).map_err(curl_err)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua).map_err(curl_err)?;
    }
    Ok(easy)
}

/// Final response code of a performed transfer.
///
/// A non-2xx code is not an error: it is logged and the caller keeps whatever
/// headers and body the server sent.
pub(crate) fn response_code(
    method: &'static str,
    url: &str,
    easy: &mut curl::easy::Easy,
) -> Result<u32> {
    let code = easy.response_code().map_err(|source| Error::Curl {
        method,
        url: url.to_string(),
        source,
    })?;
    if !(200..300).contains(&code) {
        tracing::debug!(method, url, status = code, "non-2xx response");
    }
    Ok(code)
}
