//! Resolve a URL to a local filename and size, then download it.
//!
//! [`Download::resolve`] issues a HEAD probe and decides where the content will
//! land; [`Download::run`] performs the blocking GET into that file.

mod fetch;

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};
use crate::fetch_head;
use crate::http::HttpOptions;
use crate::storage::{self, DEFAULT_DIR_MODE};
use crate::url_model::derive_file_name;

/// One planned transfer: where it comes from, where it goes, and how big the server says it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    url: String,
    output_dir: PathBuf,
    file_name: String,
    file_size: u64,
    http: HttpOptions,
}

impl Download {
    /// Probe `url` with default transport options. See [`Download::resolve_with`].
    pub fn resolve(url: &str, output_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::resolve_with(url, output_dir, &HttpOptions::default())
    }

    /// Probe `url` with a HEAD request and derive the file name and expected size.
    ///
    /// Size comes from `Content-Length` and is 0 when the header is absent.
    /// The name comes from the `filename` parameter of `Content-Disposition`, else
    /// from the last URL path segment. A `Content-Disposition` that does not parse
    /// is an error; one that parses without a `filename` falls back to the URL.
    pub fn resolve_with(
        url: &str,
        output_dir: impl Into<PathBuf>,
        http: &HttpOptions,
    ) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|source| Error::Url {
            url: url.to_string(),
            source,
        })?;

        let head = fetch_head::probe(url, http)?;
        let file_size = head.content_length.unwrap_or(0);
        let file_name = derive_file_name(&parsed, head.content_disposition.as_deref()).map_err(
            |source| Error::ContentDisposition {
                value: head.content_disposition.clone().unwrap_or_default(),
                source,
            },
        )?;

        let output_dir = output_dir.into();
        tracing::info!(
            url,
            file_name = %file_name,
            file_size,
            output_dir = %output_dir.display(),
            "resolved download"
        );

        Ok(Download {
            url: url.to_string(),
            output_dir,
            file_name,
            file_size,
            http: http.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Expected size in bytes; 0 when the server did not report one.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// `output_dir/file_name`.
    pub fn destination(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Download the whole body into [`Download::destination`], blocking until done.
    ///
    /// Creates the output directory (mode 0755) and truncates any existing file.
    /// There is no retry or resume: on error the file keeps whatever was written.
    /// Returns the destination path.
    pub fn run(self) -> Result<PathBuf> {
        storage::create_dir_all(&self.output_dir, DEFAULT_DIR_MODE)?;

        let dest = self.destination();
        let mut out = storage::create_file(&dest)?;
        let written = fetch::fetch_to_file(&self.url, &mut out, &dest, &self.http)?;

        tracing::info!(
            url = %self.url,
            dest = %dest.display(),
            bytes = written,
            expected = self.file_size,
            "download complete"
        );
        Ok(dest)
    }
}
