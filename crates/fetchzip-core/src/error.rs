//! Error type shared by the resolver, downloader and extractor.

use std::fmt;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use crate::url_model::DispositionError;

/// Result alias used throughout the core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse category of an [`Error`], for callers that only need to branch on the class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP request could not be completed.
    Network,
    /// A URL or response header could not be parsed.
    Parse,
    /// Filesystem create/read/write/mkdir failure.
    Io,
    /// Malformed zip container or entry.
    Format,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Network => "network",
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
            ErrorKind::Format => "format",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{method} {url} failed: {source}")]
    Curl {
        method: &'static str,
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("invalid URL {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid Content-Disposition header {value:?}: {source}")]
    ContentDisposition {
        value: String,
        #[source]
        source: DispositionError,
    },

    #[error("invalid Content-Length header {value:?}: {source}")]
    ContentLength {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed zip archive {}: {source}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("zip entry {name:?} in {} escapes the output directory", archive.display())]
    UnsafeEntryPath { archive: PathBuf, name: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Curl { .. } => ErrorKind::Network,
            Error::Url { .. } | Error::ContentDisposition { .. } | Error::ContentLength { .. } => {
                ErrorKind::Parse
            }
            Error::Io { .. } => ErrorKind::Io,
            Error::Zip { .. } | Error::UnsafeEntryPath { .. } => ErrorKind::Format,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Zip errors that are really I/O failures keep the Io kind.
    pub(crate) fn zip(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        match source {
            zip::result::ZipError::Io(e) => Error::io("read", path, e),
            other => Error::Zip {
                path: path.into(),
                source: other,
            },
        }
    }
}
