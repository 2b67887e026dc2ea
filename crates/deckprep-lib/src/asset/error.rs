use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Download of {url} failed: {status} {reason}")]
    Download {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("HTTP request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is claimed by {count} assets in the same batch")]
    DuplicatePath { path: PathBuf, count: usize },
}
