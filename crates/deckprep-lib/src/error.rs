use crate::asset::AssetError;
use crate::datasource::DataSourceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckPrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Question bank error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Failed to load template from {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    #[error("{failed} of {total} asset downloads failed")]
    AssetDownload { failed: usize, total: usize },

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Deck packaging error: {0}")]
    Package(#[from] genanki_rs::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
