mod error;
mod fetch;
mod types;

pub use error::AssetError;
pub use fetch::{build_client, dedup_assets, fetch_many, fetch_one};
pub use types::{DownloadOutcome, DownloadSummary, DownloadableAsset, LocalAsset};
