use super::error::AssetError;
use super::types::{DownloadOutcome, DownloadSummary, DownloadableAsset};
use futures::stream::{FuturesUnordered, StreamExt};
use itertools::Itertools;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("deckprep/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetches a single asset unless a local copy already exists and `force` is unset.
///
/// The response body is received in full and written to a sibling `.part` file that is
/// then renamed over the destination, so a failed fetch never leaves a truncated file
/// at the asset path.
pub async fn fetch_one(
    client: &Client,
    asset: &DownloadableAsset,
    force: bool,
) -> Result<DownloadOutcome, AssetError> {
    let url = asset.url();
    let path = asset.path();

    if !force && asset.local().exists() {
        debug!(url = %url, path = %path.display(), "Local copy exists, skipping download");
        return Ok(DownloadOutcome::UsedCached);
    }

    debug!(url = %url, path = %path.display(), force, "Downloading");
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| AssetError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AssetError::Download {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        });
    }

    let body = response.bytes().await.map_err(|source| AssetError::Http {
        url: url.to_string(),
        source,
    })?;

    let part_path = partial_path(path);
    if let Err(source) = tokio::fs::write(&part_path, &body).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(AssetError::Io {
            path: part_path,
            source,
        });
    }
    if let Err(source) = tokio::fs::rename(&part_path, path).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(AssetError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(url = %url, path = %path.display(), bytes = body.len(), "Saved");
    Ok(DownloadOutcome::Downloaded)
}

/// Fetches every asset concurrently and waits for all of them to finish.
///
/// Individual failures are logged and counted, never returned. Assets whose local path is
/// claimed more than once in `assets` are counted as failed without any I/O.
pub async fn fetch_many(
    client: &Client,
    assets: &[DownloadableAsset],
    force: bool,
) -> DownloadSummary {
    let mut summary = DownloadSummary::default();
    let claims = assets.iter().map(DownloadableAsset::path).counts();

    let mut futs = FuturesUnordered::new();
    for asset in assets {
        let count = claims[asset.path()];
        if count > 1 {
            let err = AssetError::DuplicatePath {
                path: asset.path().to_path_buf(),
                count,
            };
            error!(url = %asset.url(), "Asset download failed: {}", err);
            summary.record(DownloadOutcome::Failed);
            continue;
        }

        futs.push(async move { (asset, fetch_one(client, asset, force).await) });
    }

    info!(pending = futs.len(), "Waiting for downloads to finish...");

    while let Some((asset, res)) = futs.next().await {
        let outcome = match res {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(url = %asset.url(), "Asset download failed: {}", err);
                DownloadOutcome::Failed
            }
        };
        summary.record(outcome);
    }

    if summary.has_failures() {
        warn!("{}", summary);
    } else {
        info!("{}", summary);
    }
    summary
}

/// Drops repeated `(url, path)` pairs, keeping the first occurrence.
pub fn dedup_assets(assets: impl IntoIterator<Item = DownloadableAsset>) -> Vec<DownloadableAsset> {
    assets
        .into_iter()
        .unique_by(|asset| (asset.url().clone(), asset.path().to_path_buf()))
        .collect()
}

fn partial_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{file_name}.part"))
}
