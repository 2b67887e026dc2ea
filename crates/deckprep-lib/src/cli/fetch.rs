use crate::asset::{DownloadSummary, DownloadableAsset, build_client, dedup_assets, fetch_many};
use crate::cli::FetchParams;
use crate::datasource;
use crate::error::DeckPrepError;
use tracing;

pub async fn run_fetch(params: FetchParams) -> Result<DownloadSummary, DeckPrepError> {
    let FetchParams {
        app_config,
        base_url,
        asset_dir,
        force,
    } = params;

    let mut assets = Vec::new();
    for deck in app_config.decks.iter() {
        tracing::info!("Reading question bank {}", deck.source.display());
        for question in datasource::load(&deck.source)? {
            assets.extend(question.image_asset(&base_url, &asset_dir)?);
        }
    }
    let assets: Vec<DownloadableAsset> = dedup_assets(assets);

    tracing::info!("Downloading {} assets...", assets.len());
    let client = build_client()?;
    let summary = fetch_many(&client, &assets, force).await;

    if summary.has_failures() {
        return Err(DeckPrepError::AssetDownload {
            failed: summary.failed,
            total: summary.total(),
        });
    }

    tracing::info!("Fetch completed successfully");
    Ok(summary)
}
