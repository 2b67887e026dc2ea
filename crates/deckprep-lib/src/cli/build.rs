use crate::asset::{DownloadSummary, build_client, fetch_many};
use crate::cli::BuildParams;
use crate::datasource;
use crate::deck::{DeckBuilder, build_model, write_package};
use crate::error::DeckPrepError;
use std::path::PathBuf;
use tracing;

pub async fn run_build(params: BuildParams) -> Result<DownloadSummary, DeckPrepError> {
    let BuildParams {
        app_config,
        templates,
        base_url,
        asset_dir,
        output_path,
        force,
        allow_failed_downloads,
    } = params;

    let model = build_model(&app_config.model, &templates);
    let mut builder = DeckBuilder::new(model, base_url, &asset_dir);

    for deck in app_config.decks.iter() {
        tracing::info!("Reading question bank {}", deck.source.display());
        let questions = datasource::load(&deck.source)?;
        builder.add_deck(deck, &questions)?;
    }

    let assets = builder.assets();
    tracing::info!("Downloading {} assets...", assets.len());
    let client = build_client()?;
    let summary = fetch_many(&client, &assets, force).await;

    if summary.has_failures() && !allow_failed_downloads {
        return Err(DeckPrepError::AssetDownload {
            failed: summary.failed,
            total: summary.total(),
        });
    }

    let media: Vec<PathBuf> = assets
        .iter()
        .filter(|asset| {
            let present = asset.local().exists();
            if !present {
                tracing::warn!(url = %asset.url(), "Image missing, leaving it out of the package");
            }
            present
        })
        .map(|asset| asset.path().to_path_buf())
        .collect();

    tracing::info!("Writing {} decks to {}", builder.deck_count(), output_path.display());
    write_package(builder.into_decks(), &media, &output_path)?;

    tracing::info!("Deck generated.");
    Ok(summary)
}
