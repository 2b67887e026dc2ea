use crate::cli::args::Command;
use crate::cli::params::{BuildParams, FetchParams};
use crate::config::{Config, load_config};
use crate::deck::Templates;
use crate::error::DeckPrepError;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Build(BuildParams),
    Fetch(FetchParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, DeckPrepError> {
    match command {
        Command::Build {
            config_path,
            output_path,
            asset_dir,
            force,
            allow_failed_downloads,
        } => {
            let app_config = load_checked_config(&config_path)?;
            let base_url = parse_base_url(&app_config)?;
            let templates = Templates::load(&app_config.model.templates)?;

            let asset_dir = asset_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| app_config.asset_dir.clone());
            let output_path = output_path
                .map(PathBuf::from)
                .unwrap_or_else(|| app_config.output.path.clone());

            Ok(ResolvedCommand::Build(BuildParams {
                app_config,
                templates,
                base_url,
                asset_dir,
                output_path,
                force,
                allow_failed_downloads,
            }))
        }
        Command::Fetch {
            config_path,
            asset_dir,
            force,
        } => {
            let app_config = load_checked_config(&config_path)?;
            let base_url = parse_base_url(&app_config)?;

            let asset_dir = asset_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| app_config.asset_dir.clone());

            Ok(ResolvedCommand::Fetch(FetchParams {
                app_config,
                base_url,
                asset_dir,
                force,
            }))
        }
    }
}

fn load_checked_config(config_path: &str) -> Result<Config, DeckPrepError> {
    tracing::info!("Loading configuration from {}", config_path);
    let app_config = load_config(config_path)?;

    if app_config.decks.is_empty() {
        return Err(DeckPrepError::CliArgumentValidation {
            details: "No decks defined in config".to_string(),
        });
    }

    Ok(app_config)
}

fn parse_base_url(app_config: &Config) -> Result<Url, DeckPrepError> {
    Url::parse(&app_config.base_url).map_err(|e| DeckPrepError::CliArgumentValidation {
        details: format!("Invalid base_url {:?}: {}", app_config.base_url, e),
    })
}
