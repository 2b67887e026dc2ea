use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Image paths in the question banks are relative to this URL
    pub base_url: String,
    pub asset_dir: PathBuf,
    pub output: OutputConfig,
    pub model: ModelConfig,
    pub decks: Vec<DeckConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub id: i64,
    pub name: String,
    pub template_name: String,
    pub templates: TemplatePaths,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatePaths {
    pub front: PathBuf,
    pub back: PathBuf,
    pub styles: PathBuf,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeckConfig {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Question bank XML file
    pub source: PathBuf,
    /// Added to question ids to keep sort keys unique across decks
    #[serde(default)]
    pub sort_id_base: u32,
}
