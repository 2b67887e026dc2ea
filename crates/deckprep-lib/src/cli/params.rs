use crate::config::Config;
use crate::deck::Templates;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub struct BuildParams {
    pub app_config: Config,
    pub templates: Templates,
    pub base_url: Url,
    pub asset_dir: PathBuf,
    pub output_path: PathBuf,
    pub force: bool,
    pub allow_failed_downloads: bool,
}

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub app_config: Config,
    pub base_url: Url,
    pub asset_dir: PathBuf,
    pub force: bool,
}
