use crate::config::TemplatePaths;
use crate::error::DeckPrepError;
use std::path::Path;

/// Card template sources, loaded once and handed to model construction.
#[derive(Clone, Debug)]
pub struct Templates {
    pub front: String,
    pub back: String,
    pub styles: String,
}

impl Templates {
    pub fn load(paths: &TemplatePaths) -> Result<Self, DeckPrepError> {
        Ok(Self {
            front: read_template("front", &paths.front)?,
            back: read_template("back", &paths.back)?,
            styles: read_template("styles", &paths.styles)?,
        })
    }
}

fn read_template(kind: &str, path: &Path) -> Result<String, DeckPrepError> {
    tracing::info!("Loading {} template from {}", kind, path.display());
    std::fs::read_to_string(path).map_err(|e| DeckPrepError::TemplateLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
