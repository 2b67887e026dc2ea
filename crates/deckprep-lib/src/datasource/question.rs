use crate::asset::{AssetError, DownloadableAsset};
use serde::Serialize;
use std::path::Path;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    /// One-based question number
    pub id: u32,
    pub text: String,
    /// Image path relative to the question bank's base URL
    pub image: Option<String>,
    pub answer: String,
    pub distractors: Vec<String>,
    pub chapter: String,
    pub source: String,
    pub link: String,
}

impl Question {
    pub fn image_url(&self, base_url: &Url) -> Result<Option<Url>, AssetError> {
        let Some(image) = self.image.as_deref().filter(|image| !image.is_empty()) else {
            return Ok(None);
        };

        base_url
            .join(image)
            .map(Some)
            .map_err(|e| AssetError::Configuration {
                reason: format!("invalid image path {image} for question {}: {e}", self.id),
            })
    }

    pub fn image_asset(
        &self,
        base_url: &Url,
        asset_dir: &Path,
    ) -> Result<Option<DownloadableAsset>, AssetError> {
        self.image_url(base_url)?
            .map(|url| DownloadableAsset::resolve(url.as_str(), asset_dir, None, None))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn question(image: Option<&str>) -> Question {
        Question {
            id: 1,
            text: "What does this sign mean?".to_string(),
            image: image.map(str::to_string),
            answer: "Stop".to_string(),
            distractors: vec!["Yield".to_string()],
            chapter: String::new(),
            source: String::new(),
            link: String::new(),
        }
    }

    #[test]
    fn test_image_url_joins_base() {
        let base = Url::parse("https://practicetest.example.com/").unwrap();

        let url = question(Some("images/opkt/q1.png")).image_url(&base).unwrap();

        assert_eq!(
            url.unwrap().as_str(),
            "https://practicetest.example.com/images/opkt/q1.png"
        );
    }

    #[test]
    fn test_image_asset_absent_without_image() {
        let temp_dir = TempDir::new().unwrap();
        let base = Url::parse("https://practicetest.example.com/").unwrap();

        assert!(question(None).image_asset(&base, temp_dir.path()).unwrap().is_none());
        assert!(question(Some("")).image_asset(&base, temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_image_asset_resolves_into_asset_dir() {
        let temp_dir = TempDir::new().unwrap();
        let base = Url::parse("https://practicetest.example.com/").unwrap();

        let asset = question(Some("images/opkt/q8.png"))
            .image_asset(&base, temp_dir.path())
            .unwrap()
            .unwrap();

        assert_eq!(asset.path(), temp_dir.path().join("q8.png"));
        assert_eq!(asset.local().mime(), "image/png");
    }
}
