use super::note::{MODEL_FIELDS, note_fields};
use super::templates::Templates;
use crate::asset::{DownloadableAsset, dedup_assets};
use crate::config::{DeckConfig, ModelConfig};
use crate::datasource::Question;
use crate::error::DeckPrepError;
use genanki_rs::{Deck, Field, Model, Note, Package, Template};
use std::path::{Path, PathBuf};
use url::Url;

pub fn build_model(model_config: &ModelConfig, templates: &Templates) -> Model {
    Model::new(
        model_config.id,
        &model_config.name,
        MODEL_FIELDS.iter().map(|name| Field::new(name)).collect(),
        vec![
            Template::new(&model_config.template_name)
                .qfmt(&templates.front)
                .afmt(&templates.back),
        ],
    )
    .css(&templates.styles)
}

/// Collects notes for every configured deck together with the images they reference.
pub struct DeckBuilder {
    model: Model,
    base_url: Url,
    asset_dir: PathBuf,
    decks: Vec<Deck>,
    assets: Vec<DownloadableAsset>,
}

impl DeckBuilder {
    pub fn new(model: Model, base_url: Url, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            model,
            base_url,
            asset_dir: asset_dir.into(),
            decks: Vec::new(),
            assets: Vec::new(),
        }
    }

    /// Adds one note per question and returns the image assets of this deck.
    pub fn add_deck(
        &mut self,
        deck_config: &DeckConfig,
        questions: &[Question],
    ) -> Result<Vec<DownloadableAsset>, DeckPrepError> {
        let mut deck = Deck::new(deck_config.id, &deck_config.name, &deck_config.description);
        let mut assets = Vec::new();

        for question in questions {
            let image = question.image_asset(&self.base_url, &self.asset_dir)?;
            let fields = note_fields(question, deck_config.sort_id_base, image.as_ref())?;
            let note = Note::new(
                self.model.clone(),
                fields.iter().map(String::as_str).collect(),
            )?;
            deck.add_note(note);
            assets.extend(image);
        }

        tracing::info!(
            deck = %deck_config.name,
            notes = questions.len(),
            images = assets.len(),
            "Deck assembled"
        );

        self.decks.push(deck);
        self.assets.extend(assets.iter().cloned());
        Ok(assets)
    }

    /// Every image referenced by the added decks, without repeats.
    pub fn assets(&self) -> Vec<DownloadableAsset> {
        dedup_assets(self.assets.iter().cloned())
    }

    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    pub fn into_decks(self) -> Vec<Deck> {
        self.decks
    }
}

pub fn write_package(
    decks: Vec<Deck>,
    media_files: &[PathBuf],
    output_path: &Path,
) -> Result<(), DeckPrepError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let media: Vec<String> = media_files
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    let output = output_path.to_string_lossy();

    let mut package = Package::new(decks, media.iter().map(String::as_str).collect())?;
    package.write_to_file(&output)?;

    tracing::info!(
        output = %output_path.display(),
        media = media.len(),
        "Deck package written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplatePaths;
    use tempfile::TempDir;

    fn model() -> Model {
        let model_config = ModelConfig {
            id: 1047592961,
            name: "Practice Test Model".to_string(),
            template_name: "Practice Test".to_string(),
            templates: TemplatePaths {
                front: "front.html".into(),
                back: "back.html".into(),
                styles: "styles.css".into(),
            },
        };
        let templates = Templates {
            front: "{{ID}} {{Question}}<br>{{Image}}".to_string(),
            back: "{{FrontSide}}<hr id=answer>{{Answer}}".to_string(),
            styles: ".card { font-family: sans-serif; }".to_string(),
        };
        build_model(&model_config, &templates)
    }

    fn question(id: u32, image: Option<&str>) -> Question {
        Question {
            id,
            text: format!("Question {id}"),
            image: image.map(str::to_string),
            answer: "A".to_string(),
            distractors: vec!["B".to_string(), "C".to_string()],
            chapter: String::new(),
            source: String::new(),
            link: String::new(),
        }
    }

    fn deck_config(id: i64, sort_id_base: u32) -> DeckConfig {
        DeckConfig {
            id,
            name: format!("Deck {id}"),
            description: String::new(),
            source: "questions.xml".into(),
            sort_id_base,
        }
    }

    #[test]
    fn test_add_deck_collects_assets() {
        let temp_dir = TempDir::new().unwrap();
        let base_url = Url::parse("https://practicetest.example.com/").unwrap();
        let mut builder = DeckBuilder::new(model(), base_url, temp_dir.path());

        let assets = builder
            .add_deck(
                &deck_config(1, 0),
                &[
                    question(1, Some("images/q1.png")),
                    question(2, None),
                    question(3, Some("images/q1.png")),
                ],
            )
            .unwrap();
        builder
            .add_deck(&deck_config(2, 1000), &[question(1, Some("images/s1.gif"))])
            .unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(builder.deck_count(), 2);

        let unique = builder.assets();
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].path(), temp_dir.path().join("q1.png"));
        assert_eq!(unique[1].local().mime(), "image/gif");
    }

    #[test]
    fn test_add_deck_rejects_unguessable_image() {
        let temp_dir = TempDir::new().unwrap();
        let base_url = Url::parse("https://practicetest.example.com/").unwrap();
        let mut builder = DeckBuilder::new(model(), base_url, temp_dir.path());

        let result = builder.add_deck(&deck_config(1, 0), &[question(1, Some("images/q1"))]);

        assert!(matches!(result, Err(DeckPrepError::Asset(_))));
    }

    #[test]
    fn test_write_package() {
        let temp_dir = TempDir::new().unwrap();
        let base_url = Url::parse("https://practicetest.example.com/").unwrap();
        let mut builder = DeckBuilder::new(model(), base_url, temp_dir.path());
        builder
            .add_deck(&deck_config(1, 0), &[question(1, Some("images/q1.png"))])
            .unwrap();

        let media: Vec<PathBuf> = builder.assets().iter().map(|a| a.path().to_path_buf()).collect();
        std::fs::write(&media[0], b"\x89PNG").unwrap();

        let output = temp_dir.path().join("out").join("deck.apkg");
        write_package(builder.into_decks(), &media, &output).unwrap();

        assert!(output.is_file());
        assert!(std::fs::metadata(&output).unwrap().len() > 0);
    }
}
