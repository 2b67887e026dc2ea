use crate::asset::DownloadableAsset;
use crate::datasource::Question;
use serde::Serialize;

pub const MODEL_FIELDS: [&str; 7] = [
    "ID", "Question", "Image", "Answer", "Choices", "Chapter", "Source",
];

/// JSON-encodes `value` for embedding in a single-quoted JavaScript string in a card template.
pub fn anki_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?
        .replace('\\', "\\\\")
        .replace('\'', "\\'"))
}

pub fn anki_image(asset: Option<&DownloadableAsset>) -> String {
    asset
        .and_then(DownloadableAsset::file_name)
        .map(|name| format!(r#"<img src="{name}" />"#))
        .unwrap_or_default()
}

/// Field values for one note, in [`MODEL_FIELDS`] order.
pub fn note_fields(
    question: &Question,
    sort_id_base: u32,
    image: Option<&DownloadableAsset>,
) -> Result<Vec<String>, serde_json::Error> {
    Ok(vec![
        format!("{:04}", u64::from(question.id) + u64::from(sort_id_base)),
        format!("{}. {}", question.id, question.text),
        anki_image(image),
        anki_json(&question.answer)?,
        anki_json(&question.distractors)?,
        question.chapter.clone(),
        question.source.clone(),
    ])
}
