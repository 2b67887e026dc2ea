mod builder;
mod note;
mod templates;

pub use builder::{DeckBuilder, build_model, write_package};
pub use note::{MODEL_FIELDS, anki_image, anki_json, note_fields};
pub use templates::Templates;
