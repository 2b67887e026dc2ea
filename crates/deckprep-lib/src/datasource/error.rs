use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed question bank XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Question {question} has no <{element}> element")]
    MissingElement { question: String, element: String },

    #[error("Question {question}: <{element}> has no {attribute} attribute")]
    MissingAttribute {
        question: String,
        element: String,
        attribute: String,
    },

    #[error("Question {question} has more than one <answer>")]
    DuplicateAnswer { question: String },

    #[error("Invalid question id {value:?}")]
    InvalidId { value: String },
}
