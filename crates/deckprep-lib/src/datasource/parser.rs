use super::error::DataSourceError;
use super::question::Question;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;

/// Questions live at `<bank><questions><question>`.
const QUESTIONS_DEPTH: usize = 2;

#[derive(Default)]
struct PartialQuestion {
    raw_id: String,
    text: Option<String>,
    image: Option<String>,
    answer: Option<String>,
    distractors: Vec<String>,
    chapter: Option<String>,
    source: Option<String>,
    link: Option<String>,
}

impl PartialQuestion {
    fn finish(self) -> Result<Question, DataSourceError> {
        let id = self
            .raw_id
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|id| id.checked_add(1))
            .ok_or_else(|| DataSourceError::InvalidId {
                value: self.raw_id.clone(),
            })?;

        let missing = |element: &str| DataSourceError::MissingElement {
            question: self.raw_id.clone(),
            element: element.to_string(),
        };

        Ok(Question {
            id,
            text: self.text.ok_or_else(|| missing("text"))?,
            image: self.image,
            answer: self.answer.ok_or_else(|| missing("answer"))?,
            distractors: self.distractors,
            chapter: self.chapter.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            link: self.link.ok_or_else(|| missing("link"))?,
        })
    }
}

struct OpenElement {
    name: String,
    text: String,
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Question>, DataSourceError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let questions = parse_str(&xml)?;
    tracing::info!("{} questions loaded from {}", questions.len(), path.display());
    Ok(questions)
}

pub fn parse_str(xml: &str) -> Result<Vec<Question>, DataSourceError> {
    let mut reader = Reader::from_str(xml);

    let mut questions = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut current: Option<PartialQuestion> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => open_element(&e, &mut stack, &mut current, questions.len())?,
            Event::Empty(e) => {
                open_element(&e, &mut stack, &mut current, questions.len())?;
                close_element(&mut stack, &mut current, &mut questions)?;
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => close_element(&mut stack, &mut current, &mut questions)?,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(questions)
}

fn open_element(
    e: &BytesStart<'_>,
    stack: &mut Vec<OpenElement>,
    current: &mut Option<PartialQuestion>,
    parsed: usize,
) -> Result<(), DataSourceError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    if stack.len() == QUESTIONS_DEPTH && stack[1].name == "questions" && name == "question" {
        let raw_id = attribute(e, "id")?.ok_or_else(|| DataSourceError::MissingAttribute {
            question: format!("#{}", parsed + 1),
            element: "question".to_string(),
            attribute: "id".to_string(),
        })?;
        *current = Some(PartialQuestion {
            raw_id,
            ..Default::default()
        });
    } else if stack.len() == QUESTIONS_DEPTH + 1 {
        if let Some(question) = current.as_mut() {
            match name.as_str() {
                "image" => question.image = attribute(e, "file")?,
                "link" => question.link = Some(attribute(e, "src")?.unwrap_or_default()),
                _ => {}
            }
        }
    }

    stack.push(OpenElement {
        name,
        text: String::new(),
    });
    Ok(())
}

fn close_element(
    stack: &mut Vec<OpenElement>,
    current: &mut Option<PartialQuestion>,
    questions: &mut Vec<Question>,
) -> Result<(), DataSourceError> {
    let Some(OpenElement { name, text }) = stack.pop() else {
        return Ok(());
    };

    if stack.len() == QUESTIONS_DEPTH && name == "question" {
        if let Some(question) = current.take() {
            questions.push(question.finish()?);
        }
        return Ok(());
    }

    let Some(question) = current.as_mut() else {
        return Ok(());
    };
    let value = text.trim().to_string();
    let in_answers =
        stack.len() == QUESTIONS_DEPTH + 2 && stack[QUESTIONS_DEPTH + 1].name == "answers";

    match name.as_str() {
        "text" if stack.len() == QUESTIONS_DEPTH + 1 => question.text = Some(value),
        "chapter" if stack.len() == QUESTIONS_DEPTH + 1 => question.chapter = Some(value),
        "source" if stack.len() == QUESTIONS_DEPTH + 1 => question.source = Some(value),
        "answer" if in_answers => {
            if question.answer.is_some() {
                return Err(DataSourceError::DuplicateAnswer {
                    question: question.raw_id.clone(),
                });
            }
            question.answer = Some(value);
        }
        distractor if in_answers && distractor.starts_with("distractor_") => {
            question.distractors.push(value)
        }
        _ => {
            // Inline markup inside a field keeps its text.
            if let Some(parent) = stack.last_mut() {
                parent.text.push_str(&text);
            }
        }
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, DataSourceError> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}
