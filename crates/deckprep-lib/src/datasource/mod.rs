mod error;
mod parser;
mod question;

pub use error::DataSourceError;
pub use parser::{load, parse_str};
pub use question::Question;
