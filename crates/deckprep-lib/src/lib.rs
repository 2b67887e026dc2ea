pub mod asset;
pub mod cli;
pub mod config;
pub mod datasource;
pub mod deck;
pub mod error;

pub use config::Config;
pub use error::DeckPrepError;
