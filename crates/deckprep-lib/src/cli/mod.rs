mod args;
mod build;
mod fetch;
mod params;
mod resolved_command;

pub use args::{Args, Command, parse_args};
pub use build::run_build;
pub use fetch::run_fetch;
pub use params::{BuildParams, FetchParams};
pub use resolved_command::{ResolvedCommand, resolve_command};
