use deckprep_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_build, run_fetch};
use deckprep_lib::error::DeckPrepError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), DeckPrepError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Build(params) => {
            run_build(params).await?;
        }
        ResolvedCommand::Fetch(params) => {
            run_fetch(params).await?;
        }
    }

    Ok(())
}
