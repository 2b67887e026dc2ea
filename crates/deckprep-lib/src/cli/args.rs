use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Build {
        config_path: String,
        output_path: Option<String>,
        asset_dir: Option<String>,
        force: bool,
        allow_failed_downloads: bool,
    },
    Fetch {
        config_path: String,
        asset_dir: Option<String>,
        force: bool,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "deckprep",
    version,
    about = "Build flashcard deck packages from driving-test practice question banks"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Parse question banks, download their images and write the deck package
    Build {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file",
            default_value = "config.yaml"
        )]
        config: String,

        #[arg(
            short = 'o',
            long = "output",
            value_name = "FILE",
            help = "Overrides the output package path (default: <config.output.path>)"
        )]
        output: Option<String>,

        #[arg(
            long = "asset-dir",
            value_name = "DIR",
            help = "Overrides the directory downloaded images are stored in"
        )]
        asset_dir: Option<String>,

        #[arg(
            short = 'f',
            long = "force",
            help = "Download images even if a local copy exists"
        )]
        force: bool,

        #[arg(
            long = "allow-failed-downloads",
            help = "Write the package even if some images could not be downloaded"
        )]
        allow_failed_downloads: bool,
    },

    /// Parse question banks and download their images only
    Fetch {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file",
            default_value = "config.yaml"
        )]
        config: String,

        #[arg(
            long = "asset-dir",
            value_name = "DIR",
            help = "Overrides the directory downloaded images are stored in"
        )]
        asset_dir: Option<String>,

        #[arg(
            short = 'f',
            long = "force",
            help = "Download images even if a local copy exists"
        )]
        force: bool,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = match cli.command {
        CliCommand::Build {
            config,
            output,
            asset_dir,
            force,
            allow_failed_downloads,
        } => Command::Build {
            config_path: config,
            output_path: output,
            asset_dir,
            force,
            allow_failed_downloads,
        },
        CliCommand::Fetch {
            config,
            asset_dir,
            force,
        } => Command::Fetch {
            config_path: config,
            asset_dir,
            force,
        },
    };

    Args { command, log_level }
}
