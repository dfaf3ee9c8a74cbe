#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;
mod terminal;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, InitStrategy, OutlineInput, OutlineStrategy, SessionInput, SessionStrategy,
    SetsStrategy, VersionStrategy,
};
use dynsym_config::Config;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "dynsym")]
#[command(about = "Outline documents with user-defined regex pattern sets", long_about = None)]
struct Cli {
    /// Config file holding saved pattern sets [default: ~/dynsym/config.json]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outline of a file once
    Outline {
        file: PathBuf,

        /// Anchor pattern, repeatable; applied after the saved set's patterns
        #[arg(short = 'p', long = "pattern")]
        patterns: Vec<String>,

        /// Saved pattern set to use
        #[arg(short = 's', long)]
        set: Option<String>,

        /// Print symbols as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build and edit pattern sets interactively against a file
    Session {
        file: PathBuf,

        /// Keep saved sets in memory only; the config file is never touched
        #[arg(long)]
        ephemeral: bool,
    },
    /// List saved pattern sets
    Sets,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

impl Cli {
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        self.config
            .clone()
            .map_or_else(Config::default_path, Ok)
    }
}

/// `RUST_LOG` wins, then the config file's `log_filter`, then `warn`.
fn init_tracing(config_path: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let configured = config_path
            .and_then(|path| Config::load_from(path).ok())
            .and_then(|config| config.log_filter);
        EnvFilter::try_new(configured.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `version` must work without a home directory.
    let config_path = cli.config_path().ok();
    init_tracing(config_path.as_deref())?;

    match cli.command {
        Commands::Outline {
            file,
            patterns,
            set,
            json,
        } => {
            let input = OutlineInput {
                file,
                patterns,
                set,
                json,
                config_path: required(config_path)?,
            };
            OutlineStrategy.execute(input).await?;
        }
        Commands::Session { file, ephemeral } => {
            let input = SessionInput {
                file,
                config_path: required(config_path)?,
                ephemeral,
            };
            SessionStrategy.execute(input).await?;
        }
        Commands::Sets => {
            SetsStrategy.execute(required(config_path)?).await?;
        }
        Commands::Init => {
            InitStrategy.execute(required(config_path)?).await?;
        }
        Commands::Version => {
            VersionStrategy.execute(()).await?;
        }
    }

    Ok(())
}

fn required(config_path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    config_path.ok_or_else(|| {
        anyhow::anyhow!("Cannot find home directory; pass --config <PATH> instead")
    })
}
