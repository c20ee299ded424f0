use std::path::{Path, PathBuf};

mod catalog;
mod init;
mod order;
mod recommend;
mod replay;
mod search;
mod terminal;

use anyhow::Context as _;
use catalog::Catalog;
use clap::ArgAction;
use init::Init;
use intake::{Assistant, Config, InMemorySessionStore, StaticCatalog};
use order::Order;
use recommend::Recommend;
use replay::Replay;
use search::Search;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "intake.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run(&self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List the laptops in the catalog
    Catalog(Catalog),

    /// Search the catalog by keyword
    Search(Search),

    /// Recommend laptops for a set of requirements
    Recommend(Recommend),

    /// Walk through a laptop request interactively
    Order(Order),

    /// Replay a JSON-lines stream of actions against a fresh assistant
    ///
    /// Each line is an action object with an extra `session` key. One JSON
    /// outcome is printed per line.
    Replay(Replay),

    /// Write a default configuration file
    Init(Init),
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Catalog(command) => command.run(&build_assistant(config_path)?),
            Self::Search(command) => command.run(&build_assistant(config_path)?),
            Self::Recommend(command) => command.run(&build_assistant(config_path)?),
            Self::Order(command) => command.run(&build_assistant(config_path)?),
            Self::Replay(command) => command.run(&build_assistant(config_path)?),
            Self::Init(command) => command.run(config_path),
        }
    }
}

/// Loads the configuration, falling back to the defaults if it is missing or
/// unreadable.
fn load_config(path: &Path) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

#[instrument(level = "debug")]
fn build_assistant(config_path: &Path) -> anyhow::Result<Assistant> {
    let config = load_config(config_path);

    let catalog = match &config.catalog {
        Some(path) => StaticCatalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => StaticCatalog::reference(),
    };

    Ok(Assistant::new(catalog, InMemorySessionStore::new(), config))
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    /// Markdown text, as handed to the conversational front-end
    Report,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_config(&dir.path().join("absent.toml"));

        assert_eq!(config, Config::default());
    }

    #[test]
    fn configured_catalog_is_used() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("catalog.yaml"),
            "- id: only\n  manufacturer: Acme\n  model: One\n  processor: A1\n  memory: 8GB\n  \
             storage: 256GB\n  price: 500\n  category: Basic\n  description: Cheap\n  \
             specifications: Plain\n  use_cases: []\n  selling_points: []\n  \
             performance_score: 3\n",
        )
        .unwrap();
        let config_path = dir.path().join("intake.toml");
        std::fs::write(&config_path, "_version = \"1\"\ncatalog = \"catalog.yaml\"\n").unwrap();

        let assistant = build_assistant(&config_path).unwrap();

        let options = assistant.catalog_options(None);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].manufacturer, "Acme");
    }

    #[test]
    fn verbosity_is_global() {
        let cli = Cli::try_parse_from(["intake", "search", "dell", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Search(_)));
    }

    #[test]
    fn every_listing_command_accepts_report_output() {
        for args in [
            ["intake", "catalog", "--output", "report"].as_slice(),
            ["intake", "search", "dell", "--output", "report"].as_slice(),
            ["intake", "recommend", "--output", "report"].as_slice(),
        ] {
            assert!(Cli::try_parse_from(args).is_ok(), "{args:?}");
        }
    }
}
