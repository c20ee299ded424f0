use std::path::{Path, PathBuf};

use intake::Config;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// YAML catalog to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration already exists at {} (use --force to overwrite)",
                config_path.display()
            );
        }

        let mut config = Config::default();
        config.catalog = self.catalog;
        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", config_path.display()))?;

        println!("Created {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("  intake catalog");
        println!("  intake recommend --use-case \"video editing\" --output report");

        Ok(())
    }
}
