pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "student-records")]
#[command(about = "Academic records manager for students, programs and grades")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON document to open when the session starts
    #[arg(short, long)]
    pub open: Option<String>,

    /// Directory relative document paths are resolved against
    #[arg(long)]
    pub base_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file (if any) and lets command-line flags override it.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(base_path) = &self.base_path {
            config.storage.base_path = Some(base_path.clone());
        }
        if let Some(open) = &self.open {
            config.session.data_file = Some(open.clone());
        }
        if self.json_logs {
            config.logging.json = Some(true);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("--config", path)?;
        }
        if let Some(path) = &self.open {
            validation::validate_json_path("--open", path)?;
        }
        Ok(())
    }
}
