//! Command-line configuration for capability-check.

use clap::Parser;
use std::path::PathBuf;

use capability::Capability;

/// Inspect how capabilities resolve for a collective payload
#[derive(Parser, Debug, Clone)]
#[command(name = "capability-check")]
#[command(about = "Show which capabilities are enabled for a collective")]
pub struct Args {
    /// Entity JSON file, or `-` for stdin
    #[arg(long, env = "CAPABILITY_ENTITY", default_value = "-")]
    pub entity: String,

    /// Only resolve this capability (e.g. PAYPAL_PAYOUTS)
    #[arg(long)]
    pub capability: Option<Capability>,

    /// Resolver tables as YAML; built-in tables when omitted
    #[arg(long, env = "CAPABILITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print resolutions as JSON lines
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.entity.is_empty() {
            return Err("--entity must name a file or `-`".to_string());
        }
        if let Some(path) = &self.config {
            if !path.is_file() {
                return Err(format!("Config file not found: {}", path.display()));
            }
        }
        Ok(())
    }

    /// Capabilities to report on.
    pub fn capabilities(&self) -> Vec<Capability> {
        match self.capability {
            Some(capability) => vec![capability],
            None => Capability::all(),
        }
    }
}
