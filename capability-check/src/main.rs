//! capability-check - print capability resolutions for a collective payload

mod config;

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use capability::{CapabilityResolver, Entity, ResolverConfig};
use config::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("capability_check={},capability={},info", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let resolver = match &args.config {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config = ResolverConfig::load(&yaml)
                .with_context(|| format!("loading {}", path.display()))?;
            CapabilityResolver::from_config(&config)?
        }
        None => CapabilityResolver::builtin(),
    };

    let payload = read_entity(&args.entity)?;
    let entity = Entity::from_json(&payload).context("parsing entity")?;
    debug!(slug = ?entity.slug, entity_type = %entity.entity_type, "Loaded entity");

    for capability in args.capabilities() {
        let resolution = resolver.resolve(Some(&entity), capability);
        if args.json {
            println!("{}", serde_json::to_string(&resolution)?);
        } else {
            println!("{}", resolution);
        }
    }

    Ok(())
}

fn read_entity(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading entity from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {}", source))
    }
}
