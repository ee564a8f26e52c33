//! Care Admin
//!
//! Desktop admin panel for the caregiver management REST API.
//!
//! This is the main entry point for the Dioxus Desktop application.
//!
//! ```bash
//! # Run against the configured backend (CAREADMIN_* variables)
//! careadmin
//!
//! # Override the backend and the table registry
//! careadmin --api-base http://10.0.0.5:8000 --schema-file tables.json
//!
//! # Write the built-in registry as a starting point for a custom one
//! careadmin --write-schema tables.json
//!
//! # Validate a registry file without opening a window
//! careadmin --schema-file tables.json --check-schema
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use careadmin_client::AdminConfig;
use careadmin_core::Validatable;
use careadmin_schema::{TableRegistry, load_registry, save_registry};

#[derive(Parser, Debug)]
#[command(name = "careadmin", version, about = "Care Admin desktop panel")]
struct Args {
    /// Backend origin (overrides CAREADMIN_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Registry file replacing the built-in tables (overrides CAREADMIN_SCHEMA_FILE)
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// Write the built-in registry to this file and exit
    #[arg(long, value_name = "PATH")]
    write_schema: Option<PathBuf>,

    /// Validate the registry and exit
    #[arg(long)]
    check_schema: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.write_schema {
        save_registry(&TableRegistry::standard(), path)
            .with_context(|| format!("writing registry to {}", path.display()))?;
        info!("Wrote built-in registry to {}", path.display());
        return Ok(());
    }

    let mut config = AdminConfig::from_env().context("reading configuration")?;
    if let Some(api_base) = args.api_base {
        config.api_base = api_base.trim_end_matches('/').to_string();
    }
    if args.schema_file.is_some() {
        config.schema_file = args.schema_file;
    }
    config.validate().context("invalid configuration")?;

    let registry = match &config.schema_file {
        Some(path) => load_registry(path)
            .with_context(|| format!("loading registry from {}", path.display()))?,
        None => TableRegistry::standard(),
    };
    registry.validate().context("invalid table registry")?;

    if args.check_schema {
        info!("Registry is valid: {} tables", registry.len());
        return Ok(());
    }

    info!(api_base = %config.api_base, tables = registry.len(), "Starting Care Admin");

    // Launch the Dioxus desktop application
    careadmin_ui::launch(config, registry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_overrides() {
        let args = Args::parse_from([
            "careadmin",
            "--api-base",
            "http://10.0.0.5:8000/",
            "--schema-file",
            "tables.json",
            "--check-schema",
        ]);
        assert_eq!(args.api_base.as_deref(), Some("http://10.0.0.5:8000/"));
        assert_eq!(args.schema_file, Some(PathBuf::from("tables.json")));
        assert!(args.check_schema);
        assert!(args.write_schema.is_none());
    }
}
