//! Folio command - resolve the invoice folio of a payment order.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use vale_core::models::{DocumentIdentity, DocumentKind};
use vale_core::{ExtractionEngine, FolioResolver, TextLayers};

use super::config::load_config;
use super::process::read_sources;

/// Arguments for the folio command.
#[derive(Args)]
pub struct FolioArgs {
    /// Payment order (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Vendor name (default: the order's extracted proveedor)
    #[arg(long)]
    vendor: Option<String>,
}

pub async fn run(args: FolioArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let layers = TextLayers::from_config(&config.pdf)?;
    let sources = read_sources(&args.input, &layers)?;

    let vendor = match args.vendor {
        Some(vendor) => vendor,
        None => {
            let engine = ExtractionEngine::from_config(&config.extraction)?;
            let record = engine.extract(
                DocumentKind::Orden,
                &sources,
                None,
                &DocumentIdentity::from_path(&args.input),
            );
            record.text("proveedor").unwrap_or_default().to_string()
        }
    };

    let resolver = FolioResolver::standard();
    info!("Vendor '{}' uses branch '{}'", vendor, resolver.select(&vendor).name);

    let folio = resolver.resolve(&sources.merged(), &vendor);
    if folio.is_empty() {
        anyhow::bail!("No folio found in {}", args.input.display());
    }

    println!("{}", folio);
    Ok(())
}
