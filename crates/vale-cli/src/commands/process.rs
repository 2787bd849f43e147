//! Process command - extract fields from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use vale_core::models::{DocumentIdentity, DocumentKind, Record};
use vale_core::{DocumentSources, ExtractionEngine, TableOverrides, TextLayers};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document kind
    #[arg(short, long, value_enum, default_value = "auto")]
    kind: KindArg,

    /// Robust text variant for plain-text input
    #[arg(long)]
    text_b: Option<PathBuf>,

    /// Table overrides: a JSON object, inline or as a file path
    #[arg(long)]
    overrides: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Detect from the text
    Auto,
    /// Purchase voucher
    Vale,
    /// Payment order
    Orden,
}

impl KindArg {
    pub fn kind(self) -> Option<DocumentKind> {
        match self {
            KindArg::Auto => None,
            KindArg::Vale => Some(DocumentKind::Vale),
            KindArg::Orden => Some(DocumentKind::Orden),
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    pb.set_message("Reading text layers...");
    let layers = TextLayers::from_config(&config.pdf)?;
    let mut sources = read_sources(&args.input, &layers)?;
    if let Some(text_b) = &args.text_b {
        sources.robust = fs::read_to_string(text_b)?;
    }
    if sources.text_length() < config.extraction.min_text_length {
        warn!(
            "{} has only {} characters of text",
            args.input.display(),
            sources.text_length()
        );
    }

    let overrides = args.overrides.as_deref().map(parse_overrides).transpose()?;

    pb.set_message("Extracting fields...");
    let engine = ExtractionEngine::from_config(&config.extraction)?;
    let identity = DocumentIdentity::from_path(&args.input);
    let record = match args.kind.kind() {
        Some(kind) => engine.extract(kind, &sources, overrides.as_ref(), &identity),
        None => engine.extract_auto(&sources, overrides.as_ref(), &identity),
    };

    pb.finish_and_clear();

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Resolve an input file into its two text variants.
pub fn read_sources(path: &Path, layers: &TextLayers) -> anyhow::Result<DocumentSources> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(layers.extract(&data)?)
        }
        "txt" => Ok(DocumentSources::from_text(fs::read_to_string(path)?)),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Whether a path has an extension `read_sources` accepts.
pub fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
}

fn parse_overrides(value: &str) -> anyhow::Result<TableOverrides> {
    let json = if value.trim_start().starts_with('{') {
        value.to_string()
    } else {
        fs::read_to_string(value)?
    };
    Ok(serde_json::from_str(&json)?)
}

pub fn format_record(record: &Record, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &Record) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["file_name", "kind"];
    header.extend(record.fields.keys().map(String::as_str));
    wtr.write_record(&header)?;

    let mut row = vec![record.file_name.clone(), record.kind.to_string()];
    row.extend(
        record
            .fields
            .values()
            .map(|v| v.as_ref().map(|v| v.to_string()).unwrap_or_default()),
    );
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &Record) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", record.kind, record.file_name));
    output.push('\n');

    let width = record.fields.keys().map(String::len).max().unwrap_or(0);
    for (name, value) in &record.fields {
        let value = value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!("  {:width$}  {}\n", name, value, width = width));
    }

    output.push_str(&format!(
        "\n{}/{} fields found\n",
        record.found_count(),
        record.fields.len()
    ));
    if let Some(total) = record.amount("total") {
        output.push_str(&format!("Total amount: {}\n", total));
    }
    output
}
