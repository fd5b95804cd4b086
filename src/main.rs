//! Contact masking CLI.
//!
//! Takes a PDF, masks contact details, writes the masked copy and prints
//! the masking report. Diagnostics go to stderr through `tracing`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pii_masker::masking::DEFAULT_CONFIDENCE_THRESHOLD;
use pii_masker::{ContactMasker, MaskerConfig};

/// Contact PII Redaction
///
/// Mask emails, phone numbers, LinkedIn URLs and photos in PDF résumés.
/// By default, performs masking. Use 'extract' subcommand for text extraction.
#[derive(Parser)]
#[command(name = "pii-masker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF file path
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file path (defaults to masked_<input> next to the input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Keep embedded images instead of covering them
    #[arg(long)]
    keep_photos: bool,

    /// Also redact postal addresses
    #[arg(long)]
    addresses: bool,

    /// Also redact lines with landmark keywords (near, beside, opposite, ...)
    #[arg(long)]
    landmarks: bool,

    /// Repair contact details broken by whitespace before matching
    #[arg(long)]
    normalize: bool,

    /// Detection confidence (unused for regex matching)
    #[arg(
        long,
        value_name = "THRESHOLD",
        env = "PII_MASKER_CONFIDENCE",
        default_value_t = DEFAULT_CONFIDENCE_THRESHOLD
    )]
    confidence: f32,

    /// Write the masking report to this file
    #[arg(long, value_name = "FILE", conflicts_with = "save_report")]
    report: Option<PathBuf>,

    /// Write the masking report next to the output as <output>_report.txt
    #[arg(long)]
    save_report: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF (for debugging and verification)
    Extract {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Masking command handler.
struct MaskHandler {
    masker: ContactMasker,
    verbose: bool,
}

impl MaskHandler {
    fn new(config: MaskerConfig, verbose: bool) -> Result<Self> {
        let masker = ContactMasker::new(config).context("Invalid masking options")?;
        Ok(Self { masker, verbose })
    }

    /// Masks `input` into `output` and writes the report if requested.
    fn mask(&self, input: &Path, output: &Path, report_path: Option<&Path>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        tracing::debug!(input = %input.display(), output = %output.display(), "Masking");

        let result = self
            .masker
            .mask(input, output)
            .with_context(|| "Masking failed")?;

        if self.verbose {
            println!("Masking Summary:");
            println!("  Pages processed: {}", result.pages_processed);
            println!("  Pages modified:  {}", result.pages_modified);
            println!("  Pages skipped:   {}", result.pages_skipped);
            println!("  Images covered:  {}", result.images_redacted);
            println!("  Spans redacted:  {}", result.spans_redacted);
            println!();
        }

        println!(
            "✓ Redaction complete: {} item(s) masked → {}",
            result.items_redacted,
            output.display()
        );

        let report = result.report();
        println!();
        print!("{}", report);

        if let Some(path) = report_path {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✓ Report saved → {}", path.display());
        }

        Ok(())
    }
}

/// Extracts text from a PDF.
fn extract(input: &Path, output: Option<&Path>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let text = pii_masker::extract_text(input).with_context(|| "Text extraction failed")?;

    if let Some(output_path) = output {
        std::fs::write(output_path, &text)
            .with_context(|| format!("Failed to write to {}", output_path.display()))?;
        println!(
            "✓ Extracted {} characters → {}",
            text.len(),
            output_path.display()
        );
    } else {
        println!("{}", text);
    }

    Ok(())
}

/// `masked_<file name>` in the input's directory.
fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    input.with_file_name(format!("masked_{}", name))
}

/// `<output stem>_report.txt` next to the output.
fn default_report_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "masked".to_string());
    output.with_file_name(format!("{}_report.txt", stem))
}

fn build_config(cli: &Cli) -> MaskerConfig {
    MaskerConfig::new()
        .with_remove_photos(!cli.keep_photos)
        .with_address_detection(cli.addresses)
        .with_landmark_detection(cli.landmarks)
        .with_normalization(cli.normalize)
        .with_confidence_threshold(cli.confidence)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Extract { input, output }) => {
            extract(input, output.as_deref())?;
        }
        None => {
            let input = cli
                .input
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("--input is required"))?;
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(input));

            let report_path = match (&cli.report, cli.save_report) {
                (Some(path), _) => Some(path.clone()),
                (None, true) => Some(default_report_path(&output)),
                (None, false) => None,
            };

            let handler = MaskHandler::new(build_config(&cli), cli.verbose)?;
            handler.mask(input, &output, report_path.as_deref())?;
        }
    }

    Ok(())
}
