//! `kycx`: pull applicant data out of bilingual (English and glyph-transliterated
//! Nepali) KYC forms and write it into an editable AcroForm template.
//!
//! Every command reads plain text or a PDF text layer. No OCR is done, so scanned
//! forms need a text layer first.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, fields, process};

/// Extract applicant, address, family, bank and declaration fields from KYC forms
#[derive(Parser)]
#[command(name = "kycx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one KYC form and optionally fill the template with it
    Process(process::ProcessArgs),

    /// Extract every KYC form matching a glob, with an optional summary CSV
    Batch(batch::BatchArgs),

    /// List the extracted fields per category, or a template's form fields
    Fields(fields::FieldsArgs),

    /// Manage extraction and form-filling configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Fields(args) => fields::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
