//! Process command - extract data from a single KYC document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use kycx_core::form::FillReport;
use kycx_core::models::config::{FormConfig, KycxConfig};
use kycx_core::pdf::{PdfExtractor, PdfProcessor};
use kycx_core::{
    normalize_text, AcroFormFiller, Category, DocumentParser, ExtractedRecord, ExtractionResult,
    ExtractionStatus, FieldCatalog, FieldMapper, FieldSink, FormParser,
};

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

    /// Fill the form template with the extracted record
    #[arg(long)]
    fill: bool,

    /// Form template (overrides form.template from the config)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Where to write the filled form (default: next to the input)
    #[arg(long)]
    filled_output: Option<PathBuf>,

    /// Show per-field confidence scores
    #[arg(long)]
    show_confidence: bool,

    /// Print the normalized document text and exit
    #[arg(long)]
    dump_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text grouped by category
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading text...");
    pb.set_position(10);
    let text = read_document_text(&args.input, &config)?;

    if args.dump_text {
        pb.finish_and_clear();
        println!("{}", text);
        return Ok(());
    }

    pb.set_message("Extracting fields...");
    pb.set_position(50);
    let parser = build_parser(&config);
    let result = extract(&parser, &text)?;

    if args.fill {
        pb.set_message("Filling form...");
        pb.set_position(80);

        let template = args
            .template
            .clone()
            .or_else(|| config.form.template.clone())
            .ok_or_else(|| anyhow::anyhow!("No form template given; pass --template or set form.template"))?;
        let output_path = args
            .filled_output
            .clone()
            .unwrap_or_else(|| filled_path(&args.input, &config.form));

        let report = fill_template(&fs::read(&template)?, &result.record, &config.form)?;
        fs::write(&output_path, &report.bytes)?;

        pb.suspend(|| {
            println!(
                "{} Filled {} form fields into {}",
                style("✓").green(),
                report.filled,
                output_path.display()
            )
        });
        if !report.unmatched.is_empty() {
            debug!("Updates with no template field: {:?}", report.unmatched);
        }
    }

    pb.finish_and_clear();

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_record(&result, args.format)?;

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

    if args.show_confidence {
        println!();
        println!("{}", format_confidence(&result));
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the config file given on the command line, or defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<KycxConfig> {
    Ok(match config_path {
        Some(path) => KycxConfig::from_file(Path::new(path))?,
        None => KycxConfig::default(),
    })
}

pub(crate) fn build_parser(config: &KycxConfig) -> FormParser {
    FormParser::new(Arc::new(FieldCatalog::standard())).with_config(&config.extraction)
}

/// Read a PDF or text file into normalized document text.
pub(crate) fn read_document_text(path: &Path, config: &KycxConfig) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new().with_max_pages(config.pdf.max_pages);
            extractor.load(&data)?;

            let content = extractor.extract_all()?;
            debug!(
                "{}: {} pages, {} with text",
                path.display(),
                content.page_count,
                content.pages_with_text
            );
            if content.text.len() < config.pdf.min_text_length {
                warn!(
                    "{} has only {} characters of embedded text",
                    path.display(),
                    content.text.len()
                );
            }
            content.text
        }
        "txt" => normalize_text(&fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }

    Ok(text)
}

/// Parse document text, turning a discarded record into an error.
pub(crate) fn extract(parser: &FormParser, text: &str) -> anyhow::Result<ExtractionResult> {
    let result = parser.parse(text);
    if let ExtractionStatus::Failed { category, reason } = &result.status {
        anyhow::bail!("Extraction failed in {}: {}", category, reason);
    }
    Ok(result)
}

/// Map a record onto a template and fill it.
pub(crate) fn fill_template(
    template: &[u8],
    record: &ExtractedRecord,
    form: &FormConfig,
) -> anyhow::Result<FillReport> {
    let updates = FieldMapper::from_config(form).map(record);
    let mut filler = AcroFormFiller::load(template)?.with_need_appearances(form.need_appearances);
    Ok(filler.fill(&updates)?)
}

/// Default location of the filled form: `<input stem><suffix>.pdf` beside the input.
pub(crate) fn filled_path(input: &Path, form: &FormConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("kyc");
    input.with_file_name(format!("{}{}.pdf", stem, form.output_suffix))
}

pub(crate) fn format_record(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.record)?),
        OutputFormat::Csv => format_csv(&result.record),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(record.iter().map(|(key, _)| key))?;
    wtr.write_record(record.iter().map(|(_, value)| value))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    for category in Category::ALL {
        let present: Vec<(String, &str)> = category
            .fields()
            .iter()
            .map(|field| category.output_key(field))
            .filter_map(|key| result.record.get(&key).map(|value| (key.clone(), value)))
            .collect();

        if present.is_empty() {
            continue;
        }

        output.push_str(&format!("{}:\n", category));
        for (key, value) in present {
            output.push_str(&format!("  {:<28} {}\n", key, value));
        }
        output.push('\n');
    }

    if let ExtractionStatus::Partial { failed } = &result.status {
        let names: Vec<&str> = failed.iter().map(Category::as_str).collect();
        output.push_str(&format!("Skipped categories: {}\n", names.join(", ")));
    }

    output.push_str(&format!("Total fields: {}\n", result.summary.total_fields));
    output
}

fn format_confidence(result: &ExtractionResult) -> String {
    let mut output = String::from("Field confidence:\n");
    for (key, confidence) in &result.field_confidence {
        output.push_str(&format!("  {:<28} {:.0}%\n", key, confidence * 100.0));
    }
    output
}
