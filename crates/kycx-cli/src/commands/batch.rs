//! Batch processing command for multiple KYC documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use kycx_core::models::config::KycxConfig;
use kycx_core::{ExtractionResult, FormParser};

use super::process::{
    build_parser, extract, fill_template, filled_path, format_record, load_config,
    read_document_text, OutputFormat,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fill this form template for every processed file
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
    processed_at: DateTime<Local>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(load_config(config_path)?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let template = match args.template.clone().or_else(|| config.form.template.clone()) {
        Some(path) => Some(fs::read(&path)?),
        None => None,
    };

    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = Arc::new(build_parser(&config));
    let mut pending = stream::iter(files)
        .map(|path| {
            let parser = Arc::clone(&parser);
            let config = Arc::clone(&config);
            tokio::task::spawn_blocking(move || process_single_file(path, &parser, &config))
        })
        .buffer_unordered(args.jobs.max(1));

    let mut results = Vec::new();
    while let Some(joined) = pending.next().await {
        let result = joined?;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        overall_pb.inc(1);
        results.push(result);
    }

    overall_pb.finish_with_message("Complete");
    results.sort_by(|a, b| a.path.cmp(&b.path));

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    let mut filled = 0;
    for result in &successful {
        let Some(extraction) = &result.extraction else {
            continue;
        };

        if let Some(output_dir) = &args.output_dir {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("record");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_record(extraction, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }

        if let Some(template) = &template {
            let output_path = filled_output_path(&result.path, args.output_dir.as_deref(), &config);
            let report = fill_template(template, &extraction.record, &config.form)?;
            fs::write(&output_path, &report.bytes)?;
            debug!(
                "Filled {} fields into {}",
                report.filled,
                output_path.display()
            );
            filled += 1;
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );
    if template.is_some() {
        println!("   {} forms filled", style(filled).green());
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: PathBuf, parser: &FormParser, config: &KycxConfig) -> ProcessResult {
    let file_start = Instant::now();
    let outcome = read_document_text(&path, config).and_then(|text| extract(parser, &text));

    let (extraction, error) = match outcome {
        Ok(extraction) => (Some(extraction), None),
        Err(e) => (None, Some(e.to_string())),
    };

    ProcessResult {
        path,
        extraction,
        error,
        processing_time_ms: file_start.elapsed().as_millis() as u64,
        processed_at: Local::now(),
    }
}

fn filled_output_path(input: &Path, output_dir: Option<&Path>, config: &KycxConfig) -> PathBuf {
    let path = filled_path(input, &config.form);
    match (output_dir, path.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => path,
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "total_fields",
        "name",
        "citizenship_no",
        "warnings",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let processed_at = result.processed_at.to_rfc3339();

        if let Some(extraction) = &result.extraction {
            let status = if extraction.status.is_complete() {
                "success"
            } else {
                "partial"
            };
            wtr.write_record([
                filename,
                status,
                &extraction.summary.total_fields.to_string(),
                extraction.record.get("name").unwrap_or(""),
                extraction.record.get("citizenship_no").unwrap_or(""),
                &extraction.warnings.len().to_string(),
                &result.processing_time_ms.to_string(),
                &processed_at,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                &processed_at,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
