//! Batch command - run one extractor over many OCR output files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{debug, warn};

use docid_core::models::{ExtractionConfig, ExtractionStatus};
use docid_core::response::ExtractionResponse;
use docid_core::{extract_document, DocumentKind};

use super::{load_config, load_lines, KindArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Document type
    #[arg(short, long, value_enum)]
    kind: KindArg,

    /// Directory for one JSON response per input file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write a CSV summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Verify MRZ check digits (passports only)
    #[arg(long)]
    check_digits: bool,
}

/// Outcome for a single file.
struct FileResult {
    path: PathBuf,
    response: Option<ExtractionResponse>,
    error: Option<String>,
}

impl FileResult {
    fn status(&self) -> &'static str {
        match &self.response {
            None => "error",
            Some(ExtractionResponse::Error(_)) => "fail",
            Some(ExtractionResponse::Nid(r)) if r.status == ExtractionStatus::Fail => "fail",
            Some(ExtractionResponse::Passport(r)) if r.status == ExtractionStatus::Fail => "fail",
            Some(_) => "success",
        }
    }

    fn status_code(&self) -> String {
        self.response
            .as_ref()
            .map(|r| r.status_code().to_string())
            .unwrap_or_default()
    }

    fn detail(&self) -> String {
        let Some(response) = &self.response else {
            return self.error.clone().unwrap_or_default();
        };

        match response {
            ExtractionResponse::Nid(r) => r.nid_data.id_number.clone().unwrap_or_default(),
            ExtractionResponse::BirthRegistration(r) => r.data.birth_registration_number.clone(),
            ExtractionResponse::Passport(r) => {
                r.passport_data.passport_number.clone().unwrap_or_default()
            }
            ExtractionResponse::Error(r) => r.message.clone(),
        }
    }
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.check_digits {
        config.extraction.validate_mrz_check_digits = true;
    }

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let kind = DocumentKind::from(args.kind);
    let results: Vec<FileResult> = files
        .into_iter()
        .map(|path| process_single_file(path, kind, &config.extraction))
        .collect();

    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            if let Some(response) = &result.response {
                let stem = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path = output_dir.join(format!("{}.json", stem));
                fs::write(&output_path, serde_json::to_string_pretty(response)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if let Some(ref summary_path) = args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.status() == "success").count();
    let failed: Vec<_> = results.iter().filter(|r| r.status() != "success").collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            let detail = result.detail();
            println!(
                "  - {}: {}",
                result.path.display(),
                if detail.is_empty() { result.status() } else { detail.as_str() }
            );
        }
    }

    Ok(())
}

fn process_single_file(path: PathBuf, kind: DocumentKind, config: &ExtractionConfig) -> FileResult {
    match load_lines(&path) {
        Ok(lines) => {
            let response = ExtractionResponse::from(extract_document(kind, &lines, config));
            debug!("{}: status {}", path.display(), response.status_code());
            FileResult {
                path,
                response: Some(response),
                error: None,
            }
        }
        Err(e) => {
            warn!("Failed to read {}: {:#}", path.display(), e);
            FileResult {
                path,
                response: None,
                error: Some(format!("{:#}", e)),
            }
        }
    }
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "status_code", "detail"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        wtr.write_record([
            filename,
            result.status(),
            &result.status_code(),
            &result.detail(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
