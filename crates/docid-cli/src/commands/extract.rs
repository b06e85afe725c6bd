//! Extract command - read fields from a single OCR output file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde_json::json;
use tracing::{debug, info};

use docid_core::response::ExtractionResponse;
use docid_core::{
    extract_document, BasicNidRequest, BirthAutofillRequest, ExtractedDocument, VerificationRequest,
};
use docid_core::models::VerificationConfig;

use super::{load_config, load_lines, KindArg};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (.json block dump or array, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type
    #[arg(short, long, value_enum)]
    kind: KindArg,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Verify MRZ check digits (passports only; reported, never fatal)
    #[arg(long)]
    check_digits: bool,

    /// Print the verification API request instead of the extracted fields
    #[arg(long)]
    verification_request: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.check_digits {
        config.extraction.validate_mrz_check_digits = true;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let lines = load_lines(&args.input)?;
    let result = extract_document(args.kind.into(), &lines, &config.extraction);

    let output = match (&result, args.verification_request) {
        (Ok(document), true) => format_verification_request(document, &config.verification)?,
        _ => {
            let response = ExtractionResponse::from(result.clone());
            format_response(&response, args.format)?
        }
    };

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

    if let Err(err) = result {
        anyhow::bail!("extraction failed ({}): {}", err.status_code(), err);
    }

    Ok(())
}

fn format_response(response: &ExtractionResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Text => Ok(format_text(response)),
    }
}

fn format_verification_request(
    document: &ExtractedDocument,
    config: &VerificationConfig,
) -> anyhow::Result<String> {
    let request = match document {
        ExtractedDocument::NationalId(fields) => {
            VerificationRequest::BasicNid(BasicNidRequest::from_identity(fields)?)
        }
        ExtractedDocument::BirthRegistration(result) => {
            VerificationRequest::BirthAutofill(BirthAutofillRequest::from(result))
        }
        ExtractedDocument::Passport(_) => {
            anyhow::bail!("passports have no verification request")
        }
    };

    let envelope = json!({
        "url": request.endpoint(config),
        "api_key_env": config.api_key_env,
        "body": request,
    });
    Ok(serde_json::to_string_pretty(&envelope)?)
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn format_text(response: &ExtractionResponse) -> String {
    let mut out = String::new();

    match response {
        ExtractionResponse::Nid(nid) => {
            out.push_str(&format!("Status: {}\n", nid.status));
            out.push_str(&format!("Name: {}\n", or_dash(&nid.nid_data.name)));
            out.push_str(&format!("Date of birth: {}\n", or_dash(&nid.nid_data.date_of_birth)));
            out.push_str(&format!("ID number: {}\n", or_dash(&nid.nid_data.id_number)));
        }
        ExtractionResponse::BirthRegistration(birth) => {
            out.push_str(&format!("{}\n", birth.message));
            out.push_str(&format!(
                "Registration number: {}\n",
                birth.data.birth_registration_number
            ));
            out.push_str(&format!("Date of birth: {}\n", birth.data.date_of_birth));
        }
        ExtractionResponse::Passport(passport) => {
            let data = &passport.passport_data;
            let date = |d: &Option<docid_core::models::MrzDate>| {
                d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
            };

            out.push_str(&format!("Status: {}\n", passport.status));
            out.push_str(&format!("Name: {}\n", or_dash(&data.name)));
            out.push_str(&format!("Passport number: {}\n", or_dash(&data.passport_number)));
            out.push_str(&format!("Birth date: {}\n", date(&data.birth_date)));
            out.push_str(&format!("Expiration date: {}\n", date(&data.expiration_date)));
            out.push_str(&format!("Personal number: {}\n", or_dash(&data.personal_number)));
            if let Some(report) = &data.check_digits {
                out.push_str(&format!(
                    "Check digits: {}\n",
                    if report.all_valid() { "valid" } else { "INVALID" }
                ));
            }
        }
        ExtractionResponse::Error(err) => {
            out.push_str(&format!("Error {}: {}\n", err.status_code, err.message));
        }
    }

    out.trim_end().to_string()
}
