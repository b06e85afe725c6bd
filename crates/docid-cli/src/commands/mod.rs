//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use docid_core::models::{DocidConfig, LineSequence, OcrDocument};
use docid_core::DocumentKind;

/// Document type selector.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// National ID card
    Nid,
    /// Birth registration certificate
    Birth,
    /// Passport (TD3 MRZ)
    Passport,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Nid => DocumentKind::NationalId,
            KindArg::Birth => DocumentKind::BirthRegistration,
            KindArg::Passport => DocumentKind::Passport,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docid")
        .join("config.json")
}

/// The `--config` file, else the default file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocidConfig> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => {
            let path = default_config_path();
            if !path.exists() {
                return Ok(DocidConfig::default());
            }
            path
        }
    };

    debug!("Loading configuration from {}", path.display());
    DocidConfig::from_file(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

/// Read OCR output from `path`.
///
/// `.json` files hold either a block dump (`{"Blocks": [...]}`) or an array
/// of strings; anything else is plain text with one line per OCR line.
pub fn load_lines(path: &Path) -> anyhow::Result<LineSequence> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if !is_json {
        return Ok(LineSequence::from_text(&content));
    }

    if let Ok(doc) = serde_json::from_str::<OcrDocument>(&content) {
        debug!("{}: {} OCR blocks", path.display(), doc.blocks.len());
        return Ok(doc.lines());
    }

    let texts: Vec<String> = serde_json::from_str(&content).with_context(|| {
        format!(
            "{} is neither an OCR block document nor an array of lines",
            path.display()
        )
    })?;
    Ok(LineSequence::from(texts))
}
