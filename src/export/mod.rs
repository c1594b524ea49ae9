// Author: kelexine (https://github.com/kelexine)
// export/mod.rs -- Report format dispatcher

pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::RunConfig;
use crate::models::{DocumentationRun, FunctionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "html" => Some(Self::Html),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Write every configured report; returns the paths written.
pub fn export(run: &DocumentationRun, config: &RunConfig) -> Result<Vec<PathBuf>> {
    let formats = config
        .output_formats
        .iter()
        .map(|name| ExportFormat::from_name(name).ok_or_else(|| anyhow::anyhow!("Unsupported output format '{name}'")))
        .collect::<Result<Vec<_>>>()?;

    if let Some(dir) = config.output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Cannot create output directory {}", dir.display()))?;
    }

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = config.report_path(format.extension());
        match format {
            ExportFormat::Markdown => markdown::export_markdown(run, &config.document, &path)?,
            ExportFormat::Html => html::export_html(run, &config.document, &path)?,
            ExportFormat::Json => json::export_json(run, &config.document, &path)?,
            ExportFormat::Csv => csv::export_csv(run, &path)?,
        }
        written.push(path);
    }
    Ok(written)
}

/// ❌/✅ when highlighting is on, a single space otherwise.
pub(crate) fn todo_marker(record: &FunctionRecord, highlight: bool) -> &'static str {
    match (highlight, record.has_todo()) {
        (false, _) => " ",
        (true, true) => "❌ ",
        (true, false) => "✅ ",
    }
}

/// Lowercase anchor id for a function name.
pub(crate) fn anchor(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

/// Declaration line shown in reports, template list included.
pub(crate) fn declaration(record: &FunctionRecord) -> String {
    match &record.template_params {
        Some(tp) => format!("template{tp} {}", record.signature()),
        None => record.signature(),
    }
}

/// `percent` of a `len`-cell bar filled with `█`, rest `░`.
pub(crate) fn make_bar(percent: usize, len: usize) -> String {
    let done = (percent.min(100) * len) / 100;
    format!("{}{}", "█".repeat(done), "░".repeat(len - done))
}
