// Author: kelexine (https://github.com/kelexine)
// config/mod.rs -- TOML configuration loader and run settings

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::Args;
use crate::editor::HeaderStyle;

pub const APP_DIR: &str = "cppdoc-rs";

/// `output_format` may be a single name or a list.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OutputFormats {
    One(String),
    Many(Vec<String>),
}

impl OutputFormats {
    fn into_vec(self) -> Vec<String> {
        match self {
            OutputFormats::One(f) => vec![f],
            OutputFormats::Many(v) => v,
        }
    }
}

/// The `[document]` table.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct DocumentSection {
    pub title: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub logo_path: Option<String>,
    pub highlight_todo: Option<bool>,
    pub show_doc_progress: Option<bool>,
}

/// Represents the structure of `config.toml`.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct FileConfig {
    pub source_dir: Option<String>,
    pub recursive: Option<bool>,
    pub output_format: Option<OutputFormats>,
    pub output_path: Option<String>,
    pub backup_path: Option<String>,
    pub readonly: Option<bool>,
    pub header_comment_style: Option<String>,
    pub document: Option<DocumentSection>,
}

impl FileConfig {
    /// `<config dir>/cppdoc-rs/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push(APP_DIR);
        path.push("config.toml");
        Some(path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Error loading config file '{}'", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Error parsing config file '{}'", path.display()))
    }

    /// Load `explicit`, else the default location, else defaults. Returns the
    /// path the settings came from, if any.
    pub fn load(explicit: Option<&Path>) -> (Self, Option<PathBuf>) {
        let candidate = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };

        let Some(path) = candidate else {
            debug!("no config file found, using defaults");
            return (Self::default(), None);
        };

        match Self::from_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                warn!("{e:#}; using defaults");
                (Self::default(), None)
            }
        }
    }

    /// Dotted names of keys absent from the file.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let root = [
            ("source_dir", self.source_dir.is_none()),
            ("recursive", self.recursive.is_none()),
            ("output_format", self.output_format.is_none()),
            ("output_path", self.output_path.is_none()),
            ("backup_path", self.backup_path.is_none()),
            ("readonly", self.readonly.is_none()),
            ("header_comment_style", self.header_comment_style.is_none()),
        ];
        missing.extend(root.iter().filter(|(_, m)| *m).map(|(k, _)| *k));

        match &self.document {
            None => missing.push("document"),
            Some(d) => {
                let doc = [
                    ("document.title", d.title.is_none()),
                    ("document.version", d.version.is_none()),
                    ("document.author", d.author.is_none()),
                    ("document.date", d.date.is_none()),
                    ("document.logo_path", d.logo_path.is_none()),
                    ("document.highlight_todo", d.highlight_todo.is_none()),
                    ("document.show_doc_progress", d.show_doc_progress.is_none()),
                ];
                missing.extend(doc.iter().filter(|(_, m)| *m).map(|(k, _)| *k));
            }
        }
        missing
    }
}

/// Report metadata after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSettings {
    pub title: String,
    pub version: String,
    pub author: String,
    pub date: String,
    pub logo_path: Option<String>,
    pub highlight_todo: bool,
    pub show_doc_progress: bool,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self::from_section(&DocumentSection::default())
    }
}

impl DocumentSettings {
    fn from_section(doc: &DocumentSection) -> Self {
        Self {
            title: doc.title.clone().unwrap_or_else(|| "📄 Documentation".to_string()),
            version: doc.version.clone().unwrap_or_else(|| "1.0".to_string()),
            author: doc.author.clone().unwrap_or_else(|| "Unknown".to_string()),
            date: resolve_date(doc.date.as_deref().unwrap_or("auto")),
            logo_path: doc.logo_path.clone().filter(|p| !p.trim().is_empty()),
            highlight_todo: doc.highlight_todo.unwrap_or(true),
            show_doc_progress: doc.show_doc_progress.unwrap_or(true),
        }
    }
}

/// `auto`, `today` and the empty string mean today's date.
pub fn resolve_date(raw: &str) -> String {
    match raw.trim().to_lowercase().as_str() {
        "auto" | "today" | "" => chrono::Local::now().format("%Y-%m-%d").to_string(),
        _ => raw.to_string(),
    }
}

/// Everything one documentation run needs, with CLI flags applied over the
/// config file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: PathBuf,
    pub recursive: bool,
    pub output_formats: Vec<String>,
    /// Report path without extension.
    pub output_path: PathBuf,
    pub backup_path: Option<String>,
    pub readonly: bool,
    pub header_style: HeaderStyle,
    pub parallel: bool,
    pub write_report: bool,
    pub document: DocumentSettings,
}

impl RunConfig {
    pub fn resolve(file: &FileConfig, loaded_from: Option<&Path>, args: &Args) -> Result<Self> {
        if let Some(path) = loaded_from {
            for key in file.missing_keys() {
                warn!("Missing key '{key}' in config file '{}', using fallback", path.display());
            }
        }

        let document = DocumentSettings::from_section(&file.document.clone().unwrap_or_default());

        let source = match (&args.path, &file.source_dir) {
            (Some(p), _) => p.clone(),
            (None, Some(dir)) => PathBuf::from(dir),
            (None, None) => PathBuf::from("."),
        };
        if !source.exists() {
            anyhow::bail!("Source path does not exist: {}", source.display());
        }

        let output_formats = if !args.formats.is_empty() {
            args.formats.clone()
        } else {
            file.output_format
                .clone()
                .map(OutputFormats::into_vec)
                .unwrap_or_else(|| vec!["md".to_string()])
        };

        let output_path = match (&args.output, &file.output_path) {
            (Some(p), _) => p.clone(),
            (None, Some(p)) => PathBuf::from(p),
            (None, None) => PathBuf::from(format!("./docs/Documentation_{}", document.version.replace('.', "_"))),
        };

        let readonly = if args.write {
            false
        } else if args.readonly {
            true
        } else {
            file.readonly.unwrap_or(true)
        };

        let header_style = args.style.unwrap_or_else(|| {
            file.header_comment_style
                .as_deref()
                .map(HeaderStyle::from_name)
                .unwrap_or_default()
        });

        Ok(Self {
            source,
            recursive: !args.no_recursive && file.recursive.unwrap_or(true),
            output_formats,
            output_path,
            backup_path: args.backup.clone().or_else(|| file.backup_path.clone()),
            readonly,
            header_style,
            parallel: !args.no_parallel,
            write_report: !args.no_report,
            document,
        })
    }

    /// `<output_path>.<ext>`, keeping any dots already in the path.
    pub fn report_path(&self, ext: &str) -> PathBuf {
        let mut s: OsString = self.output_path.clone().into_os_string();
        s.push(".");
        s.push(ext);
        PathBuf::from(s)
    }
}
