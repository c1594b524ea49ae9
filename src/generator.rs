// Author: kelexine (https://github.com/kelexine)
// generator.rs -- Source discovery and the per-file documentation pipeline

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::backup::{BackupError, make_file_backup};
use crate::config::RunConfig;
use crate::doxygen::analyze::calculate_todo_stats;
use crate::doxygen::apply_doxygen;
use crate::editor::{self, EditOptions, HeaderStyle};
use crate::models::{DocumentationRun, FunctionRecord};
use crate::parser;

pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "h", "hpp", "cxx", "ino"];

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error("{path}: {message}")]
    Source { path: PathBuf, message: String },
}

impl GenerateError {
    fn source_error(path: &Path, err: anyhow::Error) -> Self {
        GenerateError::Source {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        }
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

/// C/C++ sources under `path`, sorted and de-duplicated. A single file is
/// returned as-is when it has a source extension; a missing path yields
/// nothing.
pub fn collect_source_files(path: &Path, recursive: bool) -> Vec<PathBuf> {
    if path.is_file() {
        return if is_source_file(path) { vec![path.to_path_buf()] } else { Vec::new() };
    }
    if !path.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(false)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_source_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort_unstable();
    files.dedup();
    files
}

/// Run the pipeline over `files` and aggregate TODO statistics.
///
/// Each file is handled by exactly one worker; record order follows the file
/// order regardless of parallelism.
pub fn generate_documentation(config: &RunConfig, files: &[PathBuf]) -> Result<DocumentationRun, GenerateError> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(files.len());
    for f in files {
        if !unique.contains(f) {
            unique.push(f.clone());
        }
    }

    // The sequential path stops at the first failing file; later files stay untouched.
    let per_file: Vec<Vec<FunctionRecord>> = if config.parallel {
        unique.par_iter().map(|f| process_file(f, config)).collect::<Result<_, GenerateError>>()?
    } else {
        unique.iter().map(|f| process_file(f, config)).collect::<Result<_, GenerateError>>()?
    };

    let mut functions: Vec<FunctionRecord> = per_file.into_iter().flatten().collect();

    let stats = calculate_todo_stats(&mut functions);
    Ok(DocumentationRun { files: unique, functions, stats })
}

fn process_file(path: &Path, config: &RunConfig) -> Result<Vec<FunctionRecord>, GenerateError> {
    if !config.readonly {
        if let Some(dir) = &config.backup_path {
            make_file_backup(path, dir)?;
        }
        let options = EditOptions { header_style: config.header_style };
        editor::insert_comments(path, &options).map_err(|e| GenerateError::source_error(path, e))?;
    }

    let mut records = parser::extract_functions(path).map_err(|e| GenerateError::source_error(path, e))?;
    apply_doxygen(&mut records);

    if config.header_style == HeaderStyle::Doxygen && !config.readonly {
        editor::replace_comments(path, &mut records).map_err(|e| GenerateError::source_error(path, e))?;
    }

    info!("{}: {} functions", path.display(), records.len());
    debug!("{:?}", records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>());
    Ok(records)
}
