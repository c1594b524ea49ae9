// cppdoc -- C/C++ function documenter
//
// Author : kelexine (https://github.com/kelexine)
// Version: Dynamic (Cargo.toml)
// License: MIT
//
// Finds function definitions in C/C++ sources with tolerant, regex-driven
// heuristics, gives them header and post comments, synthesizes Doxygen
// skeletons and renders Markdown/HTML reports with TODO progress:
//   • Template masking and multi-line declaration joining
//   • Occurrence-aware relocation across #if/#else branches
//   • Atomic in-place edits with optional .bak copies
//   • Rayon data-parallelism across files

mod backup;
mod cli;
mod config;
mod display;
mod doxygen;
mod editor;
mod export;
mod generator;
mod logging;
mod models;
mod parser;

use clap::Parser;
use colored::Colorize;
use std::process;

use crate::config::{FileConfig, RunConfig};

/// Exit status when `--min-progress` is not reached.
const EXIT_BELOW_PROGRESS: i32 = 2;

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "[ERROR]".red().bold(), e);
    process::exit(1);
}

fn main() {
    let args = cli::Args::parse();
    logging::init(args.verbose, None);

    let (file_config, loaded_from) = FileConfig::load(args.config.as_deref());
    let config = match RunConfig::resolve(&file_config, loaded_from.as_deref(), &args) {
        Ok(c) => c,
        Err(e) => fail(format!("{e:#}")),
    };

    let files = generator::collect_source_files(&config.source, config.recursive);
    if files.is_empty() {
        tracing::warn!("no C/C++ sources found in {}", config.source.display());
    }

    let run = match generator::generate_documentation(&config, &files) {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    let reports = if config.write_report {
        match export::export(&run, &config) {
            Ok(paths) => paths,
            Err(e) => fail(format!("{e:#}")),
        }
    } else {
        Vec::new()
    };

    display::display_summary(&run, &config.source, &reports, config.readonly);

    if let Some(min) = args.min_progress
        && run.stats.percent_done < usize::from(min)
    {
        eprintln!(
            "{} Documentation progress {}% is below the required {}%",
            "[ERROR]".red().bold(),
            run.stats.percent_done,
            min
        );
        process::exit(EXIT_BELOW_PROGRESS);
    }
}
