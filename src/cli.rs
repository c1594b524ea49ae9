// Author: kelexine (https://github.com/kelexine)
// cli.rs -- CLI argument parsing via clap derive

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::editor::HeaderStyle;

/// cppdoc -- C/C++ function documenter
///
/// Finds function definitions in C/C++ sources, gives them header and
/// post comments, synthesizes Doxygen skeletons and writes Markdown/HTML
/// documentation reports with TODO progress.
///
/// Author: kelexine (https://github.com/kelexine)
#[derive(Parser, Debug, Default)]
#[command(
    name = "cppdoc",
    version,
    author = "kelexine <https://github.com/kelexine>",
    about = "C/C++ function documenter: header/Doxygen comments and Markdown/HTML reports",
    after_help = "\
EXAMPLES:
  cppdoc src/                        Report on every C/C++ file below src/ (read-only)
  cppdoc src/led.cpp -f html         HTML report for a single file
  cppdoc src/ --write                Insert header and post comments in place
  cppdoc src/ --write --style doxygen --backup ./backup
                                     Replace headers with Doxygen skeletons, keep .bak copies
  cppdoc -c cppdoc.toml -o docs/api  Use a config file and a custom report path
  cppdoc src/ --no-report --min-progress 80
                                     CI gate: exit 2 below 80% documented functions

FILES:
  .cpp .h .hpp .cxx .ino

CONFIG:
  $XDG_CONFIG_HOME/cppdoc-rs/config.toml unless --config is given"
)]
pub struct Args {
    /// Source file or directory (overrides `source_dir` from the config)
    pub path: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report path without extension
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format(s): md, markdown, html, json, csv
    #[arg(short = 'f', long = "format", value_name = "FORMAT", action = ArgAction::Append, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Edit the sources in place (inserts and replaces comments)
    #[arg(long = "write", conflicts_with = "readonly")]
    pub write: bool,

    /// Never touch the sources
    #[arg(long = "readonly")]
    pub readonly: bool,

    /// Header comment style written into the sources
    #[arg(long = "style", value_enum, value_name = "STYLE")]
    pub style: Option<HeaderStyle>,

    /// Directory receiving `.bak` copies before a file is edited
    #[arg(long = "backup", value_name = "DIR")]
    pub backup: Option<String>,

    /// Only scan the top level of the source directory
    #[arg(long = "no-recursive")]
    pub no_recursive: bool,

    /// Disable parallel file processing
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Skip writing report files
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Exit with status 2 when overall documentation progress is below PERCENT
    #[arg(long = "min-progress", value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_progress: Option<u8>,
}
