// Author: kelexine (https://github.com/kelexine)
// models.rs -- Core data structures for the function documenter

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A function, constructor, destructor or operator found in a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Possibly qualified (`Class::method`) or symbolic (`operator +`).
    pub name: String,
    /// Raw return type text; empty for constructors and destructors.
    pub return_type: String,
    /// Raw parameter list text, without the surrounding parentheses.
    pub params: String,
    pub is_const: bool,
    /// Raw text of the comment attached above the function, or empty.
    pub comment: String,
    pub is_doxygen_comment: bool,
    pub source_file: PathBuf,
    /// 0-based line in the file at the time of detection.
    pub start_line: usize,
    /// 1-based ordinal among records sharing the same name and parameters.
    pub occurrence: usize,
    pub is_template: bool,
    /// Demasked `<...>` list of the preceding `template` line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_params: Option<String>,
    /// Synthesized Doxygen comment, empty until generated.
    #[serde(default)]
    pub doxygen: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo: Option<TodoAnalysis>,
}

impl FunctionRecord {
    /// `"<return type> <name>(<params>)"`, trimmed for constructors.
    pub fn signature(&self) -> String {
        format!("{} {}({})", self.return_type, self.name, self.params)
            .trim()
            .to_string()
    }

    /// 1-based line number for humans.
    #[inline]
    pub fn display_line(&self) -> usize {
        self.start_line + 1
    }

    #[inline]
    pub fn has_todo(&self) -> bool {
        self.doxygen.contains("TODO")
    }

    /// File name without its directories, or the full path when there is none.
    pub fn file_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_file.display().to_string())
    }
}

/// TODO markers found in one synthesized Doxygen comment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoAnalysis {
    /// `@brief`, `@tparam`, `@param` and `@return` lines.
    pub documented_blocks: usize,
    /// Documented lines still carrying a TODO.
    pub open_todo_blocks: usize,
    pub todo_in_brief: bool,
    pub todo_in_return: bool,
    pub total_tparams: usize,
    pub tparams_with_todo: usize,
    pub total_params: usize,
    pub params_with_todo: usize,
}

/// Aggregate documentation progress over a set of functions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStats {
    pub total_funcs: usize,
    pub done_funcs: usize,
    pub percent_done: usize,
    pub brief_done: usize,
    pub percent_brief_done: usize,
    pub tparams_done: usize,
    pub total_tparams: usize,
    pub percent_tparams_done: usize,
    pub params_done: usize,
    pub total_params: usize,
    pub percent_params_done: usize,
    pub return_done: usize,
    pub percent_return_done: usize,
}

/// The outcome of one documentation run over a set of files.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DocumentationRun {
    pub files: Vec<PathBuf>,
    pub functions: Vec<FunctionRecord>,
    pub stats: TodoStats,
}

impl DocumentationRun {
    #[inline]
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Records belonging to `file`, in detection order.
    pub fn functions_in<'a>(&'a self, file: &'a Path) -> impl Iterator<Item = &'a FunctionRecord> + 'a {
        self.functions.iter().filter(move |f| f.source_file.as_path() == file)
    }
}
