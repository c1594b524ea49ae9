// Author: kelexine (https://github.com/kelexine)
// editor/mod.rs -- In-place insertion, conversion and replacement of function comments

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::models::FunctionRecord;
use crate::parser::{self, find_function_end_line, find_function_start_line};

pub const HEADER_OPEN: &str = "/*-----------------------------------------------------------------------------";
pub const HEADER_RULE: &str = " * ----------------------------------------------------------------------------";
pub const HEADER_CLOSE: &str = "*/";

static RE_TRAILING_LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)(//\s*)(.*)$").unwrap());
static RE_INLINE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*.*\*/").unwrap());
static RE_NEXT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\* @\w+").unwrap());

/// How headers are written back into sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HeaderStyle {
    /// Dashed `/*--- ... */` block.
    #[default]
    Default,
    /// Synthesized `/** @brief ... */` comments.
    Doxygen,
}

impl HeaderStyle {
    /// `"doxygen"` selects Doxygen; any other name is the default block.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("doxygen") {
            HeaderStyle::Doxygen
        } else {
            HeaderStyle::Default
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub header_style: HeaderStyle,
}

// ─────────────────────────────────────────────
// Line buffer
// ─────────────────────────────────────────────

/// Ordered lines of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    /// Write the buffer with a trailing newline through a temporary sibling
    /// file that is then renamed over `path`.
    pub fn store(&self, path: &Path) -> Result<()> {
        let tmp = temp_sibling(path);
        fs::write(&tmp, self.to_text())
            .with_context(|| format!("Failed to write temporary file: {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace source file: {}", path.display()))?;
        Ok(())
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines joined with `\n`, no trailing newline.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    pub fn to_text(&self) -> String {
        let mut text = self.joined();
        text.push('\n');
        text
    }

    pub fn set(&mut self, idx: usize, line: String) {
        self.lines[idx] = line;
    }

    pub fn insert_lines<I>(&mut self, at: usize, new_lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, new_lines);
    }

    pub fn remove_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        self.lines.drain(start..end);
    }

    /// Remove the blank lines directly above `idx`; returns the new index of
    /// the line that was at `idx`.
    pub fn trim_trailing_blank_before(&mut self, mut idx: usize) -> usize {
        while idx > 0 && self.lines[idx - 1].trim().is_empty() {
            self.lines.remove(idx - 1);
            idx -= 1;
        }
        idx
    }

    fn locate(&self, record: &FunctionRecord) -> Option<usize> {
        find_function_start_line(&self.joined(), &record.name, Some(record.params.as_str()), record.occurrence)
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.cppdoc.tmp"))
}

// ─────────────────────────────────────────────
// Header detection
// ─────────────────────────────────────────────

fn closes_block(stripped: &str) -> bool {
    stripped.ends_with('}')
        || stripped.ends_with("};")
        || stripped.ends_with("}/*")
        || stripped.starts_with('}')
}

/// Is there a usable header comment directly above `func_start`?
///
/// The lines above, up to the first blank line or closing brace, must form a
/// block starting with `/*` or consist only of `//` lines. A block whose
/// second line above the function ends with `}` is a footer of the previous
/// function.
pub fn header_comment_exists<S: AsRef<str>>(lines: &[S], func_start: usize) -> bool {
    if func_start == 0 || func_start > lines.len() {
        return false;
    }
    if lines[func_start - 1].as_ref().trim().is_empty() {
        return false;
    }

    let mut first = func_start;
    while first > 0 {
        let stripped = lines[first - 1].as_ref().trim();
        if stripped.is_empty() || closes_block(stripped) {
            break;
        }
        first -= 1;
    }
    let candidate = &lines[first..func_start];

    if func_start >= 2 && lines[func_start - 2].as_ref().trim().ends_with('}') {
        return false;
    }

    let starts_block = candidate
        .first()
        .is_some_and(|l| l.as_ref().trim_start().starts_with("/*"));
    let all_line_comments = !candidate.is_empty()
        && candidate
            .iter()
            .all(|l| l.as_ref().trim().starts_with("//"));

    starts_block || all_line_comments
}

/// More `/*` than `*/` up to and including `idx`.
pub fn is_inside_multiline_comment<S: AsRef<str>>(lines: &[S], idx: usize) -> bool {
    if lines.is_empty() {
        return false;
    }
    let upto = lines[..=idx.min(lines.len().saturating_sub(1))]
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    upto.matches("/*").count() > upto.matches("*/").count()
}

fn header_block<I, S>(text_lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut block = vec![String::new(), String::new(), HEADER_OPEN.to_string()];
    for line in text_lines {
        let line = line.as_ref();
        if line.is_empty() {
            block.push(" *".to_string());
        } else {
            block.push(format!(" * {line}"));
        }
    }
    block.push(HEADER_RULE.to_string());
    block.push(HEADER_CLOSE.to_string());
    block
}

// ─────────────────────────────────────────────
// Header mutation
// ─────────────────────────────────────────────

/// Insert a dashed header block above `start` unless one already exists.
/// Blank lines above are normalized to exactly two.
pub fn add_header_comment(buf: &mut LineBuffer, name: &str, start: usize, text: Option<&str>) -> bool {
    if header_comment_exists(buf.lines(), start) {
        return false;
    }

    let default_text = format!("{name} -->> TODO: Add your description here");
    let text = text.unwrap_or(&default_text);

    let at = buf.trim_trailing_blank_before(start);
    let mut block = vec![String::new(), String::new(), HEADER_OPEN.to_string()];
    block.extend(text.lines().map(|l| format!(" * {l}")));
    block.push(HEADER_RULE.to_string());
    block.push(HEADER_CLOSE.to_string());
    buf.insert_lines(at, block);
    true
}

/// Turn the run of `//` lines above `start` into a dashed header block.
pub fn convert_single_line_comment_to_header(buf: &mut LineBuffer, start: usize) -> bool {
    if start == 0 || start > buf.len() {
        return false;
    }

    let mut last = start;
    while last > 0 && buf.lines()[last - 1].trim().is_empty() {
        last -= 1;
    }
    let mut first = last;
    while first > 0 && buf.lines()[first - 1].trim().starts_with("//") {
        first -= 1;
    }
    if first == last {
        return false;
    }

    let text: Vec<String> = buf.lines()[first..last]
        .iter()
        .map(|l| l.trim()[2..].trim().to_string())
        .collect();

    buf.remove_range(first..start);
    let at = buf.trim_trailing_blank_before(first);
    buf.insert_lines(at, header_block(&text));
    true
}

/// Remove the comment directly above `start`, skipping blank and
/// preprocessor lines. Only a block ending on that line or a run of `//`
/// lines is removed. Returns whether anything changed.
pub fn remove_existing_header(buf: &mut LineBuffer, start: usize) -> bool {
    let mut end = start.min(buf.len());
    while end > 0 {
        let stripped = buf.lines()[end - 1].trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            end -= 1;
        } else {
            break;
        }
    }
    if end == 0 {
        return false;
    }

    let last = buf.lines()[end - 1].trim();
    let (closes_comment, line_comment) = (last.ends_with("*/"), last.starts_with("//"));
    if closes_comment {
        let open = (0..end).rev().find(|&i| buf.lines()[i].contains("/*"));
        return match open {
            Some(open) => {
                buf.remove_range(open..end);
                true
            }
            None => false,
        };
    }

    if line_comment {
        let mut first = end - 1;
        while first > 0 && buf.lines()[first - 1].trim().starts_with("//") {
            first -= 1;
        }
        buf.remove_range(first..end);
        return true;
    }

    false
}

/// Text of the `@brief` section of a Doxygen comment, for reuse in a
/// default header.
pub fn convert_doxygen_to_default_comment(doxygen: &str) -> String {
    const FALLBACK: &str = "No description provided.";
    let doxygen = doxygen.trim();

    let Some(pos) = doxygen.find("* @brief ") else {
        return FALLBACK.to_string();
    };
    let rest = &doxygen[pos + "* @brief ".len()..];

    let end = [RE_NEXT_TAG.find(rest).map(|m| m.start()), rest.find(" */")]
        .into_iter()
        .flatten()
        .min();
    let Some(end) = end else {
        return FALLBACK.to_string();
    };

    rest[..end]
        .trim()
        .split('\n')
        .map(|l| l.trim_start_matches([' ', '*']).trim())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append `/* name() */` to the line closing the body that starts at `start`.
/// A trailing `// text` becomes `/* text */`; an existing block comment stays.
pub fn add_post_comment(buf: &mut LineBuffer, name: &str, start: usize) -> bool {
    let Some(end) = find_function_end_line(buf.lines(), start) else {
        warn!("no closing brace found for {name}, post comment skipped");
        return false;
    };

    if is_inside_multiline_comment(buf.lines(), end) {
        return false;
    }

    let original = buf.lines()[end].trim_end().to_string();

    if let Some(caps) = RE_TRAILING_LINE_COMMENT.captures(&original) {
        let code = caps[1].trim_end();
        let text = caps[3].trim();
        buf.set(end, format!("{code} /* {text} */"));
        return true;
    }

    if RE_INLINE_BLOCK.is_match(&original) {
        return false;
    }

    buf.set(end, format!("{original} /* {name}() */"));
    true
}

// ─────────────────────────────────────────────
// File-level passes
// ─────────────────────────────────────────────

/// Give every function in `path` a header and a post comment.
///
/// Headers are handled bottom-up so insertions never shift functions still to
/// be processed. Existing `//` headers are converted to blocks, and Doxygen
/// headers are turned back into dashed blocks unless the style is Doxygen.
pub fn insert_comments(path: &Path, options: &EditOptions) -> Result<()> {
    let functions = parser::extract_functions(path)?;
    let mut buf = LineBuffer::load(path)?;

    for func in functions.iter().rev() {
        let Some(start) = buf.locate(func) else {
            warn!("{}: could not re-locate {}", path.display(), func.name);
            continue;
        };

        if func.comment.trim().is_empty() || !header_comment_exists(buf.lines(), start) {
            if add_header_comment(&mut buf, &func.name, start, None) {
                debug!("header added for {}", func.name);
            }
        } else if func.is_doxygen_comment && options.header_style != HeaderStyle::Doxygen {
            info!("Converting Doxygen-style comment for {}", func.name);
            let text = convert_doxygen_to_default_comment(&func.comment);
            remove_existing_header(&mut buf, start);
            match buf.locate(func) {
                Some(start) => {
                    add_header_comment(&mut buf, &func.name, start, Some(text.as_str()));
                }
                None => warn!("{}: lost {} after removing its header", path.display(), func.name),
            }
        } else {
            let above = buf.lines()[..start].iter().rev().find(|l| !l.trim().is_empty());
            if above.is_some_and(|l| l.trim().starts_with("//")) {
                info!("Converting single-line header comment for {}", func.name);
                convert_single_line_comment_to_header(&mut buf, start);
            } else {
                debug!("{} already has a block header", func.name);
            }
        }
    }

    for func in &functions {
        if let Some(start) = buf.locate(func) {
            add_post_comment(&mut buf, &func.name, start);
        }
    }

    buf.store(path)?;
    info!("{}: header and post comments evaluated", path.display());
    Ok(())
}

/// Replace each function's header with its synthesized Doxygen comment and
/// refresh `start_line` afterwards.
pub fn replace_comments(path: &Path, functions: &mut [FunctionRecord]) -> Result<()> {
    let mut buf = LineBuffer::load(path)?;

    for func in functions.iter().rev() {
        if func.doxygen.is_empty() {
            continue;
        }
        let Some(mut start) = buf.locate(func) else {
            warn!("{}: could not re-locate {}", path.display(), func.name);
            continue;
        };

        if header_comment_exists(buf.lines(), start) {
            remove_existing_header(&mut buf, start);
            match buf.locate(func) {
                Some(s) => start = s,
                None => continue,
            }
        }

        let mut insert_pos = start;
        while insert_pos > 0 && buf.lines()[insert_pos - 1].trim().is_empty() {
            insert_pos -= 1;
        }

        let mut block: Vec<String> = Vec::new();
        if insert_pos > 0 {
            block.extend([String::new(), String::new()]);
        }
        block.extend(func.doxygen.lines().map(str::to_string));
        let after_block = insert_pos + block.len();
        buf.insert_lines(insert_pos, block);

        let mut blank_end = after_block;
        while blank_end < buf.len() && buf.lines()[blank_end].trim().is_empty() {
            blank_end += 1;
        }
        buf.remove_range(after_block..blank_end);
    }

    buf.store(path)?;

    for func in functions.iter_mut() {
        if let Some(start) = buf.locate(func) {
            debug!("{} now starts at line {}", func.name, start + 1);
            func.start_line = start;
        }
    }

    info!("{}: header comments replaced", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doxygen::apply_doxygen;
    use crate::parser::extract_functions;

    fn buf(lines: &[&str]) -> LineBuffer {
        LineBuffer::from_text(&lines.join("\n"))
    }

    #[test]
    fn test_valid_block_header() {
        let lines = ["/*", " * Dies ist ein Header-Kommentar", " */", "void meineFunktion() {", "    // Logik", "}"];
        assert!(header_comment_exists(&lines, 3));
    }

    #[test]
    fn test_no_header_cases() {
        assert!(!header_comment_exists(&["int x = 0;", "", "void test() {}"], 2));
        assert!(!header_comment_exists(&["/* Kommentar */", "", "void test() {}"], 2));
        assert!(!header_comment_exists(
            &["void test() {", "    // Logik", "}", "/* Kommentar nach der Funktion */"],
            0
        ));
        assert!(!header_comment_exists(&["// Kommentarzeile 1", "", "void test() {}"], 2));
    }

    #[test]
    fn test_footer_of_previous_function_is_not_a_header() {
        assert!(!header_comment_exists(&["}", "/* Kommentar */", "void test() {"], 2));
    }

    #[test]
    fn test_line_comment_headers() {
        assert!(header_comment_exists(&["// Einzeilige Info", "void test() {}"], 1));
        assert!(header_comment_exists(
            &["// Kommentarzeile 1", "// Kommentarzeile 2", "void test() {}"],
            2
        ));
    }

    #[test]
    fn test_header_across_preprocessor_branches() {
        let lines = [
            "/**",
            " * @brief Kommentar",
            " * @param void",
            " */",
            "#if !defined(NATIVE_ENVIRONMENT)",
            "void ESPFlashDebuggingFunction(void){",
            "  // body",
            "}/* ESPFlashDebuggingFunction() */",
            "#else",
            "void ESPFlashDebuggingFunction(void){;};/* ESPFlashDebuggingFunction() */",
            "#endif",
        ];
        assert!(header_comment_exists(&lines, 5));
        assert!(!header_comment_exists(&lines, 9));
    }

    #[test]
    fn test_is_inside_multiline_comment() {
        let lines = ["/* open", "still inside", "*/", "code();"];
        assert!(is_inside_multiline_comment(&lines, 1));
        assert!(!is_inside_multiline_comment(&lines, 3));
    }

    #[test]
    fn test_post_comment_added() {
        let mut b = buf(&["void test() {", "  int x = 42;", "}"]);
        assert!(add_post_comment(&mut b, "test", 0));
        assert_eq!(b.lines()[2], "} /* test() */");
    }

    #[test]
    fn test_post_comment_rewrites_line_comment() {
        let mut b = buf(&["void compute() {", "  return;", "} // old comment"]);
        add_post_comment(&mut b, "compute", 0);
        assert_eq!(b.lines()[2], "} /* old comment */");
    }

    #[test]
    fn test_post_comment_without_end_line() {
        let mut b = buf(&["int incomplete(", "  int a"]);
        assert!(!add_post_comment(&mut b, "incomplete", 0));
        assert_eq!(b, buf(&["int incomplete(", "  int a"]));
    }

    #[test]
    fn test_existing_block_post_comment_preserved() {
        let lines = ["void example() {", "  doSomething();", "} /* old comment continues here */"];
        let mut b = buf(&lines);
        assert!(!add_post_comment(&mut b, "example", 0));
        assert_eq!(b, buf(&lines));
    }

    #[test]
    fn test_comment_on_next_line_is_untouched() {
        let mut b = buf(&["void process() {", "  execute();", "}", "// previously on next line"]);
        add_post_comment(&mut b, "process", 0);
        assert_eq!(b.lines()[2], "} /* process() */");
        assert_eq!(b.lines()[3], "// previously on next line");

        let mut b = buf(&["void processTest() {", "  execute();", "}", "/*next line", "  multiline comment */"]);
        add_post_comment(&mut b, "processTest", 0);
        assert_eq!(b.lines()[2], "} /* processTest() */");
        assert_eq!(b.lines()[3], "/*next line");
    }

    #[test]
    fn test_add_header_normalizes_blank_lines() {
        let mut b = buf(&["int x = 0;", "", "", "", "void run() {", "}"]);
        assert!(add_header_comment(&mut b, "run", 4, None));
        assert_eq!(
            b.lines(),
            &[
                "int x = 0;",
                "",
                "",
                HEADER_OPEN,
                " * run -->> TODO: Add your description here",
                HEADER_RULE,
                "*/",
                "void run() {",
                "}",
            ]
        );
        // second call sees the header
        assert!(!add_header_comment(&mut b, "run", 7, None));
    }

    #[test]
    fn test_convert_single_line_comments() {
        let mut b = buf(&["int x = 0;", "// first", "//", "// second", "", "void run() {", "}"]);
        assert!(convert_single_line_comment_to_header(&mut b, 5));
        assert_eq!(
            b.lines(),
            &["int x = 0;", "", "", HEADER_OPEN, " * first", " *", " * second", HEADER_RULE, "*/", "void run() {", "}"]
        );
        let mut plain = buf(&["int x = 0;", "void run() {", "}"]);
        assert!(!convert_single_line_comment_to_header(&mut plain, 1));
    }

    #[test]
    fn test_remove_existing_header_variants() {
        let mut b = buf(&["int x;", "/*", " * text", " */", "#ifdef A", "void f() {", "}"]);
        assert!(remove_existing_header(&mut b, 5));
        assert_eq!(b.lines(), &["int x;", "#ifdef A", "void f() {", "}"]);

        let mut b = buf(&["// one", "// two", "void f() {", "}"]);
        assert!(remove_existing_header(&mut b, 2));
        assert_eq!(b.lines(), &["void f() {", "}"]);

        let mut b = buf(&["int x = 0;", "void f() {", "}"]);
        assert!(!remove_existing_header(&mut b, 1));
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn test_convert_doxygen_to_default_comment() {
        assert_eq!(
            convert_doxygen_to_default_comment("/**\n * @brief Adds two numbers.\n * @param a First\n */"),
            "Adds two numbers."
        );
        assert_eq!(
            convert_doxygen_to_default_comment("/**\n * @brief Line one\n *        line two\n */"),
            "Line one\nline two"
        );
        assert_eq!(convert_doxygen_to_default_comment("/** nothing */"), "No description provided.");
    }

    #[test]
    fn test_store_writes_trailing_newline_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cpp");
        buf(&["int a;", "int b;"]).store(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "int a;\nint b;\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_insert_comments_end_to_end_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("math.cpp");
        fs::write(
            &path,
            "// Adds numbers\nint add(int a, int b) {\n    return a + b;\n}\n\nvoid reset() {\n}\n",
        )
        .unwrap();

        let options = EditOptions::default();
        insert_comments(&path, &options).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        let expected = format!(
            "\n\n{HEADER_OPEN}\n * Adds numbers\n{HEADER_RULE}\n*/\nint add(int a, int b) {{\n    return a + b;\n}} /* add() */\n\n\n{HEADER_OPEN}\n * reset -->> TODO: Add your description here\n{HEADER_RULE}\n*/\nvoid reset() {{\n}} /* reset() */\n"
        );
        assert_eq!(first, expected);

        insert_comments(&path, &options).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_insert_comments_converts_doxygen_for_default_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dox.cpp");
        fs::write(
            &path,
            "int x = 0;\n\n/**\n * @brief Computes things.\n * @return value\n */\nint compute() {\n    return 1;\n}\n",
        )
        .unwrap();

        insert_comments(&path, &EditOptions::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("@brief"));
        assert!(text.contains(" * Computes things.\n"));
        assert!(text.contains("} /* compute() */"));
    }

    #[test]
    fn test_replace_comments_inserts_doxygen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("add.cpp");
        fs::write(
            &path,
            "#include <a.h>\n\n/*\n * Adds two numbers\n */\nint add(int a, int b) {\n    return a + b;\n}\n",
        )
        .unwrap();

        let mut records = extract_functions(&path).unwrap();
        apply_doxygen(&mut records);
        replace_comments(&path, &mut records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "#include <a.h>\n\n\n/**\n * @brief Adds two numbers\n * @param a TODO\n * @param b TODO\n * @return TODO\n */\nint add(int a, int b) {\n    return a + b;\n}\n"
        );
        assert_eq!(records[0].start_line, 9);

        replace_comments(&path, &mut records).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_replace_comments_keeps_single_cast_default_note() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.cpp");
        fs::write(
            &path,
            "void configure(uint32_t dns1 = (uint32_t)0x00000000) {\n    apply(dns1);\n}\n",
        )
        .unwrap();

        for _ in 0..3 {
            let mut records = extract_functions(&path).unwrap();
            apply_doxygen(&mut records);
            replace_comments(&path, &mut records).unwrap();
        }

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("default value if not overloaded").count(), 1);
        assert!(text.contains(" * @param dns1 TODO – default value if not overloaded: (uint32_t)0x00000000\n"));
    }

    #[test]
    fn test_header_style_from_name() {
        assert_eq!(HeaderStyle::from_name("doxygen"), HeaderStyle::Doxygen);
        assert_eq!(HeaderStyle::from_name("Doxygen "), HeaderStyle::Doxygen);
        assert_eq!(HeaderStyle::from_name("default"), HeaderStyle::Default);
        assert_eq!(HeaderStyle::from_name("anything"), HeaderStyle::Default);
    }
}
