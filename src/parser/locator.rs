// Author: kelexine (https://github.com/kelexine)
// parser/locator.rs -- Re-locating function boundaries in raw, possibly edited text

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::RE_BLOCK_COMMENT;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_EQUALS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*=\s*").unwrap());
static RE_STRING_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(\\.|[^"\\])*""#).unwrap());
static RE_CHAR_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"'(\\.|[^'\\])'").unwrap());

/// Canonical form of a parameter list for comparisons.
pub fn normalize_signature(sig: &str) -> String {
    let without_comments = RE_BLOCK_COMMENT.replace_all(sig, "");
    let tightened = without_comments
        .trim()
        .replace(" *", "*")
        .replace(" &", "&");
    let collapsed = RE_WHITESPACE.replace_all(&tightened, " ");
    RE_EQUALS.replace_all(&collapsed, "=").into_owned()
}

/// Normalized text between the first `(` and its matching `)`.
pub fn extract_param_signature(buffer: &str) -> String {
    let Some(open) = buffer.find('(') else {
        return String::new();
    };

    let mut depth = 0usize;
    for (i, c) in buffer[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return normalize_signature(&buffer[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    String::new()
}

fn escape_function_name(name: &str) -> String {
    match name.strip_prefix("operator") {
        Some(symbols) => format!("operator{}", regex::escape(symbols)),
        None => regex::escape(name).replace(r"\~", "~"),
    }
}

struct NamePatterns {
    anywhere: Regex,
    definition: Regex,
    call: Regex,
}

impl NamePatterns {
    fn new(name: &str) -> Option<Self> {
        let escaped = escape_function_name(name);
        let build = |pattern: String| Regex::new(&pattern).ok();
        Some(Self {
            anywhere: build(format!(r"{escaped}\s*\("))?,
            definition: build(format!(r"^\s*(?:[\w:\s<>\[\],*\&]+)?\s*{escaped}\s*\("))?,
            call: build(format!(r"^.*\b{escaped}\b\s*\(.*\)\s*;"))?,
        })
    }
}

/// Find the 0-based line where the `occurrence`-th definition of `name` with
/// the given parameters starts.
///
/// `params == None` accepts any parameter list. Comment lines are skipped,
/// calls (`name(...);`) are never definitions, and a signature that spans
/// several lines is accumulated until its `{`.
pub fn find_function_start_line(
    content: &str,
    name: &str,
    params: Option<&str>,
    occurrence: usize,
) -> Option<usize> {
    let patterns = NamePatterns::new(name)?;
    let expected = params.map(|p| normalize_signature(p).to_lowercase());
    let accepts = |buffer: &str| match &expected {
        None => true,
        Some(e) => extract_param_signature(buffer).to_lowercase() == *e,
    };

    let mut match_count = 0usize;
    let mut start: Option<usize> = None;
    let mut buffer = String::new();
    let mut in_block_comment = false;

    for (idx, line) in content.lines().enumerate() {
        let stripped = line.trim();

        if stripped.starts_with("/*") {
            if !stripped.contains("*/") {
                in_block_comment = true;
            }
            continue;
        }
        if in_block_comment {
            if stripped.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if stripped.starts_with("//") {
            continue;
        }

        match start {
            None => {
                if !patterns.anywhere.is_match(stripped)
                    || !patterns.definition.is_match(stripped)
                    || patterns.call.is_match(stripped)
                {
                    continue;
                }
                start = Some(idx);
                buffer = stripped.to_string();
            }
            Some(_) => {
                buffer.push(' ');
                buffer.push_str(stripped);
            }
        }

        if !stripped.contains('{') {
            continue;
        }

        if accepts(&buffer) {
            match_count += 1;
            if match_count == occurrence {
                debug!("located {name} (#{occurrence}) at line {idx}");
                return start;
            }
        }
        start = None;
        buffer.clear();
    }

    debug!("{name} (#{occurrence}) not found");
    None
}

/// Copy of `lines` with string/char literals emptied and comments removed.
pub fn remove_strings_and_comments<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut in_block_comment = false;
    let mut result = Vec::with_capacity(lines.len());

    for line in lines {
        let mut line = line.as_ref().to_string();
        if !in_block_comment {
            line = RE_STRING_LITERAL.replace_all(&line, "\"\"").into_owned();
            line = RE_CHAR_LITERAL.replace_all(&line, "''").into_owned();
        }

        let mut cleaned = String::with_capacity(line.len());
        let mut rest = line.as_str();
        while !rest.is_empty() {
            if in_block_comment {
                match rest.find("*/") {
                    Some(pos) => {
                        in_block_comment = false;
                        rest = &rest[pos + 2..];
                    }
                    None => break,
                }
            } else if rest.starts_with("/*") {
                in_block_comment = true;
                rest = &rest[2..];
            } else if rest.starts_with("//") {
                break;
            } else {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    cleaned.push(c);
                }
                rest = chars.as_str();
            }
        }
        result.push(cleaned);
    }

    result
}

/// Line holding the `}` that closes the body opened at or after `start`.
pub fn find_function_end_line<S: AsRef<str>>(lines: &[S], start: usize) -> Option<usize> {
    let cleaned = remove_strings_and_comments(lines);
    let mut depth: i64 = 0;

    for (i, code) in cleaned.iter().enumerate().skip(start) {
        depth += code.matches('{').count() as i64;
        depth -= code.matches('}').count() as i64;
        if depth == 0 && code.contains('}') {
            return Some(i);
        }
    }
    None
}
