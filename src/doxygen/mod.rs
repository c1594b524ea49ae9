// Author: kelexine (https://github.com/kelexine)
// doxygen/mod.rs -- Doxygen comment synthesis from parsed function records

pub mod analyze;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::models::FunctionRecord;

/// Continuation prefix for brief, param, tparam and note text.
const CONTINUATION: &str = " *        ";
/// Continuation prefix for return text, one column wider.
const RETURN_CONTINUATION: &str = " *         ";

const DEFAULT_SUFFIX: &str = " – default value if not overloaded: ";

static RE_PARAM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@param\s+([*\&]?\w+)\s*(.*)").unwrap());
static RE_TPARAM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@tparam\s+(\w+)\s*(.*)").unwrap());
static RE_OTHER_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@(\w+)\s*(.*)").unwrap());
static RE_LEADING_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*+\s?").unwrap());
static RE_COMMENT_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[/\*\-\s]+").unwrap());
static RE_FUNC_PTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\(\*\s*(\w+)\s*\)\s*\((.*?)\)").unwrap());
static RE_PARAM_TOKENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w:]+|\*+|\&+").unwrap());
static RE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());
static RE_DEFAULT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"( – default value if not overloaded: .*)$").unwrap());
static RE_INTERNAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"( \(internal function parameter: [^)]+\))").unwrap());

const RETURN_MODIFIERS: &[&str] = &["static", "inline", "virtual", "constexpr", "extern"];

/// Tag sections of an existing Doxygen comment body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedTags {
    pub brief: String,
    /// Parameter name (as written, sigils included) to description.
    pub params: HashMap<String, String>,
    pub return_doc: String,
    /// One entry per `@note`, continuation lines already indented.
    pub notes: Vec<String>,
    /// Template parameters in order of appearance.
    pub tparams: Vec<(String, String)>,
    /// Unrecognized tags in order of first appearance.
    pub other: Vec<(String, Vec<String>)>,
}

#[derive(Clone, Copy, PartialEq)]
enum OpenTag {
    Brief,
    Param,
    TParam,
    Return,
    Note,
    Other,
}

fn format_continued(lines: &[String], prefix: &str) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim().to_string()
            } else {
                format!("{prefix}{}", l.trim())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn upsert<'a>(entries: &'a mut Vec<(String, Vec<String>)>, key: &str) -> &'a mut Vec<String> {
    let pos = match entries.iter().position(|(k, _)| k == key) {
        Some(pos) => pos,
        None => {
            entries.push((key.to_string(), Vec::new()));
            entries.len() - 1
        }
    };
    &mut entries[pos].1
}

/// Split a Doxygen body (comment markers already removed) into tag sections.
///
/// Lines that do not start with `@` continue whichever tag is open. `@returns`
/// is read as `@return`.
pub fn extract_brief_and_tags<S: AsRef<str>>(body_lines: &[S]) -> ParsedTags {
    let mut brief: Vec<String> = Vec::new();
    let mut returns: Vec<String> = Vec::new();
    let mut notes: Vec<Vec<String>> = Vec::new();
    let mut params: Vec<(String, Vec<String>)> = Vec::new();
    let mut tparams: Vec<(String, Vec<String>)> = Vec::new();
    let mut other: Vec<(String, Vec<String>)> = Vec::new();

    let mut open: Option<OpenTag> = None;
    let mut current_param = String::new();
    let mut current_tparam = String::new();
    let mut current_other = String::new();

    let first_line = |desc: &str| -> Vec<String> {
        if desc.is_empty() { Vec::new() } else { vec![desc.trim().to_string()] }
    };

    for raw in body_lines {
        let line = raw.as_ref().trim();

        if let Some(rest) = line.strip_prefix("@brief") {
            brief.push(rest.trim().to_string());
            open = Some(OpenTag::Brief);
        } else if line.starts_with("@param") {
            open = RE_PARAM_TAG.captures(line).map(|caps| {
                current_param = caps[1].to_string();
                *upsert(&mut params, &current_param) = first_line(&caps[2]);
                OpenTag::Param
            });
        } else if line.starts_with("@tparam") {
            open = RE_TPARAM_TAG.captures(line).map(|caps| {
                current_tparam = caps[1].to_string();
                *upsert(&mut tparams, &current_tparam) = first_line(&caps[2]);
                OpenTag::TParam
            });
        } else if let Some(rest) = line.strip_prefix("@returns").or_else(|| line.strip_prefix("@return")) {
            let content = rest.trim();
            if !content.is_empty() {
                returns.push(content.to_string());
            }
            open = Some(OpenTag::Return);
        } else if let Some(rest) = line.strip_prefix("@note") {
            notes.push(first_line(rest.trim()));
            open = Some(OpenTag::Note);
        } else if line.starts_with('@') {
            open = RE_OTHER_TAG.captures(line).map(|caps| {
                current_other = caps[1].to_string();
                upsert(&mut other, &current_other).push(caps[2].trim().to_string());
                OpenTag::Other
            });
        } else {
            match open {
                Some(OpenTag::Brief) => brief.push(line.to_string()),
                Some(OpenTag::Param) => upsert(&mut params, &current_param).push(line.to_string()),
                Some(OpenTag::TParam) => upsert(&mut tparams, &current_tparam).push(line.to_string()),
                Some(OpenTag::Return) => returns.push(line.to_string()),
                Some(OpenTag::Note) => {
                    if let Some(note) = notes.last_mut() {
                        note.push(line.to_string());
                    }
                }
                Some(OpenTag::Other) => upsert(&mut other, &current_other).push(line.to_string()),
                None => {}
            }
        }
    }

    ParsedTags {
        brief: format_continued(&brief, CONTINUATION),
        params: params
            .into_iter()
            .map(|(name, lines)| (name, format_continued(&lines, CONTINUATION)))
            .collect(),
        return_doc: format_continued(&returns, RETURN_CONTINUATION),
        notes: notes
            .iter()
            .filter(|n| !n.is_empty())
            .map(|n| format_continued(n, CONTINUATION))
            .collect(),
        tparams: tparams
            .into_iter()
            .map(|(name, lines)| (name, format_continued(&lines, CONTINUATION)))
            .collect(),
        other,
    }
}

/// Split a parameter list on commas outside `<>`, `()` and `[]`.
pub fn split_function_params(params: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let (mut angle, mut round, mut square) = (0i32, 0i32, 0i32);

    for c in params.chars() {
        match c {
            '<' => angle += 1,
            '>' => angle -= 1,
            '(' => round += 1,
            ')' => round -= 1,
            '[' => square += 1,
            ']' => square -= 1,
            ',' if angle == 0 && round == 0 && square == 0 => {
                out.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if !current.trim().is_empty() {
        out.push(current.trim().to_string());
    }
    out
}

/// `(name, inner signature)` of a function pointer parameter such as
/// `void (*handler)(int code)`.
pub fn extract_func_ptr_info(param: &str) -> Option<(String, String)> {
    RE_FUNC_PTR
        .captures(param)
        .map(|caps| (caps[2].to_string(), caps[3].to_string()))
}

/// Name of a parameter: the last bare identifier, ignoring `*`/`&` sigils and
/// any default value.
pub fn extract_param_name(param: &str) -> String {
    let clean = param.split('=').next().unwrap_or("").trim();

    if let Some((name, _)) = extract_func_ptr_info(clean) {
        return name;
    }

    RE_PARAM_TOKENS
        .find_iter(clean)
        .map(|m| m.as_str())
        .filter(|t| RE_IDENTIFIER.is_match(t))
        .last()
        .unwrap_or("")
        .to_string()
}

/// Remove generated default-value and function-pointer annotations.
pub fn clean_suffixes(text: &str) -> String {
    let text = RE_DEFAULT_SUFFIX.replace_all(text, "");
    let text = RE_INTERNAL_SUFFIX.replace_all(&text, "");
    text.trim_end().to_string()
}

fn returns_value(return_type: &str) -> bool {
    let core: Vec<&str> = return_type
        .split_whitespace()
        .filter(|t| !RETURN_MODIFIERS.contains(t))
        .collect();
    !return_type.trim().is_empty() && core.join(" ") != "void"
}

fn brief_from_free_text(comment: &str) -> Option<String> {
    let lines: Vec<String> = comment
        .lines()
        .map(|l| RE_COMMENT_MARKERS.replace(l.trim(), "").into_owned())
        .filter(|l| !l.is_empty())
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n * "))
}

fn parse_doxygen_comment(comment: &str) -> ParsedTags {
    let lines: Vec<&str> = comment.lines().collect();
    let body: Vec<String> = if lines.len() > 2 {
        lines[1..lines.len() - 1]
            .iter()
            .map(|l| RE_LEADING_STARS.replace(l.trim(), "").into_owned())
            .collect()
    } else {
        Vec::new()
    };
    extract_brief_and_tags(&body)
}

fn param_lines(record: &FunctionRecord, docs: &HashMap<String, String>) -> Vec<String> {
    let mut out = Vec::new();

    for param in split_function_params(&record.params) {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }

        let (without_default, default_value) = match param.split_once('=') {
            Some((head, tail)) => (head.trim(), Some(tail.trim())),
            None => (param, None),
        };

        let name = extract_param_name(param);
        if name == "void" {
            continue;
        }
        let internal = extract_func_ptr_info(without_default).map(|(_, sig)| sig);

        let doc = docs.get(&name).map(String::as_str).unwrap_or("TODO");
        let mut line = clean_suffixes(&format!(" * @param {name} {doc}"));

        if let Some(value) = default_value.filter(|v| !v.is_empty()) {
            line.push_str(DEFAULT_SUFFIX);
            line.push_str(value);
        }
        if let Some(sig) = internal.filter(|s| !s.is_empty()) {
            line.push_str(&format!(" (internal function parameter: {sig})"));
        }
        out.push(line);
    }

    out
}

fn tparam_lines(record: &FunctionRecord, parsed: &[(String, String)]) -> Vec<String> {
    let mut docs: Vec<(String, String)> = parsed.to_vec();

    if docs.is_empty()
        && record.is_template
        && let Some(raw) = record.template_params.as_deref()
    {
        let inner = raw
            .strip_prefix('<')
            .and_then(|r| r.strip_suffix('>'))
            .unwrap_or(raw)
            .trim();
        for tparam in split_function_params(inner) {
            if let Some(name) = tparam.split_whitespace().last() {
                docs.push((name.to_string(), "TODO".to_string()));
            }
        }
    }

    docs.iter()
        .map(|(name, doc)| {
            let doc = if doc.trim().is_empty() { "TODO" } else { doc.trim() };
            clean_suffixes(&format!(" * @tparam {name} {doc}"))
        })
        .collect()
}

/// Build the Doxygen comment for `record`, reusing whatever an existing
/// comment already documents and marking everything else `TODO`.
pub fn generate_doxygen_comment(record: &FunctionRecord) -> String {
    let comment = record.comment.trim();
    let fallback = format!("TODO {} description.", record.name);

    let (brief, parsed) = if comment.is_empty() {
        (fallback, ParsedTags::default())
    } else if record.is_doxygen_comment {
        let parsed = parse_doxygen_comment(comment);
        let brief = if parsed.brief.is_empty() { fallback } else { parsed.brief.clone() };
        (brief, parsed)
    } else {
        (brief_from_free_text(comment).unwrap_or(fallback), ParsedTags::default())
    };

    let mut out = format!("/**\n * @brief {brief}");

    for line in tparam_lines(record, &parsed.tparams) {
        out.push('\n');
        out.push_str(&line);
    }
    for line in param_lines(record, &parsed.params) {
        out.push('\n');
        out.push_str(&line);
    }

    if returns_value(&record.return_type) {
        let doc = if parsed.return_doc.is_empty() { "TODO" } else { parsed.return_doc.as_str() };
        out.push_str(&format!("\n * @return {doc}"));
    }

    for note in &parsed.notes {
        out.push_str(&format!("\n * @note {note}"));
    }

    for (tag, entries) in &parsed.other {
        for (i, entry) in entries.iter().enumerate() {
            if i == 0 {
                out.push_str(&format!("\n * @{tag} {}", entry.trim()));
            } else {
                out.push_str(&format!("\n{CONTINUATION}{}", entry.trim()));
            }
        }
    }

    out.push_str("\n */");
    out
}

/// Fill `doxygen` on every record.
pub fn apply_doxygen(records: &mut [FunctionRecord]) {
    for record in records.iter_mut() {
        record.doxygen = generate_doxygen_comment(record);
    }
}
