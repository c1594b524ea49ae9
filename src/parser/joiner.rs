// Author: kelexine (https://github.com/kelexine)
// parser/joiner.rs -- Merge multi-line declarations into logical lines

use once_cell::sync::Lazy;
use regex::Regex;

use super::RE_BLOCK_COMMENT;

/// `type name(` possibly preceded by inline block comments.
static RE_NEXT_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:/\*.*?\*/\s*)*[\w:\~]+\s+[\w:\~]+\s*\(").unwrap());

const VISIBILITY_LABELS: &[&str] = &["public:", "private:", "protected:"];

/// Three parallel vectors, one entry per logical line.
#[derive(Debug, Default, Clone)]
pub struct JoinedLines {
    pub lines: Vec<String>,
    /// Last original line consumed by each logical line.
    pub mapping: Vec<usize>,
    /// First original line of each logical line (the declaration start).
    pub starts: Vec<usize>,
}

impl JoinedLines {
    fn push(&mut self, line: String, last: usize, start: usize) {
        self.lines.push(line);
        self.mapping.push(last);
        self.starts.push(start);
    }
}

fn paren_delta(s: &str) -> i64 {
    s.matches('(').count() as i64 - s.matches(')').count() as i64
}

fn is_passthrough(raw: &str) -> bool {
    raw.is_empty()
        || raw.starts_with("//")
        || raw.starts_with("/*")
        || raw.starts_with('*')
        || VISIBILITY_LABELS.contains(&raw)
}

fn stops_continuation(next: &str) -> bool {
    next.is_empty() || ["//", "/*", "*", "#"].iter().any(|p| next.starts_with(p))
}

fn inline_comment_start(s: &str) -> Option<usize> {
    [s.find("//"), s.find("/*")].into_iter().flatten().min()
}

/// Join declarations spread over several lines, then split lines holding more
/// than one function and separate short bodies from their signatures.
pub fn join_multiline_declarations<S: AsRef<str>>(lines: &[S]) -> JoinedLines {
    let joined = join_declarations(lines);
    let split = split_multiple_heads(joined);
    extract_short_bodies(split)
}

fn join_declarations<S: AsRef<str>>(lines: &[S]) -> JoinedLines {
    let mut out = JoinedLines::default();
    let mut i = 0;

    while i < lines.len() {
        let original = lines[i].as_ref();
        let raw = original.trim();

        // Complete bodies on one line, one or several; several get split later.
        let has_inline_body = raw.contains('(') && raw.contains('{') && raw.ends_with('}');

        if is_passthrough(raw) || has_inline_body {
            out.push(original.to_string(), i, i);
            i += 1;
            continue;
        }

        if raw.contains('(') && !raw.ends_with(';') && !raw.starts_with('#') {
            let start = i;
            let mut cur = raw.to_string();
            let mut depth = paren_delta(raw);

            while (depth > 0 || !cur.trim_end().ends_with('{')) && i + 1 < lines.len() {
                let next = lines[i + 1].as_ref().trim();
                if stops_continuation(next) {
                    break;
                }

                if next.starts_with('{')
                    && let Some(pos) = inline_comment_start(&cur)
                {
                    cur.truncate(pos);
                    let kept = cur.trim_end().len();
                    cur.truncate(kept);
                }

                i += 1;
                cur.push(' ');
                cur.push_str(next);
                depth += paren_delta(next);

                let tail = cur.trim_end();
                if tail.ends_with('{') || tail.ends_with(';') {
                    break;
                }
            }

            out.push(cur, i, start);
        } else {
            out.push(original.to_string(), i, i);
        }
        i += 1;
    }

    out
}

/// Split `} int next(` boundaries, keeping the `}` on the left part.
fn split_before_next_head(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut from = 0;

    for (pos, _) in line.match_indices('}') {
        if pos < from {
            continue;
        }
        let rest = &line[pos + 1..];
        let after = pos + 1 + (rest.len() - rest.trim_start().len());
        if RE_NEXT_HEAD.is_match(&line[after..]) {
            parts.push(format!("{}}}", &line[from..pos]));
            from = after;
        }
    }
    parts.push(line[from..].to_string());
    parts
}

fn split_multiple_heads(joined: JoinedLines) -> JoinedLines {
    let mut out = JoinedLines::default();

    for ((line, last), start) in joined
        .lines
        .into_iter()
        .zip(joined.mapping)
        .zip(joined.starts)
    {
        let clean = RE_BLOCK_COMMENT.replace_all(&line, "");
        for part in split_before_next_head(clean.trim()) {
            let part = part.trim();
            if !part.is_empty() {
                out.push(part.to_string(), last, start);
            }
        }
    }

    out
}

fn extract_short_bodies(split: JoinedLines) -> JoinedLines {
    let mut out = JoinedLines::default();

    for ((line, last), start) in split
        .lines
        .into_iter()
        .zip(split.mapping)
        .zip(split.starts)
    {
        let clean = RE_BLOCK_COMMENT.replace_all(&line, "");
        let clean = clean.trim();

        if clean.matches('{').count() == 1
            && clean.matches('}').count() == 1
            && let Some((head, body)) = line.split_once('{')
            && let Some(inner) = body.trim().strip_suffix('}')
        {
            let inner = inner.trim();
            if inner.is_empty() || inner.contains("return") || inner.contains(';') {
                out.push(format!("{} {{", head.trim()), last, start);
                out.push(format!("{} }}", inner), last, start);
                continue;
            }
        }

        out.push(line, last, start);
    }

    out
}
