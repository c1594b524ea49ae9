// Author: kelexine (https://github.com/kelexine)
// parser/comments.rs -- Block/line comment discovery and association

/// A block comment occupying whole lines, `start..=end` inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl CommentBlock {
    pub fn contains(&self, idx: usize) -> bool {
        self.start <= idx && idx <= self.end
    }
}

/// Collect `/* ... */` blocks whose first line starts with `/*` and whose last
/// line ends with `*/`. Inline comments behind code are never collected.
pub fn extract_multiline_comments<S: AsRef<str>>(lines: &[S]) -> Vec<CommentBlock> {
    let mut comments = Vec::new();
    let mut open: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.as_ref().trim();
        if open.is_none() && stripped.starts_with("/*") {
            open = Some(i);
        }
        if let Some(start) = open
            && stripped.ends_with("*/")
        {
            let text = lines[start..=i]
                .iter()
                .map(|l| l.as_ref())
                .collect::<Vec<_>>()
                .join("\n");
            comments.push(CommentBlock { start, end: i, text });
            open = None;
        }
    }

    comments
}

/// Translate comment line ranges from original indices to joined-line indices.
///
/// Joined line `i` covers original lines `starts[i]..starts[i + 1]`. Blocks that
/// collapse onto a single joined line are dropped.
pub fn sync_comments_to_joined_lines(
    comments: &[CommentBlock],
    original_line_count: usize,
    starts: &[usize],
) -> Vec<CommentBlock> {
    let mut synced = Vec::with_capacity(comments.len());

    for c in comments {
        let mut start_idx = None;
        let mut end_idx = None;

        for (i, &line_start) in starts.iter().enumerate() {
            let next_start = starts.get(i + 1).copied().unwrap_or(original_line_count);
            let covers = |line: usize| line_start <= line && line < next_start;

            if covers(c.start) {
                start_idx = Some(i);
            }
            if covers(c.end) {
                end_idx = Some(i);
            }
            if start_idx.is_some() && end_idx.is_some() {
                break;
            }
        }

        let start = start_idx.unwrap_or(0);
        let end = end_idx.unwrap_or(start);
        if start != end {
            synced.push(CommentBlock {
                start,
                end,
                text: c.text.clone(),
            });
        }
    }

    synced
}

pub fn is_in_comment_block(idx: usize, comments: &[CommentBlock]) -> bool {
    comments.iter().any(|c| c.contains(idx))
}

/// Find the comment that documents the function starting at `orig_idx`.
///
/// The nearest preceding block comment wins when only blank lines or
/// preprocessor directives separate it from the function. Otherwise a run of
/// `//` lines directly above (preprocessor lines skipped) is used.
pub fn extract_comment_for_function<S: AsRef<str>>(
    lines: &[S],
    orig_idx: usize,
    comments: &[CommentBlock],
) -> String {
    if let Some(block) = comments.iter().rev().find(|c| {
        c.end < orig_idx
            && (c.start..=c.end).all(|j| {
                let s = lines[j].as_ref().trim();
                s.starts_with("/*") || s.starts_with('*')
            })
    }) {
        let attached = (block.end + 1..orig_idx).all(|j| {
            let l = lines[j].as_ref();
            l.trim().is_empty() || l.trim_start().starts_with('#')
        });
        if attached {
            return block.text.clone();
        }
    }

    let mut collected = Vec::new();
    let mut j = orig_idx;
    while j > 0 {
        j -= 1;
        let stripped = lines[j].as_ref().trim();
        if stripped.is_empty() {
            break;
        }
        if stripped.starts_with('#') {
            continue;
        }
        if stripped.starts_with("//") {
            collected.push(stripped);
        } else {
            break;
        }
    }

    collected.reverse();
    collected.join("\n")
}
