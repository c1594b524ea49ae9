// Author: kelexine (https://github.com/kelexine)
// export/markdown.rs -- Markdown documentation report

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use super::{anchor, declaration, make_bar, todo_marker};
use crate::config::DocumentSettings;
use crate::models::{DocumentationRun, TodoStats};

const BAR_LEN: usize = 20;

pub fn export_markdown(run: &DocumentationRun, doc: &DocumentSettings, path: &Path) -> Result<()> {
    std::fs::write(path, render_markdown(run, doc)).with_context(|| format!("Cannot create {}", path.display()))?;
    eprintln!("[SUCCESS] Exported Markdown → {}", path.display());
    Ok(())
}

pub fn render_markdown(run: &DocumentationRun, doc: &DocumentSettings) -> String {
    let mut out = String::new();
    write_header(&mut out, doc);

    if doc.show_doc_progress {
        write_progress(&mut out, &run.stats);
    }

    out.push_str("## 📚 Table of Content\n\n");
    for func in &run.functions {
        let _ = writeln!(out, "- [{}{}](#{})", todo_marker(func, doc.highlight_todo), func.name, anchor(&func.name));
    }
    out.push('\n');

    for func in &run.functions {
        let _ = writeln!(out, "<a id=\"{}\"></a>", anchor(&func.name));
        let _ = writeln!(
            out,
            "## {}`{}` <a href='#top' style='float:right; font-size: 12px;'>🔝 Back to Top</a>",
            todo_marker(func, doc.highlight_todo),
            func.name
        );
        let _ = writeln!(out, "**Signature:** `{}`\n", declaration(func));

        if func.doxygen.is_empty() {
            continue;
        }
        if doc.highlight_todo && func.has_todo() {
            out.push_str("> ⚠️ **Warning: Function contains a TODO mark!**\n\n");
        }
        out.push_str("### 📘 Documentation\n");
        let _ = writeln!(
            out,
            "<div style='font-size: 12px; color: gray;'>📄 {} (Line {})</div>\n",
            func.file_name(),
            func.display_line()
        );
        out.push_str(&format_doxygen(&func.doxygen));
        out.push_str("\n\n");
    }

    out.push_str("\n---\n");
    let _ = writeln!(out, "<div align='right'>SW-Version: {}</div>", env!("CARGO_PKG_VERSION"));
    out
}

fn write_header(out: &mut String, doc: &DocumentSettings) {
    if let Some(logo) = &doc.logo_path {
        let _ = writeln!(out, "<img src=\"{logo}\" alt=\"Logo\" style=\"max-height: 100px;\">\n");
    }
    let _ = writeln!(out, "# {}\n", doc.title);
    let _ = writeln!(out, "**Version**: {}", doc.version);
    let _ = writeln!(out, "**Author**: {}", doc.author);
    let _ = writeln!(out, "**Date**: {}\n", doc.date);
    out.push_str("<a id=\"top\"></a>\n\n");
}

fn write_progress(out: &mut String, stats: &TodoStats) {
    out.push_str("## 📊 Overall Documentation progress\n\n");
    let _ = writeln!(
        out,
        "{} of {} functions are **finished documented**\n",
        stats.done_funcs, stats.total_funcs
    );
    let _ = writeln!(out, "`{}` **{}%**\n", make_bar(stats.percent_done, BAR_LEN), stats.percent_done);

    out.push_str("\n## 🛠️ Detailed TODO-Statistics\n\n");
    let rows = [
        ("Brief", stats.brief_done, stats.total_funcs, stats.percent_brief_done),
        ("Template Params", stats.tparams_done, stats.total_tparams, stats.percent_tparams_done),
        ("Params", stats.params_done, stats.total_params, stats.percent_params_done),
        ("Return", stats.return_done, stats.total_funcs, stats.percent_return_done),
    ];
    for (label, done, total, percent) in rows {
        let _ = writeln!(out, "- **{label}**: {done} / {total} documented");
        let _ = writeln!(out, "  `{}` **{percent}%**\n", make_bar(percent, BAR_LEN));
    }
}

/// Split on whitespace into at most `n` parts; the last keeps its inner spacing.
fn split_max(s: &str, n: usize) -> Vec<&str> {
    let mut parts = Vec::with_capacity(n);
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if parts.len() + 1 == n {
            parts.push(rest.trim_end());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(i) => {
                parts.push(&rest[..i]);
                rest = rest[i..].trim_start();
            }
            None => {
                parts.push(rest);
                break;
            }
        }
    }
    parts
}

fn flush_tag(out: &mut Vec<String>, tag: Option<&str>, buffer: &mut Vec<String>) {
    let Some(tag) = tag else { return };
    let content = buffer.join(" ").trim().to_string();
    buffer.clear();

    let named = |prefix: &str| tag.strip_prefix(prefix).map(|rest| rest.trim().to_string());

    let line = if tag == "@brief" {
        format!("**🔹 Description:** {content}")
    } else if let Some(name) = named("@param ") {
        format!("- **Parameter `{name}`**: {content}")
    } else if let Some(name) = named("@tparam ") {
        format!("- **Template Parameter `{name}`**: {content}")
    } else if tag == "@return" {
        format!("**🔁 Return value:** {content}")
    } else if tag == "@note" {
        format!("> 💡 **Note:** {content}")
    } else {
        let bare = tag.trim_start_matches('@');
        let mut chars = bare.chars();
        let title = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        };
        format!("- **{title}:** {content}")
    };
    out.push(line);
}

/// Render a Doxygen comment as Markdown lines, one per tag.
pub fn format_doxygen(comment: &str) -> String {
    let mut formatted = Vec::new();
    let mut current: Option<String> = None;
    let mut buffer: Vec<String> = Vec::new();

    for line in comment.trim().split('\n') {
        let stripped = line.trim();
        if matches!(stripped, "/*" | "/**" | "*/") {
            continue;
        }
        let stripped = stripped.trim_start_matches('*').trim();
        if stripped.is_empty() {
            continue;
        }

        if stripped.starts_with('@') {
            flush_tag(&mut formatted, current.as_deref(), &mut buffer);
            let parts = split_max(stripped, 3);
            if parts.len() >= 2 && (parts[0] == "@param" || parts[0] == "@tparam") {
                current = Some(format!("{} {}", parts[0], parts[1]));
                if let Some(text) = parts.get(2) {
                    buffer.push(text.to_string());
                }
            } else {
                current = Some(parts[0].to_string());
                if parts.len() > 1 {
                    buffer.push(parts[1..].join(" "));
                }
            }
        } else {
            buffer.push(stripped.to_string());
        }
    }
    flush_tag(&mut formatted, current.as_deref(), &mut buffer);
    formatted.join("\n")
}
