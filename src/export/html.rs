// Author: kelexine (https://github.com/kelexine)
// export/html.rs -- HTML documentation report

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Write as _;
use std::path::Path;

use super::{anchor, declaration, todo_marker};
use crate::config::DocumentSettings;
use crate::models::{DocumentationRun, TodoStats};

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\w+)").unwrap());

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; background: #f2f2f2; color: #333; padding: 20px; }
        h1 { color: #004080; text-align: center; }
        h2 { margin-top: 30px; color: #0066cc; }
        .code-block { background: #fff; border: 1px solid #ccc; padding: 10px; font-family: monospace; white-space: pre-wrap; border-radius: 6px; box-shadow: 1px 1px 3px #ccc; }
        .doxygen-comment { background: #e8f0fe; border-left: 4px solid #3367d6; margin-top: 10px; padding: 10px; font-family: monospace; white-space: pre-wrap; border-radius: 5px; display: none; }
        .doxygen-comment.show { display: block; }
        .doxygen-comment span.brief { color: #0b5394; font-weight: bold; }
        .doxygen-comment span.param { color: #38761d; }
        .doxygen-comment span.return { color: #990000; }
        .doxygen-comment span.note { color: #8a2be2; font-style: italic; }
        .doxygen-comment span.tag { color: #999; font-style: italic; }
        button.toggle-btn { margin-top: 5px; margin-bottom: 10px; padding: 5px 10px; border-radius: 4px; border: none; background: #004080; color: white; cursor: pointer; }
        button.toggle-btn.active { background: #28a745; }
        .print-btn { position: fixed; top: 10px; right: 10px; background: #28a745; color: white; border: none; padding: 8px 14px; border-radius: 5px; cursor: pointer; font-size: 14px; }
        @media print { .print-btn, .toggle-btn { display: none; } }
        ul.toc { background: #ffffff; padding: 15px; border-radius: 10px; box-shadow: 1px 1px 5px #aaa; list-style: none; }
        ul.toc li { margin-bottom: 8px; }
        ul.toc li a { text-decoration: none; color: #004080; font-weight: bold; }
        .todo { background-color: #fff3cd; border-left: 6px solid red; padding-left: 10px; }
        .todo-warning { margin-top: 8px; color: #856404; background-color: #fff3cd; border: 1px solid #ffeeba; padding: 10px; border-radius: 4px; }
        .bar { background-color: #eee; border-radius: 3px; overflow: hidden; max-width: 400px; margin-bottom: 10px; }
        .bar > div { padding: 2px 4px; color: white; font-size: 10px; text-align: right; }
"#;

const SCRIPT: &str = r#"
        function toggleComment(id, button) {
            const block = document.getElementById(id);
            const isVisible = block.classList.contains('show');
            block.classList.toggle('show', !isVisible);
            button.classList.toggle('active', !isVisible);
            button.innerText = isVisible ? "📘 Show comments" : "📘 Hide comments";
        }
"#;

pub fn export_html(run: &DocumentationRun, doc: &DocumentSettings, path: &Path) -> Result<()> {
    std::fs::write(path, render_html(run, doc)).with_context(|| format!("Cannot create {}", path.display()))?;
    eprintln!("[SUCCESS] Exported HTML → {}", path.display());
    Ok(())
}

/// Escape the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped comment text with each `@tag` wrapped in a classed span.
pub fn highlight_tags(comment: &str) -> String {
    RE_TAG
        .replace_all(&escape(comment), |caps: &Captures| {
            let class = match &caps[1] {
                "brief" => "brief",
                "param" | "tparam" => "param",
                "return" => "return",
                "note" => "note",
                _ => "tag",
            };
            format!("<span class='{class}'>@{}</span>", &caps[1])
        })
        .into_owned()
}

pub fn render_html(run: &DocumentationRun, doc: &DocumentSettings) -> String {
    let mut out = String::new();
    let title = escape(&doc.title);

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    <title>{title} - Functional Documentation</title>\n    <style>{STYLE}    </style>\n    <script>{SCRIPT}    </script>\n</head>\n<body>\n    <a id=\"top\"></a>\n    <button class=\"print-btn\" onclick=\"window.print()\">🖨️ Print</button>\n"
    );

    if let Some(logo) = &doc.logo_path {
        let _ = writeln!(
            out,
            "    <div style=\"text-align:left; margin-bottom: 20px;\"><img src=\"{}\" alt=\"Logo\" style=\"max-height: 100px;\"></div>",
            escape(logo)
        );
    }

    let _ = writeln!(out, "    <h1>{title}</h1>");
    let _ = writeln!(out, "    <p><strong>Version:</strong> {}</p>", escape(&doc.version));
    let _ = writeln!(out, "    <p><strong>Author:</strong> {}</p>", escape(&doc.author));
    let _ = writeln!(out, "    <p><strong>Date:</strong> {}</p>", escape(&doc.date));

    if doc.show_doc_progress {
        write_progress(&mut out, &run.stats);
    }

    out.push_str("    <h2>📚 Table of Content</h2>\n    <ul class=\"toc\">\n");
    for func in &run.functions {
        let _ = writeln!(
            out,
            "<li><a href='#{}'>{}{}</a></li>",
            anchor(&func.name),
            todo_marker(func, doc.highlight_todo),
            escape(&func.name)
        );
    }
    out.push_str("</ul>\n");

    for (idx, func) in run.functions.iter().enumerate() {
        let flagged = doc.highlight_todo && func.has_todo();
        let class = if flagged { " class='todo'" } else { "" };

        let _ = write!(
            out,
            "\n<div style='display: flex; align-items: center; justify-content: space-between; margin-top: 15px;'>\n    <h2 id='{}'{class} style='margin: 0;'>{}{}</h2>\n    <a href='#top' style='font-size: 14px; color: #0066cc; text-decoration: none;'>🔝 Back to Top</a>\n</div>\n",
            anchor(&func.name),
            todo_marker(func, doc.highlight_todo),
            escape(&func.name)
        );
        if flagged {
            out.push_str("<div class='todo-warning'>⚠️ <strong>Warning:</strong> Function contains a TODO mark!</div>\n");
        }
        let _ = writeln!(out, "<div class='code-block'>{}</div>", escape(&declaration(func)));

        if func.doxygen.is_empty() {
            continue;
        }
        let id = format!("comment_{idx}");
        let _ = writeln!(
            out,
            "<button class='toggle-btn active' onclick=\"toggleComment('{id}', this)\">📘 Hide comments</button>"
        );
        let _ = writeln!(
            out,
            "<div class='doxygen-comment show' id='{id}'><div style='font-size: 12px; color: gray;'>📄 {} (Line {})</div>{}</div>",
            escape(&func.file_name()),
            func.display_line(),
            highlight_tags(&func.doxygen)
        );
    }

    let _ = write!(
        out,
        "\n    <div style=\"position: fixed; bottom: 10px; right: 10px; font-size: 12px; color: #666;\">\n        SW-Version: {}\n    </div>\n</body></html>\n",
        env!("CARGO_PKG_VERSION")
    );
    out
}

fn bar(out: &mut String, label: &str, done: usize, total: usize, percent: usize, color: &str) {
    let _ = write!(
        out,
        "        <p><strong>{label}:</strong> {done}/{total}</p>\n        <div class='bar'><div style='background-color: {color}; width: {percent}%;'>{percent}%</div></div>\n"
    );
}

fn write_progress(out: &mut String, stats: &TodoStats) {
    let _ = write!(
        out,
        "    <h2>📊 Overall Documentation progress</h2>\n    <p>{} of {} functions are <strong>finished documented</strong>.</p>\n",
        stats.done_funcs, stats.total_funcs
    );
    bar(out, "Overall", stats.done_funcs, stats.total_funcs, stats.percent_done, "#28a745");

    out.push_str("    <h3 style='margin-top: 40px;'>🛠️ Detailed TODO-Statistics</h3>\n    <div style=\"font-size: 0.9em; color: #555;\">\n");
    bar(out, "Brief", stats.brief_done, stats.total_funcs, stats.percent_brief_done, "#007bff");
    bar(out, "Template-Params", stats.tparams_done, stats.total_tparams, stats.percent_tparams_done, "#ffc107");
    bar(out, "Params", stats.params_done, stats.total_params, stats.percent_params_done, "#ffc107");
    bar(out, "Return", stats.return_done, stats.total_funcs, stats.percent_return_done, "#17a2b8");
    out.push_str("    </div>\n");
}
