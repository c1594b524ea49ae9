// Author: kelexine (https://github.com/kelexine)
// display/mod.rs -- Colored terminal summary of a documentation run

use colored::*;
use std::path::{Path, PathBuf};

use crate::models::{DocumentationRun, TodoStats};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn fmt_num(n: usize) -> String {
    // Thousands-separator formatting
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let tail: String = s.chars().rev().take(max.saturating_sub(3)).collect::<Vec<_>>().into_iter().rev().collect();
        format!("...{tail}")
    }
}

fn progress_bar(percent: usize, width: usize) -> String {
    let done = percent.min(100) * width / 100;
    let filled = "█".repeat(done);
    let empty = "░".repeat(width - done);
    let filled = match percent {
        80.. => filled.green(),
        50..=79 => filled.yellow(),
        _ => filled.red(),
    };
    format!("{filled}{}", empty.dimmed())
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Summary
// ─────────────────────────────────────────────────────────────────────────────

pub fn display_summary(run: &DocumentationRun, root: &Path, reports: &[PathBuf], readonly: bool) {
    println!();
    println!("{}", "Documented Files:".bold());
    println!();

    println!("{:<52} {:>10} {:>10}", "File", "Functions", "Open TODO");
    println!("{}", "-".repeat(74));
    for file in &run.files {
        let funcs: Vec<_> = run.functions_in(file).collect();
        let open = funcs.iter().filter(|f| f.has_todo()).count();
        let name = truncate(&relative(file, root), 52);
        let open_col = if open == 0 {
            format!("{:>10}", 0).green()
        } else {
            format!("{open:>10}").yellow()
        };
        println!("{:<52} {:>10} {}", name.cyan(), fmt_num(funcs.len()), open_col);
    }

    println!();
    println!("{}", "=".repeat(74));
    println!(
        "{} {}",
        "[SUCCESS]".green().bold(),
        format!("Functions found: {}", fmt_num(run.function_count())).bold()
    );
    println!("{} Files scanned: {}", "[INFO]   ".blue(), fmt_num(run.files.len()));
    if readonly {
        println!("{} Read-only run, sources untouched", "[INFO]   ".blue());
    }
    display_progress(&run.stats);

    for report in reports {
        println!("{} Report written: {}", "[INFO]   ".blue(), report.display());
    }
    println!("{}", "=".repeat(74));
    println!();
}

fn display_progress(stats: &TodoStats) {
    println!(
        "{} Documented: {} of {} functions  {} {}%",
        "[INFO]   ".blue(),
        fmt_num(stats.done_funcs),
        fmt_num(stats.total_funcs),
        progress_bar(stats.percent_done, 20),
        stats.percent_done
    );

    let rows = [
        ("Brief", stats.brief_done, stats.total_funcs, stats.percent_brief_done),
        ("Template params", stats.tparams_done, stats.total_tparams, stats.percent_tparams_done),
        ("Params", stats.params_done, stats.total_params, stats.percent_params_done),
        ("Return", stats.return_done, stats.total_funcs, stats.percent_return_done),
    ];
    for (label, done, total, percent) in rows {
        println!("           {:<16} {:>6} / {:<6} {:>4}%", label, fmt_num(done), fmt_num(total), percent);
    }

    if stats.total_funcs > 0 && stats.done_funcs < stats.total_funcs {
        println!(
            "{} {} functions still carry TODO marks",
            "[WARN]   ".yellow(),
            fmt_num(stats.total_funcs - stats.done_funcs)
        );
    }
}
