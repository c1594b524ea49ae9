// Author: kelexine (https://github.com/kelexine)
// doxygen/analyze.rs -- TODO accounting over synthesized Doxygen comments

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FunctionRecord, TodoAnalysis, TodoStats};

static RE_TPARAM_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\* @tparam (\w+)\s+(.*)").unwrap());
static RE_PARAM_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\* @param (\w+)\s+(.*)").unwrap());

fn description_has_todo(re: &Regex, line: &str) -> bool {
    re.captures(line).is_some_and(|caps| caps[2].contains("TODO"))
}

/// Count documented tag lines of one comment and the ones still marked TODO.
pub fn analyze_doxygen_todos(doxygen: &str) -> TodoAnalysis {
    let mut a = TodoAnalysis::default();

    for line in doxygen.lines().map(str::trim) {
        if line.starts_with("* @brief") {
            a.documented_blocks += 1;
            if line.contains("TODO") {
                a.todo_in_brief = true;
                a.open_todo_blocks += 1;
            }
        } else if line.starts_with("* @tparam") {
            a.documented_blocks += 1;
            a.total_tparams += 1;
            if description_has_todo(&RE_TPARAM_LINE, line) {
                a.tparams_with_todo += 1;
                a.open_todo_blocks += 1;
            }
        } else if line.starts_with("* @param") {
            a.documented_blocks += 1;
            a.total_params += 1;
            if description_has_todo(&RE_PARAM_LINE, line) {
                a.params_with_todo += 1;
                a.open_todo_blocks += 1;
            }
        } else if line.starts_with("* @return") {
            a.documented_blocks += 1;
            if line.contains("TODO") {
                a.todo_in_return = true;
                a.open_todo_blocks += 1;
            }
        }
    }

    a
}

#[inline]
fn percent(done: usize, total: usize) -> usize {
    if total == 0 { 0 } else { done * 100 / total }
}

/// Aggregate documentation progress; stores each record's analysis in `todo`.
pub fn calculate_todo_stats(records: &mut [FunctionRecord]) -> TodoStats {
    let analyses: Vec<TodoAnalysis> = records
        .iter_mut()
        .map(|r| {
            let a = analyze_doxygen_todos(&r.doxygen);
            r.todo = Some(a);
            a
        })
        .collect();
    let done_funcs = records.iter().filter(|r| !r.has_todo()).count();
    stats_from(&analyses, done_funcs)
}

fn stats_from(analyses: &[TodoAnalysis], done_funcs: usize) -> TodoStats {
    let total_funcs = analyses.len();
    let brief_todo = analyses.iter().filter(|a| a.todo_in_brief).count();
    let return_todo = analyses.iter().filter(|a| a.todo_in_return).count();
    let total_tparams: usize = analyses.iter().map(|a| a.total_tparams).sum();
    let tparams_todo: usize = analyses.iter().map(|a| a.tparams_with_todo).sum();
    let total_params: usize = analyses.iter().map(|a| a.total_params).sum();
    let params_todo: usize = analyses.iter().map(|a| a.params_with_todo).sum();

    TodoStats {
        total_funcs,
        done_funcs,
        percent_done: percent(done_funcs, total_funcs),
        brief_done: total_funcs - brief_todo,
        percent_brief_done: percent(total_funcs - brief_todo, total_funcs),
        tparams_done: total_tparams - tparams_todo,
        total_tparams,
        percent_tparams_done: percent(total_tparams - tparams_todo, total_tparams),
        params_done: total_params - params_todo,
        total_params,
        percent_params_done: percent(total_params - params_todo, total_params),
        return_done: total_funcs - return_todo,
        percent_return_done: percent(total_funcs - return_todo, total_funcs),
    }
}
