// Author: kelexine (https://github.com/kelexine)
// export/csv.rs -- One CSV row per function

use crate::models::DocumentationRun;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn export_csv(run: &DocumentationRun, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(f));

    wtr.write_record([
        "File",
        "Line",
        "Name",
        "Return Type",
        "Params",
        "Template Params",
        "Occurrence",
        "Documented",
        "Open TODOs",
    ])?;

    for func in &run.functions {
        let open = func.todo.map(|t| t.open_todo_blocks).unwrap_or_default();
        wtr.write_record([
            func.source_file.to_string_lossy().as_ref(),
            &func.display_line().to_string(),
            &func.name,
            &func.return_type,
            &func.params,
            func.template_params.as_deref().unwrap_or(""),
            &func.occurrence.to_string(),
            if func.has_todo() { "no" } else { "yes" },
            &open.to_string(),
        ])?;
    }

    wtr.flush()?;
    eprintln!("[SUCCESS] Exported CSV → {}", path.display());
    Ok(())
}
