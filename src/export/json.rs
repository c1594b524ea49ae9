// Author: kelexine (https://github.com/kelexine)
// export/json.rs -- JSON dump of records and statistics

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::DocumentSettings;
use crate::models::DocumentationRun;

pub fn to_value(run: &DocumentationRun, doc: &DocumentSettings) -> serde_json::Value {
    json!({
        "metadata": {
            "title": doc.title,
            "version": doc.version,
            "author": doc.author,
            "date": doc.date,
            "timestamp": Utc::now().to_rfc3339(),
            "total_files": run.files.len(),
            "total_functions": run.function_count(),
            "generator": concat!("cppdoc v", env!("CARGO_PKG_VERSION")),
        },
        "stats": run.stats,
        "files": run.files.iter().map(|f| f.to_string_lossy()).collect::<Vec<_>>(),
        "functions": run.functions,
    })
}

pub fn export_json(run: &DocumentationRun, doc: &DocumentSettings, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &to_value(run, doc)).with_context(|| "Failed to serialize JSON")?;

    eprintln!("[SUCCESS] Exported JSON → {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_run;

    #[test]
    fn test_json_shape() {
        let v = to_value(&sample_run(), &DocumentSettings::default());
        assert_eq!(v["metadata"]["total_functions"], 2);
        assert_eq!(v["stats"]["done_funcs"], 1);
        assert_eq!(v["functions"][1]["name"], "clamp");
        assert_eq!(v["functions"][1]["template_params"], "<typename T>");
        assert_eq!(v["functions"][0]["todo"]["total_params"], 1);
        assert_eq!(v["files"][0], "src/led.cpp");
    }
}
