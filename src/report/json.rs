use crate::analysis::{FileUsage, Verdict};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, results: &[FileUsage]) -> Result<()> {
        let report = JsonReport::from_results(results);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_files: usize,
    files: &'a [FileUsage],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    high_conf_unused: usize,
    maybe_unused: usize,
    used: usize,
}

impl<'a> JsonReport<'a> {
    fn from_results(results: &'a [FileUsage]) -> Self {
        let mut high_conf_unused = 0;
        let mut maybe_unused = 0;
        let mut used = 0;
        for usage in results {
            match usage.verdict {
                Verdict::HighConfUnused => high_conf_unused += 1,
                Verdict::MaybeUnused => maybe_unused += 1,
                Verdict::Used => used += 1,
            }
        }

        Self {
            version: "1.0",
            total_files: results.len(),
            files: results,
            summary: JsonSummary {
                high_conf_unused,
                maybe_unused,
                used,
            },
        }
    }
}
