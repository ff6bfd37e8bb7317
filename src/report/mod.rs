mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::FileUsage;
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Reporter for rendering usage verdicts
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    max_references: usize,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            max_references: 5,
        }
    }

    /// Cap on referenced symbols listed per file.
    pub fn with_max_references(mut self, cap: usize) -> Self {
        self.max_references = cap;
        self
    }

    /// Render the verdicts. The input is already in report order.
    pub fn report(&self, results: &[FileUsage]) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new().with_max_references(self.max_references);
                reporter.report(results)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(results)
            }
        }
    }
}
