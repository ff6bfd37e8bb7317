use crate::analysis::{FileUsage, Verdict};
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    max_references: usize,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { max_references: 5 }
    }

    pub fn with_max_references(mut self, cap: usize) -> Self {
        self.max_references = cap;
        self
    }

    pub fn report(&self, results: &[FileUsage]) -> Result<()> {
        if results.is_empty() {
            println!("{}", "No Swift files analyzed.".yellow());
            return Ok(());
        }

        println!();
        println!("{}", "Unused file proof report".bold());
        println!();

        for usage in results {
            self.print_item(usage);
        }

        self.print_summary(results);
        Ok(())
    }

    fn verdict_label(&self, verdict: Verdict) -> colored::ColoredString {
        match verdict {
            Verdict::HighConfUnused => verdict.as_str().red().bold(),
            Verdict::MaybeUnused => verdict.as_str().yellow().bold(),
            Verdict::Used => verdict.as_str().green(),
        }
    }

    fn print_item(&self, usage: &FileUsage) {
        println!("- {}", usage.rel_path.cyan().bold());
        println!("  verdict: {}", self.verdict_label(usage.verdict));
        println!("  in_compile_sources: {}", usage.in_compile_sources);

        if usage.declared_types.is_empty() {
            println!("  declared_types: {}", "(none detected)".dimmed());
        } else {
            println!("  declared_types: {}", usage.declared_types.join(", "));
        }
        if !usage.extended_types.is_empty() {
            println!("  extended_types: {}", usage.extended_types.join(", "));
        }
        if !usage.static_funcs.is_empty() {
            println!("  static_funcs: {}", usage.static_funcs.join(", "));
        }

        // Top referenced symbols, highest first, capped.
        let mut referenced: Vec<_> = usage
            .symbol_hits
            .iter()
            .filter(|hit| hit.count > 0)
            .collect();
        referenced.sort_by(|a, b| b.count.cmp(&a.count));
        if referenced.is_empty() {
            println!("  references: {}", "none".dimmed());
        } else {
            println!("  references:");
            for hit in referenced.iter().take(self.max_references) {
                println!("    - {}: {}", hit.symbol, hit.count);
            }
        }

        if !usage.notes.is_empty() {
            println!("  notes:");
            for note in &usage.notes {
                println!("    - {}", note.dimmed());
            }
        }
        println!();
    }

    fn print_summary(&self, results: &[FileUsage]) {
        let mut high_conf = 0;
        let mut maybe = 0;
        let mut used = 0;
        for usage in results {
            match usage.verdict {
                Verdict::HighConfUnused => high_conf += 1,
                Verdict::MaybeUnused => maybe += 1,
                Verdict::Used => used += 1,
            }
        }

        println!("{}", "─".repeat(60).dimmed());
        println!(
            "Summary: {}, {}, {}",
            format!("{high_conf} high-confidence unused").red(),
            format!("{maybe} maybe unused").yellow(),
            format!("{used} used").green()
        );

        if high_conf > 0 {
            println!(
                "{}",
                format!("✗ {high_conf} file(s) look deletable with high confidence").red()
            );
        } else {
            println!("{}", "✓ No high-confidence unused files".green());
        }
        if maybe > 0 {
            println!(
                "{}",
                "⚠ Maybe-unused files may be reached via extensions, selectors, or operators"
                    .yellow()
            );
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
