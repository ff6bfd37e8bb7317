use super::{Corpus, FileUsage, SymbolHit, Verdict};
use crate::evidence::CompiledSet;
use crate::parser::ScannedFile;
use rayon::prelude::*;
use tracing::debug;

/// Analyzer that classifies each file by cross-referencing its declared
/// symbols against the rest of the codebase and the compiled set.
///
/// Each per-file pass is a pure function of the shared corpus, so the
/// passes run independently; `with_parallel` fans them out across a
/// rayon pool with no cross-file state.
pub struct ReachabilityAnalyzer {
    count_extended: bool,
    parallel: bool,
}

impl ReachabilityAnalyzer {
    pub fn new() -> Self {
        Self {
            count_extended: false,
            parallel: false,
        }
    }

    /// Also count hits on extended-type symbols. Used with build-log
    /// evidence, where the compiled set is empirical rather than
    /// declared and extension hits carry more weight.
    pub fn with_extended_symbols(mut self, enabled: bool) -> Self {
        self.count_extended = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Produce one verdict per scanned file, in report order: strongest
    /// deletion candidates first, uncompiled before compiled, then by
    /// path. The order is a function of the results alone, never of the
    /// input ordering.
    pub fn analyze(
        &self,
        files: &[ScannedFile],
        corpus: &Corpus,
        compiled: &CompiledSet,
    ) -> Vec<FileUsage> {
        let mut results: Vec<FileUsage> = if self.parallel {
            files
                .par_iter()
                .map(|file| self.analyze_file(file, corpus, compiled))
                .collect()
        } else {
            files
                .iter()
                .map(|file| self.analyze_file(file, corpus, compiled))
                .collect()
        };

        results.sort_by(|a, b| {
            a.verdict
                .cmp(&b.verdict)
                .then(a.in_compile_sources.cmp(&b.in_compile_sources))
                .then_with(|| a.rel_path.cmp(&b.rel_path))
        });
        results
    }

    fn analyze_file(
        &self,
        file: &ScannedFile,
        corpus: &Corpus,
        compiled: &CompiledSet,
    ) -> FileUsage {
        let in_compile_sources = compiled.contains(&file.rel_path);

        let mut symbol_hits = Vec::new();
        let mut total_hits = 0;
        for symbol in &file.declared_types {
            let count = corpus.count_hits(&file.rel_path, symbol);
            total_hits += count;
            symbol_hits.push(SymbolHit {
                symbol: symbol.clone(),
                count,
            });
        }
        if self.count_extended {
            for symbol in &file.extended_types {
                if symbol_hits.iter().any(|hit| &hit.symbol == symbol) {
                    continue;
                }
                let count = corpus.count_hits(&file.rel_path, symbol);
                total_hits += count;
                symbol_hits.push(SymbolHit {
                    symbol: symbol.clone(),
                    count,
                });
            }
        }

        let counted_symbols = !symbol_hits.is_empty();
        let mut notes = Vec::new();

        if file.declared_types.is_empty() {
            if file.extended_types.is_empty() {
                notes.push("No top-level type declarations found.".to_string());
            } else {
                notes.push(
                    "Extension-only file: adds behavior to types it does not originate."
                        .to_string(),
                );
            }
        }
        if !in_compile_sources {
            notes.push("Not listed in the target's Compile Sources.".to_string());
        }
        if counted_symbols && total_hits == 0 {
            notes.push("No references to declared symbols found outside this file.".to_string());
        }

        // Verdict policy, in order. Compiled-but-silent files stay at
        // "maybe": whole-word search cannot see reflective, string-keyed,
        // or operator usage, so confident unused requires both absence
        // from the compiled set and silence in the corpus.
        let verdict = if file.is_entry_point {
            notes.push("Entry point attribute present; reachable by definition.".to_string());
            Verdict::Used
        } else if !in_compile_sources && total_hits == 0 && !file.declared_types.is_empty() {
            Verdict::HighConfUnused
        } else if total_hits == 0 {
            Verdict::MaybeUnused
        } else {
            Verdict::Used
        };

        debug!(
            "{}: {} ({} hits, compiled: {})",
            file.rel_path, verdict, total_hits, in_compile_sources
        );

        FileUsage {
            rel_path: file.rel_path.clone(),
            verdict,
            in_compile_sources,
            declared_types: file.declared_types.clone(),
            extended_types: file.extended_types.clone(),
            static_funcs: file.static_funcs.clone(),
            symbol_hits,
            total_hits,
            notes,
            is_entry_point: file.is_entry_point,
        }
    }
}

impl Default for ReachabilityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
