// Some accessors are library surface beyond what the CLI exercises.
#![allow(dead_code)]

mod corpus;
mod reachability;

pub use corpus::Corpus;
pub use reachability::ReachabilityAnalyzer;

use serde::Serialize;

/// Usage confidence classification for one source file.
///
/// Ordered by ascending confidence of usage: a sort on the variant puts
/// the strongest deletion candidates first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Not in the compiled set and never referenced: strong deletion
    /// candidate.
    HighConfUnused,

    /// No textual reference found, but the evidence is inconclusive:
    /// the file is compiled, or it declares nothing countable.
    MaybeUnused,

    /// Referenced from elsewhere, or reachable by definition.
    Used,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::HighConfUnused => "HIGH_CONF_UNUSED",
            Verdict::MaybeUnused => "MAYBE_UNUSED",
            Verdict::Used => "USED",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference count for one declared symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolHit {
    pub symbol: String,
    pub count: usize,
}

/// Analysis result for one scanned file.
#[derive(Debug, Clone, Serialize)]
pub struct FileUsage {
    /// Path relative to the analysis root.
    pub rel_path: String,

    pub verdict: Verdict,

    /// Whether the compiled-set evidence includes this file.
    pub in_compile_sources: bool,

    pub declared_types: Vec<String>,
    pub extended_types: Vec<String>,
    pub static_funcs: Vec<String>,

    /// Per-symbol whole-word reference counts, in declaration order.
    pub symbol_hits: Vec<SymbolHit>,

    /// Sum of all symbol hits outside this file.
    pub total_hits: usize,

    /// Human-readable justifications for the verdict.
    pub notes: Vec<String>,

    /// Whether the file is marked as an entry point.
    pub is_entry_point: bool,
}
