//! Compiled-set evidence.
//!
//! Two independent sources can prove that a file is part of the build:
//! the project manifest's Compile Sources phase, and the log output of an
//! actual build. Both yield the same [`CompiledSet`], so the analyzer
//! never knows which one it is looking at.

// Some accessors are library surface beyond what the CLI exercises.
#![allow(dead_code)]

mod build_log;
mod compile_sources;

pub use build_log::BuildLogEvidence;
pub use compile_sources::CompileSourcesEvidence;

use miette::Result;
use std::collections::HashSet;

/// Normalized root-relative paths known to be part of the compiled
/// target. Produced once per run by exactly one evidence source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledSet {
    paths: HashSet<String>,
}

impl CompiledSet {
    pub fn insert(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|s| s.as_str())
    }
}

impl FromIterator<String> for CompiledSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

/// Something that yields the compiled-file set for a build target.
pub trait EvidenceSource {
    /// Human-readable label for logs and notes.
    fn describe(&self) -> &'static str;

    /// Compute the whole set in one pass. No partial updates.
    fn collect(&self) -> Result<CompiledSet>;
}
