//! proveunused - prove that Swift files are unused before deleting them
//!
//! This library cross-references what an Xcode project says it compiles
//! with what the source tree actually references, and classifies every
//! Swift file with a three-tier usage verdict.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - find all .swift files under the source root
//! 2. **Scanning** - extract each file's top-level declarations
//! 3. **Evidence** - recover the compiled set from project.pbxproj or a build log
//! 4. **Reachability** - count outside references to each file's symbols
//! 5. **Reporting** - render verdicts with justification notes

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod evidence;
pub mod parser;
pub mod pbxproj;
pub mod report;

pub use analysis::{Corpus, FileUsage, ReachabilityAnalyzer, SymbolHit, Verdict};
pub use config::Config;
pub use discovery::{read_text, FileFinder, SourceFile};
pub use evidence::{BuildLogEvidence, CompileSourcesEvidence, CompiledSet, EvidenceSource};
pub use parser::{ScannedFile, SwiftScanner};
pub use pbxproj::{ManifestError, ObjectGraph, ObjectId, PbxObject, PbxParser};
pub use report::{ReportFormat, Reporter};
