//! Shallow lexical scanning of Swift sources.
//!
//! Declaration extraction is line-oriented, not a real parse: a line that
//! introduces a named type-like construct (optionally preceded by a
//! visibility or finality modifier) contributes a symbol. Nested scopes
//! are not modeled, and the reachability contract does not depend on this
//! stage ever becoming a true declaration table.

use regex::Regex;
use serde::Serialize;

/// One scanned Swift source unit. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedFile {
    /// Path relative to the analysis root.
    pub rel_path: String,

    /// Top-level type-like symbols the file originates
    /// (class/struct/enum/actor/protocol). Unique, insertion order.
    pub declared_types: Vec<String>,

    /// Types the file extends but does not originate.
    pub extended_types: Vec<String>,

    /// `static func` names, reported for auditability but never counted
    /// toward reference hits.
    pub static_funcs: Vec<String>,

    /// Whether an entry-point attribute (`@main` and friends) appears.
    pub is_entry_point: bool,
}

/// Line-oriented scanner for top-level Swift declarations.
pub struct SwiftScanner {
    type_decl: Regex,
    extension_decl: Regex,
    static_func: Regex,
    entry_attr: Regex,
}

const VISIBILITY: &str = r"(?:(?:public|internal|fileprivate|private|open)\s+)?";

impl SwiftScanner {
    pub fn new() -> Self {
        Self::with_entry_attributes(&[
            "main".to_string(),
            "UIApplicationMain".to_string(),
            "NSApplicationMain".to_string(),
        ])
    }

    /// Build a scanner that recognizes the given attribute names as
    /// entry-point markers.
    pub fn with_entry_attributes(attributes: &[String]) -> Self {
        let alternatives = attributes
            .iter()
            .map(|a| regex::escape(a))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            type_decl: Regex::new(&format!(
                r"(?m)^\s*{VISIBILITY}(?:final\s+)?(?:class|struct|enum|actor|protocol)\s+([A-Za-z_]\w*)"
            ))
            .unwrap(),
            extension_decl: Regex::new(&format!(
                r"(?m)^\s*{VISIBILITY}extension\s+([A-Za-z_]\w*)"
            ))
            .unwrap(),
            static_func: Regex::new(r"(?m)^\s*static\s+func\s+([A-Za-z_]\w*)\s*\(").unwrap(),
            entry_attr: Regex::new(&format!(r"(?m)^\s*@(?:{alternatives})\b")).unwrap(),
        }
    }

    /// Scan one file's text into its declared-symbol record.
    pub fn scan(&self, rel_path: &str, text: &str) -> ScannedFile {
        let mut declared_types = Vec::new();
        for captures in self.type_decl.captures_iter(text) {
            push_unique(&mut declared_types, &captures[1]);
        }

        let mut extended_types = Vec::new();
        for captures in self.extension_decl.captures_iter(text) {
            push_unique(&mut extended_types, &captures[1]);
        }

        let mut static_funcs = Vec::new();
        for captures in self.static_func.captures_iter(text) {
            push_unique(&mut static_funcs, &captures[1]);
        }

        ScannedFile {
            rel_path: rel_path.to_string(),
            declared_types,
            extended_types,
            static_funcs,
            is_entry_point: self.entry_attr.is_match(text),
        }
    }
}

impl Default for SwiftScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered-set insert: unique, insertion order preserved.
fn push_unique(symbols: &mut Vec<String>, name: &str) {
    if !symbols.iter().any(|s| s == name) {
        symbols.push(name.to_string());
    }
}
