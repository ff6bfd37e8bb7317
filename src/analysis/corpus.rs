use regex::Regex;

/// Read-only cache of every source file's text, shared by all per-file
/// reachability passes.
pub struct Corpus {
    files: Vec<(String, String)>,
}

impl Corpus {
    /// Build the cache from `(rel_path, text)` pairs.
    pub fn new(files: Vec<(String, String)>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Count whole-word occurrences of `symbol` in every file except
    /// `exclude`. The excluded file is the one under analysis: a file
    /// must not prove its own usage by referencing itself.
    pub fn count_hits(&self, exclude: &str, symbol: &str) -> usize {
        // Symbols come from identifier captures, so the escaped pattern
        // always compiles.
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(symbol)))
            .expect("escaped identifier is a valid pattern");

        self.files
            .iter()
            .filter(|(rel_path, _)| rel_path != exclude)
            .map(|(_, text)| pattern.find_iter(text).count())
            .sum()
    }
}
