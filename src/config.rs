use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Patterns to exclude from the source scan
    pub exclude: Vec<String>,

    /// Attribute names that mark a file as an entry point
    pub entry_point_attributes: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal or json
    pub format: String,

    /// Cap on referenced symbols listed per file
    pub max_references: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: vec![
                "**/Pods/**".to_string(),
                "**/Carthage/**".to_string(),
                "**/.build/**".to_string(),
                "**/DerivedData/**".to_string(),
            ],
            entry_point_attributes: vec![
                "main".to_string(),
                "UIApplicationMain".to_string(),
                "NSApplicationMain".to_string(),
            ],
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            max_references: 5,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".proveunused.yml",
            ".proveunused.yaml",
            ".proveunused.toml",
            "proveunused.yml",
            "proveunused.yaml",
            "proveunused.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check if a path matches an exclusion pattern
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Minimal glob matching for patterns like `*Tests` or `**/Pods/**`.
fn glob_match(pattern: &str, text: &str) -> bool {
    if let Some(dir) = pattern
        .strip_prefix("**/")
        .and_then(|p| p.strip_suffix("/**"))
    {
        // Must match a complete directory name, not a substring of one.
        return text.contains(&format!("/{dir}/")) || text.starts_with(&format!("{dir}/"));
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return text.ends_with(suffix);
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return text.starts_with(prefix);
    }
    text == pattern
}
