use super::{FilterableSource, de, default_file_pattern, default_true};
use crate::error::{AppError, Result};
use crate::modifier::ModifierSpec;
use crate::tree::TreeViewConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Local filesystem source: one or more root paths (directories, files, or
/// wildcard patterns) walked recursively and emitted as fenced file blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalSource {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub source_paths: Vec<String>,
    #[serde(default = "default_file_pattern", deserialize_with = "de::string_or_seq")]
    pub file_pattern: Vec<String>,
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub path: Vec<String>,
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub not_path: Vec<String>,
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub contains: Vec<String>,
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub not_contains: Vec<String>,
    #[serde(default = "default_true")]
    pub show_tree_view: bool,
    /// Prefix prepended to relative paths in the rendered output.
    #[serde(default)]
    pub path_prefix: Option<String>,
    /// Explicit subset of documents to emit; `None` means every discovered
    /// file.
    #[serde(default)]
    pub docs: Option<Vec<String>>,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
    #[serde(default)]
    pub tree_view: TreeViewConfig,
    #[serde(default)]
    pub use_gitignore: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LocalSource {
    pub fn new(source_paths: Vec<String>) -> Self {
        Self {
            description: String::new(),
            source_paths,
            file_pattern: default_file_pattern(),
            path: Vec::new(),
            not_path: Vec::new(),
            contains: Vec::new(),
            not_contains: Vec::new(),
            show_tree_view: true,
            path_prefix: None,
            docs: None,
            modifiers: Vec::new(),
            tree_view: TreeViewConfig::default(),
            use_gitignore: false,
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_paths.is_empty() {
            return Err(AppError::Config(
                "Local source must have a 'sourcePaths' property".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a discovered file belongs to the configured document subset.
    pub fn selects_document(&self, relative: &std::path::Path) -> bool {
        match &self.docs {
            None => true,
            Some(docs) => {
                let relative = relative.to_string_lossy();
                docs.iter().any(|d| relative == d.as_str())
            }
        }
    }

    /// Relative path as displayed in the output, honoring `pathPrefix`.
    pub fn display_path(&self, relative: &std::path::Path) -> String {
        let relative = relative.to_string_lossy();
        match &self.path_prefix {
            Some(prefix) if !prefix.is_empty() => {
                format!("{}/{}", prefix.trim_end_matches('/'), relative)
            }
            _ => relative.into_owned(),
        }
    }
}

impl FilterableSource for LocalSource {
    fn name(&self) -> &[String] {
        &self.file_pattern
    }

    fn path_patterns(&self) -> &[String] {
        &self.path
    }

    fn not_path(&self) -> &[String] {
        &self.not_path
    }

    fn contains(&self) -> &[String] {
        &self.contains
    }

    fn not_contains(&self) -> &[String] {
        &self.not_contains
    }

    fn in_dirs(&self) -> Vec<PathBuf> {
        crate::finder::local::resolve_source_roots(&self.source_paths).dirs
    }

    fn files(&self) -> Vec<PathBuf> {
        crate::finder::local::resolve_source_roots(&self.source_paths).files
    }

    fn use_gitignore(&self) -> bool {
        self.use_gitignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_missing_source_paths() {
        let source = LocalSource::new(Vec::new());
        assert!(matches!(source.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn display_path_applies_prefix() {
        let mut source = LocalSource::new(vec!["src".to_string()]);
        assert_eq!(source.display_path(std::path::Path::new("a/b.rs")), "a/b.rs");

        source.path_prefix = Some("backend/".to_string());
        assert_eq!(
            source.display_path(std::path::Path::new("a/b.rs")),
            "backend/a/b.rs"
        );
    }
}
