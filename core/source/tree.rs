use super::{FilterableSource, de, default_file_pattern};
use crate::error::{AppError, Result};
use crate::tree::TreeViewConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_render_format() -> String {
    "ascii".to_string()
}

/// Tree source: renders a hierarchical view of a directory structure without
/// emitting any file contents, honoring the same filter chain as file
/// sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeSource {
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
    #[serde(default = "default_render_format")]
    pub render_format: String,
    #[serde(flatten)]
    pub tree_view: TreeViewConfig,
    #[serde(default)]
    pub use_gitignore: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TreeSource {
    pub fn new(source_paths: Vec<String>) -> Self {
        Self {
            description: String::new(),
            source_paths,
            file_pattern: default_file_pattern(),
            path: Vec::new(),
            not_path: Vec::new(),
            contains: Vec::new(),
            not_contains: Vec::new(),
            render_format: default_render_format(),
            tree_view: TreeViewConfig::default(),
            use_gitignore: false,
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_paths.is_empty() {
            return Err(AppError::Config(
                "Tree source must have a 'sourcePaths' property".to_string(),
            ));
        }
        if self.render_format != "ascii" {
            return Err(AppError::Config(format!(
                "Invalid renderFormat: {}. Allowed formats: ascii",
                self.render_format
            )));
        }
        Ok(())
    }
}

impl FilterableSource for TreeSource {
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
