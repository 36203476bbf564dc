use super::{FilterableSource, de, default_file_pattern, default_true};
use crate::error::{AppError, Result};
use crate::modifier::ModifierSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_branch() -> String {
    "main".to_string()
}

/// GitHub repository source, discovered through the contents-listing API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GithubSource {
    #[serde(default)]
    pub description: String,
    /// Repository identifier in `owner/repo` form.
    pub repository: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub source_paths: Vec<String>,
    /// Access token; a `${VAR}` value is resolved from the environment.
    #[serde(default)]
    pub github_token: Option<String>,
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
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GithubSource {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            description: String::new(),
            repository: repository.into(),
            branch: default_branch(),
            source_paths: Vec::new(),
            github_token: None,
            file_pattern: default_file_pattern(),
            path: Vec::new(),
            not_path: Vec::new(),
            contains: Vec::new(),
            not_contains: Vec::new(),
            show_tree_view: true,
            modifiers: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.parse_repository().map(|_| ())
    }

    /// Split the repository identifier into owner and name. Anything other
    /// than exactly two non-empty `/`-separated segments is rejected.
    pub fn parse_repository(&self) -> Result<(String, String)> {
        let mut parts = self.repository.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
                Ok((owner.to_string(), repo.to_string()))
            }
            _ => Err(AppError::InvalidArgument(format!(
                "Invalid repository format: {}. Expected format: owner/repo",
                self.repository
            ))),
        }
    }

    /// Access token with `${VAR}` environment interpolation applied.
    pub fn resolved_token(&self) -> Option<String> {
        let raw = self.github_token.as_deref()?;
        if let Some(var) = raw.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
            match std::env::var(var) {
                Ok(value) if !value.is_empty() => Some(value),
                _ => {
                    log::warn!("Environment variable '{}' for github token is not set", var);
                    None
                }
            }
        } else {
            Some(raw.to_string())
        }
    }
}

impl FilterableSource for GithubSource {
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
        Vec::new()
    }

    fn files(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}
