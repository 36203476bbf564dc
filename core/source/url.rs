use super::{FilterableSource, de};
use crate::error::{AppError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// URL source: a list of pages fetched over HTTP, optionally narrowed to a
/// CSS-style selector, cleaned and appended as text blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlSource {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "de::string_or_seq")]
    pub urls: Vec<String>,
    #[serde(default)]
    pub selector: Option<String>,
    /// Extra request headers sent with every URL of this source.
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UrlSource {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            description: String::new(),
            urls,
            selector: None,
            headers: IndexMap::new(),
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.urls.is_empty() {
            return Err(AppError::Config(
                "URL source must have a 'urls' property".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured selector, if it is non-empty after trimming.
    pub fn selector(&self) -> Option<&str> {
        self.selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn has_selector(&self) -> bool {
        self.selector().is_some()
    }
}

// URL sources declare no filter criteria, but expose the capability like
// every other variant.
impl FilterableSource for UrlSource {
    fn name(&self) -> &[String] {
        &[]
    }

    fn path_patterns(&self) -> &[String] {
        &[]
    }

    fn not_path(&self) -> &[String] {
        &[]
    }

    fn contains(&self) -> &[String] {
        &[]
    }

    fn not_contains(&self) -> &[String] {
        &[]
    }

    fn in_dirs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn files(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}
