pub mod github;
pub mod local;
pub mod tree;
pub mod url;

pub use github::GithubSource;
pub use local::LocalSource;
pub use tree::TreeSource;
pub use url::UrlSource;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A configured description of where to obtain content and which filters
/// and modifiers apply. Closed set of variants, discriminated by `type` in
/// the configuration format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    Local(LocalSource),
    Github(GithubSource),
    Url(UrlSource),
    Tree(TreeSource),
}

impl Source {
    pub fn type_name(&self) -> &'static str {
        match self {
            Source::Local(_) => "local",
            Source::Github(_) => "github",
            Source::Url(_) => "url",
            Source::Tree(_) => "tree",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Source::Local(s) => &s.description,
            Source::Github(s) => &s.description,
            Source::Url(s) => &s.description,
            Source::Tree(s) => &s.description,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Source::Local(s) => &s.tags,
            Source::Github(s) => &s.tags,
            Source::Url(s) => &s.tags,
            Source::Tree(s) => &s.tags,
        }
    }

    /// Fail-fast validation of the declarative fields, before any I/O.
    pub fn validate(&self) -> Result<()> {
        match self {
            Source::Local(s) => s.validate(),
            Source::Github(s) => s.validate(),
            Source::Url(s) => s.validate(),
            Source::Tree(s) => s.validate(),
        }
    }

    /// A source is selected when no tags are requested, or when it carries
    /// at least one of the requested tags.
    pub fn matches_tags(&self, requested: &[String]) -> bool {
        requested.is_empty() || self.tags().iter().any(|t| requested.contains(t))
    }
}

/// Uniform filter-criteria capability queried by finders regardless of the
/// source variant. Empty slices mean "no constraint for this axis".
pub trait FilterableSource {
    /// File name patterns (glob style).
    fn name(&self) -> &[String];
    /// Path inclusion patterns.
    fn path_patterns(&self) -> &[String];
    /// Path exclusion patterns.
    fn not_path(&self) -> &[String];
    /// Content inclusion patterns.
    fn contains(&self) -> &[String];
    /// Content exclusion patterns.
    fn not_contains(&self) -> &[String];
    /// Size constraints. No current variant declares any; part of the
    /// capability contract nonetheless.
    fn size(&self) -> &[String] {
        &[]
    }
    /// Modification date constraints. See `size`.
    fn date(&self) -> &[String] {
        &[]
    }
    /// Root directories to walk.
    fn in_dirs(&self) -> Vec<PathBuf>;
    /// Explicitly listed files.
    fn files(&self) -> Vec<PathBuf>;
    fn ignore_unreadable_dirs(&self) -> bool {
        true
    }
    fn use_gitignore(&self) -> bool {
        false
    }
}

/// Serde helpers shared by the source variants.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    /// Accept either a single string or a list of strings.
    pub fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        })
    }
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_file_pattern() -> Vec<String> {
    vec!["*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_deserialize_from_tagged_json() {
        let json = r#"{
            "type": "local",
            "description": "project sources",
            "sourcePaths": "src",
            "filePattern": ["*.rs", "*.toml"],
            "notPath": ["target"],
            "tags": ["code"]
        }"#;
        let source: Source = serde_json::from_str(json).unwrap();

        let Source::Local(local) = &source else {
            panic!("expected a local source");
        };
        assert_eq!(local.source_paths, vec!["src"]);
        assert_eq!(local.file_pattern, vec!["*.rs", "*.toml"]);
        assert_eq!(local.not_path, vec!["target"]);
        assert_eq!(source.description(), "project sources");
        assert_eq!(source.tags(), ["code"]);
    }

    #[test]
    fn single_string_fields_become_one_element_lists() {
        let json = r#"{
            "type": "tree",
            "sourcePaths": "src",
            "filePattern": "*.rs"
        }"#;
        let source: Source = serde_json::from_str(json).unwrap();
        let Source::Tree(tree) = source else {
            panic!("expected a tree source");
        };
        assert_eq!(tree.file_pattern, vec!["*.rs"]);
    }

    #[test]
    fn tag_matching_selects_sources() {
        let json = r#"{"type": "url", "urls": ["https://example.com"], "tags": ["docs", "api"]}"#;
        let source: Source = serde_json::from_str(json).unwrap();

        assert!(source.matches_tags(&[]));
        assert!(source.matches_tags(&["api".to_string()]));
        assert!(!source.matches_tags(&["code".to_string()]));
    }
}
