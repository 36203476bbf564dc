use anyhow::{Context, Result, bail};
use ctxgen_core::Source;
use log;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A document configuration: a named, ordered list of sources.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Load and validate a document configuration, picking the parser from the
/// file extension.
pub fn load_document(path: &Path) -> Result<DocumentConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read configuration file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let document: DocumentConfig = match extension {
        "yaml" | "yml" => serde_yml::from_str(&content).context("Invalid YAML configuration")?,
        "json" => serde_json::from_str(&content).context("Invalid JSON configuration")?,
        "toml" => toml::from_str(&content).context("Invalid TOML configuration")?,
        other => bail!(
            "Unsupported configuration format '{}' (expected yaml, yml, json or toml)",
            other
        ),
    };

    for source in &document.sources {
        source.validate().with_context(|| {
            format!(
                "Invalid {} source '{}'",
                source.type_name(),
                source.description()
            )
        })?;
    }

    log::debug!(
        "Loaded {} source(s) from {}",
        document.sources.len(),
        path.display()
    );
    Ok(document)
}

/// Keep only sources matching the requested tags; no tags means all sources.
pub fn select_sources(sources: Vec<Source>, tags: &[String]) -> Vec<Source> {
    if tags.is_empty() {
        return sources;
    }
    let (selected, skipped): (Vec<_>, Vec<_>) =
        sources.into_iter().partition(|s| s.matches_tags(tags));
    for source in &skipped {
        log::debug!(
            "Skipping source '{}' (tags {:?} do not match)",
            source.description(),
            source.tags()
        );
    }
    selected
}
