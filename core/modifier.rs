use crate::error::Result;
use log;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Declared use of a modifier on a source: a stable identifier plus an
/// optional free-form context payload handed to the modifier on application.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModifierSpec {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ModifierSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context: None,
        }
    }
}

impl<'de> Deserialize<'de> for ModifierSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(String),
            Full {
                id: String,
                #[serde(default)]
                context: Option<serde_json::Value>,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bare(id) => ModifierSpec { id, context: None },
            Repr::Full { id, context } => ModifierSpec { id, context },
        })
    }
}

/// Path-scoped content post-processor applied after raw content is read.
pub trait Modifier: Send + Sync {
    /// Whether this modifier applies to content originating at `path`.
    fn supports(&self, path: &Path) -> bool;

    fn modify(&self, content: &str, context: Option<&serde_json::Value>) -> Result<String>;
}

/// Lookup table of modifiers by identifier. The core registers none itself;
/// embedders populate it and fetchers consume it.
#[derive(Default, Clone)]
pub struct ModifierRegistry {
    modifiers: HashMap<String, Arc<dyn Modifier>>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, modifier: Arc<dyn Modifier>) -> &mut Self {
        self.modifiers.insert(id.into(), modifier);
        self
    }

    pub fn has(&self, id: &str) -> bool {
        self.modifiers.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Modifier>> {
        self.modifiers.get(id).cloned()
    }

    /// Run every declared modifier that exists in the registry and supports
    /// the path, in declaration order. Unknown identifiers are skipped.
    pub fn apply_all(
        &self,
        specs: &[ModifierSpec],
        path: &Path,
        mut content: String,
    ) -> Result<String> {
        for spec in specs {
            let Some(modifier) = self.get(&spec.id) else {
                log::warn!("Unknown modifier '{}' declared for {}", spec.id, path.display());
                continue;
            };
            if modifier.supports(path) {
                log::trace!("Applying modifier '{}' to {}", spec.id, path.display());
                content = modifier.modify(&content, spec.context.as_ref())?;
            }
        }
        Ok(content)
    }
}
