pub mod github;
pub mod local;
pub mod tree;
pub mod url;

pub use github::GithubSourceFetcher;
pub use local::LocalSourceFetcher;
pub use tree::TreeSourceFetcher;
pub use url::UrlSourceFetcher;

use crate::content::ContentBuilderFactory;
use crate::error::{AppError, Result};
use crate::http::HttpClient;
use crate::modifier::ModifierRegistry;
use crate::source::Source;
use log;
use std::sync::Arc;

/// Strategy turning one source into its final textual content. Fetchers are
/// side-effect free beyond network and filesystem reads.
pub trait SourceFetcher: Send + Sync {
    fn supports(&self, source: &Source) -> bool;
    fn fetch(&self, source: &Source) -> Result<String>;
}

/// Dispatches a source to the first registered fetcher that supports it.
pub struct SourceFetcherRegistry {
    fetchers: Vec<Box<dyn SourceFetcher>>,
}

impl SourceFetcherRegistry {
    pub fn new() -> Self {
        Self {
            fetchers: Vec::new(),
        }
    }

    /// Registry with one fetcher per source variant, sharing the given
    /// collaborators.
    pub fn with_defaults(
        client: Arc<dyn HttpClient>,
        modifiers: Arc<ModifierRegistry>,
        builders: ContentBuilderFactory,
    ) -> Self {
        let mut registry = Self::new();
        registry
            .register(Box::new(LocalSourceFetcher::new(
                Arc::clone(&modifiers),
                builders.clone(),
            )))
            .register(Box::new(GithubSourceFetcher::new(
                Arc::clone(&client),
                modifiers,
                builders.clone(),
            )))
            .register(Box::new(UrlSourceFetcher::new(client, builders.clone())))
            .register(Box::new(TreeSourceFetcher::new(builders)));
        registry
    }

    pub fn register(&mut self, fetcher: Box<dyn SourceFetcher>) -> &mut Self {
        self.fetchers.push(fetcher);
        self
    }

    pub fn fetch(&self, source: &Source) -> Result<String> {
        source.validate()?;
        let fetcher = self
            .fetchers
            .iter()
            .find(|f| f.supports(source))
            .ok_or_else(|| {
                AppError::Config(format!(
                    "No fetcher registered for source type '{}'",
                    source.type_name()
                ))
            })?;
        log::info!(
            "Fetching {} source '{}'",
            source.type_name(),
            source.description()
        );
        fetcher.fetch(source)
    }
}

impl Default for SourceFetcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Language tag for a fenced code block, taken from the file extension.
pub(crate) fn language_tag(path: &std::path::Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().into_owned())
}
