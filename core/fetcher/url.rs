use super::SourceFetcher;
use crate::content::ContentBuilderFactory;
use crate::error::{AppError, Result};
use crate::html::{HtmlCleaner, RegexHtmlCleaner, SelectorContentExtractor, TagSelectorExtractor};
use crate::http::HttpClient;
use crate::source::Source;
use log;
use std::sync::Arc;

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("User-Agent".to_string(), "ctxgen Bot".to_string()),
        (
            "Accept".to_string(),
            "text/html,application/xhtml+xml".to_string(),
        ),
        ("Accept-Language".to_string(), "en-US,en;q=0.9".to_string()),
    ]
}

/// Fetcher for URL sources. The one fetcher with partial-failure semantics:
/// a failing URL becomes an inline error comment and never prevents the
/// remaining URLs from being processed.
pub struct UrlSourceFetcher {
    client: Arc<dyn HttpClient>,
    cleaner: Arc<dyn HtmlCleaner>,
    extractor: Arc<dyn SelectorContentExtractor>,
    builders: ContentBuilderFactory,
    default_headers: Vec<(String, String)>,
}

impl UrlSourceFetcher {
    pub fn new(client: Arc<dyn HttpClient>, builders: ContentBuilderFactory) -> Self {
        Self {
            client,
            cleaner: Arc::new(RegexHtmlCleaner),
            extractor: Arc::new(TagSelectorExtractor),
            builders,
            default_headers: default_headers(),
        }
    }

    pub fn with_cleaner(mut self, cleaner: Arc<dyn HtmlCleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn SelectorContentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    fn request_headers(&self, extra: &indexmap::IndexMap<String, String>) -> Vec<(String, String)> {
        let mut headers = self.default_headers.clone();
        for (name, value) in extra {
            if let Some(existing) = headers
                .iter_mut()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
            {
                existing.1 = value.clone();
            } else {
                headers.push((name.clone(), value.clone()));
            }
        }
        headers
    }
}

impl SourceFetcher for UrlSourceFetcher {
    fn supports(&self, source: &Source) -> bool {
        matches!(source, Source::Url(_))
    }

    fn fetch(&self, source: &Source) -> Result<String> {
        let Source::Url(url_source) = source else {
            return Err(AppError::InvalidArgument(
                "Source must be a url source".to_string(),
            ));
        };
        url_source.validate()?;

        let headers = self.request_headers(&url_source.headers);
        let mut builder = self.builders.create();

        for url in &url_source.urls {
            let response = match self.client.get(url, &headers) {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("Request for {} failed: {}", url, e);
                    builder
                        .add_comment(format!("URL: {}", url))
                        .add_comment(format!("Error: {}", e))
                        .add_separator();
                    continue;
                }
            };

            if !response.is_success() {
                builder
                    .add_comment(format!("URL: {}", url))
                    .add_comment(format!("Error: HTTP status code {}", response.status))
                    .add_separator();
                continue;
            }

            let mut html = response.body;
            if let Some(selector) = url_source.selector() {
                match self.extractor.extract(&html, selector) {
                    Some(extracted) if !extracted.trim().is_empty() => {
                        builder.add_comment(format!("URL: {} (selector: {})", url, selector));
                        html = extracted;
                    }
                    _ => {
                        builder
                            .add_comment(format!("URL: {}", url))
                            .add_comment(format!(
                                "Warning: Selector '{}' didn't match any content",
                                selector
                            ))
                            .add_separator();
                        continue;
                    }
                }
            } else {
                builder.add_comment(format!("URL: {}", url));
            }

            builder
                .add_text(self.cleaner.clean(&html))
                .add_comment(format!("END OF URL: {}", url))
                .add_separator();
        }

        Ok(builder.build())
    }
}
