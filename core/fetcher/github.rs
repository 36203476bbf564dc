use super::{SourceFetcher, language_tag};
use crate::content::ContentBuilderFactory;
use crate::error::{AppError, Result};
use crate::finder::GithubFinder;
use crate::http::HttpClient;
use crate::modifier::ModifierRegistry;
use crate::source::Source;
use std::sync::Arc;

/// Fetcher for GitHub repository sources. Identical output shape to the
/// local fetcher; discovery and content reads go through the API instead.
pub struct GithubSourceFetcher {
    finder: GithubFinder,
    modifiers: Arc<ModifierRegistry>,
    builders: ContentBuilderFactory,
}

impl GithubSourceFetcher {
    pub fn new(
        client: Arc<dyn HttpClient>,
        modifiers: Arc<ModifierRegistry>,
        builders: ContentBuilderFactory,
    ) -> Self {
        Self {
            finder: GithubFinder::new(client),
            modifiers,
            builders,
        }
    }
}

impl SourceFetcher for GithubSourceFetcher {
    fn supports(&self, source: &Source) -> bool {
        matches!(source, Source::Github(_))
    }

    fn fetch(&self, source: &Source) -> Result<String> {
        let Source::Github(github) = source else {
            return Err(AppError::InvalidArgument(
                "Source must be a github source".to_string(),
            ));
        };

        let result = self.finder.find(github)?;
        let mut builder = self.builders.create();

        if github.show_tree_view {
            builder.add_tree_view(result.tree_view());
        }

        for file in result.files() {
            let content = file.contents()?;
            let content =
                self.modifiers
                    .apply_all(&github.modifiers, file.relative_path(), content)?;
            builder.add_code_block(
                Some(file.relative_path().to_string_lossy().into_owned()),
                language_tag(file.relative_path()),
                content,
            );
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_support::MockHttpClient;
    use crate::source::GithubSource;

    fn listing_url(path: &str) -> String {
        format!(
            "https://api.github.com/repos/octo/demo/contents/{}?ref=main",
            path
        )
    }

    fn fetcher(client: MockHttpClient) -> GithubSourceFetcher {
        GithubSourceFetcher::new(
            Arc::new(client),
            Arc::new(ModifierRegistry::new()),
            ContentBuilderFactory::default(),
        )
    }

    #[test]
    fn renders_tree_view_and_file_contents() {
        let listing = r#"[{"path": "docs/intro.md", "type": "file", "size": 8}]"#;
        let content = r#"{"content": "IyBJbnRybw==", "encoding": "base64"}"#;
        let client = MockHttpClient::new()
            .respond(&listing_url(""), 200, listing)
            .respond(&listing_url("docs/intro.md"), 200, content);

        let out = fetcher(client)
            .fetch(&Source::Github(GithubSource::new("octo/demo")))
            .unwrap();

        assert!(out.contains("└── docs/"));
        assert!(out.contains("// Path: docs/intro.md"));
        assert!(out.contains("# Intro"));
    }

    #[test]
    fn listing_failure_aborts_the_source() {
        let client = MockHttpClient::new().respond(&listing_url(""), 403, "rate limited");
        let err = fetcher(client)
            .fetch(&Source::Github(GithubSource::new("octo/demo")))
            .unwrap_err();
        assert!(matches!(err, AppError::GithubApi(_)));
    }

    #[test]
    fn content_failure_aborts_the_source() {
        let listing = r#"[{"path": "a.txt", "type": "file", "size": 1}]"#;
        // No canned response for the content URL: the mock 404s it.
        let client = MockHttpClient::new().respond(&listing_url(""), 200, listing);
        let err = fetcher(client)
            .fetch(&Source::Github(GithubSource::new("octo/demo")))
            .unwrap_err();
        assert!(matches!(err, AppError::GithubApi(_)));
    }
}
