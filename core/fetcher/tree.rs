use super::SourceFetcher;
use crate::content::ContentBuilderFactory;
use crate::error::{AppError, Result};
use crate::finder::LocalFinder;
use crate::source::Source;

/// Fetcher for tree sources: discovery and filtering as usual, but the
/// output is only the rendered tree view, never file contents.
pub struct TreeSourceFetcher {
    finder: LocalFinder,
    builders: ContentBuilderFactory,
}

impl TreeSourceFetcher {
    pub fn new(builders: ContentBuilderFactory) -> Self {
        Self {
            finder: LocalFinder::new(),
            builders,
        }
    }
}

impl SourceFetcher for TreeSourceFetcher {
    fn supports(&self, source: &Source) -> bool {
        matches!(source, Source::Tree(_))
    }

    fn fetch(&self, source: &Source) -> Result<String> {
        let Source::Tree(tree) = source else {
            return Err(AppError::InvalidArgument(
                "Source must be a tree source".to_string(),
            ));
        };
        tree.validate()?;

        let result = self.finder.find(tree, &tree.tree_view)?;
        let mut builder = self.builders.create();
        builder.add_tree_view(result.tree_view());
        Ok(builder.build())
    }
}
