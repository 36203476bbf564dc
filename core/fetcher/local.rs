use super::{SourceFetcher, language_tag};
use crate::content::ContentBuilderFactory;
use crate::error::{AppError, Result};
use crate::finder::LocalFinder;
use crate::modifier::ModifierRegistry;
use crate::source::Source;
use std::sync::Arc;

/// Fetcher for local filesystem sources: optional tree view, then each file
/// as a fenced block with a path comment, modifiers applied before emission.
pub struct LocalSourceFetcher {
    finder: LocalFinder,
    modifiers: Arc<ModifierRegistry>,
    builders: ContentBuilderFactory,
}

impl LocalSourceFetcher {
    pub fn new(modifiers: Arc<ModifierRegistry>, builders: ContentBuilderFactory) -> Self {
        Self {
            finder: LocalFinder::new(),
            modifiers,
            builders,
        }
    }
}

impl SourceFetcher for LocalSourceFetcher {
    fn supports(&self, source: &Source) -> bool {
        matches!(source, Source::Local(_))
    }

    fn fetch(&self, source: &Source) -> Result<String> {
        let Source::Local(local) = source else {
            return Err(AppError::InvalidArgument(
                "Source must be a local source".to_string(),
            ));
        };
        local.validate()?;

        let result = self.finder.find(local, &local.tree_view)?;
        let mut builder = self.builders.create();

        if local.show_tree_view {
            builder.add_tree_view(result.tree_view());
        }

        for file in result.files() {
            if !local.selects_document(file.relative_path()) {
                continue;
            }
            let content = file.contents()?;
            let content =
                self.modifiers
                    .apply_all(&local.modifiers, file.relative_path(), content)?;
            builder.add_code_block(
                Some(local.display_path(file.relative_path())),
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
    use crate::modifier::{Modifier, ModifierSpec};
    use crate::source::LocalSource;
    use std::fs;
    use std::path::Path;

    fn fetcher(modifiers: ModifierRegistry) -> LocalSourceFetcher {
        LocalSourceFetcher::new(Arc::new(modifiers), ContentBuilderFactory::default())
    }

    fn local_source(root: &Path) -> LocalSource {
        LocalSource::new(vec![root.to_string_lossy().into_owned()])
    }

    #[test]
    fn emits_tree_view_and_fenced_file_blocks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.rs"), "pub fn answer() -> u8 { 42 }\n").unwrap();

        let source = Source::Local(local_source(dir.path()));
        let out = fetcher(ModifierRegistry::new()).fetch(&source).unwrap();

        assert!(out.starts_with("```\n└── lib.rs\n```\n\n"), "out was: {out}");
        assert!(out.contains("// Path: lib.rs"));
        assert!(out.contains("pub fn answer()"));
    }

    #[test]
    fn tree_view_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();

        let mut local = local_source(dir.path());
        local.show_tree_view = false;
        let out = fetcher(ModifierRegistry::new())
            .fetch(&Source::Local(local))
            .unwrap();

        assert!(!out.contains("└──"));
        assert!(out.contains("// Path: a.txt"));
    }

    #[test]
    fn path_prefix_shows_up_in_path_comments() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();

        let mut local = local_source(dir.path());
        local.path_prefix = Some("vendor/pkg".to_string());
        let out = fetcher(ModifierRegistry::new())
            .fetch(&Source::Local(local))
            .unwrap();

        assert!(out.contains("// Path: vendor/pkg/a.txt"));
    }

    struct Redact;
    impl Modifier for Redact {
        fn supports(&self, path: &Path) -> bool {
            path.extension().is_some_and(|e| e == "env")
        }
        fn modify(
            &self,
            _content: &str,
            _context: Option<&serde_json::Value>,
        ) -> Result<String> {
            Ok("[redacted]".to_string())
        }
    }

    #[test]
    fn declared_modifiers_run_only_on_supported_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("secrets.env"), "KEY=hunter2").unwrap();
        fs::write(dir.path().join("notes.txt"), "plain").unwrap();

        let mut registry = ModifierRegistry::new();
        registry.register("redact", Arc::new(Redact));

        let mut local = local_source(dir.path());
        local.modifiers = vec![ModifierSpec::new("redact")];
        let out = fetcher(registry).fetch(&Source::Local(local)).unwrap();

        assert!(out.contains("[redacted]"));
        assert!(!out.contains("hunter2"));
        assert!(out.contains("plain"));
    }

    #[test]
    fn docs_subset_limits_the_emitted_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "wanted").unwrap();
        fs::write(dir.path().join("other.txt"), "unwanted").unwrap();

        let mut local = local_source(dir.path());
        local.show_tree_view = false;
        local.docs = Some(vec!["keep.txt".to_string()]);
        let out = fetcher(ModifierRegistry::new())
            .fetch(&Source::Local(local))
            .unwrap();

        assert!(out.contains("wanted"));
        assert!(!out.contains("unwanted"));
    }

    #[test]
    fn rejects_other_source_variants() {
        let source = Source::Tree(crate::source::TreeSource::new(vec![".".to_string()]));
        let fetcher = fetcher(ModifierRegistry::new());
        assert!(!fetcher.supports(&source));
        assert!(fetcher.fetch(&source).is_err());
    }
}
