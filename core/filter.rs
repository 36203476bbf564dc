use crate::error::Result;
use crate::item::FileItem;
use crate::source::FilterableSource;
use globset::{Glob, GlobMatcher};
use log;
use regex::Regex;

/// Check whether a configured path contains glob wildcard characters.
pub fn contains_wildcard(path: &str) -> bool {
    path.contains('*') || path.contains('?') || path.contains('[') || path.contains('{')
}

/// One predicate family over discovered items. Filters are pure: they never
/// mutate their input items and preserve the relative order of survivors.
pub trait ItemFilter: Send + Sync {
    fn apply(&self, items: Vec<FileItem>) -> Result<Vec<FileItem>>;
}

/// Keeps items whose base name matches any of the glob patterns.
pub struct FilePatternFilter {
    matchers: Vec<GlobMatcher>,
}

impl FilePatternFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut matchers = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            matchers.push(Glob::new(pattern.trim())?.compile_matcher());
        }
        Ok(Self { matchers })
    }
}

impl ItemFilter for FilePatternFilter {
    fn apply(&self, items: Vec<FileItem>) -> Result<Vec<FileItem>> {
        if self.matchers.is_empty() {
            return Ok(items);
        }
        Ok(items
            .into_iter()
            .filter(|item| {
                let name = item.file_name();
                self.matchers.iter().any(|m| m.is_match(&name))
            })
            .collect())
    }
}

/// A single include/exclude path pattern: glob when it carries wildcard
/// characters, substring match otherwise.
enum PathPattern {
    Glob(GlobMatcher),
    Literal(String),
}

impl PathPattern {
    fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if contains_wildcard(pattern) {
            Ok(PathPattern::Glob(Glob::new(pattern)?.compile_matcher()))
        } else {
            Ok(PathPattern::Literal(pattern.to_string()))
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Glob(matcher) => matcher.is_match(path),
            PathPattern::Literal(literal) => path.contains(literal.as_str()),
        }
    }
}

/// Keeps items whose relative path matches any include pattern.
pub struct PathFilter {
    patterns: Vec<PathPattern>,
}

impl PathFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| PathPattern::parse(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    fn matches(&self, item: &FileItem) -> bool {
        let path = item.relative_path().to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path))
    }
}

impl ItemFilter for PathFilter {
    fn apply(&self, items: Vec<FileItem>) -> Result<Vec<FileItem>> {
        if self.patterns.is_empty() {
            return Ok(items);
        }
        Ok(items.into_iter().filter(|i| self.matches(i)).collect())
    }
}

/// Drops items matching any exclude pattern. Applied after include filters
/// so excludes always win over includes.
pub struct ExcludePathFilter {
    inner: PathFilter,
}

impl ExcludePathFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            inner: PathFilter::new(patterns)?,
        })
    }
}

impl ItemFilter for ExcludePathFilter {
    fn apply(&self, items: Vec<FileItem>) -> Result<Vec<FileItem>> {
        if self.inner.patterns.is_empty() {
            return Ok(items);
        }
        Ok(items
            .into_iter()
            .filter(|i| !self.inner.matches(i))
            .collect())
    }
}

/// Keeps items whose content matches all `contains` patterns and none of the
/// `not_contains` patterns. The only filter that performs I/O, so it belongs
/// at the end of the chain where structural filters have already pruned the
/// candidate set.
pub struct ContentsFilter {
    contains: Vec<Regex>,
    not_contains: Vec<Regex>,
}

impl ContentsFilter {
    pub fn new(contains: &[String], not_contains: &[String]) -> Result<Self> {
        let compile = |patterns: &[String]| -> Result<Vec<Regex>> {
            patterns.iter().map(|p| Ok(Regex::new(p)?)).collect()
        };
        Ok(Self {
            contains: compile(contains)?,
            not_contains: compile(not_contains)?,
        })
    }

    fn is_noop(&self) -> bool {
        self.contains.is_empty() && self.not_contains.is_empty()
    }
}

impl ItemFilter for ContentsFilter {
    fn apply(&self, items: Vec<FileItem>) -> Result<Vec<FileItem>> {
        if self.is_noop() {
            return Ok(items);
        }
        let mut survivors = Vec::with_capacity(items.len());
        for item in items {
            let content = item.contents()?;
            let keep = self.contains.iter().all(|re| re.is_match(&content))
                && !self.not_contains.iter().any(|re| re.is_match(&content));
            if keep {
                survivors.push(item);
            } else {
                log::trace!(
                    "Item dropped by contents filter: {}",
                    item.relative_path().display()
                );
            }
        }
        Ok(survivors)
    }
}

/// Ordered chain of filters built from a source's declared criteria.
/// The ordering is explicit: structural filters (name, path, exclusion)
/// run before the content filter so content reads are minimized.
pub struct FilterChain {
    filters: Vec<Box<dyn ItemFilter>>,
}

impl FilterChain {
    pub fn for_source(source: &dyn FilterableSource) -> Result<Self> {
        let mut filters: Vec<Box<dyn ItemFilter>> = Vec::new();

        if !source.name().is_empty() {
            filters.push(Box::new(FilePatternFilter::new(source.name())?));
        }
        if !source.path_patterns().is_empty() {
            filters.push(Box::new(PathFilter::new(source.path_patterns())?));
        }
        if !source.not_path().is_empty() {
            filters.push(Box::new(ExcludePathFilter::new(source.not_path())?));
        }
        if !source.contains().is_empty() || !source.not_contains().is_empty() {
            filters.push(Box::new(ContentsFilter::new(
                source.contains(),
                source.not_contains(),
            )?));
        }

        log::debug!("Filter chain built with {} filter(s)", filters.len());
        Ok(Self { filters })
    }

    pub fn apply(&self, mut items: Vec<FileItem>) -> Result<Vec<FileItem>> {
        for filter in &self.filters {
            items = filter.apply(items)?;
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::test_support::{counting_item, static_item};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Criteria {
        name: Vec<String>,
        path: Vec<String>,
        not_path: Vec<String>,
        contains: Vec<String>,
        not_contains: Vec<String>,
    }

    impl FilterableSource for Criteria {
        fn name(&self) -> &[String] {
            &self.name
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

    fn strings(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|s| s.to_string()).collect()
    }

    fn paths(items: &[FileItem]) -> Vec<String> {
        items
            .iter()
            .map(|i| i.relative_path().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn file_pattern_filter_matches_any_pattern() {
        let filter = FilePatternFilter::new(&strings(&["*.rs", "*.toml"])).unwrap();
        let items = vec![
            static_item("src/main.rs", ""),
            static_item("Cargo.toml", ""),
            static_item("README.md", ""),
        ];
        let kept = filter.apply(items).unwrap();
        assert_eq!(paths(&kept), vec!["src/main.rs", "Cargo.toml"]);
    }

    #[test]
    fn empty_pattern_list_keeps_everything() {
        let filter = FilePatternFilter::new(&[]).unwrap();
        let items = vec![static_item("a.txt", ""), static_item("b.bin", "")];
        assert_eq!(filter.apply(items).unwrap().len(), 2);
    }

    #[test]
    fn filters_accept_empty_input() {
        let chain = FilterChain::for_source(&Criteria {
            name: strings(&["*.rs"]),
            not_path: strings(&["target"]),
            contains: strings(&["fn"]),
            ..Criteria::default()
        })
        .unwrap();
        assert!(chain.apply(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn path_filter_supports_substring_and_glob() {
        let filter = PathFilter::new(&strings(&["src/fixtures", "docs/**/*.md"])).unwrap();
        let items = vec![
            static_item("src/fixtures/a.json", ""),
            static_item("docs/guide/intro.md", ""),
            static_item("src/lib.rs", ""),
        ];
        let kept = filter.apply(items).unwrap();
        assert_eq!(
            paths(&kept),
            vec!["src/fixtures/a.json", "docs/guide/intro.md"]
        );
    }

    #[test]
    fn exclude_always_wins_over_include() {
        // Same pattern on both sides: the exclude runs second and re-drops
        // everything the include admitted.
        let chain = FilterChain::for_source(&Criteria {
            path: strings(&["src"]),
            not_path: strings(&["src"]),
            ..Criteria::default()
        })
        .unwrap();
        let items = vec![
            static_item("src/a.rs", ""),
            static_item("src/b.rs", ""),
        ];
        assert!(chain.apply(items).unwrap().is_empty());
    }

    #[test]
    fn contents_filter_requires_all_contains_and_no_not_contains() {
        let filter =
            ContentsFilter::new(&strings(&["alpha", "beta"]), &strings(&["gamma"])).unwrap();
        let items = vec![
            static_item("both.txt", "alpha beta"),
            static_item("missing.txt", "alpha"),
            static_item("banned.txt", "alpha beta gamma"),
        ];
        let kept = filter.apply(items).unwrap();
        assert_eq!(paths(&kept), vec!["both.txt"]);
    }

    #[test]
    fn chain_preserves_relative_order_of_survivors() {
        let chain = FilterChain::for_source(&Criteria {
            name: strings(&["*.rs"]),
            ..Criteria::default()
        })
        .unwrap();
        let items = vec![
            static_item("z.rs", ""),
            static_item("skip.md", ""),
            static_item("a.rs", ""),
        ];
        assert_eq!(paths(&chain.apply(items).unwrap()), vec!["z.rs", "a.rs"]);
    }

    #[test]
    fn content_reads_only_happen_for_structural_survivors() {
        let reads = Arc::new(AtomicUsize::new(0));
        let chain = FilterChain::for_source(&Criteria {
            not_path: strings(&["vendor"]),
            contains: strings(&["keep"]),
            ..Criteria::default()
        })
        .unwrap();

        let items = vec![
            counting_item("src/a.rs", "keep me", Arc::clone(&reads)),
            counting_item("vendor/dep.rs", "keep me too", Arc::clone(&reads)),
            counting_item("src/b.rs", "drop me", Arc::clone(&reads)),
        ];
        let kept = chain.apply(items).unwrap();

        assert_eq!(paths(&kept), vec!["src/a.rs"]);
        // The vendor item was pruned structurally and must never be read.
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }
}
