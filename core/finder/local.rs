use super::FinderResult;
use crate::error::{AppError, Result};
use crate::filter::{FilterChain, contains_wildcard};
use crate::item::{ContentLoader, FileItem, ItemKind};
use crate::source::FilterableSource;
use crate::tree::{FileTreeBuilder, TreeViewConfig};
use globset::Glob;
use ignore::WalkBuilder;
use log;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub(crate) struct SourceRoots {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Resolve configured source paths to concrete root directories and explicit
/// files, expanding wildcard paths. Paths that do not exist are skipped with
/// a warning rather than failing the source.
pub(crate) fn resolve_source_roots(paths: &[String]) -> SourceRoots {
    let mut roots = SourceRoots {
        dirs: Vec::new(),
        files: Vec::new(),
    };
    for raw in paths {
        if contains_wildcard(raw) {
            expand_wildcard(raw, &mut roots);
        } else {
            let path = PathBuf::from(raw);
            if path.is_dir() {
                roots.dirs.push(path);
            } else if path.is_file() {
                roots.files.push(path);
            } else {
                log::warn!("Source path does not exist: {}", raw);
            }
        }
    }
    roots
}

fn expand_wildcard(pattern: &str, roots: &mut SourceRoots) {
    let matcher = match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher(),
        Err(e) => {
            log::error!("Invalid wildcard source path \"{}\": {}", pattern, e);
            return;
        }
    };
    let base = wildcard_base(pattern);
    for entry in walkdir::WalkDir::new(&base)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !matcher.is_match(entry.path()) {
            continue;
        }
        if entry.file_type().is_dir() {
            roots.dirs.push(entry.path().to_path_buf());
        } else if entry.file_type().is_file() {
            roots.files.push(entry.path().to_path_buf());
        }
    }
}

/// Longest non-wildcard ancestor of a wildcard pattern, used as the walk
/// root for expansion.
fn wildcard_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if contains_wildcard(&text) {
            break;
        }
        base.push(component);
    }
    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}

/// Enumerates filesystem entries under a source's roots, applies its filter
/// chain and builds the tree view.
#[derive(Debug, Default)]
pub struct LocalFinder;

impl LocalFinder {
    pub fn new() -> Self {
        Self
    }

    pub fn find(
        &self,
        source: &dyn FilterableSource,
        tree_config: &TreeViewConfig,
    ) -> Result<FinderResult> {
        let mut items = Vec::new();

        for file in source.files() {
            let base = file.parent().map(Path::to_path_buf).unwrap_or_default();
            if let Some(item) = make_item(&file, &base) {
                items.push(item);
            }
        }
        for dir in source.in_dirs() {
            log::debug!("Walking source directory: {}", dir.display());
            self.walk_directory(&dir, source, &mut items)?;
        }

        // Stable order regardless of walk order.
        items.sort_by(|a, b| a.relative_path().cmp(b.relative_path()));
        log::info!("Discovered {} candidate file(s)", items.len());

        let chain = FilterChain::for_source(source)?;
        let files = chain.apply(items)?;
        log::debug!("{} file(s) survived filtering", files.len());

        let tree_view = FileTreeBuilder::new(tree_config.clone()).build_tree(&files)?;
        Ok(FinderResult::new(files, tree_view))
    }

    fn walk_directory(
        &self,
        root: &Path,
        source: &dyn FilterableSource,
        items: &mut Vec<FileItem>,
    ) -> Result<()> {
        let use_git = source.use_gitignore();
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(false)
            .require_git(false)
            .ignore(use_git)
            .git_ignore(use_git)
            .git_exclude(use_git)
            .parents(use_git);

        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if source.ignore_unreadable_dirs() {
                        log::warn!("Skipping unreadable entry: {}", err);
                        continue;
                    }
                    return Err(err.into());
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if let Some(item) = make_item(entry.path(), root) {
                items.push(item);
            }
        }
        Ok(())
    }
}

fn make_item(path: &Path, base: &Path) -> Option<FileItem> {
    let Some(relative) = pathdiff::diff_paths(path, base) else {
        log::warn!("Could not get relative path for: {}", path.display());
        return None;
    };
    let metadata = fs::metadata(path).ok();
    let absolute = path.to_path_buf();
    let loader: ContentLoader = Arc::new(move || read_utf8(&absolute));
    Some(
        FileItem::new(
            relative,
            path.to_string_lossy().into_owned(),
            ItemKind::File,
            loader,
        )
        .with_metadata(
            metadata.as_ref().map(|m| m.len()),
            metadata.and_then(|m| m.modified().ok()),
        ),
    )
}

fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LocalSource;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn empty_filter_set_discovers_every_file_once_in_stable_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.txt", "b");
        write(dir.path(), "a/nested.txt", "n");
        write(dir.path(), "a/zz.txt", "z");

        let source = LocalSource::new(vec![dir.path().to_string_lossy().into_owned()]);
        let result = LocalFinder::new()
            .find(&source, &TreeViewConfig::default())
            .unwrap();

        let paths: Vec<String> = result
            .files()
            .iter()
            .map(|f| f.relative_path().to_string_lossy().into_owned())
            .collect();
        assert_eq!(paths, vec!["a/nested.txt", "a/zz.txt", "b.txt"]);

        // Run again: same order.
        let again = LocalFinder::new()
            .find(&source, &TreeViewConfig::default())
            .unwrap();
        assert_eq!(again.files().len(), 3);
    }

    #[test]
    fn explicit_file_roots_are_relative_to_their_parent() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "single.md", "hello");

        let source = LocalSource::new(vec![dir
            .path()
            .join("single.md")
            .to_string_lossy()
            .into_owned()]);
        let result = LocalFinder::new()
            .find(&source, &TreeViewConfig::default())
            .unwrap();

        assert_eq!(result.files().len(), 1);
        assert_eq!(
            result.files()[0].relative_path().to_string_lossy(),
            "single.md"
        );
        assert_eq!(result.files()[0].contents().unwrap(), "hello");
    }

    #[test]
    fn wildcard_roots_expand_to_matching_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/one/src/a.rs", "a");
        write(dir.path(), "pkg/two/src/b.rs", "b");
        write(dir.path(), "pkg/two/readme.md", "r");

        let pattern = dir
            .path()
            .join("pkg/*/src")
            .to_string_lossy()
            .into_owned();
        let roots = resolve_source_roots(&[pattern]);
        assert_eq!(roots.dirs.len(), 2);
        assert!(roots.files.is_empty());
    }

    #[test]
    fn missing_source_paths_yield_an_empty_result() {
        let source = LocalSource::new(vec!["/definitely/not/here".to_string()]);
        let result = LocalFinder::new()
            .find(&source, &TreeViewConfig::default())
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.tree_view(), "");
    }
}
