use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Deferred content read, bound at discovery time and invoked only when a
/// file survives filtering and its content is actually needed.
pub type ContentLoader = Arc<dyn Fn() -> Result<String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Dir,
}

/// One discovered candidate entry: a local filesystem entry or a remote
/// listing entry, normalized so filters and the tree builder can treat both
/// origins uniformly.
#[derive(Clone)]
pub struct FileItem {
    relative_path: PathBuf,
    origin: String,
    kind: ItemKind,
    size: Option<u64>,
    modified: Option<SystemTime>,
    loader: ContentLoader,
}

impl FileItem {
    pub fn new(
        relative_path: impl Into<PathBuf>,
        origin: impl Into<String>,
        kind: ItemKind,
        loader: ContentLoader,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            origin: origin.into(),
            kind,
            size: None,
            modified: None,
            loader,
        }
    }

    pub fn with_metadata(mut self, size: Option<u64>, modified: Option<SystemTime>) -> Self {
        self.size = size;
        self.modified = modified;
        self
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Base name of the entry, used by file-pattern filters.
    pub fn file_name(&self) -> String {
        self.relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Absolute path for local entries, repository path for remote ones.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Resolve the item's content through its lazy loader.
    pub fn contents(&self) -> Result<String> {
        (self.loader)()
    }
}

impl fmt::Debug for FileItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileItem")
            .field("relative_path", &self.relative_path)
            .field("origin", &self.origin)
            .field("kind", &self.kind)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
