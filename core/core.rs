pub mod content;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod finder;
pub mod html;
pub mod http;
pub mod item;
pub mod modifier;
pub mod source;
pub mod tree;

pub use content::{
    Block, ContentBuilder, ContentBuilderFactory, MarkdownRenderer, PlainTextRenderer, Renderer,
};
pub use error::{AppError, Result};
pub use fetcher::{
    GithubSourceFetcher, LocalSourceFetcher, SourceFetcher, SourceFetcherRegistry,
    TreeSourceFetcher, UrlSourceFetcher,
};
pub use filter::{
    ContentsFilter, ExcludePathFilter, FilePatternFilter, FilterChain, ItemFilter, PathFilter,
};
pub use finder::{FinderResult, GithubFinder, LocalFinder};
pub use html::{HtmlCleaner, RegexHtmlCleaner, SelectorContentExtractor, TagSelectorExtractor};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use item::{ContentLoader, FileItem, ItemKind};
pub use modifier::{Modifier, ModifierRegistry, ModifierSpec};
pub use source::{FilterableSource, GithubSource, LocalSource, Source, TreeSource, UrlSource};
pub use tree::{FileTreeBuilder, TreeNode, TreeViewConfig, flatten_paths};
