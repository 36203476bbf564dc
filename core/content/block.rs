use super::renderer::Renderer;

/// One ordered, immutable unit of final output.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Comments and metadata lines.
    Comment(String),
    /// Free-form text content.
    Text(String),
    /// A rendered directory tree.
    TreeView(String),
    /// File content, fenced, with an optional path comment and language tag.
    CodeBlock {
        path: Option<String>,
        language: Option<String>,
        content: String,
    },
    Separator,
}

impl Block {
    pub fn render(&self, renderer: &dyn Renderer) -> String {
        match self {
            Block::Comment(text) => renderer.render_comment(text),
            Block::Text(text) => renderer.render_text(text),
            Block::TreeView(tree) => renderer.render_tree_view(tree),
            Block::CodeBlock {
                path,
                language,
                content,
            } => renderer.render_code_block(path.as_deref(), language.as_deref(), content),
            Block::Separator => renderer.render_separator(),
        }
    }
}
