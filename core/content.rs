pub mod block;
pub mod renderer;

pub use block::Block;
pub use renderer::{MarkdownRenderer, PlainTextRenderer, Renderer};

use std::sync::Arc;

/// Accumulates ordered blocks and renders them to final text. Blocks render
/// in insertion order; the builder never reorders or deduplicates.
pub struct ContentBuilder {
    blocks: Vec<Block>,
    renderer: Arc<dyn Renderer>,
}

impl ContentBuilder {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            blocks: Vec::new(),
            renderer,
        }
    }

    /// Builder with the default markdown renderer.
    pub fn markdown() -> Self {
        Self::new(Arc::new(MarkdownRenderer))
    }

    pub fn add_block(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn add_comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_block(Block::Comment(text.into()))
    }

    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_block(Block::Text(text.into()))
    }

    pub fn add_tree_view(&mut self, tree: impl Into<String>) -> &mut Self {
        self.add_block(Block::TreeView(tree.into()))
    }

    pub fn add_code_block(
        &mut self,
        path: Option<String>,
        language: Option<String>,
        content: impl Into<String>,
    ) -> &mut Self {
        self.add_block(Block::CodeBlock {
            path,
            language,
            content: content.into(),
        })
    }

    pub fn add_separator(&mut self) -> &mut Self {
        self.add_block(Block::Separator)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn build(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.render(self.renderer.as_ref()))
            .collect()
    }
}

/// Hands out builders bound to the configured renderer, so every fetcher
/// produces output in the same format.
#[derive(Clone)]
pub struct ContentBuilderFactory {
    renderer: Arc<dyn Renderer>,
}

impl ContentBuilderFactory {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    pub fn create(&self) -> ContentBuilder {
        ContentBuilder::new(Arc::clone(&self.renderer))
    }
}

impl Default for ContentBuilderFactory {
    fn default() -> Self {
        Self::new(Arc::new(MarkdownRenderer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_render_in_insertion_order() {
        let mut builder = ContentBuilder::markdown();
        builder.add_comment("x").add_separator();

        assert_eq!(builder.blocks().len(), 2);
        assert_eq!(builder.build(), "// x\n----\n\n");
    }

    #[test]
    fn no_block_is_dropped_or_merged() {
        let mut builder = ContentBuilder::markdown();
        builder
            .add_comment("one")
            .add_comment("one")
            .add_text("body")
            .add_separator()
            .add_separator();

        let out = builder.build();
        assert_eq!(out.matches("// one").count(), 2);
        assert_eq!(out.matches("----").count(), 2);
    }

    #[test]
    fn code_blocks_carry_path_comment_and_language() {
        let mut builder = ContentBuilder::markdown();
        builder.add_code_block(
            Some("src/lib.rs".to_string()),
            Some("rs".to_string()),
            "fn main() {}\n",
        );

        assert_eq!(
            builder.build(),
            "```rs\n// Path: src/lib.rs\nfn main() {}\n```\n\n"
        );
    }

    #[test]
    fn tree_views_are_fenced() {
        let mut builder = ContentBuilder::markdown();
        builder.add_tree_view("└── src/\n");
        assert_eq!(builder.build(), "```\n└── src/\n```\n\n");
    }

    #[test]
    fn plain_text_renderer_swaps_in_without_builder_changes() {
        let mut builder = ContentBuilder::new(Arc::new(PlainTextRenderer));
        builder.add_comment("note").add_text("body").add_separator();
        assert_eq!(builder.build(), "note\nbody\n\n");
    }
}
