/// Turns individual blocks into text. Adding a new output format means
/// implementing this trait, not touching the builder.
pub trait Renderer: Send + Sync {
    fn render_comment(&self, text: &str) -> String;
    fn render_text(&self, text: &str) -> String;
    fn render_tree_view(&self, tree: &str) -> String;
    fn render_code_block(
        &self,
        path: Option<&str>,
        language: Option<&str>,
        content: &str,
    ) -> String;
    fn render_separator(&self) -> String;
}

/// Default renderer: fenced code blocks and tree views, `//` comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render_comment(&self, text: &str) -> String {
        format!("// {}\n", text)
    }

    fn render_text(&self, text: &str) -> String {
        format!("{}\n\n", text.trim_end())
    }

    fn render_tree_view(&self, tree: &str) -> String {
        let newline = if tree.ends_with('\n') { "" } else { "\n" };
        format!("```\n{}{}```\n\n", tree, newline)
    }

    fn render_code_block(
        &self,
        path: Option<&str>,
        language: Option<&str>,
        content: &str,
    ) -> String {
        let mut out = format!("```{}\n", language.unwrap_or(""));
        if let Some(path) = path {
            out.push_str(&format!("// Path: {}\n", path));
        }
        out.push_str(content.trim());
        out.push_str("\n```\n\n");
        out
    }

    fn render_separator(&self) -> String {
        "----\n\n".to_string()
    }
}

/// Bare-text renderer for consumers that cannot handle markdown fences.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl Renderer for PlainTextRenderer {
    fn render_comment(&self, text: &str) -> String {
        format!("{}\n", text)
    }

    fn render_text(&self, text: &str) -> String {
        format!("{}\n", text.trim_end())
    }

    fn render_tree_view(&self, tree: &str) -> String {
        let newline = if tree.ends_with('\n') { "" } else { "\n" };
        format!("{}{}\n", tree, newline)
    }

    fn render_code_block(
        &self,
        path: Option<&str>,
        _language: Option<&str>,
        content: &str,
    ) -> String {
        let mut out = String::new();
        if let Some(path) = path {
            out.push_str(&format!("Path: {}\n", path));
        }
        out.push_str(content.trim());
        out.push_str("\n\n");
        out
    }

    fn render_separator(&self) -> String {
        "\n".to_string()
    }
}
