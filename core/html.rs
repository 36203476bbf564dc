use once_cell::sync::Lazy;
use regex::Regex;

/// Reduces raw HTML to readable text. Treated as an opaque transform by the
/// URL fetcher; embedders may swap in a richer implementation.
pub trait HtmlCleaner: Send + Sync {
    fn clean(&self, html: &str) -> String;
}

/// Extracts the sub-content matched by a CSS-style selector. Returns `None`
/// when the selector matches nothing.
pub trait SelectorContentExtractor: Send + Sync {
    fn extract(&self, html: &str, selector: &str) -> Option<String>;
}

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<noscript\b[^>]*>.*?</noscript>",
    )
    .expect("valid regex")
});
static BLOCK_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(p|div|li|ul|ol|h[1-6]|tr|table|section|article|blockquote)>|<br\s*/?>")
        .expect("valid regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid regex"));
static BLANK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Regex-based cleaner: drops script/style blocks, turns block-level tag
/// boundaries into newlines, strips remaining tags and decodes the common
/// entities.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexHtmlCleaner;

impl HtmlCleaner for RegexHtmlCleaner {
    fn clean(&self, html: &str) -> String {
        let text = SCRIPT_RE.replace_all(html, "");
        let text = BLOCK_END_RE.replace_all(&text, "\n");
        let text = TAG_RE.replace_all(&text, "");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");
        let text = BLANK_RE.replace_all(&text, "\n\n");
        text.trim().to_string()
    }
}

/// Selector extractor supporting the `#id`, `.class` and bare-tag selector
/// forms, returning the inner HTML of the first matching element.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagSelectorExtractor;

impl SelectorContentExtractor for TagSelectorExtractor {
    fn extract(&self, html: &str, selector: &str) -> Option<String> {
        let selector = selector.trim();
        let open_re = if let Some(id) = selector.strip_prefix('#') {
            Regex::new(&format!(
                r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bid\s*=\s*["']{}["'][^>]*>"#,
                regex::escape(id)
            ))
        } else if let Some(class) = selector.strip_prefix('.') {
            Regex::new(&format!(
                r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bclass\s*=\s*["'][^"']*\b{}\b[^"']*["'][^>]*>"#,
                regex::escape(class)
            ))
        } else {
            Regex::new(&format!(
                r"(?is)<({})\b[^>]*>",
                regex::escape(selector)
            ))
        }
        .ok()?;

        let captures = open_re.captures(html)?;
        let full_match = captures.get(0)?;
        let tag = captures.get(1)?.as_str().to_lowercase();
        let rest = &html[full_match.end()..];
        Some(inner_html(rest, &tag))
    }
}

/// Walk the remainder of the document balancing `tag` open/close pairs and
/// return everything up to the matching close tag.
fn inner_html(rest: &str, tag: &str) -> String {
    let token_re = match Regex::new(&format!(r"(?is)<(/?){}\b[^>]*>", regex::escape(tag))) {
        Ok(re) => re,
        Err(_) => return rest.to_string(),
    };

    let mut depth = 1usize;
    for m in token_re.find_iter(rest) {
        let token = m.as_str();
        if token.starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return rest[..m.start()].to_string();
            }
        } else if !token.ends_with("/>") {
            depth += 1;
        }
    }
    // No matching close tag; take the remainder.
    rest.to_string()
}
