//! Markdown rendering for article bodies.

use comrak::{Arena, Options, format_html, parse_document};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
}

fn markdown_options() -> Options<'static> {
    let mut options = Options::default();

    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;

    // Raw HTML in content is replaced by a placeholder comment.
    options.render.r#unsafe = false;
    options.render.github_pre_lang = true;

    options
}

pub fn render_markdown(source: &str) -> Result<String, RenderError> {
    let arena = Arena::new();
    let options = markdown_options();
    let root = parse_document(&arena, source, &options);

    let mut html = String::new();
    format_html(root, &options, &mut html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_common_markdown() {
        let html = render_markdown("# Title\n\nSome *emphasis* and ~~strike~~.").expect("html");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<del>strike</del>"));
    }

    #[test]
    fn raw_html_is_not_passed_through() {
        let html = render_markdown("<script>alert(1)</script>").expect("html");
        assert!(!html.contains("<script>"));
    }
}
