//! Markdown to Vikunja rich text (HTML) conversion.

use html_escape::{encode_double_quoted_attribute, encode_text};
use migrate_core::{MigrateError, MigrateResult};
use pulldown_cmark::{html, Event, Options, Parser};

/// Renders CommonMark to HTML. Raw HTML in the source is kept as escaped
/// text, never passed through as markup.
pub fn to_rich_text(markdown: &str) -> MigrateResult<String> {
    let parser = Parser::new_ext(markdown, Options::empty()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut rendered = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::write_html_fmt(&mut rendered, parser)
        .map_err(|e| MigrateError::Conversion(format!("markdown rendering failed: {}", e)))?;
    Ok(rendered)
}

/// Renders a checklist as a heading followed by a Vikunja task list.
pub fn render_checklist<'a, I>(name: &str, items: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let mut out = format!(
        "\n\n<h2>{}</h2>\n\n<ul data-type=\"taskList\">",
        encode_text(name)
    );
    for (item, checked) in items {
        out.push('\n');
        if checked {
            out.push_str(
                "<li data-checked=\"true\" data-type=\"taskItem\"><label><input type=\"checkbox\" checked=\"checked\"><span></span></label><div><p>",
            );
        } else {
            out.push_str(
                "<li data-checked=\"false\" data-type=\"taskItem\"><label><input type=\"checkbox\"><span></span></label><div><p>",
            );
        }
        out.push_str(&encode_text(item));
        out.push_str("</p></div></li>");
    }
    out.push_str("</ul>");
    out
}

/// Renders a bookmarked link as its own paragraph.
pub fn render_link(url: &str, name: &str) -> String {
    let text = if name.is_empty() { url } else { name };
    format!(
        "<p><a href=\"{}\">{}</a></p>\n",
        encode_double_quoted_attribute(url),
        encode_text(text)
    )
}
