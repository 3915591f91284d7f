use lpml::ast::{Element, Value};

use crate::labels::LabelRegistry;

fn format_tag(name: &str) -> Option<&'static str> {
    match name {
        "bold" => Some("strong"),
        "italic" => Some("em"),
        "underline" => Some("u"),
        "strike" => Some("s"),
        "code" => Some("code"),
        "mark" => Some("mark"),
        _ => None,
    }
}

/// Wrap `content` in the inline tags named by the element's `format_with`
/// array. The first entry ends up innermost; unknown names are ignored.
pub fn apply_formatting(element: &Element, content: String, labels: &LabelRegistry<'_>) -> String {
    let Some(formats) = element.property("format_with").and_then(Value::as_array) else {
        return content;
    };

    formats.iter().fold(content, |inner, format| {
        match format_tag(&labels.resolve(format)) {
            Some(tag) => format!("<{tag}>{inner}</{tag}>"),
            None => inner,
        }
    })
}

/// Escape text for use inside HTML markup or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
