use lpml::Document;
use lpml::ast::{Element, PageSection, Value};
use lpml::token::Tag;

use crate::labels::LabelRegistry;
use crate::style;
use crate::text::{apply_formatting, escape_html};

const HEAD: &str = "<!DOCTYPE html>
<html>
<head>
  <title>LPML Document</title>
  <style>
    .top-of-page { }
    .mid-page { }
    .bottom-of-page { }
  </style>
</head>
<body>
";

const FOOT: &str = "</body>\n</html>\n";

/// Two-pass HTML generator.
///
/// `new` collects every labeled element; `generate` renders the page. The
/// generator only borrows the document, so `generate` can be called any
/// number of times with identical results.
pub struct Generator<'a> {
    document: &'a Document,
    labels: LabelRegistry<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Generator {
            document,
            labels: LabelRegistry::from_document(document),
        }
    }

    pub fn labels(&self) -> &LabelRegistry<'a> {
        &self.labels
    }

    pub fn generate(&self) -> String {
        let mut out = String::from(HEAD);
        for section in &self.document.sections {
            self.render_section(&mut out, section);
        }
        out.push_str(FOOT);
        out
    }

    fn render_section(&self, out: &mut String, section: &PageSection) {
        line(out, 1, &format!("<div class=\"{}\">", section.kind.class_name()));
        for child in &section.children {
            self.render_element(out, child, 2);
        }
        line(out, 1, "</div>");
    }

    fn render_element(&self, out: &mut String, element: &Element, depth: usize) {
        match element.tag {
            Tag::Divide => {
                let class = match self.text(element, "class") {
                    class if class.is_empty() => String::new(),
                    class => format!(" class=\"{}\"", class),
                };
                let open = format!(
                    "div{}{}{}",
                    self.id_attr(element),
                    class,
                    self.style_attr(element)
                );
                self.render_container(out, element, depth, &open, "div");
            }
            Tag::Paragraph => {
                let content = apply_formatting(element, self.text(element, "contains"), &self.labels);
                line(
                    out,
                    depth,
                    &format!(
                        "<p{}{}>{}</p>",
                        self.id_attr(element),
                        self.style_attr(element),
                        content
                    ),
                );
            }
            Tag::Heading => self.render_heading(out, element, depth),
            Tag::Link => {
                let mut href = self.text(element, "link_url");
                if href.is_empty() {
                    href = self.text(element, "href");
                }
                line(
                    out,
                    depth,
                    &format!(
                        "<a href=\"{}\"{}>{}</a>",
                        href,
                        self.id_attr(element),
                        self.text(element, "contains")
                    ),
                );
            }
            Tag::Image => line(
                out,
                depth,
                &format!(
                    "<img src=\"{}\" alt=\"{}\"{}>",
                    self.text(element, "src"),
                    self.text(element, "alt"),
                    self.id_attr(element)
                ),
            ),
            Tag::List | Tag::UnorderedList => self.render_list(out, element, depth, false),
            Tag::OrderedList => self.render_list(out, element, depth, true),
            Tag::Item => self.render_inline(out, element, depth, "li"),
            Tag::Table => {
                let open = format!("table{}", self.id_attr(element));
                self.render_container(out, element, depth, &open, "table");
            }
            Tag::Row => self.render_container(out, element, depth, "tr", "tr"),
            Tag::Cell => self.render_inline(out, element, depth, "td"),
            Tag::Form => {
                let open = format!(
                    "form action=\"{}\"{}",
                    self.text(element, "action"),
                    self.id_attr(element)
                );
                self.render_container(out, element, depth, &open, "form");
            }
            Tag::Input => {
                let mut kind = self.text(element, "type");
                if kind.is_empty() {
                    kind = "text".to_string();
                }
                line(
                    out,
                    depth,
                    &format!(
                        "<input type=\"{}\" name=\"{}\"{}>",
                        kind,
                        self.text(element, "name"),
                        self.id_attr(element)
                    ),
                );
            }
            Tag::Button => line(
                out,
                depth,
                &format!(
                    "<button{}>{}</button>",
                    self.id_attr(element),
                    self.text(element, "contains")
                ),
            ),
            Tag::Bold => self.render_inline(out, element, depth, "strong"),
            Tag::Italic => self.render_inline(out, element, depth, "em"),
            Tag::Code => self.render_code(out, element, depth),
            Tag::TopOfPage | Tag::MidPage | Tag::BottomOfPage => {
                log::debug!(
                    "line {}: section tag {} nested inside an element renders nothing",
                    element.line,
                    element.tag.name()
                );
            }
        }
    }

    fn render_heading(&self, out: &mut String, element: &Element, depth: usize) {
        let content = apply_formatting(element, self.text(element, "contains"), &self.labels);
        let mut level = self.text(element, "level");
        if level.is_empty() {
            level = "1".to_string();
        }

        let style_attr = heading_style(self.style_attr(element), &self.text(element, "size"));

        line(
            out,
            depth,
            &format!(
                "<h{level}{}{}>{content}</h{level}>",
                self.id_attr(element),
                style_attr
            ),
        );
    }

    /// `items` entries first, then child elements, all one level deeper.
    fn render_list(&self, out: &mut String, element: &Element, depth: usize, ordered: bool) {
        let tag = match self.text(element, "type").as_str() {
            "ordered" => "ol",
            "unordered" => "ul",
            _ if ordered => "ol",
            _ => "ul",
        };

        line(out, depth, &format!("<{}{}>", tag, self.id_attr(element)));
        if let Some(items) = element.property("items").and_then(|items| items.as_array()) {
            for item in items {
                line(out, depth + 1, &format!("<li>{}</li>", self.labels.resolve(item)));
            }
        }
        for child in &element.children {
            self.render_element(out, child, depth + 1);
        }
        line(out, depth, &format!("</{}>", tag));
    }

    fn render_code(&self, out: &mut String, element: &Element, depth: usize) {
        let mut html = "  ".repeat(depth);
        html.push_str("<pre><code");
        let file_type = self.text(element, "file_type");
        if !file_type.is_empty() {
            html.push_str(&format!(" class=\"language-{}\"", file_type));
        }
        html.push('>');

        let linked_file = self.text(element, "linked_file");
        if !linked_file.is_empty() {
            html.push_str(&format!("/* File: {} */\n", linked_file));
        }
        if let Some(Value::CodeBlock(code)) = element.property("syntax") {
            html.push_str(&escape_html(code));
        }

        html.push_str("</code></pre>\n");
        out.push_str(&html);
    }

    /// `<open>` line, children one level deeper, `</close>` line.
    fn render_container(
        &self,
        out: &mut String,
        element: &Element,
        depth: usize,
        open: &str,
        close: &str,
    ) {
        line(out, depth, &format!("<{}>", open));
        for child in &element.children {
            self.render_element(out, child, depth + 1);
        }
        line(out, depth, &format!("</{}>", close));
    }

    /// `<tag>contains</tag>` on one line.
    fn render_inline(&self, out: &mut String, element: &Element, depth: usize, tag: &str) {
        line(
            out,
            depth,
            &format!("<{tag}>{}</{tag}>", self.text(element, "contains")),
        );
    }

    fn text(&self, element: &Element, name: &str) -> String {
        self.labels.property_text(element, name)
    }

    fn id_attr(&self, element: &Element) -> String {
        match self.text(element, "label") {
            label if label.is_empty() => String::new(),
            label => format!(" id=\"{}\"", label),
        }
    }

    fn style_attr(&self, element: &Element) -> String {
        style::style_attribute(&style::declarations(element, &self.labels))
    }
}

/// Add a heading's `size` to its style attribute. An existing attribute is
/// reopened before its closing quote, which leaves `;;` between the two parts.
fn heading_style(style: String, size: &str) -> String {
    if size.is_empty() {
        return style;
    }
    match style.strip_suffix('"') {
        Some(open) => format!("{}; font-size: {};\"", open, size),
        None => format!(" style=\"font-size: {};\"", size),
    }
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}
