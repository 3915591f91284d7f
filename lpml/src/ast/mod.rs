pub mod value;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::token::Tag;

pub use value::Value;

/// Property assignments of one element. A repeated name keeps the last value.
pub type Properties = BTreeMap<String, Value>;

/// A parsed LPML compilation unit: page sections in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sections: Vec<PageSection>,
}

impl Document {
    pub fn empty() -> Self {
        Document {
            sections: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Visit every element of every section, depth-first, parents before children.
    pub fn visit_elements<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        for section in &self.sections {
            for child in &section.children {
                child.visit(visit);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Top,
    Mid,
    Bottom,
}

impl SectionKind {
    pub fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            Tag::TopOfPage => Some(SectionKind::Top),
            Tag::MidPage => Some(SectionKind::Mid),
            Tag::BottomOfPage => Some(SectionKind::Bottom),
            _ => None,
        }
    }

    pub fn tag(self) -> Tag {
        match self {
            SectionKind::Top => Tag::TopOfPage,
            SectionKind::Mid => Tag::MidPage,
            SectionKind::Bottom => Tag::BottomOfPage,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Top => "top",
            SectionKind::Mid => "mid",
            SectionKind::Bottom => "bottom",
        }
    }

    /// CSS class of the section container. The middle section is `mid-page`,
    /// not `mid-of-page`.
    pub fn class_name(self) -> &'static str {
        match self {
            SectionKind::Top => "top-of-page",
            SectionKind::Mid => "mid-page",
            SectionKind::Bottom => "bottom-of-page",
        }
    }
}

/// One of the top, mid or bottom page sections.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    pub kind: SectionKind,
    pub children: Vec<Element>,
    /// Line of the opening tag.
    pub line: usize,
    /// Byte span of the opening tag.
    pub span: Range<usize>,
}

/// A tagged element with its properties and nested elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub properties: Properties,
    pub children: Vec<Element>,
    pub line: usize,
    pub span: Range<usize>,
}

impl Element {
    pub fn new(tag: Tag, line: usize, span: Range<usize>) -> Self {
        Element {
            tag,
            properties: Properties::new(),
            children: Vec::new(),
            line,
            span,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// The `label` property when it is a string literal.
    pub fn label(&self) -> Option<&str> {
        match self.properties.get("label") {
            Some(Value::String(label)) => Some(label),
            _ => None,
        }
    }

    fn visit<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.visit(visit);
        }
    }
}

// ---------------------------------------------------------------------------
// Source echo
// ---------------------------------------------------------------------------

/// Whether `name` lexes back as a bare identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, element: &Element, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    writeln!(f, "{}[{}]", pad, element.tag.open_name())?;
    for (name, value) in &element.properties {
        if is_identifier(name) {
            writeln!(f, "{}  {} = {}", pad, name, value)?;
        } else if !name.is_empty() {
            // Names like `foo-bar` only come from unknown bracket tags.
            writeln!(f, "{}  [{}] = {}", pad, name, value)?;
        }
    }
    for child in &element.children {
        write_element(f, child, depth + 1)?;
    }
    writeln!(f, "{}[{}]", pad, element.tag.close_name())
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_element(f, self, 0)
    }
}

impl fmt::Display for PageSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.kind.tag();
        writeln!(f, "[{}]", tag.open_name())?;
        for child in &self.children {
            write_element(f, child, 1)?;
        }
        writeln!(f, "[{}]", tag.close_name())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", section)?;
        }
        Ok(())
    }
}
