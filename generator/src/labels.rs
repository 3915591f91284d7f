use std::collections::HashMap;

use lpml::Document;
use lpml::ast::{Element, Value};

/// Elements that declared `label = "<name>"`, indexed by name.
///
/// Built once per document before rendering. When a label is declared more
/// than once, the last declaration in depth-first order wins.
pub struct LabelRegistry<'a> {
    labels: HashMap<&'a str, &'a Element>,
}

impl<'a> LabelRegistry<'a> {
    pub fn from_document(document: &'a Document) -> Self {
        let mut labels: HashMap<&'a str, &'a Element> = HashMap::new();
        document.visit_elements(&mut |element: &'a Element| {
            match (element.label(), element.property("label")) {
                (Some(label), _) => {
                    if let Some(previous) = labels.insert(label, element) {
                        log::debug!(
                            "label '{}' on line {} replaces the one on line {}",
                            label,
                            element.line,
                            previous.line
                        );
                    }
                }
                (None, Some(value)) => log::debug!(
                    "line {}: label is a {}, not a string; ignored",
                    element.line,
                    value.kind_name()
                ),
                (None, None) => {}
            }
        });
        log::debug!("collected {} label(s)", labels.len());
        LabelRegistry { labels }
    }

    pub fn get(&self, name: &str) -> Option<&'a Element> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All label names, sorted.
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.labels.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Display text of a value.
    ///
    /// A variable reference takes the `contains` text of the labeled element,
    /// or falls back to `$name` when the label is unknown or refers back to
    /// itself. Arrays are joined with `", "`; code blocks have no display text.
    pub fn resolve(&self, value: &Value) -> String {
        self.resolve_inner(value, &mut Vec::new())
    }

    /// Resolved text of a property, empty when absent.
    pub fn property_text(&self, element: &Element, name: &str) -> String {
        element
            .property(name)
            .map(|value| self.resolve(value))
            .unwrap_or_default()
    }

    fn resolve_inner(&self, value: &Value, visiting: &mut Vec<String>) -> String {
        match value {
            Value::String(text) | Value::Number(text) => text.clone(),
            Value::Variable(name) => {
                let Some(element) = self.get(name) else {
                    return format!("${}", name);
                };
                if visiting.contains(name) {
                    log::debug!("reference cycle through label '{}'", name);
                    return format!("${}", name);
                }
                visiting.push(name.clone());
                let text = element
                    .property("contains")
                    .map(|contains| self.resolve_inner(contains, visiting))
                    .unwrap_or_default();
                visiting.pop();
                text
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_inner(item, visiting))
                .collect::<Vec<_>>()
                .join(", "),
            Value::CodeBlock(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(source: &str) -> Document {
        lpml::Parser::new(source.to_string(), 0)
            .parse()
            .expect("parse failed")
    }

    #[test]
    fn collects_nested_labels() {
        let doc = document(
            r#"[top-of-page-start]
[divide-start] label = "outer"
  [p-start] label = "inner" contains = "x" [p-end]
[divide-end]
[top-of-page-end]"#,
        );
        let labels = LabelRegistry::from_document(&doc);
        assert_eq!(labels.names(), vec!["inner", "outer"]);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn numeric_labels_are_not_registered() {
        let doc = document(r#"[top-of-page-start][p-start] label = 4 [p-end][top-of-page-end]"#);
        assert!(LabelRegistry::from_document(&doc).is_empty());
    }

    #[test]
    fn last_declaration_wins() {
        let doc = document(
            r#"[top-of-page-start]
[p-start] label = "dup" contains = "first" [p-end]
[top-of-page-end]
[bottom-of-page-start]
[p-start] label = "dup" contains = "second" [p-end]
[bottom-of-page-end]"#,
        );
        let labels = LabelRegistry::from_document(&doc);
        assert_eq!(labels.resolve(&Value::Variable("dup".into())), "second");
    }

    #[test]
    fn resolves_references_transitively() {
        let doc = document(
            r#"[top-of-page-start]
[p-start] label = "a" contains = $b [p-end]
[p-start] label = "b" contains = "deep" [p-end]
[top-of-page-end]"#,
        );
        let labels = LabelRegistry::from_document(&doc);
        assert_eq!(labels.resolve(&Value::Variable("a".into())), "deep");
        assert_eq!(labels.resolve(&Value::Variable("nope".into())), "$nope");
    }

    #[test]
    fn reference_cycles_fall_back_to_literal() {
        let doc = document(
            r#"[top-of-page-start]
[p-start] label = "a" contains = $b [p-end]
[p-start] label = "b" contains = $a [p-end]
[top-of-page-end]"#,
        );
        let labels = LabelRegistry::from_document(&doc);
        assert_eq!(labels.resolve(&Value::Variable("a".into())), "$a");
    }

    #[test]
    fn arrays_join_and_code_blocks_are_empty() {
        let doc = Document::empty();
        let labels = LabelRegistry::from_document(&doc);
        let array = Value::Array(vec![
            Value::String("x".into()),
            Value::Number("2".into()),
            Value::Variable("y".into()),
        ]);
        assert_eq!(labels.resolve(&array), "x, 2, $y");
        assert_eq!(labels.resolve(&Value::CodeBlock("a < b".into())), "");
    }
}
