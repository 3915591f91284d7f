use lpml::ast::Element;

use crate::labels::LabelRegistry;

// ---------------------------------------------------------------------------
// Friendly value tables
// ---------------------------------------------------------------------------

pub const TEXT_SIZES: &[(&str, &str)] = &[
    ("tiny", "10px"),
    ("small", "12px"),
    ("normal", "16px"),
    ("medium", "20px"),
    ("large", "24px"),
    ("huge", "32px"),
    ("giant", "48px"),
];

pub const SPACING: &[(&str, &str)] = &[
    ("none", "0"),
    ("tiny", "4px"),
    ("small", "8px"),
    ("medium", "16px"),
    ("large", "24px"),
    ("huge", "32px"),
];

pub const BORDERS: &[(&str, &str)] = &[
    ("none", "none"),
    ("thin", "1px solid #ccc"),
    ("medium", "2px solid #999"),
    ("thick", "3px solid #333"),
];

pub const ROUNDED: &[(&str, &str)] = &[
    ("none", "0"),
    ("small", "4px"),
    ("medium", "8px"),
    ("large", "16px"),
    ("full", "9999px"),
    ("circle", "50%"),
];

pub const SHADOWS: &[(&str, &str)] = &[
    ("none", "none"),
    ("small", "0 1px 3px rgba(0,0,0,0.12), 0 1px 2px rgba(0,0,0,0.24)"),
    ("medium", "0 3px 6px rgba(0,0,0,0.15), 0 2px 4px rgba(0,0,0,0.12)"),
    ("large", "0 10px 20px rgba(0,0,0,0.15), 0 3px 6px rgba(0,0,0,0.10)"),
    ("huge", "0 15px 25px rgba(0,0,0,0.15), 0 5px 10px rgba(0,0,0,0.05)"),
];

/// Translate a friendly keyword through `table`; other values are already CSS.
pub fn lookup<'v>(table: &[(&str, &'static str)], value: &'v str) -> &'v str {
    table
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, css)| *css)
        .unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Style properties
// ---------------------------------------------------------------------------

enum Rule {
    /// Value copied as-is into the CSS property.
    Plain(&'static str),
    /// Value translated through a friendly table.
    Friendly(&'static str, &'static [(&'static str, &'static str)]),
    /// `background` or `background-color` depending on the value.
    Background,
    /// `"true"` expands to flexbox centering.
    CenterContent,
}

/// Recognised style properties in emission order. Later declarations win in
/// the CSS cascade, so `color` beats `text_color` and `background` beats
/// `bg_color`.
const RULES: &[(&str, Rule)] = &[
    ("text_color", Rule::Plain("color")),
    ("color", Rule::Plain("color")),
    ("bg_color", Rule::Plain("background-color")),
    ("background", Rule::Background),
    ("text_size", Rule::Friendly("font-size", TEXT_SIZES)),
    ("font", Rule::Plain("font-family")),
    ("align", Rule::Plain("text-align")),
    ("padding", Rule::Friendly("padding", SPACING)),
    ("margin", Rule::Friendly("margin", SPACING)),
    ("border", Rule::Friendly("border", BORDERS)),
    ("rounded", Rule::Friendly("border-radius", ROUNDED)),
    ("shadow", Rule::Friendly("box-shadow", SHADOWS)),
    ("width", Rule::Plain("width")),
    ("height", Rule::Plain("height")),
    ("line_spacing", Rule::Plain("line-height")),
    ("display", Rule::Plain("display")),
    ("center_content", Rule::CenterContent),
];

/// CSS declarations for the element's style properties, in rule order.
/// Properties whose resolved value is empty are skipped.
pub fn declarations(element: &Element, labels: &LabelRegistry<'_>) -> Vec<String> {
    let mut declarations = Vec::new();

    for (property, rule) in RULES {
        let value = labels.property_text(element, property);
        if value.is_empty() {
            continue;
        }
        match rule {
            Rule::Plain(css) => declarations.push(format!("{}: {}", css, value)),
            Rule::Friendly(css, table) => {
                declarations.push(format!("{}: {}", css, lookup(table, &value)))
            }
            Rule::Background => {
                let css = if value.contains("gradient") || value.contains("url(") {
                    "background"
                } else {
                    "background-color"
                };
                declarations.push(format!("{}: {}", css, value));
            }
            Rule::CenterContent => {
                if value == "true" {
                    declarations.push("display: flex".to_string());
                    declarations.push("justify-content: center".to_string());
                    declarations.push("align-items: center".to_string());
                }
            }
        }
    }

    declarations
}

/// ` style="a; b;"`, or nothing at all when there are no declarations.
pub fn style_attribute(declarations: &[String]) -> String {
    if declarations.is_empty() {
        String::new()
    } else {
        format!(" style=\"{};\"", declarations.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpml::Document;

    fn first_element(source: &str) -> Document {
        let wrapped = format!("[mid-page-start]{}[mid-page-end]", source);
        lpml::Parser::new(wrapped, 0).parse().expect("parse failed")
    }

    fn style_of(source: &str) -> String {
        let doc = first_element(source);
        let labels = LabelRegistry::from_document(&doc);
        let element = &doc.sections[0].children[0];
        style_attribute(&declarations(element, &labels))
    }

    #[test]
    fn friendly_tables_match_css() {
        assert_eq!(lookup(TEXT_SIZES, "giant"), "48px");
        assert_eq!(lookup(SPACING, "none"), "0");
        assert_eq!(lookup(SPACING, "large"), "24px");
        assert_eq!(lookup(BORDERS, "thin"), "1px solid #ccc");
        assert_eq!(lookup(ROUNDED, "circle"), "50%");
        assert_eq!(
            lookup(SHADOWS, "huge"),
            "0 15px 25px rgba(0,0,0,0.15), 0 5px 10px rgba(0,0,0,0.05)"
        );
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(lookup(TEXT_SIZES, "1.5rem"), "1.5rem");
        assert_eq!(lookup(BORDERS, "1px dashed red"), "1px dashed red");
        assert_eq!(lookup(SPACING, "Large"), "Large");
    }

    #[test]
    fn no_style_properties_means_no_attribute() {
        assert_eq!(style_of(r#"[p-start] contains = "x" [p-end]"#), "");
    }

    #[test]
    fn declarations_follow_rule_order() {
        assert_eq!(
            style_of(r#"[p-start] padding = "small" color = "red" text_size = "huge" [p-end]"#),
            " style=\"color: red; font-size: 32px; padding: 8px;\""
        );
    }

    #[test]
    fn color_synonyms_both_emit_with_color_last() {
        assert_eq!(
            style_of(r#"[p-start] color = "red" text_color = "blue" [p-end]"#),
            " style=\"color: blue; color: red;\""
        );
    }

    #[test]
    fn background_routing() {
        assert_eq!(
            style_of(r#"[divide-start] background = "linear-gradient(red, blue)" [divide-end]"#),
            " style=\"background: linear-gradient(red, blue);\""
        );
        assert_eq!(
            style_of(r#"[divide-start] background = "url(a.png)" [divide-end]"#),
            " style=\"background: url(a.png);\""
        );
        assert_eq!(
            style_of(r##"[divide-start] bg_color = "#eee" background = "white" [divide-end]"##),
            " style=\"background-color: #eee; background-color: white;\""
        );
    }

    #[test]
    fn center_content_expands_only_for_true() {
        assert_eq!(
            style_of(r#"[divide-start] center_content = "true" [divide-end]"#),
            " style=\"display: flex; justify-content: center; align-items: center;\""
        );
        assert_eq!(
            style_of(r#"[divide-start] center_content = "yes" [divide-end]"#),
            ""
        );
    }

    #[test]
    fn empty_values_are_skipped() {
        assert_eq!(style_of(r#"[p-start] color = "" width = 50 [p-end]"#), " style=\"width: 50;\"");
    }

    #[test]
    fn style_values_resolve_references() {
        let doc = first_element(
            r#"[p-start] color = $accent [p-end][p-start] label = "accent" contains = "teal" [p-end]"#,
        );
        let labels = LabelRegistry::from_document(&doc);
        let element = &doc.sections[0].children[0];
        assert_eq!(declarations(element, &labels), vec!["color: teal".to_string()]);
    }
}
