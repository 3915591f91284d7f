fn run(source: &str) -> String {
    let parser = lpml::Parser::new(source.to_string(), 0);
    let document = parser.parse().expect("parse failed");
    generator::generate(&document)
}

/// Rendered children of a single mid-page section, without the frame.
fn run_mid(source: &str) -> String {
    let html = run(&format!("[mid-page-start]\n{}\n[mid-page-end]", source));
    let open = "  <div class=\"mid-page\">\n";
    let start = html.find(open).expect("no mid-page section") + open.len();
    let end = html.rfind("  </div>\n</body>").expect("no section end");
    html[start..end].to_string()
}

#[test]
fn paragraph_page_exact_output() {
    let html = run(r#"[mid-page-start][p-start] contains = "Hi" color = "red" [p-end][mid-page-end]"#);
    assert_eq!(
        html,
        r#"<!DOCTYPE html>
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
  <div class="mid-page">
    <p style="color: red;">Hi</p>
  </div>
</body>
</html>
"#
    );
}

#[test]
fn sections_render_in_source_order() {
    let html = run("[bottom-of-page-start][bottom-of-page-end][top-of-page-start][top-of-page-end]");
    let bottom = html.find("bottom-of-page\">").expect("bottom");
    let top = html.find("\"top-of-page\">").expect("top");
    assert!(bottom < top);
}

#[test]
fn ordered_list_items() {
    assert_eq!(
        run_mid("[lst-ord] items = [1, 2, 3] [lst-end]"),
        "    <ol>\n      <li>1</li>\n      <li>2</li>\n      <li>3</li>\n    </ol>\n"
    );
}

#[test]
fn list_type_override_and_items_before_children() {
    let src = r#"[list-start]
  type = "ordered"
  items = ["a", $second]
  [item-start] contains = "c" [item-end]
[list-end]
[p-start] label = "second" contains = "b" [p-end]"#;
    assert_eq!(
        run_mid(src),
        r#"    <ol>
      <li>a</li>
      <li>b</li>
      <li>c</li>
    </ol>
    <p id="second">b</p>
"#
    );
}

#[test]
fn list_kinds_default_tags() {
    assert_eq!(run_mid("[list-start] [list-end]"), "    <ul>\n    </ul>\n");
    assert_eq!(run_mid("[lst-unord] [lst-end]"), "    <ul>\n    </ul>\n");
    assert_eq!(
        run_mid(r#"[lst-ord] type = "unordered" [lst-end]"#),
        "    <ul>\n    </ul>\n"
    );
}

#[test]
fn format_with_wraps_first_entry_innermost() {
    assert_eq!(
        run_mid(r#"[p-start] contains = "X" format_with = ["bold", "mark"] [p-end]"#),
        "    <p><mark><strong>X</strong></mark></p>\n"
    );
    assert_eq!(
        run_mid(r#"[h-start] contains = "X" format_with = ["italic"] [h-end]"#),
        "    <h1><em>X</em></h1>\n"
    );
}

#[test]
fn format_with_is_ignored_outside_text_elements() {
    assert_eq!(
        run_mid(r#"[btn-start] contains = "Go" format_with = ["bold"] [btn-end]"#),
        "    <button>Go</button>\n"
    );
}

#[test]
fn variable_references_resolve_forward_and_backward() {
    let src = r#"[p-start] contains = $title [p-end]
[h-start] label = "title" contains = "Welcome" level = 2 [h-end]
[p-start] contains = $title [p-end]
[p-start] contains = $missing [p-end]"#;
    assert_eq!(
        run_mid(src),
        r#"    <p>Welcome</p>
    <h2 id="title">Welcome</h2>
    <p>Welcome</p>
    <p>$missing</p>
"#
    );
}

#[test]
fn references_resolve_across_sections() {
    let html = run(r#"[top-of-page-start]
[btn-start] contains = $cta [btn-end]
[top-of-page-end]
[bottom-of-page-start]
[p-start] label = "cta" contains = "Sign up" [p-end]
[bottom-of-page-end]"#);
    assert!(html.contains("<button>Sign up</button>"), "got: {}", html);
}

#[test]
fn friendly_style_values() {
    let src = r#"[divide-start]
  padding = "large" margin = "none" border = "thin" rounded = "circle"
  shadow = "small" text_size = "giant"
[divide-end]"#;
    assert_eq!(
        run_mid(src),
        "    <div style=\"font-size: 48px; padding: 24px; margin: 0; border: 1px solid #ccc; \
border-radius: 50%; box-shadow: 0 1px 3px rgba(0,0,0,0.12), 0 1px 2px rgba(0,0,0,0.24);\">\n    </div>\n"
    );
}

#[test]
fn raw_css_values_pass_through() {
    let src = r#"[p-start]
  contains = "x" padding = "3px 5px" border = "1px dashed red" text_size = "2rem"
  font = "serif" align = "center" width = "50%" height = 20 line_spacing = 1.5 display = "block"
[p-end]"#;
    assert_eq!(
        run_mid(src),
        "    <p style=\"font-size: 2rem; font-family: serif; text-align: center; padding: 3px 5px; \
border: 1px dashed red; width: 50%; height: 20; line-height: 1.5; display: block;\">x</p>\n"
    );
}

#[test]
fn background_gradient_and_solid() {
    assert_eq!(
        run_mid(r#"[divide-start] background = "linear-gradient(#fff, #000)" [divide-end]"#),
        "    <div style=\"background: linear-gradient(#fff, #000);\">\n    </div>\n"
    );
    assert_eq!(
        run_mid(r#"[divide-start] background = "navy" [divide-end]"#),
        "    <div style=\"background-color: navy;\">\n    </div>\n"
    );
}

#[test]
fn divide_attribute_order() {
    assert_eq!(
        run_mid(r#"[divide-start] label = "hero" class = "wide" center_content = "true" [divide-end]"#),
        "    <div id=\"hero\" class=\"wide\" style=\"display: flex; justify-content: center; align-items: center;\">\n    </div>\n"
    );
}

#[test]
fn heading_size_merges_into_style() {
    assert_eq!(
        run_mid(r#"[h-start] contains = "T" size = "3em" [h-end]"#),
        "    <h1 style=\"font-size: 3em;\">T</h1>\n"
    );
    assert_eq!(
        run_mid(r#"[h-start] contains = "T" level = 3 color = "red" size = "40px" [h-end]"#),
        "    <h3 style=\"color: red;; font-size: 40px;\">T</h3>\n"
    );
    assert_eq!(
        run_mid(r#"[h-start] contains = "T" [h-end]"#),
        "    <h1>T</h1>\n"
    );
}

#[test]
fn link_prefers_link_url_over_href() {
    assert_eq!(
        run_mid(r#"[link-start] href = "/old" contains = "A" [link-end]"#),
        "    <a href=\"/old\">A</a>\n"
    );
    assert_eq!(
        run_mid(r#"[link-start] href = "/old" link_url = "/new" label = "l" contains = "A" [link-end]"#),
        "    <a href=\"/new\" id=\"l\">A</a>\n"
    );
}

#[test]
fn image_attributes_default_to_empty() {
    assert_eq!(run_mid("[img-start] [img-end]"), "    <img src=\"\" alt=\"\">\n");
    assert_eq!(
        run_mid(r#"[img-start] src = "a.png" alt = "A" [img-end]"#),
        "    <img src=\"a.png\" alt=\"A\">\n"
    );
}

#[test]
fn form_with_inputs() {
    let src = r#"[form-start] action = "/send"
  [input-start] name = "q" [input-end]
  [input-start] type = "email" name = "mail" label = "m" [input-end]
  [btn-start] contains = "Send" [btn-end]
[form-end]"#;
    assert_eq!(
        run_mid(src),
        r#"    <form action="/send">
      <input type="text" name="q">
      <input type="email" name="mail" id="m">
      <button>Send</button>
    </form>
"#
    );
}

#[test]
fn inline_elements() {
    assert_eq!(
        run_mid(r#"[bold-start] contains = "b" [bold-end] [italic-start] contains = "i" [italic-end]"#),
        "    <strong>b</strong>\n    <em>i</em>\n"
    );
}

#[test]
fn code_is_escaped_with_language_and_file() {
    let src = r#"[code-start]
  file_type = "rust"
  linked_file = "main.rs"
  syntax = {
    if a < b { "x" }
  }
[code-end]"#;
    assert_eq!(
        run_mid(src),
        "    <pre><code class=\"language-rust\">/* File: main.rs */\nif a &lt; b { &quot;x&quot; }</code></pre>\n"
    );
}

#[test]
fn code_syntax_must_be_a_code_block() {
    assert_eq!(
        run_mid(r#"[code-start] syntax = "a < b" [code-end]"#),
        "    <pre><code></code></pre>\n"
    );
}

#[test]
fn sibling_elements_share_indentation() {
    let src = r#"[divide-start]
  [p-start] contains = "one" [p-end]
  [divide-start]
    [p-start] contains = "two" [p-end]
  [divide-end]
  [p-start] contains = "three" [p-end]
[divide-end]
[p-start] contains = "four" [p-end]"#;
    assert_eq!(
        run_mid(src),
        r#"    <div>
      <p>one</p>
      <div>
        <p>two</p>
      </div>
      <p>three</p>
    </div>
    <p>four</p>
"#
    );
}

#[test]
fn no_style_attribute_without_style_properties() {
    let html = run_mid(r#"[p-start] contains = "plain" class = "ignored" [p-end]"#);
    assert_eq!(html, "    <p>plain</p>\n");
    assert!(!html.contains("style="));
}

#[test]
fn generation_is_idempotent() {
    let src = r#"[top-of-page-start]
[h-start] label = "t" contains = "Title" [h-end]
[top-of-page-end]
[mid-page-start]
[lst-unord] items = [$t, "x"] [lst-end]
[mid-page-end]"#;
    let document = lpml::Parser::new(src.to_string(), 0)
        .parse()
        .expect("parse failed");
    let generator = generator::Generator::new(&document);
    let first = generator.generate();
    assert_eq!(first, generator.generate());
    assert_eq!(first, generator::generate(&document));
}

#[test]
fn deeply_nested_input_renders_up_to_the_nesting_limit() {
    let src = format!(
        "[mid-page-start]{}{}[mid-page-end]",
        "[divide-start]".repeat(10_000),
        "[divide-end]".repeat(10_000)
    );
    let output = lpml::Parser::new(src, 0).parse_partial();
    assert_eq!(output.errors.len(), 1);
    let html = generator::generate(&output.document);
    assert_eq!(html.matches("<div>").count(), lpml::parser::MAX_NESTING_DEPTH);
}
