use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const TEST_SUFFIX: &str = ".test.lpml";

#[derive(Debug, Deserialize)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    /// If true, the test expects parsing to fail.
    #[serde(default)]
    pub expect_parse_error: bool,

    /// Substring that some parse error message must contain.
    #[serde(default)]
    pub expect_error_contains: Option<String>,

    /// Substrings the generated HTML must contain.
    #[serde(default)]
    pub expect_contains: Vec<String>,

    /// Substrings the generated HTML must not contain.
    #[serde(default)]
    pub expect_not_contains: Vec<String>,
}

/// Parse a `.test.lpml` file into its TOML config and LPML source.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}'); // strip BOM

    let Some(after_open) = content.strip_prefix("---") else {
        return Err("missing opening --- frontmatter delimiter".into());
    };
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + 4..]; // skip \n---
    let source = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: TestConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, source))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

/// Check a compiled test against its expectations. Returns `Some(reason)` on failure.
fn check_expectations(config: &TestConfig, source: &str) -> Option<String> {
    let parser = lpml::Parser::new(source.to_string(), 0);
    let parse_result = parser.parse();

    if config.expect_parse_error {
        let errors = match parse_result {
            Err(errors) => errors,
            Ok(_) => return Some("expected parse error, but parsing succeeded".into()),
        };
        let Some(expected) = &config.expect_error_contains else {
            return None;
        };
        if errors.iter().any(|e| e.message.contains(expected.as_str())) {
            return None;
        }
        let msgs: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
        return Some(format!(
            "expected a parse error containing \"{}\", got: {}",
            expected,
            msgs.join("; ")
        ));
    }

    let document = match parse_result {
        Ok(document) => document,
        Err(errs) => {
            let msgs: Vec<String> = errs.iter().map(|e| e.message.clone()).collect();
            return Some(format!("unexpected parse error: {}", msgs.join("; ")));
        }
    };

    let html = generator::generate(&document);

    for expected in &config.expect_contains {
        if !html.contains(expected.as_str()) {
            return Some(format!(
                "output does not contain \"{}\"\n  output:\n{}",
                expected, html
            ));
        }
    }
    for unexpected in &config.expect_not_contains {
        if html.contains(unexpected.as_str()) {
            return Some(format!("output unexpectedly contains \"{}\"", unexpected));
        }
    }

    None
}

fn run_single_test(path: &Path) -> TestResult {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("cannot read file: {}", e)),
            };
        }
    };

    let (config, source) = match parse_test_file(&content) {
        Ok(pair) => pair,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("frontmatter error: {}", e)),
            };
        }
    };

    let outcome = match check_expectations(&config, source) {
        None => TestOutcome::Pass,
        Some(reason) => TestOutcome::Fail(reason),
    };

    TestResult {
        path: path.to_path_buf(),
        description: config.description,
        outcome,
    }
}

/// Discover `.test.lpml` files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_tests(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_tests(&path, root, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(TEST_SUFFIX) {
                let category = path
                    .parent()
                    .and_then(|p| p.strip_prefix(root).ok())
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                out.entry(category).or_default().push(path);
            }
        }
    }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        let label = if cat.is_empty() { "(root)" } else { cat.as_str() };
        eprintln!("  {} ({} tests)", label, files.len());
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}

fn result_label<'a>(result: &'a TestResult, path: &'a Path) -> &'a str {
    result.description.as_deref().unwrap_or_else(|| {
        path.file_name()
            .and_then(|s| s.to_str())
            .and_then(|s| s.strip_suffix(TEST_SUFFIX))
            .unwrap_or("?")
    })
}

fn print_failure(result: &TestResult) {
    eprintln!();
    eprintln!("  --- {} ---", result.path.display());
    if let TestOutcome::Fail(reason) = &result.outcome {
        for line in reason.lines() {
            eprintln!("  {}", line);
        }
    }
}

/// Run all `.test.lpml` files under `path` (or a single file).
/// If `categories` is non-empty, only run tests in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let run_categories: BTreeMap<String, Vec<PathBuf>> = if path.is_file() {
        // Single file mode ignores categories
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        let all_categories = discover_categorized(path);
        if all_categories.is_empty() {
            eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
            return 1;
        }
        filter_categories(all_categories, categories)
    };

    if run_categories.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &run_categories {
        if !path.is_file() {
            let header = if cat.is_empty() { "(root)" } else { cat.as_str() };
            eprintln!();
            eprintln!("{}", bold(header, no_color));
        }

        for file in files {
            let result = run_single_test(file);
            let label = result_label(&result, file).to_string();
            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", pass_label(no_color), label);
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", fail_label(no_color), label);
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            print_failure(failure);
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("test result: {}. {} passed, 0 failed", ok, passed);
        0
    } else {
        let failed_label = if no_color { "FAILED" } else { "\x1b[31mFAILED\x1b[0m" };
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            failed_label,
            passed,
            failed,
            passed + failed
        );
        1
    }
}

fn filter_categories(
    all_categories: BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<String, Vec<PathBuf>> {
    if requested.is_empty() {
        return all_categories;
    }

    let mut filtered = BTreeMap::new();
    for requested in requested {
        let req = requested.trim_matches('/');
        let mut found = false;
        for (cat, files) in &all_categories {
            if cat == req || cat.starts_with(&format!("{}/", req)) {
                filtered.insert(cat.clone(), files.clone());
                found = true;
            }
        }
        if !found {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all_categories
                    .keys()
                    .map(|k| if k.is_empty() { "(root)" } else { k.as_str() })
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    filtered
}
