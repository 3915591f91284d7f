pub mod labels;
pub mod render;
pub mod style;
pub mod text;

pub use labels::LabelRegistry;
pub use render::Generator;

use lpml::Document;

/// Render a parsed document to a complete HTML page.
pub fn generate(document: &Document) -> String {
    Generator::new(document).generate()
}
