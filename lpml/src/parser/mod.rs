pub mod error;
mod structural;
mod value;

pub use error::ParseError;
pub use structural::MAX_NESTING_DEPTH;

use crate::Document;

/// A best-effort document together with every error recorded on the way.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub document: Document,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse the whole source without stopping at errors.
    pub fn parse_partial(&self) -> ParseOutput {
        structural::parse_document(&self.source, self.file_id)
    }

    /// Parse the source, failing if any error was recorded.
    pub fn parse(&self) -> Result<Document, Vec<ParseError>> {
        let output = self.parse_partial();
        if output.errors.is_empty() {
            Ok(output.document)
        } else {
            Err(output.errors)
        }
    }
}
