pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::Document;
pub use parser::{ParseError, ParseOutput, Parser};
