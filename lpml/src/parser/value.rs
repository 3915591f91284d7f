use crate::ast::Value;
use crate::parser::structural::ParseState;
use crate::token::{Token, TokenKind};

impl ParseState<'_> {
    /// Parse the value of `property`. On an unexpected token the error is
    /// recorded, the token is left in place and no value is produced.
    pub(super) fn parse_value(&mut self, property: &str) -> Option<Value> {
        if self.current.kind == TokenKind::LBracket {
            return Some(self.parse_array());
        }

        if let Some(value) = scalar(&self.current) {
            self.advance();
            return Some(value);
        }

        if self.current.kind == TokenKind::CodeBlock {
            let value = Value::CodeBlock(self.current.literal.clone());
            self.advance();
            return Some(value);
        }

        let error = self.error_here(format!(
            "expected value for property {}, got {}",
            property, self.current.kind
        ));
        self.push_error(error);
        None
    }

    /// `[item, item, ...]`. Commas and anything that is not a string, number
    /// or variable reference are skipped.
    fn parse_array(&mut self) -> Value {
        self.advance(); // [

        let mut items = Vec::new();
        while !matches!(self.current.kind, TokenKind::RBracket | TokenKind::Eof) {
            if let Some(item) = scalar(&self.current) {
                items.push(item);
            }
            self.advance();
        }

        if self.current.kind == TokenKind::RBracket {
            self.advance();
        }

        Value::Array(items)
    }
}

/// Values allowed both as properties and as array items.
fn scalar(token: &Token) -> Option<Value> {
    match token.kind {
        TokenKind::String => Some(Value::String(token.literal.clone())),
        TokenKind::Number => Some(Value::Number(token.literal.clone())),
        TokenKind::Dollar => Some(Value::Variable(token.literal.clone())),
        _ => None,
    }
}
