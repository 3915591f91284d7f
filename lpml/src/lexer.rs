use crate::token::{Token, TokenKind, lookup_tag};

/// Hand-written LPML tokenizer.
///
/// Produces one token per [`Lexer::next_token`] call with a single character of
/// lookahead. Also usable as an iterator, which ends after yielding `Eof`.
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of `ch`.
    position: usize,
    /// Byte offset just past `ch`.
    read_position: usize,
    ch: Option<char>,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input,
            position: 0,
            read_position: 0,
            ch: None,
            line: 1,
            column: 0,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let start = self.position;

        let Some(ch) = self.ch else {
            return Token::new(TokenKind::Eof, "", line, column, start..start);
        };

        match ch {
            '[' => {
                if self.is_array_start() {
                    self.single(TokenKind::LBracket)
                } else {
                    self.read_tag()
                }
            }
            ']' => self.single(TokenKind::RBracket),
            '=' => self.single(TokenKind::Equals),
            ',' => self.single(TokenKind::Comma),
            '{' => self.read_code_block(),
            '$' => self.read_variable_reference(),
            '"' => self.read_string(),
            // Unreachable while skip_whitespace consumes line breaks.
            '\n' => self.single(TokenKind::Newline),
            c if c.is_ascii_digit() => {
                let literal = self.read_number();
                Token::new(TokenKind::Number, literal, line, column, start..self.position)
            }
            c if is_letter(c) || c == '_' => {
                let literal = self.read_identifier();
                Token::new(TokenKind::Ident, literal, line, column, start..self.position)
            }
            _ => self.single(TokenKind::Illegal),
        }
    }

    fn read_char(&mut self) {
        self.ch = self.input[self.read_position..].chars().next();
        self.position = self.read_position;
        self.read_position += self.ch.map_or(0, char::len_utf8);
        self.column += 1;

        if self.ch == Some('\n') {
            self.line += 1;
            self.column = 0;
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.read_position..].chars().next()
    }

    /// Emit the current character as a one-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        let (line, column, start) = (self.line, self.column, self.position);
        let literal = self.ch.map(String::from).unwrap_or_default();
        self.read_char();
        Token::new(kind, literal, line, column, start..self.position)
    }

    /// A `[` opens an array literal when followed by a digit, `$`, `"`, `]` or
    /// whitespace; otherwise it opens a tag.
    fn is_array_start(&self) -> bool {
        match self.peek_char() {
            Some(next) => {
                next.is_ascii_digit() || matches!(next, '$' | '"' | ']' | ' ' | '\n' | '\t')
            }
            None => false,
        }
    }

    fn read_tag(&mut self) -> Token {
        let (line, column, start) = (self.line, self.column, self.position);

        self.read_char(); // [

        let name_start = self.position;
        while self.ch.is_some_and(is_tag_char) {
            self.read_char();
        }
        let name = &self.input[name_start..self.position];

        // Anything after the name up to the closing bracket is dropped.
        while self.ch.is_some_and(|c| c != ']') {
            self.read_char();
        }
        if self.ch == Some(']') {
            self.read_char();
        }

        Token::new(lookup_tag(name), name, line, column, start..self.position)
    }

    fn read_code_block(&mut self) -> Token {
        let (line, column, start) = (self.line, self.column, self.position);

        self.read_char(); // {

        while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
            self.read_char();
        }

        let content_start = self.position;
        let mut depth = 1usize;
        while let Some(c) = self.ch {
            if c == '{' {
                depth += 1;
            } else if c == '}' {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            self.read_char();
        }

        let content = self.input[content_start..self.position]
            .trim_end_matches([' ', '\t', '\n', '\r'])
            .to_string();

        if self.ch == Some('}') {
            self.read_char();
        }

        Token::new(TokenKind::CodeBlock, content, line, column, start..self.position)
    }

    fn read_variable_reference(&mut self) -> Token {
        let (line, column, start) = (self.line, self.column, self.position);

        self.read_char(); // $
        let name = self.read_identifier();

        Token::new(TokenKind::Dollar, name, line, column, start..self.position)
    }

    /// Quoted string without escapes. Unterminated strings run to end of input.
    fn read_string(&mut self) -> Token {
        let (line, column, start) = (self.line, self.column, self.position);

        self.read_char(); // opening quote
        let content_start = self.position;
        while self.ch.is_some_and(|c| c != '"') {
            self.read_char();
        }
        let content = self.input[content_start..self.position].to_string();
        if self.ch == Some('"') {
            self.read_char();
        }

        Token::new(TokenKind::String, content, line, column, start..self.position)
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while self
            .ch
            .is_some_and(|c| is_letter(c) || c.is_ascii_digit() || c == '_')
        {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\r' | '\n')) {
            self.read_char();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_tag_char(c: char) -> bool {
    is_letter(c) || c.is_ascii_digit() || c == '-' || c == '_'
}
