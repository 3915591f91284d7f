use crate::ast::{Document, Element, PageSection, SectionKind};
use crate::lexer::Lexer;
use crate::parser::ParseOutput;
use crate::parser::error::ParseError;
use crate::token::{Tag, Token, TokenKind};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Deepest element nesting the parser builds. Deeper subtrees are reported
/// and skipped.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse LPML source into page sections, recording errors instead of stopping.
pub fn parse_document(source: &str, file_id: usize) -> ParseOutput {
    let mut state = ParseState::new(source, file_id);
    let document = state.parse_document();
    state.finalize(document)
}

// ---------------------------------------------------------------------------
// Parse state
// ---------------------------------------------------------------------------

pub(super) struct ParseState<'a> {
    lexer: Lexer<'a>,
    pub(super) current: Token,
    peek: Token,
    file_id: usize,
    errors: Vec<ParseError>,
    /// Number of enclosing elements of the one being parsed.
    depth: usize,
}

impl<'a> ParseState<'a> {
    fn new(source: &'a str, file_id: usize) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        ParseState {
            lexer,
            current,
            peek,
            file_id,
            errors: Vec::new(),
            depth: 0,
        }
    }

    pub(super) fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Step over a token that has no place in the current context.
    pub(super) fn skip(&mut self) {
        log::trace!(
            "skipping {} at line {} (next: {})",
            self.current.kind,
            self.current.line,
            self.peek.kind
        );
        self.advance();
    }

    /// Build an error pointing at the current token.
    pub(super) fn error_here(&self, message: String) -> ParseError {
        ParseError::error(
            message,
            self.current.span.clone(),
            self.current.line,
            self.file_id,
        )
    }

    pub(super) fn push_error(&mut self, error: ParseError) {
        log::debug!("line {}: {}", error.line, error.message);
        self.errors.push(error);
    }

    fn finalize(self, document: Document) -> ParseOutput {
        ParseOutput {
            document,
            errors: self.errors,
        }
    }

    fn parse_document(&mut self) -> Document {
        let mut document = Document::empty();

        while self.current.kind != TokenKind::Eof {
            let section_kind = match self.current.kind {
                TokenKind::Open(tag) => SectionKind::from_tag(tag),
                _ => None,
            };
            match section_kind {
                Some(kind) => {
                    let section = self.parse_section(kind);
                    document.sections.push(section);
                }
                // Anything between sections is ignored.
                None => self.skip(),
            }
        }

        document
    }

    fn parse_section(&mut self, kind: SectionKind) -> PageSection {
        let opening = TokenKind::Open(kind.tag());
        let closing = opening.matching_close();
        let mut section = PageSection {
            kind,
            children: Vec::new(),
            line: self.current.line,
            span: self.current.span.clone(),
        };
        self.advance();

        while self.current.kind != closing && self.current.kind != TokenKind::Eof {
            if self.is_unknown_tag() {
                let error = self.error_here(format!(
                    "unknown tag `[{}]` in section {}",
                    self.current.literal,
                    kind.name()
                ));
                self.push_error(error);
                self.advance();
                continue;
            }
            if let Some(child) = self.parse_element() {
                section.children.push(child);
            }
        }

        if self.current.kind == closing {
            self.advance();
        } else {
            let error = ParseError::error(
                format!("expected closing tag for section {}", kind.name()),
                section.span.clone(),
                section.line,
                self.file_id,
            )
            .with_note(format!("add `[{}]`", kind.tag().close_name()));
            self.push_error(error);
        }

        log::debug!(
            "parsed {} section with {} element(s)",
            kind.name(),
            section.children.len()
        );
        section
    }

    fn parse_element(&mut self) -> Option<Element> {
        let TokenKind::Open(tag) = self.current.kind else {
            self.skip();
            return None;
        };

        if self.depth >= MAX_NESTING_DEPTH {
            let line = self.current.line;
            let error = self
                .error_here(format!("element nesting too deep at line {}", line))
                .with_note(format!(
                    "elements may be nested at most {} levels deep",
                    MAX_NESTING_DEPTH
                ));
            self.push_error(error);
            self.skip_subtree();
            return None;
        }

        self.depth += 1;
        let element = self.parse_element_body(tag);
        self.depth -= 1;
        Some(element)
    }

    fn parse_element_body(&mut self, tag: Tag) -> Element {
        let mut element = Element::new(tag, self.current.line, self.current.span.clone());
        self.advance();

        while !self.is_matching_close(tag) && self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Ident => self.parse_property(&mut element),
                TokenKind::Open(_) => {
                    if let Some(child) = self.parse_element() {
                        element.children.push(child);
                    }
                }
                _ => self.skip(),
            }
        }

        if self.is_matching_close(tag) {
            self.advance();
        } else {
            let error = ParseError::error(
                format!(
                    "expected closing tag for element {} at line {}",
                    tag.name(),
                    element.line
                ),
                element.span.clone(),
                element.line,
                self.file_id,
            )
            .with_note(format!("add `[{}]`", tag.close_name()));
            self.push_error(error);
        }

        element
    }

    /// Consume the element starting at the current opening tag together with
    /// everything nested in it, without building any tree. Closing tags are
    /// matched the same way `parse_element` matches them.
    fn skip_subtree(&mut self) {
        let mut open: Vec<Tag> = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::Open(tag) => open.push(tag),
                _ => {
                    let closes_innermost = match open.last() {
                        Some(&innermost) => self.is_matching_close(innermost),
                        None => return,
                    };
                    if closes_innermost {
                        open.pop();
                        if open.is_empty() {
                            self.advance();
                            return;
                        }
                    }
                }
            }
            self.advance();
        }
    }

    /// An unrecognised bracket tag lexes as an identifier that keeps its
    /// hyphens, which a bare identifier can never contain.
    fn is_unknown_tag(&self) -> bool {
        self.current.kind == TokenKind::Ident && self.current.literal.contains('-')
    }

    /// Whether the current token closes `open`. Both list kinds close on the
    /// shared `lst-end` tag.
    fn is_matching_close(&self, open: Tag) -> bool {
        let close = self.current.kind;
        if matches!(open, Tag::OrderedList | Tag::UnorderedList)
            && matches!(
                close,
                TokenKind::Close(Tag::OrderedList) | TokenKind::Close(Tag::UnorderedList)
            )
        {
            return true;
        }
        close == TokenKind::Open(open).matching_close()
    }

    /// `name = value`. A missing `=` records an error and leaves the
    /// unexpected token for the enclosing element to handle.
    fn parse_property(&mut self, element: &mut Element) {
        let name = self.current.literal.clone();
        self.advance();

        if self.current.kind != TokenKind::Equals {
            let mut error = self.error_here(format!(
                "expected '=' after property name {}, got {}",
                name, self.current.kind
            ));
            if name.contains('-') {
                error = error.with_note(format!("`[{}]` is not a known tag", name));
            }
            self.push_error(error);
            return;
        }
        self.advance();

        if let Some(value) = self.parse_value(&name) {
            element.set_property(name, value);
        }
    }
}
