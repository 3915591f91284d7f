use std::fmt;
use std::ops::Range;

/// Every kind of bracketed tag, including the three page-section pseudo-kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    // Page sections
    TopOfPage,
    MidPage,
    BottomOfPage,

    // Elements
    Divide,
    Paragraph,
    Heading,
    Link,
    Image,
    List,
    OrderedList,
    UnorderedList,
    Item,
    Table,
    Row,
    Cell,
    Form,
    Input,
    Button,
    Bold,
    Italic,
    Code,
}

impl Tag {
    /// Short name used in diagnostics and when echoing source.
    pub fn name(self) -> &'static str {
        match self {
            Tag::TopOfPage => "top-of-page",
            Tag::MidPage => "mid-page",
            Tag::BottomOfPage => "bottom-of-page",
            Tag::Divide => "divide",
            Tag::Paragraph => "p",
            Tag::Heading => "h",
            Tag::Link => "link",
            Tag::Image => "img",
            Tag::List => "list",
            Tag::OrderedList => "lst-ord",
            Tag::UnorderedList => "lst-unord",
            Tag::Item => "item",
            Tag::Table => "table",
            Tag::Row => "row",
            Tag::Cell => "cell",
            Tag::Form => "form",
            Tag::Input => "input",
            Tag::Button => "btn",
            Tag::Bold => "bold",
            Tag::Italic => "italic",
            Tag::Code => "code",
        }
    }

    /// The source spelling of the opening bracket for this tag.
    pub fn open_name(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == TokenKind::Open(self))
            .map(|(name, _)| *name)
            .unwrap_or("")
    }

    /// The source spelling of the closing bracket. Both list kinds share `lst-end`.
    pub fn close_name(self) -> &'static str {
        let close = match self {
            Tag::UnorderedList => TokenKind::Close(Tag::OrderedList),
            other => TokenKind::Close(other),
        };
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == close)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }

    fn screaming_name(self) -> &'static str {
        match self {
            Tag::TopOfPage => "TOP_OF_PAGE",
            Tag::MidPage => "MID_PAGE",
            Tag::BottomOfPage => "BOTTOM_OF_PAGE",
            Tag::Divide => "DIVIDE",
            Tag::Paragraph => "P",
            Tag::Heading => "H",
            Tag::Link => "LINK",
            Tag::Image => "IMG",
            Tag::List => "LIST",
            Tag::OrderedList => "LIST_ORD",
            Tag::UnorderedList => "LIST_UNORD",
            Tag::Item => "ITEM",
            Tag::Table => "TABLE",
            Tag::Row => "ROW",
            Tag::Cell => "CELL",
            Tag::Form => "FORM",
            Tag::Input => "INPUT",
            Tag::Button => "BTN",
            Tag::Bold => "BOLD",
            Tag::Italic => "ITALIC",
            Tag::Code => "CODE",
        }
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    Illegal,
    Eof,

    // Structural
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Equals,
    /// `$name`; the literal holds the name without the sigil.
    Dollar,
    Comma,
    /// Never produced: whitespace skipping swallows line breaks.
    Newline,

    // Literals
    String,
    Number,
    Ident,
    CodeBlock,

    // Tags
    Open(Tag),
    Close(Tag),
}

impl TokenKind {
    pub fn is_opening_tag(self) -> bool {
        matches!(self, TokenKind::Open(_))
    }

    pub fn is_closing_tag(self) -> bool {
        matches!(self, TokenKind::Close(_))
    }

    /// Closing kind required by an opening tag, or `Illegal` for anything else.
    ///
    /// The shared `lst-end` closer is not derived here; the parser special-cases it.
    pub fn matching_close(self) -> TokenKind {
        match self {
            TokenKind::Open(tag) => TokenKind::Close(tag),
            _ => TokenKind::Illegal,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Illegal => write!(f, "ILLEGAL"),
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Equals => write!(f, "="),
            TokenKind::Dollar => write!(f, "$"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::String => write!(f, "STRING"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::Ident => write!(f, "IDENT"),
            TokenKind::CodeBlock => write!(f, "CODEBLOCK"),
            TokenKind::Open(tag) => write!(f, "{}_START", tag.screaming_name()),
            TokenKind::Close(tag) => write!(f, "{}_END", tag.screaming_name()),
        }
    }
}

/// A lexical token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    /// 1-based line.
    pub line: usize,
    pub column: usize,
    /// Byte range in the source, for diagnostics.
    pub span: Range<usize>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        line: usize,
        column: usize,
        span: Range<usize>,
    ) -> Self {
        Token {
            kind,
            literal: literal.into(),
            line,
            column,
            span,
        }
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    // Page sections
    ("top-of-page-start", TokenKind::Open(Tag::TopOfPage)),
    ("top-of-page-end", TokenKind::Close(Tag::TopOfPage)),
    ("mid-page-start", TokenKind::Open(Tag::MidPage)),
    ("mid-page-end", TokenKind::Close(Tag::MidPage)),
    ("bottom-of-page-start", TokenKind::Open(Tag::BottomOfPage)),
    ("bottom-of-page-end", TokenKind::Close(Tag::BottomOfPage)),
    // Opening tags
    ("divide-start", TokenKind::Open(Tag::Divide)),
    ("p-start", TokenKind::Open(Tag::Paragraph)),
    ("h-start", TokenKind::Open(Tag::Heading)),
    ("link-start", TokenKind::Open(Tag::Link)),
    ("img-start", TokenKind::Open(Tag::Image)),
    ("list-start", TokenKind::Open(Tag::List)),
    ("lst-ord", TokenKind::Open(Tag::OrderedList)),
    ("lst-unord", TokenKind::Open(Tag::UnorderedList)),
    ("item-start", TokenKind::Open(Tag::Item)),
    ("table-start", TokenKind::Open(Tag::Table)),
    ("row-start", TokenKind::Open(Tag::Row)),
    ("cell-start", TokenKind::Open(Tag::Cell)),
    ("form-start", TokenKind::Open(Tag::Form)),
    ("input-start", TokenKind::Open(Tag::Input)),
    ("btn-start", TokenKind::Open(Tag::Button)),
    ("bold-start", TokenKind::Open(Tag::Bold)),
    ("italic-start", TokenKind::Open(Tag::Italic)),
    ("code-start", TokenKind::Open(Tag::Code)),
    // Closing tags
    ("divide-end", TokenKind::Close(Tag::Divide)),
    ("p-end", TokenKind::Close(Tag::Paragraph)),
    ("h-end", TokenKind::Close(Tag::Heading)),
    ("link-end", TokenKind::Close(Tag::Link)),
    ("img-end", TokenKind::Close(Tag::Image)),
    ("list-end", TokenKind::Close(Tag::List)),
    ("lst-end", TokenKind::Close(Tag::OrderedList)),
    ("item-end", TokenKind::Close(Tag::Item)),
    ("table-end", TokenKind::Close(Tag::Table)),
    ("row-end", TokenKind::Close(Tag::Row)),
    ("cell-end", TokenKind::Close(Tag::Cell)),
    ("form-end", TokenKind::Close(Tag::Form)),
    ("input-end", TokenKind::Close(Tag::Input)),
    ("btn-end", TokenKind::Close(Tag::Button)),
    ("bold-end", TokenKind::Close(Tag::Bold)),
    ("italic-end", TokenKind::Close(Tag::Italic)),
    ("code-end", TokenKind::Close(Tag::Code)),
];

/// Classify a bracket tag name. Unknown names come back as `Ident`.
pub fn lookup_tag(name: &str) -> TokenKind {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == name)
        .map(|(_, kind)| *kind)
        .unwrap_or(TokenKind::Ident)
}
