use crate::ast::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Whitespace,
    Comment,
    Number,
    String,
    Identifier,
    /// `$`-prefixed identifier such as `$fn`
    SpecialIdentifier,
    Keyword,
    Punct,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::SpecialIdentifier => "special identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Punct => "punctuation",
        }
    }
}

/// A single lexeme with its position in the source. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text, quotes and escapes included
    pub text: String,
    /// Byte offset of the first character
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub col: usize,
    /// Whether the token text spans a line break
    pub multiline: bool,
}

impl Token {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }

    /// Whitespace and comments carry no meaning for the grammar
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn is_punct(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == symbol
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
