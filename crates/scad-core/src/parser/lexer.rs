//! Source text to token stream
//!
//! The rule table is an ordered `choice`: the first rule that matches wins, so
//! multi-character operators are listed ahead of their single-character prefixes.
//! Whitespace and comments are kept in the stream and filtered before parsing.

use super::errors::LexError;
use super::token::{Token, TokenKind};
use chumsky::prelude::*;

/// Words reclassified from identifiers to keywords
pub const KEYWORDS: &[&str] = &["true", "false", "undef", "if", "else", "module", "function"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lexeme {
    Token(TokenKind),
    Invalid(Failure),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Failure {
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedComment,
}

/// Parser for runs of blanks and line breaks
fn whitespace<'a>() -> impl Parser<'a, &'a str, TokenKind, extra::Err<Rich<'a, char>>> + Clone {
    one_of(" \t\r\n")
        .repeated()
        .at_least(1)
        .to(TokenKind::Whitespace)
}

/// Parser for `//` and nested `/* */` comments
fn comment<'a>() -> impl Parser<'a, &'a str, TokenKind, extra::Err<Rich<'a, char>>> + Clone {
    let line_comment = just("//").then(none_of("\r\n").repeated()).ignored();

    let block_comment = recursive(|block| {
        just("/*")
            .then(
                choice((block, any().and_is(just("*/").not()).ignored()))
                    .repeated(),
            )
            .then(just("*/"))
            .ignored()
    });

    choice((line_comment, block_comment)).to(TokenKind::Comment)
}

/// Parser for numeric literals: `1`, `0003`, `.5`, `5.`, `1.5`, `2E-4`, `37.e88`
fn number<'a>() -> impl Parser<'a, &'a str, TokenKind, extra::Err<Rich<'a, char>>> + Clone {
    let mantissa = choice((
        text::digits(10)
            .then(just('.').then(text::digits(10).or_not()).or_not())
            .ignored(),
        just('.').then(text::digits(10)).ignored(),
    ));

    let exponent = one_of("eE")
        .then(one_of("+-").or_not())
        .then(text::digits(10));

    mantissa.then(exponent.or_not()).to(TokenKind::Number)
}

/// Parser for double-quoted strings; stops at the first unescaped quote
fn string<'a>() -> impl Parser<'a, &'a str, TokenKind, extra::Err<Rich<'a, char>>> + Clone {
    let escape = just('\\').then(any()).ignored();

    just('"')
        .then(choice((escape, none_of("\\\"").ignored())).repeated())
        .then(just('"'))
        .to(TokenKind::String)
}

/// Parser for identifiers, keywords and `$`-prefixed special identifiers
fn word<'a>() -> impl Parser<'a, &'a str, TokenKind, extra::Err<Rich<'a, char>>> + Clone {
    let special = just('$')
        .then(text::ascii::ident())
        .to(TokenKind::SpecialIdentifier);

    let plain = text::ascii::ident().map(|s: &str| {
        if KEYWORDS.contains(&s) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    });

    choice((special, plain))
}

/// Parser for operators and punctuation, longest first
fn punct<'a>() -> impl Parser<'a, &'a str, TokenKind, extra::Err<Rich<'a, char>>> + Clone {
    let double = choice((
        just("<="),
        just(">="),
        just("=="),
        just("!="),
        just("&&"),
        just("||"),
        just("<<"),
        just(">>"),
    ))
    .ignored();

    let single = one_of("=+-*/%<>!&|^?:()[]{},;").ignored();

    choice((double, single)).to(TokenKind::Punct)
}

/// Input no rule accepts
fn invalid<'a>() -> impl Parser<'a, &'a str, Failure, extra::Err<Rich<'a, char>>> + Clone {
    choice((
        just('"')
            .then(any().repeated())
            .to(Failure::UnterminatedString),
        any().to(Failure::UnexpectedCharacter),
    ))
}

fn lexer<'a>()
-> impl Parser<'a, &'a str, Vec<(Lexeme, SimpleSpan)>, extra::Err<Rich<'a, char>>> {
    // An unclosed "/*" must not fall through to the "/" and "*" operators
    let unclosed_comment = just("/*")
        .then(any().repeated())
        .to(Lexeme::Invalid(Failure::UnterminatedComment));

    let rule = choice((whitespace(), comment(), number(), string(), word()))
        .map(Lexeme::Token)
        .or(unclosed_comment)
        .or(punct().map(Lexeme::Token))
        .or(invalid().map(Lexeme::Invalid));

    rule.map_with(|lexeme, e| (lexeme, e.span()))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Tracks the 1-based line and column while walking the source in order
struct Cursor {
    line: usize,
    col: usize,
}

impl Cursor {
    fn advance(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\n' => {
                    self.line += 1;
                    self.col = 1;
                }
                // "\r\n" is one break; a lone '\r' is one too
                '\r' if chars.peek() != Some(&'\n') => {
                    self.line += 1;
                    self.col = 1;
                }
                '\r' => {}
                _ => self.col += 1,
            }
        }
    }
}

/// Split source text into a lossless token stream (whitespace and comments included)
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let (output, errors) = lexer().parse(source).into_output_errors();

    let Some(lexemes) = output else {
        // `invalid` accepts any character, so the rule table cannot fail outright
        let offset = errors
            .first()
            .map(|e| e.span().start)
            .unwrap_or(0)
            .min(source.len());
        let mut cursor = Cursor { line: 1, col: 1 };
        cursor.advance(&source[..offset]);
        return Err(LexError::UnexpectedCharacter {
            found: source[offset..].chars().next().unwrap_or(' '),
            offset,
            line: cursor.line,
            col: cursor.col,
        });
    };

    let mut cursor = Cursor { line: 1, col: 1 };
    let mut tokens = Vec::with_capacity(lexemes.len());

    for (lexeme, span) in lexemes {
        let text = &source[span.start..span.end];
        let (line, col) = (cursor.line, cursor.col);

        let kind = match lexeme {
            Lexeme::Token(kind) => kind,
            Lexeme::Invalid(failure) => {
                return Err(match failure {
                    Failure::UnexpectedCharacter => LexError::UnexpectedCharacter {
                        found: text.chars().next().unwrap_or(' '),
                        offset: span.start,
                        line,
                        col,
                    },
                    Failure::UnterminatedString => LexError::Unterminated {
                        what: "string",
                        offset: span.start,
                        line,
                        col,
                    },
                    Failure::UnterminatedComment => LexError::Unterminated {
                        what: "block comment",
                        offset: span.start,
                        line,
                        col,
                    },
                });
            }
        };

        tokens.push(Token {
            kind,
            text: text.to_string(),
            offset: span.start,
            len: span.end - span.start,
            line,
            col,
            multiline: text.contains(['\n', '\r']),
        });
        cursor.advance(text);
    }

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Drop whitespace and comments
pub fn significant(tokens: &[Token]) -> Vec<Token> {
    tokens.iter().filter(|t| !t.is_trivia()).cloned().collect()
}
