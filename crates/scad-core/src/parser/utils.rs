use super::raw::RawNode;
use super::token::{Token, TokenKind};
use crate::ast::Span;
use chumsky::prelude::*;

/// Input of the grammar: the significant tokens of one source file
pub type ParserInput<'a> = &'a [Token];

pub type ParserExtra<'a> = extra::Err<Rich<'a, Token>>;

pub type StmtParser<'a> = Boxed<'a, 'a, ParserInput<'a>, RawNode, ParserExtra<'a>>;

/// Matches one punctuation token with the given text
pub fn punct<'a>(
    symbol: &'static str,
) -> impl Parser<'a, ParserInput<'a>, Token, ParserExtra<'a>> + Clone {
    any().filter(move |t: &Token| t.is_punct(symbol))
}

/// Matches one keyword token
pub fn keyword<'a>(
    word: &'static str,
) -> impl Parser<'a, ParserInput<'a>, Token, ParserExtra<'a>> + Clone {
    any().filter(move |t: &Token| t.is_keyword(word))
}

/// Matches a plain or `$`-prefixed identifier
pub fn name<'a>() -> impl Parser<'a, ParserInput<'a>, Token, ParserExtra<'a>> + Clone {
    any().filter(|t: &Token| {
        matches!(
            t.kind,
            TokenKind::Identifier | TokenKind::SpecialIdentifier
        )
    })
}

/// Byte span covered by a run of tokens
pub fn byte_span(tokens: &[Token]) -> Span {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => Span::new(first.offset, last.end()),
        _ => Span::default(),
    }
}
