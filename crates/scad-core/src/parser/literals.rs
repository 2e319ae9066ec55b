use super::token::{Token, TokenKind};
use super::utils::{ParserExtra, ParserInput, keyword};
use crate::ast::{Expr, Literal};
use chumsky::prelude::*;

/// Creates a parser for numeric literals
pub fn number<'a>() -> impl Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone {
    any()
        .filter(|t: &Token| t.kind == TokenKind::Number)
        .try_map(|token: Token, span| match token.text.parse::<f64>() {
            Ok(value) => Ok(Expr::Literal {
                value: Literal::Number(value),
                token,
            }),
            Err(_) => Err(Rich::custom(span, format!("invalid number '{}'", token.text))),
        })
}

/// Creates a parser for string literals; the value has its quotes and escapes resolved
pub fn string<'a>() -> impl Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone {
    any()
        .filter(|t: &Token| t.kind == TokenKind::String)
        .map(|token: Token| {
            let inner = token
                .text
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(&token.text);
            Expr::Literal {
                value: Literal::String(unescape(inner)),
                token,
            }
        })
}

/// Creates a parser for boolean literals (true/false)
pub fn boolean<'a>() -> impl Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone {
    choice((
        keyword("true").map(|token| Expr::Literal {
            value: Literal::Boolean(true),
            token,
        }),
        keyword("false").map(|token| Expr::Literal {
            value: Literal::Boolean(false),
            token,
        }),
    ))
}

/// Creates a parser for the `undef` literal
pub fn undef<'a>() -> impl Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone {
    keyword("undef").map(|token| Expr::Literal {
        value: Literal::Undef,
        token,
    })
}

/// Resolve `\\`, `\"`, `\t`, `\n`, `\r` and `\uXXXX` escapes.
/// Unknown escapes keep the escaped character; a malformed `\u` is kept verbatim.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let rest = chars.as_str();
                let decoded = rest
                    .get(..4)
                    .filter(|hex| hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        chars = rest[4..].chars();
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_simple() {
        assert_eq!(unescape(r"a\\b"), r"a\b");
        assert_eq!(unescape(r#"say \"hi\""#), r#"say "hi""#);
        assert_eq!(unescape(r"tab\tnl\ncr\r"), "tab\tnl\ncr\r");
    }

    #[test]
    fn test_unescape_unicode() {
        assert_eq!(unescape(r"Omega \u03a9"), "Omega \u{3a9}");
        assert_eq!(unescape(r"\u03A9!"), "\u{3a9}!");
    }

    #[test]
    fn test_unescape_malformed() {
        assert_eq!(unescape(r"\u12"), r"\u12");
        assert_eq!(unescape(r"\uzzzz"), r"\uzzzz");
        assert_eq!(unescape(r"\q"), "q");
        assert_eq!(unescape("end\\"), "end\\");
    }
}
