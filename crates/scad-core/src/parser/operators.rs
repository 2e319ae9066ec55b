use super::token::Token;
use super::utils::{ParserExtra, ParserInput, punct};
use crate::ast::{BinaryOp, UnaryOp};
use chumsky::prelude::*;

/// Creates a parser for prefix operators; keeps the token for the expression span
pub fn unary_op<'a>() -> impl Parser<'a, ParserInput<'a>, (UnaryOp, Token), ParserExtra<'a>> + Clone
{
    choice((
        punct("!").map(|t| (UnaryOp::Not, t)),
        punct("+").map(|t| (UnaryOp::Plus, t)),
        punct("-").map(|t| (UnaryOp::Neg, t)),
    ))
}

/// Creates a parser for multiplication/division/modulo operators
pub fn mul_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    choice((
        punct("*").to(BinaryOp::Mul),
        punct("/").to(BinaryOp::Div),
        punct("%").to(BinaryOp::Mod),
    ))
}

/// Creates a parser for addition/subtraction operators
pub fn add_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    choice((punct("+").to(BinaryOp::Add), punct("-").to(BinaryOp::Sub)))
}

/// Creates a parser for bit shift operators
pub fn shift_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    choice((punct("<<").to(BinaryOp::Shl), punct(">>").to(BinaryOp::Shr)))
}

/// Creates a parser for comparison operators (< <= > >=)
pub fn cmp_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    choice((
        punct("<=").to(BinaryOp::Le),
        punct(">=").to(BinaryOp::Ge),
        punct("<").to(BinaryOp::Lt),
        punct(">").to(BinaryOp::Gt),
    ))
}

/// Creates a parser for equality operators (== and !=)
pub fn eq_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    choice((punct("==").to(BinaryOp::Eq), punct("!=").to(BinaryOp::Ne)))
}

pub fn bit_and_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    punct("&").to(BinaryOp::BitAnd)
}

pub fn bit_xor_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    punct("^").to(BinaryOp::BitXor)
}

pub fn bit_or_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    punct("|").to(BinaryOp::BitOr)
}

/// Creates a parser for logical AND operator
pub fn and_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    punct("&&").to(BinaryOp::And)
}

/// Creates a parser for logical OR operator
pub fn or_op<'a>() -> impl Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone {
    punct("||").to(BinaryOp::Or)
}
