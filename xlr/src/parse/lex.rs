use core::fmt::{self, Display};
use logos::{Lexer, Logos};

#[derive(Logos, Clone, Debug, PartialEq)]
pub enum Token<'s> {
    #[regex("[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Real(f64),

    #[regex(r#""[^"\n]*""#, unquote)]
    Text(&'s str),

    #[regex(r"'[^'\n]*'", unquote)]
    Character(&'s str),

    #[regex("[a-zA-Z][a-zA-Z0-9_]*")]
    Name(&'s str),

    /// postfix operators are single tokens, so that `0!->1` is `0 ! -> 1`
    #[regex(r"[-+*/<>=:,;.&|^~#?@\\]+")]
    #[token("!")]
    #[token("%")]
    #[token("!=")]
    Symbol(&'s str),

    #[token("(")]
    LPar,

    #[token(")")]
    RPar,

    #[token("[")]
    LBrk,

    #[token("]")]
    RBrk,

    #[token("{")]
    LBrc,

    #[token("}")]
    RBrc,

    #[error]
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)]
    Error,
}

impl<'s> Display for Token<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::Integer(i) => i.fmt(f),
            Self::Real(r) => write!(f, "{:?}", r),
            Self::Text(s) => write!(f, "\"{}\"", s),
            Self::Character(s) => write!(f, "'{}'", s),
            Self::Name(s) | Self::Symbol(s) => s.fmt(f),
            Self::LPar => "(".fmt(f),
            Self::RPar => ")".fmt(f),
            Self::LBrk => "[".fmt(f),
            Self::RBrk => "]".fmt(f),
            Self::LBrc => "{".fmt(f),
            Self::RBrc => "}".fmt(f),
            Self::Error => Err(Default::default()),
        }
    }
}

/// Strip the quotes around a text.
fn unquote<'s>(lex: &mut Lexer<'s, Token<'s>>) -> &'s str {
    let s = lex.slice();
    // both quotes are single bytes
    &s[1..s.len() - 1]
}

#[test]
fn tokens() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = Token::lexer("sin X+1.5 // sine\n'c' \"t\" (N!)").collect();
    assert_eq!(
        tokens,
        [
            Token::Name("sin"),
            Token::Name("X"),
            Token::Symbol("+"),
            Token::Real(1.5),
            Token::Character("c"),
            Token::Text("t"),
            Token::LPar,
            Token::Name("N"),
            Token::Symbol("!"),
            Token::RPar,
        ]
    );
}

#[test]
fn postfix_symbols() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = Token::lexer("0!->1 X%+Y N!! A != B").collect();
    assert_eq!(
        tokens,
        [
            Token::Integer(0),
            Token::Symbol("!"),
            Token::Symbol("->"),
            Token::Integer(1),
            Token::Name("X"),
            Token::Symbol("%"),
            Token::Symbol("+"),
            Token::Name("Y"),
            Token::Name("N"),
            Token::Symbol("!"),
            Token::Symbol("!"),
            Token::Name("A"),
            Token::Symbol("!="),
            Token::Name("B"),
        ]
    );
}

#[test]
fn unknown() {
    assert_eq!(Token::lexer("$").next(), Some(Token::Error));
    assert_eq!(Token::lexer("\"open").next(), Some(Token::Error));
    // integers that do not fit
    assert_eq!(Token::lexer("99999999999999999999").next(), Some(Token::Error));
}
