//! Parsing of XL statements to trees.
//!
//! The parser is a small operator-precedence parser.
//! Every line holds one statement, such as the rewrite `sin X -> X`.
//! Juxtaposition applies a prefix to its argument, such as `sin X`,
//! and binds tighter than all infix operators except `:`.
//! Positions of trees are byte offsets into the source.

pub mod lex;

pub use lex::Token;

use crate::tree::{Block, Delimiters, Infix, Name, Node, Postfix, Position, Prefix, Text};
use crate::Tree;
use core::fmt::{self, Display};
use core::iter::Peekable;
use logos::{Logos, SpannedIter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// input that is not a token, such as `$`
    UnknownToken(usize),
    /// token at a place where it is not allowed, such as `)` in `X)`
    UnexpectedToken(usize),
    /// input ended where an expression was expected
    ExpectedExpression(usize),
    /// opening bracket without matching closing bracket
    UnclosedBlock(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownToken(pos) => write!(f, "unknown token at {}", pos),
            Self::UnexpectedToken(pos) => write!(f, "unexpected token at {}", pos),
            Self::ExpectedExpression(pos) => write!(f, "expected expression at {}", pos),
            Self::UnclosedBlock(pos) => write!(f, "unclosed block opened at {}", pos),
        }
    }
}

type Result<T> = core::result::Result<T, Error>;

/// Priority of prefix application by juxtaposition.
const FUNCTION: u8 = 85;

/// Priority of the argument of keywords such as `if`.
const STATEMENT: u8 = 25;

/// Priority of postfix operators.
const POSTFIX: u8 = 95;

/// Priority of operator symbols not in the table.
const DEFAULT: u8 = 55;

/// Keywords that take a whole statement as argument.
const KEYWORDS: [&str; 4] = ["if", "while", "for", "return"];

const POSTFIXES: [&str; 2] = ["!", "%"];

/// Priority of an infix operator and whether it associates to the right.
fn infix(op: &str) -> Option<(u8, bool)> {
    let prio = match op {
        "->" => (10, true),
        "," => (20, true),
        "then" | "else" => (30, false),
        "and" | "or" | "xor" => (40, false),
        "=" | "<>" | "<" | "<=" | ">" | ">=" | "==" | "!=" => (50, false),
        "+" | "-" => (60, false),
        "*" | "/" | "mod" | "rem" => (70, false),
        "^" => (80, true),
        ":" => (90, false),
        _ => return None,
    };
    Some(prio)
}

/// What to do with a token following an expression.
enum Step<'s> {
    Postfix(&'s str),
    /// operator with its left and right binding power
    Infix(&'s str, u8, u8),
    /// take the token as start of an argument
    Apply,
    Stop,
    Unknown,
}

impl<'s> Step<'s> {
    fn of(token: &Token<'s>) -> Self {
        let binary = |op: &'s str, (prio, right): (u8, bool)| {
            Self::Infix(op, prio, if right { prio } else { prio + 1 })
        };
        match *token {
            Token::Symbol(op) if POSTFIXES.contains(&op) => Self::Postfix(op),
            Token::Symbol(op) => binary(op, infix(op).unwrap_or((DEFAULT, false))),
            Token::Name(op) => infix(op).map_or(Self::Apply, |prio| binary(op, prio)),
            Token::RPar | Token::RBrk | Token::RBrc => Self::Stop,
            Token::Error => Self::Unknown,
            _ => Self::Apply,
        }
    }
}

struct Parser<'s> {
    tokens: Peekable<SpannedIter<'s, Token<'s>>>,
    /// offset of the source in a larger text
    offset: usize,
    /// offset right after the source
    end: usize,
}

fn leaf(node: Node, pos: usize) -> Tree {
    Tree::new_at(node, Position::new(pos))
}

fn name(value: &str, pos: usize) -> Tree {
    let value = value.into();
    leaf(Node::Name(Name { value }), pos)
}

impl<'s> Parser<'s> {
    fn new(s: &'s str, offset: usize) -> Self {
        let tokens = Token::lexer(s).spanned().peekable();
        let end = offset + s.len();
        Self {
            tokens,
            offset,
            end,
        }
    }

    fn peek(&mut self) -> Option<(Token<'s>, usize)> {
        let offset = self.offset;
        let (token, span) = self.tokens.peek()?;
        Some((token.clone(), offset + span.start))
    }

    fn next(&mut self) -> Option<(Token<'s>, usize)> {
        let (token, span) = self.tokens.next()?;
        Some((token, self.offset + span.start))
    }

    fn starts_operand(&mut self) -> bool {
        matches!(self.peek(), Some((tok, _)) if matches!(Step::of(&tok), Step::Apply))
    }

    /// Parse an expression whose operators bind at least as tightly as `min`.
    fn expr(&mut self, min: u8) -> Result<Tree> {
        let mut left = self.operand()?;
        while let Some((token, pos)) = self.peek() {
            let node = match Step::of(&token) {
                Step::Stop => break,
                Step::Unknown => return Err(Error::UnknownToken(pos)),
                Step::Postfix(op) => {
                    if POSTFIX < min {
                        break;
                    }
                    self.next();
                    let right = name(op, pos);
                    Node::Postfix(Postfix { left, right })
                }
                Step::Infix(op, lbp, rbp) => {
                    if lbp < min {
                        break;
                    }
                    self.next();
                    let right = self.expr(rbp)?;
                    let name = op.into();
                    Node::Infix(Infix { name, left, right })
                }
                Step::Apply => {
                    if FUNCTION < min {
                        break;
                    }
                    let right = self.expr(FUNCTION)?;
                    let pos = left.position().offset().unwrap_or(pos);
                    left = leaf(Node::Prefix(Prefix { left, right }), pos);
                    continue;
                }
            };
            left = leaf(node, pos);
        }
        Ok(left)
    }

    fn operand(&mut self) -> Result<Tree> {
        let (token, pos) = match self.next() {
            Some(next) => next,
            None => return Err(Error::ExpectedExpression(self.end)),
        };
        let text = |value: &str, delimiters| {
            let value = value.into();
            Node::Text(Text { value, delimiters })
        };
        let node = match token {
            Token::Integer(i) => Node::Integer(i),
            Token::Real(r) => Node::Real(r),
            Token::Text(s) => text(s, Delimiters::quote()),
            Token::Character(s) => text(s, Delimiters::char_quote()),
            Token::Name(n) if KEYWORDS.contains(&n) => {
                let right = self.expr(STATEMENT)?;
                Node::Prefix(Prefix {
                    left: name(n, pos),
                    right,
                })
            }
            // e.g. `-X`
            Token::Symbol(s) if self.starts_operand() => {
                let right = self.expr(FUNCTION)?;
                Node::Prefix(Prefix {
                    left: name(s, pos),
                    right,
                })
            }
            Token::Name(n) | Token::Symbol(n) => return Ok(name(n, pos)),
            Token::LPar => return self.block(Delimiters::paren(), Token::RPar, pos),
            Token::LBrk => return self.block(Delimiters::bracket(), Token::RBrk, pos),
            Token::LBrc => return self.block(Delimiters::brace(), Token::RBrc, pos),
            Token::Error => return Err(Error::UnknownToken(pos)),
            Token::RPar | Token::RBrk | Token::RBrc => return Err(Error::UnexpectedToken(pos)),
        };
        Ok(leaf(node, pos))
    }

    /// Parse the rest of a block opened at `pos`.
    fn block(&mut self, delimiters: Delimiters, close: Token<'s>, pos: usize) -> Result<Tree> {
        let child = match self.peek() {
            // `()` holds an empty name
            Some((token, end)) if token == close => name("", end),
            _ => self.expr(0).map_err(|e| match e {
                Error::ExpectedExpression(_) => Error::UnclosedBlock(pos),
                e => e,
            })?,
        };
        match self.next() {
            Some((token, _)) if token == close => {}
            Some((Token::Error, pos)) => return Err(Error::UnknownToken(pos)),
            _ => return Err(Error::UnclosedBlock(pos)),
        }
        let node = Node::Block(Block { child, delimiters });
        Ok(leaf(node, pos))
    }
}

/// Parse a single statement, such as `sin X -> X`.
///
/// ~~~
/// use xlr::parse::{parse_str, Error};
/// let tm = parse_str("if X then Y -> Y")?;
/// assert_eq!(tm.to_string(), "if X then Y -> Y");
/// assert_eq!(parse_str("(X").unwrap_err(), Error::UnclosedBlock(0));
/// # Ok::<_, Error>(())
/// ~~~
pub fn parse_str(s: &str) -> Result<Tree> {
    parse_at(s, 0)
}

/// Parse a statement that starts at the given offset of a larger text.
pub fn parse_at(s: &str, offset: usize) -> Result<Tree> {
    let mut parser = Parser::new(s, offset);
    let tm = parser.expr(0)?;
    match parser.next() {
        None => Ok(tm),
        Some((Token::Error, pos)) => Err(Error::UnknownToken(pos)),
        Some((_, pos)) => Err(Error::UnexpectedToken(pos)),
    }
}

/// Return the lines that hold statements,
/// together with their line numbers (starting from 1) and offsets.
///
/// Lines that are blank or only hold a comment are skipped.
pub fn lines(src: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    src.split('\n')
        .scan(0, |offset, line| {
            let start = *offset;
            *offset += line.len() + 1;
            Some((start, line))
        })
        .enumerate()
        .map(|(i, (offset, line))| (i + 1, offset, line))
        .filter(|(_, _, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("//")
        })
}

/// Parse every statement of a text, yielding line numbers and results.
///
/// ~~~
/// # use xlr::parse::statements;
/// let src = "// rules\nsin X -> X\n\ncos X -> (X\n";
/// let parsed: Vec<_> = statements(src).map(|(line, tm)| (line, tm.is_ok())).collect();
/// assert_eq!(parsed, [(2, true), (4, false)]);
/// ~~~
pub fn statements(src: &str) -> impl Iterator<Item = (usize, Result<Tree>)> + '_ {
    lines(src).map(|(line, offset, s)| (line, parse_at(s, offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Kind;
    use alloc::string::ToString;

    fn shape(s: &str) -> alloc::string::String {
        let tm = parse_str(s).unwrap();
        Shape(&tm).to_string()
    }

    /// Rendering that shows every composite in parentheses.
    struct Shape<'a>(&'a Tree);

    impl<'a> Display for Shape<'a> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self.0.node() {
                Node::Block(b) => {
                    let (open, close) = (&b.delimiters.opening, &b.delimiters.closing);
                    write!(f, "{}{}{}", open, Shape(&b.child), close)
                }
                Node::Prefix(p) => write!(f, "({} {})", Shape(&p.left), Shape(&p.right)),
                Node::Postfix(p) => write!(f, "({} {})", Shape(&p.left), Shape(&p.right)),
                Node::Infix(i) => write!(f, "({} {} {})", Shape(&i.left), i.name, Shape(&i.right)),
                _ => self.0.fmt(f),
            }
        }
    }

    #[test]
    fn positive() -> Result<()> {
        parse_str("X")?;
        parse_str("sin X -> X")?;
        parse_str("(X+Y):integer -> Y+X")?;
        parse_str("if X then Y else Z -> Y")?;
        parse_str("N! -> N * (N-1)!")?;
        parse_str("[1, 2, 3]")?;
        parse_str("{ }")?;
        parse_str("write \"Hello\", 'c' // greeting")?;
        Ok(())
    }

    #[test]
    fn negative() {
        use Error::*;
        assert_eq!(parse_str("").unwrap_err(), ExpectedExpression(0));
        assert_eq!(parse_str("X +").unwrap_err(), ExpectedExpression(3));
        assert_eq!(parse_str("(X").unwrap_err(), UnclosedBlock(0));
        assert_eq!(parse_str("f (X]").unwrap_err(), UnclosedBlock(2));
        assert_eq!(parse_str("X)").unwrap_err(), UnexpectedToken(1));
        assert_eq!(parse_str("X $ Y").unwrap_err(), UnknownToken(2));
        assert_eq!(parse_at("X)", 10).unwrap_err(), UnexpectedToken(11));
    }

    #[test]
    fn priorities() {
        assert_eq!(shape("X + Y -> Y"), "((X + Y) -> Y)");
        assert_eq!(shape("A + B * C - D"), "((A + (B * C)) - D)");
        assert_eq!(shape("A -> B -> C"), "(A -> (B -> C))");
        assert_eq!(shape("sin X + 1"), "((sin X) + 1)");
        assert_eq!(shape("sin cos X"), "(sin (cos X))");
        assert_eq!(shape("sin X:real"), "(sin (X : real))");
        assert_eq!(shape("A + A:integer"), "(A + (A : integer))");
        assert_eq!(shape("f X, Y"), "((f X) , Y)");
        assert_eq!(shape("-X"), "(- X)");
        assert_eq!(shape("N! + 1"), "((N !) + 1)");
        assert_eq!(shape("0!->1"), "((0 !) -> 1)");
        assert_eq!(shape("X%+1"), "((X %) + 1)");
        assert_eq!(shape("A!=B"), "(A != B)");
        assert_eq!(shape("A and B = C"), "(A and (B = C))");
        assert_eq!(shape("X mod 2"), "(X mod 2)");
    }

    #[test]
    fn keywords() {
        assert_eq!(shape("if X then Y -> Y"), "((if (X then Y)) -> Y)");
        assert_eq!(shape("if X then Y else Z"), "(if ((X then Y) else Z))");
        assert_eq!(shape("return X + 1"), "(return (X + 1))");
    }

    #[test]
    fn leaves() {
        let tm = parse_str("f 1 2.5 \"a\" 'b' X").unwrap();
        assert_eq!(tm.to_string(), "f 1 2.5 \"a\" 'b' X");
        let args = &tm.as_prefix().unwrap().right;
        assert_eq!(args.as_prefix().unwrap().left.kind(), Kind::Integer);

        let chr = parse_str("'b'").unwrap();
        assert!(chr.as_text().unwrap().delimiters.is_char_quote());

        let empty = parse_str("()").unwrap();
        assert_eq!(empty.as_block().unwrap().child.as_name().unwrap().value, "");
        assert_eq!(parse_str("[X]").unwrap().to_string(), "[X]");
    }

    #[test]
    fn positions() {
        let tm = parse_at("sin X -> X", 100).unwrap();
        let infix = tm.as_infix().unwrap();
        assert_eq!(tm.position().offset(), Some(106));
        assert_eq!(infix.left.position().offset(), Some(100));
        assert_eq!(infix.right.position().offset(), Some(109));
        let sin = infix.left.as_prefix().unwrap();
        assert_eq!(sin.right.position().offset(), Some(104));
    }

    #[test]
    fn lines_and_offsets() {
        let src = "  \nsin X -> X\n// cos\ncos X -> X";
        let lines: alloc::vec::Vec<_> = lines(src).collect();
        assert_eq!(lines, [(2, 3, "sin X -> X"), (4, 21, "cos X -> X")]);

        let (line, tm) = statements(src).last().unwrap();
        assert_eq!(line, 4);
        assert_eq!(tm.unwrap().position().offset(), Some(27));
    }

    #[test]
    fn display_tokens() {
        let tokens: alloc::vec::Vec<_> = Token::lexer("f (X, 'c')").map(|t| t.to_string()).collect();
        assert_eq!(tokens, ["f", "(", "X", ",", "'c'", ")"]);
    }
}
