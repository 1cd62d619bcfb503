//! Parse trees.
//!
//! Programs and types are both represented by trees.
//! A tree is one of eight kinds:
//! four leaves (integer, real, text, name) and
//! four composites (block, prefix, postfix, infix).
//! The kind and the children of a tree are fixed at construction;
//! only the cached compiled code, the attached symbols and the type
//! may be filled in later, and each of them at most once.

use crate::Symbols;
use alloc::{rc::Rc, string::String};
use core::cell::OnceCell;
use core::fmt::{self, Display};

/// Offset of a tree in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(usize);

impl Position {
    /// Position of trees that do not stem from source text.
    pub const NOWHERE: Self = Self(usize::MAX);

    pub fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Return the offset, unless the position is nowhere.
    pub fn offset(self) -> Option<usize> {
        (self != Self::NOWHERE).then_some(self.0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::NOWHERE
    }
}

/// The kinds of tree that compose a parse tree.
///
/// The order of the variants matters:
/// leaves come before composites, and constants come first among leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Integer,
    Real,
    Text,
    Name,
    Block,
    Prefix,
    Postfix,
    Infix,
}

impl Kind {
    pub fn is_leaf(self) -> bool {
        self <= Self::Name
    }

    /// Names are leaves, but not constants, because they refer to bindings.
    pub fn is_constant(self) -> bool {
        self <= Self::Text
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::Name => "name",
            Self::Block => "block",
            Self::Prefix => "prefix",
            Self::Postfix => "postfix",
            Self::Infix => "infix",
        };
        s.fmt(f)
    }
}

/// Opening and closing delimiters of texts and blocks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Delimiters {
    pub opening: String,
    pub closing: String,
}

impl Delimiters {
    pub fn new(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        let opening = opening.into();
        let closing = closing.into();
        Self { opening, closing }
    }

    /// `"text"`
    pub fn quote() -> Self {
        Self::new("\"", "\"")
    }

    /// `'c'`
    pub fn char_quote() -> Self {
        Self::new("'", "'")
    }

    /// `(x)`
    pub fn paren() -> Self {
        Self::new("(", ")")
    }

    /// `[x]`
    pub fn bracket() -> Self {
        Self::new("[", "]")
    }

    /// `{x}`
    pub fn brace() -> Self {
        Self::new("{", "}")
    }

    /// Indented block.
    pub fn indent() -> Self {
        Self::new("I+", "I-")
    }

    pub fn is_char_quote(&self) -> bool {
        self.opening == "'" && self.closing == "'"
    }
}

/// Text, such as `"Hello World"` or `'c'`.
#[derive(Clone, Debug)]
pub struct Text {
    pub value: String,
    pub delimiters: Delimiters,
}

/// Name or symbol, such as `ABC` or `++`.
#[derive(Clone, Debug)]
pub struct Name {
    pub value: String,
}

/// Block, such as `(X)`, `{X}`, `[X]` or an indented block.
#[derive(Clone, Debug)]
pub struct Block {
    pub child: Tree,
    pub delimiters: Delimiters,
}

/// Prefix, such as `sin X` or `-3`.
#[derive(Clone, Debug)]
pub struct Prefix {
    pub left: Tree,
    pub right: Tree,
}

/// Postfix, such as `3!`.
#[derive(Clone, Debug)]
pub struct Postfix {
    pub left: Tree,
    pub right: Tree,
}

/// Infix, such as `A+B`, `A and B` or `A, B`.
#[derive(Clone, Debug)]
pub struct Infix {
    pub name: String,
    pub left: Tree,
    pub right: Tree,
}

/// Structure of a tree, depending on its kind.
#[derive(Clone, Debug)]
pub enum Node {
    Integer(i64),
    Real(f64),
    Text(Text),
    Name(Name),
    Block(Block),
    Prefix(Prefix),
    Postfix(Postfix),
    Infix(Infix),
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Integer(_) => Kind::Integer,
            Self::Real(_) => Kind::Real,
            Self::Text(_) => Kind::Text,
            Self::Name(_) => Kind::Name,
            Self::Block(_) => Kind::Block,
            Self::Prefix(_) => Kind::Prefix,
            Self::Postfix(_) => Kind::Postfix,
            Self::Infix(_) => Kind::Infix,
        }
    }
}

/// Compiled evaluation code of a tree.
pub type Code = fn(&Tree) -> Option<Tree>;

/// Contents of a tree.
pub struct TreeC {
    node: Node,
    position: Position,
    code: OnceCell<Code>,
    symbols: OnceCell<Rc<Symbols>>,
    ty: OnceCell<Tree>,
}

/// Pointer to a shared tree.
#[derive(Clone)]
pub struct Tree(Rc<TreeC>);

impl Tree {
    /// Create a tree that has no position in the source.
    pub fn new(node: Node) -> Self {
        Self::new_at(node, Position::NOWHERE)
    }

    pub fn new_at(node: Node, position: Position) -> Self {
        Self(Rc::new(TreeC {
            node,
            position,
            code: OnceCell::new(),
            symbols: OnceCell::new(),
            ty: OnceCell::new(),
        }))
    }

    pub fn integer(value: i64) -> Self {
        Self::new(Node::Integer(value))
    }

    pub fn real(value: f64) -> Self {
        Self::new(Node::Real(value))
    }

    /// Create a text between double quotes.
    pub fn text(value: impl Into<String>) -> Self {
        Self::text_with(value, Delimiters::quote())
    }

    /// Create a text between single quotes.
    pub fn character(value: impl Into<String>) -> Self {
        Self::text_with(value, Delimiters::char_quote())
    }

    pub fn text_with(value: impl Into<String>, delimiters: Delimiters) -> Self {
        let value = value.into();
        Self::new(Node::Text(Text { value, delimiters }))
    }

    pub fn name(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(Node::Name(Name { value }))
    }

    pub fn block(child: Self, delimiters: Delimiters) -> Self {
        Self::new(Node::Block(Block { child, delimiters }))
    }

    pub fn prefix(left: Self, right: Self) -> Self {
        Self::new(Node::Prefix(Prefix { left, right }))
    }

    pub fn postfix(left: Self, right: Self) -> Self {
        Self::new(Node::Postfix(Postfix { left, right }))
    }

    pub fn infix(name: impl Into<String>, left: Self, right: Self) -> Self {
        let name = name.into();
        Self::new(Node::Infix(Infix { name, left, right }))
    }

    pub fn node(&self) -> &Node {
        &self.0.node
    }

    pub fn kind(&self) -> Kind {
        self.node().kind()
    }

    pub fn position(&self) -> Position {
        self.0.position
    }

    pub fn is_leaf(&self) -> bool {
        self.kind().is_leaf()
    }

    pub fn is_constant(&self) -> bool {
        self.kind().is_constant()
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.node() {
            Node::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self.node() {
            Node::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self.node() {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self.node() {
            Node::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self.node() {
            Node::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_prefix(&self) -> Option<&Prefix> {
        match self.node() {
            Node::Prefix(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_postfix(&self) -> Option<&Postfix> {
        match self.node() {
            Node::Postfix(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_infix(&self) -> Option<&Infix> {
        match self.node() {
            Node::Infix(i) => Some(i),
            _ => None,
        }
    }

    /// Compare the memory addresses of two tree pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn code(&self) -> Option<Code> {
        self.0.code.get().copied()
    }

    /// Store compiled code unless some code was stored before.
    ///
    /// Return true if the given code is the one stored.
    pub fn set_code(&self, code: Code) -> bool {
        self.0.code.set(code).is_ok()
    }

    pub fn symbols(&self) -> Option<&Rc<Symbols>> {
        self.0.symbols.get()
    }

    /// Attach symbols unless some were attached before.
    pub fn set_symbols(&self, symbols: Rc<Symbols>) -> bool {
        self.0.symbols.set(symbols).is_ok()
    }

    pub fn ty(&self) -> Option<&Tree> {
        self.0.ty.get()
    }

    /// Record the type unless a type was recorded before.
    pub fn set_type(&self, ty: Tree) -> bool {
        self.0.ty.set(ty).is_ok()
    }
}

impl From<Node> for Tree {
    fn from(node: Node) -> Self {
        Self::new(node)
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tree")
            .field("node", self.node())
            .field("position", &self.position())
            .finish()
    }
}

/// Rendering for diagnostics.
impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.node() {
            Node::Integer(i) => i.fmt(f),
            Node::Real(r) => write!(f, "{:?}", r),
            Node::Text(Text { value, delimiters }) => {
                write!(f, "{}{}{}", delimiters.opening, value, delimiters.closing)
            }
            Node::Name(n) => n.value.fmt(f),
            Node::Block(Block { child, delimiters }) => {
                write!(f, "{}{}{}", delimiters.opening, child, delimiters.closing)
            }
            Node::Prefix(Prefix { left, right }) => write!(f, "{} {}", left, right),
            Node::Postfix(Postfix { left, right }) => write!(f, "{} {}", left, right),
            Node::Infix(Infix { name, left, right }) if name == "," => {
                write!(f, "{}, {}", left, right)
            }
            Node::Infix(Infix { name, left, right }) => write!(f, "{} {} {}", left, name, right),
        }
    }
}

#[test]
fn kinds() {
    assert!(Tree::integer(1).is_constant());
    assert!(Tree::real(1.5).is_constant());
    assert!(Tree::text("a").is_constant());
    assert!(Tree::name("a").is_leaf());
    assert!(!Tree::name("a").is_constant());

    let x = Tree::name("x");
    let composites = [
        Tree::block(x.clone(), Delimiters::paren()),
        Tree::prefix(x.clone(), x.clone()),
        Tree::postfix(x.clone(), x.clone()),
        Tree::infix("+", x.clone(), x),
    ];
    assert!(composites.iter().all(|t| !t.is_leaf() && !t.is_constant()));
}

#[test]
fn views() {
    let tm = Tree::infix("+", Tree::name("A"), Tree::integer(1));
    assert!(tm.as_prefix().is_none());
    let infix = tm.as_infix().unwrap();
    assert_eq!(infix.name, "+");
    assert_eq!(infix.left.as_name().unwrap().value, "A");
    assert_eq!(infix.right.as_integer(), Some(1));
    assert_eq!(infix.right.as_real(), None);
}

#[test]
fn positions() {
    assert_eq!(Tree::name("x").position(), Position::NOWHERE);
    assert_eq!(Position::NOWHERE.offset(), None);
    let tm = Tree::new_at(Node::Integer(3), Position::new(7));
    assert_eq!(tm.position().offset(), Some(7));
}

#[test]
fn write_once() {
    fn first(tm: &Tree) -> Option<Tree> {
        Some(tm.clone())
    }
    fn second(_: &Tree) -> Option<Tree> {
        None
    }

    let tm = Tree::name("x");
    assert!(tm.ty().is_none());
    assert!(tm.set_type(Tree::name("integer")));
    assert!(!tm.set_type(Tree::name("real")));
    assert_eq!(tm.ty().unwrap().as_name().unwrap().value, "integer");

    assert!(tm.code().is_none());
    assert!(tm.set_code(first));
    assert!(!tm.set_code(second));
    assert!(tm.code().unwrap()(&tm).is_some());

    let syms = Rc::new(Symbols::new());
    assert!(tm.set_symbols(syms.clone()));
    assert!(!tm.set_symbols(syms));
    assert!(tm.symbols().is_some());
}

#[test]
fn display() {
    use alloc::string::ToString;
    let x = Tree::name("X");
    let tm = Tree::prefix(
        Tree::name("sin"),
        Tree::block(Tree::infix("+", x.clone(), Tree::real(1.0)), Delimiters::paren()),
    );
    assert_eq!(tm.to_string(), "sin (X + 1.0)");
    assert_eq!(Tree::character("c").to_string(), "'c'");
    let comma = Tree::infix(",", x.clone(), Tree::text("t"));
    assert_eq!(comma.to_string(), "X, \"t\"");
}
