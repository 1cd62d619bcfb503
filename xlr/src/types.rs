//! Machine types and the builtin type checks.

use crate::tree::{Kind, Name};
use crate::{Context, Tree};
use core::fmt::{self, Debug, Display};

/// Translation of type expressions to machine types.
pub trait Compiler {
    /// Opaque description of how values are represented.
    type Type: Clone + PartialEq + Debug;

    /// Machine type of arbitrary trees.
    fn tree_type(&self) -> Self::Type;

    /// Machine type denoted by a type expression in a given context.
    fn machine_type(&self, context: &dyn Context, ty: &Tree) -> Self::Type;
}

/// Evaluation of trees, as required to check the type of a value.
pub trait Evaluate {
    fn evaluate(&mut self, value: &Tree) -> Tree;
}

impl<F: FnMut(&Tree) -> Tree> Evaluate for F {
    fn evaluate(&mut self, value: &Tree) -> Tree {
        self(value)
    }
}

/// Builtin types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Boolean,
    Integer,
    Real,
    /// texts that are not characters
    Text,
    /// texts between single quotes
    Character,
    /// any tree
    Any,
    Infix,
    Prefix,
    Postfix,
    Block,
}

impl BuiltinType {
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "real" => Self::Real,
            "text" => Self::Text,
            "character" => Self::Character,
            "tree" => Self::Any,
            "infix" => Self::Infix,
            "prefix" => Self::Prefix,
            "postfix" => Self::Postfix,
            "block" => Self::Block,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::Character => "character",
            Self::Any => "tree",
            Self::Infix => "infix",
            Self::Prefix => "prefix",
            Self::Postfix => "postfix",
            Self::Block => "block",
        }
    }

    /// Check whether a value belongs to the type.
    ///
    /// Return the evaluated value if it does.
    /// Values of any type are returned as is, without evaluation.
    ///
    /// ~~~
    /// # use xlr::{BuiltinType, Tree};
    /// let mut id = |tm: &Tree| tm.clone();
    /// assert!(BuiltinType::Character.type_check(&mut id, &Tree::character("c")).is_some());
    /// assert!(BuiltinType::Text.type_check(&mut id, &Tree::character("c")).is_none());
    /// ~~~
    pub fn type_check<E: Evaluate + ?Sized>(self, stack: &mut E, value: &Tree) -> Option<Tree> {
        if self == Self::Any {
            return Some(value.clone());
        }
        let result = stack.evaluate(value);
        let member = match self {
            Self::Boolean => result.as_name().map_or(false, is_boolean),
            Self::Integer => result.kind() == Kind::Integer,
            Self::Real => result.kind() == Kind::Real,
            Self::Text => result.as_text().map_or(false, |t| !t.delimiters.is_char_quote()),
            Self::Character => result.as_text().map_or(false, |t| t.delimiters.is_char_quote()),
            Self::Infix => result.kind() == Kind::Infix,
            Self::Prefix => result.kind() == Kind::Prefix,
            Self::Postfix => result.kind() == Kind::Postfix,
            Self::Block => result.kind() == Kind::Block,
            Self::Any => true,
        };
        member.then_some(result)
    }
}

fn is_boolean(name: &Name) -> bool {
    name.value == "true" || name.value == "false"
}

impl Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self.name(), f)
    }
}

/// Compiler that translates type expressions to builtin types.
///
/// A type expression denotes a builtin type if it is
/// the name of that type, or
/// a name bound in the context to the name of that type.
/// Every other type expression denotes any tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct Builtins;

impl Compiler for Builtins {
    type Type = BuiltinType;

    fn tree_type(&self) -> BuiltinType {
        BuiltinType::Any
    }

    fn machine_type(&self, context: &dyn Context, ty: &Tree) -> BuiltinType {
        let name = match ty.as_name() {
            Some(name) => name,
            None => return BuiltinType::Any,
        };
        // follow aliases such as `int` bound to `integer`
        let name = match context.lookup(&name.value).and_then(Tree::as_name) {
            Some(alias) => alias,
            None => name,
        };
        BuiltinType::from_name(&name.value).unwrap_or(BuiltinType::Any)
    }
}
