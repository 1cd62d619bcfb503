//! Maps from names to the trees they are bound to.

use crate::Tree;
use alloc::string::String;

/// Immutable HashMap for fast cloning of scopes.
type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

/// Names that are reserved constants of the language.
const RESERVED: [&str; 3] = ["true", "false", "nil"];

/// Names of the builtin types.
const TYPES: [&str; 10] = [
    "boolean",
    "integer",
    "real",
    "text",
    "character",
    "tree",
    "infix",
    "prefix",
    "postfix",
    "block",
];

/// Binding of names at the scope enclosing a rewrite rule.
pub trait Context {
    /// Return the tree that a name is bound to.
    fn lookup(&self, name: &str) -> Option<&Tree>;

    /// Return true if the name is already declared.
    fn bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// Scoped map from names to trees.
///
/// A clone of a scope shares the bindings of the original,
/// so that names entered in the clone stay invisible outside.
#[derive(Clone, Debug, Default)]
pub struct Symbols {
    names: FnvHashMap<String, Tree>,
}

impl Symbols {
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a scope with the reserved names and builtin types.
    ///
    /// Every reserved name and type name is bound to a name tree of itself.
    ///
    /// ~~~
    /// # use xlr::{Context, Symbols};
    /// let syms = Symbols::with_basics();
    /// assert!(syms.bound("true") && syms.bound("integer"));
    /// assert!(!syms.bound("X"));
    /// ~~~
    pub fn with_basics() -> Self {
        let mut syms = Self::new();
        for name in RESERVED.iter().chain(TYPES.iter()) {
            syms.insert(*name, Tree::name(*name));
        }
        syms
    }

    /// Bind a name in the current scope, returning the binding it shadows.
    pub fn insert(&mut self, name: impl Into<String>, value: Tree) -> Option<Tree> {
        self.names.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Tree> {
        self.names.get(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Context for Symbols {
    fn lookup(&self, name: &str) -> Option<&Tree> {
        self.get(name)
    }
}

#[test]
fn scopes() {
    let mut outer = Symbols::new();
    assert!(outer.is_empty());
    outer.insert("pi", Tree::real(1.5));

    let mut inner = outer.clone();
    assert!(inner.bound("pi"));
    assert!(inner.insert("pi", Tree::integer(3)).is_some());
    inner.insert("e", Tree::real(2.5));

    assert_eq!(inner.get("pi").and_then(Tree::as_integer), Some(3));
    assert_eq!(outer.get("pi").and_then(Tree::as_real), Some(1.5));
    assert!(!outer.bound("e"));
    assert_eq!((outer.len(), inner.len()), (1, 2));
}

#[test]
fn basics() {
    let syms = Symbols::with_basics();
    assert_eq!(syms.len(), RESERVED.len() + TYPES.len());
    for name in ["false", "nil", "character", "postfix"] {
        let tm = syms.lookup(name).unwrap();
        assert_eq!(tm.as_name().unwrap().value, name);
    }
}
