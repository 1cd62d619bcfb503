//! Rewrite rules and maps from head shapes to rewrite rules.

use crate::parm::{Error as ParmError, Parameter, ParameterList};
use crate::tree::{Block, Infix, Kind, Name, Node, Postfix, Prefix};
use crate::{Action, Compiler, Context, Tree};
use alloc::{rc::Rc, string::String, vec::Vec};
use core::fmt::{self, Display};

/// Immutable HashMap for fast cloning of rule tables.
type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

/// Rewrite rule `from -> to`.
#[derive(Clone, Debug)]
pub struct Rewrite {
    /// left-hand side (pattern to match with)
    pub from: Tree,
    /// right-hand side (tree to replace with)
    pub to: Tree,
}

#[derive(Clone, Debug)]
pub enum Error {
    /// the tree is not of the shape `from -> to`
    NotARewrite(Tree),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotARewrite(tm) => write!(f, "{} is not a rewrite", tm),
        }
    }
}

impl TryFrom<&Tree> for Rewrite {
    type Error = Error;

    fn try_from(tm: &Tree) -> Result<Self, Self::Error> {
        match tm.as_infix() {
            Some(infix) if infix.name == "->" => Ok(Self {
                from: infix.left.clone(),
                to: infix.right.clone(),
            }),
            _ => Err(Error::NotARewrite(tm.clone())),
        }
    }
}

impl Rewrite {
    pub fn new(from: Tree, to: Tree) -> Self {
        Self { from, to }
    }

    /// Collect the parameters of the rewrite.
    ///
    /// Failure concerns only this rewrite;
    /// no partial parameter list is returned.
    ///
    /// ~~~
    /// # use xlr::{parse, BuiltinType, Builtins, Rewrite, Symbols};
    /// let rule = parse::parse_str("(X+Y):integer -> Y+X")?;
    /// let compiled = Rewrite::try_from(&rule)?.compile(&Symbols::with_basics(), &Builtins)?;
    /// assert_eq!(compiled.defined.unwrap().to_string(), "X + Y");
    /// assert_eq!(compiled.returned, Some(BuiltinType::Integer));
    /// assert_eq!(compiled.parameters.len(), 2);
    /// # Ok::<_, xlr::Error>(())
    /// ~~~
    pub fn compile<C: Compiler>(
        &self,
        context: &dyn Context,
        compiler: &C,
    ) -> Result<Compiled<C::Type>, ParmError> {
        let mut parms = ParameterList::new(context, compiler);
        parms.extract(&self.from)?;
        let (defined, parameters, returned) = parms.into_parts();
        Ok(Compiled {
            rewrite: self.clone(),
            defined,
            parameters,
            returned,
        })
    }
}

impl Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Rewrite together with the parameters of its left-hand side.
#[derive(Clone, Debug)]
pub struct Compiled<T> {
    pub rewrite: Rewrite,
    /// shape that calls have to match
    pub defined: Option<Tree>,
    pub parameters: Vec<Parameter<T>>,
    /// declared type of the left-hand side
    pub returned: Option<T>,
}

impl<T: Clone> Compiled<T> {
    /// Machine types of the parameters, in order.
    pub fn signature(&self) -> Vec<T> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }

    /// Head under which the rewrite is found.
    ///
    /// This is the head that calls identical to the left-hand side have.
    pub fn head(&self) -> Head {
        Head::of(&self.rewrite.from).unwrap_or(Head::Any)
    }
}

/// Key by which calls find candidate rewrites.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Head {
    /// leading name, such as `sin` in `sin X`
    Name(String),
    /// top-level operator, such as `+` in `A+B`
    Infix(String),
    /// rewrites that do not define any shape
    Any,
}

impl Head {
    /// Return the head of a call or pattern.
    ///
    /// The head is taken from the shape that the parameter extractor
    /// finds to be defined, such as `if` in `if X then Y` or
    /// `sin` in `0 sin X`.
    /// Trees without such a shape, such as constants, have no head.
    pub fn of(tm: &Tree) -> Option<Self> {
        let mut shape = Shape::default();
        tm.act(&mut shape);
        shape.defined.map(|defined| match defined.node() {
            Node::Infix(i) => Self::Infix(i.name.clone()),
            Node::Name(n) => Self::Name(n.value.clone()),
            _ => Self::Any,
        })
    }
}

/// Find the defined shape of a tree the way the parameter extractor does,
/// without collecting parameters.
#[derive(Default)]
struct Shape {
    defined: Option<Tree>,
}

impl Action for Shape {
    type Output = ();

    fn fallback(&mut self, _: &Tree) {}

    fn name(&mut self, what: &Tree, _: &Name) {
        if self.defined.is_none() {
            self.defined = Some(what.clone())
        }
    }

    fn block(&mut self, _: &Tree, block: &Block) {
        block.child.act(self)
    }

    fn infix(&mut self, what: &Tree, infix: &Infix) {
        if infix.name == ":" {
            // typed parameters define nothing
            if infix.left.as_name().is_none() {
                infix.left.act(self)
            }
            return;
        }
        if self.defined.is_none() {
            self.defined = Some(what.clone());
        }
        infix.left.act(self);
        infix.right.act(self)
    }

    fn prefix(&mut self, _: &Tree, prefix: &Prefix) {
        let infix = if self.defined.as_ref().map(Tree::kind) == Some(Kind::Infix) {
            self.defined.take()
        } else {
            None
        };
        prefix.left.act(self);
        prefix.right.act(self);
        if self.defined.is_none() {
            self.defined = infix;
        }
    }

    fn postfix(&mut self, _: &Tree, postfix: &Postfix) {
        postfix.right.act(self);
        postfix.left.act(self)
    }
}

impl Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Name(n) => n.fmt(f),
            Self::Infix(op) => write!(f, "{} {}", Kind::Infix, op),
            Self::Any => write!(f, "_"),
        }
    }
}

/// Map from heads to their rewrites, in order of insertion.
#[derive(Clone)]
pub struct Rewrites<T> {
    rules: FnvHashMap<Head, Rc<Vec<Compiled<T>>>>,
}

impl<T> Default for Rewrites<T> {
    fn default() -> Self {
        Self {
            rules: Default::default(),
        }
    }
}

impl<T: Clone> Rewrites<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rewrite to the rewrites with the same head.
    pub fn add(&mut self, rule: Compiled<T>) {
        let head = rule.head();
        debug!("add rewrite {} under {}", rule.rewrite, head);
        let rules = self.rules.entry(head).or_insert_with(Default::default);
        Rc::make_mut(rules).push(rule)
    }

    /// Return the rewrites registered under a head.
    pub fn get(&self, head: &Head) -> &[Compiled<T>] {
        match self.rules.get(head) {
            Some(rules) => rules.as_slice(),
            None => &[],
        }
    }

    /// Return the rewrites that may apply to a call:
    /// first those with the head of the call,
    /// then those without any defined shape.
    pub fn candidates<'a>(&'a self, call: &Tree) -> impl Iterator<Item = &'a Compiled<T>> + 'a {
        let head = Head::of(call);
        let specific = head.into_iter().flat_map(move |h| self.get(&h).iter());
        specific.chain(self.get(&Head::Any).iter())
    }

    /// Return the candidate rewrites whose left-hand side
    /// matches the call literally.
    pub fn literal<'a>(&'a self, call: &'a Tree) -> impl Iterator<Item = &'a Compiled<T>> + 'a {
        self.candidates(call)
            .filter(move |rule| rule.rewrite.from.matches(call))
    }

    /// Number of heads with rewrites.
    pub fn heads(&self) -> usize {
        self.rules.len()
    }

    /// Total number of rewrites.
    pub fn len(&self) -> usize {
        self.rules.values().map(|rules| rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
