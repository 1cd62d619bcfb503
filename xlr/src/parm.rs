//! Collection of the parameters on the left-hand side of a rewrite.

use crate::tree::{Block, Infix, Kind, Name, Postfix, Prefix, Text};
use crate::{Action, Compiler, Context, Tree};
use alloc::vec::Vec;
use core::fmt::{self, Display};

/// Parameter of a rewrite, with its machine type.
#[derive(Clone, Debug)]
pub struct Parameter<T> {
    /// name tree in the pattern where the parameter first occurs
    pub name: Tree,
    pub ty: T,
}

impl<T> Parameter<T> {
    pub fn name(&self) -> &str {
        self.name.as_name().map_or("", |n| &n.value)
    }
}

impl<T: Display> Display for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// Reasons to reject the left-hand side of a rewrite.
#[derive(Clone, Debug)]
pub enum Error {
    /// a symbol such as `+` is used as pattern variable
    NotAName(Tree),
    /// a repeated parameter is given another type
    ConflictingTypes(Tree),
    /// the type of the whole pattern is declared twice or too late
    CannotSpecifyType(Tree),
}

impl Error {
    /// Message, where `$1` stands for the offending tree.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotAName(_) => "The pattern variable $1 is not a name",
            Self::ConflictingTypes(_) => "Conflicting types for $1",
            Self::CannotSpecifyType(_) => "Cannot specify type of $1",
        }
    }

    /// Offending tree.
    pub fn tree(&self) -> &Tree {
        match self {
            Self::NotAName(tm) | Self::ConflictingTypes(tm) | Self::CannotSpecifyType(tm) => tm,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.message().split_once("$1") {
            Some((pre, post)) => write!(f, "{}{}{}", pre, self.tree(), post),
            None => self.message().fmt(f),
        }
    }
}

/// Parameters collected from the left-hand side of a rewrite.
///
/// Walking a pattern determines:
/// the shape that calls have to match (`defined`),
/// the parameters in order of first occurrence, and
/// the type of the whole pattern, if it is declared.
///
/// ~~~
/// # use xlr::{parse, BuiltinType, Builtins, ParameterList, Symbols};
/// let syms = Symbols::with_basics();
/// let mut parms = ParameterList::new(&syms, &Builtins);
/// parms.extract(&parse::parse_str("sin X:real")?)?;
/// assert_eq!(parms.defined().unwrap().to_string(), "sin");
/// assert_eq!(parms.signature(), [BuiltinType::Real]);
/// # Ok::<_, xlr::Error>(())
/// ~~~
pub struct ParameterList<'a, C: Compiler> {
    context: &'a dyn Context,
    compiler: &'a C,
    defined: Option<Tree>,
    returned: Option<C::Type>,
    parameters: Vec<Parameter<C::Type>>,
}

impl<'a, C: Compiler> ParameterList<'a, C> {
    pub fn new(context: &'a dyn Context, compiler: &'a C) -> Self {
        Self {
            context,
            compiler,
            defined: None,
            returned: None,
            parameters: Vec::new(),
        }
    }

    /// Walk a pattern, collecting its parameters.
    pub fn extract(&mut self, pattern: &Tree) -> Result<(), Error> {
        pattern.act(self)?;
        debug!(
            "parameters of {}: {} (defined: {})",
            pattern,
            self.parameters.len(),
            self.defined.is_some()
        );
        Ok(())
    }

    pub fn defined(&self) -> Option<&Tree> {
        self.defined.as_ref()
    }

    pub fn returned(&self) -> Option<&C::Type> {
        self.returned.as_ref()
    }

    pub fn parameters(&self) -> &[Parameter<C::Type>] {
        &self.parameters
    }

    /// Machine types of the parameters, in order.
    pub fn signature(&self) -> Vec<C::Type> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }

    /// Return the defined shape, the parameters, and the returned type.
    pub fn into_parts(self) -> (Option<Tree>, Vec<Parameter<C::Type>>, Option<C::Type>) {
        (self.defined, self.parameters, self.returned)
    }

    /// Enter a name in the parameter list.
    ///
    /// If `global` is set, names that are bound in the context
    /// (such as `false`) are not entered.
    pub fn enter_name(
        &mut self,
        what: &Tree,
        name: &Name,
        ty: C::Type,
        global: bool,
    ) -> Result<(), Error> {
        // symbols such as `+` are not allowed as pattern variables
        if !name.value.chars().next().map_or(false, char::is_alphabetic) {
            return Err(Error::NotAName(what.clone()));
        }

        // the name may already be a parameter, e.g. in `A+A`
        if let Some(parm) = self.parameters.iter().find(|p| p.name() == name.value) {
            if ty == self.compiler.tree_type() || ty == parm.ty {
                return Ok(());
            }
            return Err(Error::ConflictingTypes(what.clone()));
        }

        if global && self.context.bound(&name.value) {
            return Ok(());
        }

        debug!("enter parameter {}: {:?}", name.value, ty);
        self.parameters.push(Parameter {
            name: what.clone(),
            ty,
        });
        Ok(())
    }
}

impl<'a, C: Compiler> Action for ParameterList<'a, C> {
    type Output = Result<(), Error>;

    fn fallback(&mut self, _: &Tree) -> Self::Output {
        Ok(())
    }

    fn integer(&mut self, _: &Tree, _: i64) -> Self::Output {
        Ok(())
    }

    fn real(&mut self, _: &Tree, _: f64) -> Self::Output {
        Ok(())
    }

    fn text(&mut self, _: &Tree, _: &Text) -> Self::Output {
        Ok(())
    }

    fn name(&mut self, what: &Tree, name: &Name) -> Self::Output {
        match self.defined {
            // the first name has to match exactly, e.g. `sin` in `sin X`
            None => {
                self.defined = Some(what.clone());
                Ok(())
            }
            Some(_) => {
                let ty = self.compiler.tree_type();
                self.enter_name(what, name, ty, true)
            }
        }
    }

    fn block(&mut self, _: &Tree, block: &Block) -> Self::Output {
        block.child.act(self)
    }

    fn infix(&mut self, what: &Tree, infix: &Infix) -> Self::Output {
        if infix.name == ":" {
            // type of a parameter, e.g. `K : integer`
            if let Some(name) = infix.left.as_name() {
                let ty = self.compiler.machine_type(self.context, &infix.right);
                return self.enter_name(&infix.left, name, ty, false);
            }

            // type of the whole pattern, e.g. `(X+Y) : integer`
            if self.returned.is_some() || self.defined.is_some() {
                return Err(Error::CannotSpecifyType(infix.left.clone()));
            }
            self.returned = Some(self.compiler.machine_type(self.context, &infix.right));
            return infix.left.act(self);
        }

        if self.defined.is_none() {
            self.defined = Some(what.clone());
        }
        infix.left.act(self)?;
        infix.right.act(self)
    }

    fn prefix(&mut self, _: &Tree, prefix: &Prefix) -> Self::Output {
        // in `if X then Y`, `then` is defined first, but we want `if`
        let infix = if self.defined.as_ref().map(Tree::kind) == Some(Kind::Infix) {
            self.defined.take()
        } else {
            None
        };

        prefix.left.act(self)?;
        prefix.right.act(self)?;

        if self.defined.is_none() {
            self.defined = infix;
        }
        Ok(())
    }

    fn postfix(&mut self, _: &Tree, postfix: &Postfix) -> Self::Output {
        // right before left, so that the operator is defined
        postfix.right.act(self)?;
        postfix.left.act(self)
    }
}
