#![no_std]
#![forbid(unsafe_code)]

//! Parse trees, structural matching and rewrite parameters for XL.
//!
//! # Usage
//!
//! An XL program consists of *rewrites* `from -> to`,
//! where `from` is a pattern that calls have to match.
//! Before a rewrite can be called, we analyse its pattern to find
//! the shape that calls have to match (such as `sin` in `sin X`),
//! the parameters that calls bind (such as `X`), and
//! the declared type of the whole pattern, if any.
//! Parameters may be given a type, such as `K` in `K:integer`,
//! which a [`Compiler`] translates to a machine type.
//! Names bound in the enclosing [`Context`], such as `true`,
//! are matched literally instead of becoming parameters.
//!
//! The following example parses a rewrite and collects its parameters.
//!
//! ~~~
//! # use xlr::{parse, BuiltinType, Builtins, Error, Head, Rewrite, Rewrites, Symbols};
//! let syms = Symbols::with_basics();
//!
//! let rule = parse::parse_str("if true then X:integer else Y -> X")?;
//! let rule = Rewrite::try_from(&rule)?.compile(&syms, &Builtins)?;
//! assert_eq!(rule.head(), Head::Name("if".into()));
//! // `true` is bound, so it is not a parameter
//! assert_eq!(rule.signature(), [BuiltinType::Integer, BuiltinType::Any]);
//!
//! // find the rewrite for a call
//! let mut rewrites = Rewrites::new();
//! rewrites.add(rule);
//! let call = parse::parse_str("if true then 1 else 2")?;
//! assert_eq!(rewrites.candidates(&call).count(), 1);
//! # Ok::<_, Error>(())
//! ~~~
//!
//! # Organisation
//!
//! Trees are defined in the [`tree`] module.
//! Algorithms on trees are written as [`Action`]s,
//! which handle every kind of tree separately.
//! The structural matcher ([`TreeMatch`]) and
//! the parameter extractor ([`ParameterList`]) are such actions.

extern crate alloc;
#[macro_use]
extern crate log;

mod action;
pub mod error;
mod matching;
pub mod parm;
pub mod parse;
pub mod rewrite;
mod symbols;
pub mod tree;
mod types;

pub use action::Action;
pub use error::Error;
pub use matching::TreeMatch;
pub use parm::{Parameter, ParameterList};
pub use rewrite::{Compiled, Head, Rewrite, Rewrites};
pub use symbols::{Context, Symbols};
pub use tree::{Delimiters, Kind, Node, Position, Tree};
pub use types::{BuiltinType, Builtins, Compiler, Evaluate};
