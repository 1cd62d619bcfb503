//! Common error type.

use crate::parm::Error as ParmError;
use crate::parse::Error as ParseError;
use crate::rewrite::Error as RewriteError;
use core::fmt::{self, Display};

/// Common error type.
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Rewrite(RewriteError),
    Parm(ParmError),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<RewriteError> for Error {
    fn from(err: RewriteError) -> Self {
        Self::Rewrite(err)
    }
}

impl From<ParmError> for Error {
    fn from(err: ParmError) -> Self {
        Self::Parm(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {}", e),
            Self::Rewrite(e) => e.fmt(f),
            Self::Parm(e) => e.fmt(f),
        }
    }
}
