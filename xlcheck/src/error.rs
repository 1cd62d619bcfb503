use std::fmt::{self, Display};
use std::io;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
    /// number of rewrites that could not be processed
    Rejected(usize),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::ThreadPool(e) => e.fmt(f),
            Self::Rejected(n) => write!(f, "{} rewrites rejected", n),
        }
    }
}

impl std::error::Error for Error {}
