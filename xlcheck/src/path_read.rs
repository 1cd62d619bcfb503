use crate::Error;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Contents of an input, together with its name for diagnostics.
pub struct PathRead {
    pub name: String,
    pub text: String,
}

impl PathRead {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let text = text.into();
        Self { name, text }
    }

    fn stdin() -> Result<Self, Error> {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(Self::new("<stdin>", text))
    }

    /// Read a file, or standard input if the path is "-".
    pub fn read(path: &Path) -> Result<Self, Error> {
        if path == Path::new("-") {
            return Self::stdin();
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), text))
    }

    /// Return stdin if no files given, else read all files.
    pub fn from_paths(files: &[PathBuf]) -> Result<Vec<Self>, Error> {
        if files.is_empty() {
            Ok(Vec::from([Self::stdin()?]))
        } else {
            files.iter().map(|file| Self::read(file)).collect()
        }
    }
}
