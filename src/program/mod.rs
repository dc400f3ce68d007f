//! Program source loading
//!
//! Reads the text of a program from a file or standard input. The
//! interpreter core only ever sees the loaded text.

use crate::error::Result;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Path that selects standard input
pub const STDIN_PATH: &str = "-";

/// A loaded program: its display name and full source text
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    name: String,
    source: String,
}

impl Program {
    /// Create a program from text already in memory
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Load a program from a file, or from stdin when the path is `-`
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.as_os_str() == STDIN_PATH {
            return Self::from_reader("<stdin>", io::stdin().lock());
        }

        let source = fs::read_to_string(path)?;
        Ok(Self::from_source(path.display().to_string(), source))
    }

    /// Load a program from any reader
    pub fn from_reader<R: Read>(name: impl Into<String>, mut reader: R) -> Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Self::from_source(name, source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of physical lines in the source
    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }
}
