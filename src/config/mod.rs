//! Run configuration
//!
//! Settings that change how a run reacts to bad input. The binary fills
//! this in from its command line flags.

/// Default limit on parenthesis nesting
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// What to do when a statement fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop the run at the first error
    #[default]
    Halt,
    /// Report the error, drop the rest of the offending line and go on
    Continue,
}

/// Configuration for one interpreter run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub error_mode: ErrorMode,
    /// Maximum parenthesis nesting; `None` means unlimited
    pub max_depth: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            error_mode: ErrorMode::Halt,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
