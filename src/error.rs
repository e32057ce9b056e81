use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CfError>;

/// Errors produced by the context switch components.
#[derive(Error, Debug)]
pub enum CfError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("no free backup name for {} after {attempts} attempts", .base.display())]
    Exhausted { base: PathBuf, attempts: usize },

    #[error("more than one kubeconfig matches {query}: {}", .names.join(", "))]
    AmbiguousMatch { query: String, names: Vec<String> },

    #[error("no kubeconfig matches {0}")]
    NoMatch(String),

    #[error("wrong number of arguments: expected at most {expected}, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("{} is not a symlink", .0.display())]
    NotASymlinkUnconfirmed(PathBuf),
}

impl CfError {
    /// Adapter for `map_err` that attaches a short description of the failed operation.
    pub fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> CfError {
        let context = context.into();
        move |source| CfError::Io { context, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CfError::NotFound(_))
    }
}
