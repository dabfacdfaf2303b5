//! Error kinds shared by every processor in the graph.
//!
//! These map directly onto the error kinds a traversal driver reacts to:
//! [`CoreError::is_usage_class`] is the umbrella predicate the execute
//! driver uses to decide whether to append usage text to stderr.

use std::sync::Arc;

/// Errors produced while walking the processor graph.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// A validator rejected an argument's value.
    #[error("validation for \"{arg}\" failed: [{rule}] {explanation}")]
    Validation {
        arg: String,
        rule: String,
        explanation: String,
    },

    /// A positional argument popped fewer tokens than its required count.
    #[error("not enough args for \"{name}\": needed {needed}, got {got}")]
    NotEnoughArgs {
        name: String,
        needed: usize,
        got: usize,
    },

    /// Tokens remained on the stream after the graph was exhausted.
    #[error("Unprocessed extra args: [{}]", .0.join(" "))]
    ExtraArgs(Vec<String>),

    /// A branch token matched none of the declared labels and there was no
    /// usable default.
    #[error("Branching argument must be one of [{}]", .0.join(" "))]
    Branching(Vec<String>),

    /// User code requested an out-of-band unwind; no further Execute steps
    /// run after this is raised.
    #[error("terminated with exit code {0}")]
    Termination(i32),

    /// Any other failure, annotated with the prefix the raising site chose.
    #[error("{prefix}{source}")]
    Wrapped {
        prefix: String,
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl CoreError {
    /// Whether the execute driver should append the usage rendering to
    /// stderr after reporting this error.
    pub fn is_usage_class(&self) -> bool {
        matches!(
            self,
            CoreError::Validation { .. }
                | CoreError::NotEnoughArgs { .. }
                | CoreError::ExtraArgs(_)
                | CoreError::Branching(_)
        )
    }

    /// Whether this is the out-of-band termination signal, which unwinds
    /// past any processor boundary regardless of usage-class handling.
    pub fn is_termination(&self) -> bool {
        matches!(self, CoreError::Termination(_))
    }

    pub fn validation(
        arg: impl Into<String>,
        rule: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        CoreError::Validation {
            arg: arg.into(),
            rule: rule.into(),
            explanation: explanation.into(),
        }
    }

    pub fn wrapped(
        prefix: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CoreError::Wrapped {
            prefix: prefix.into(),
            source: Arc::new(source),
        }
    }

    /// Wraps a shell command failure with the fixed prefix the spec requires.
    pub fn shell_command(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::wrapped("failed to execute shell command: ", source)
    }
}

/// A convenience alias used throughout the graph.
pub type CoreResult<T> = Result<T, CoreError>;
