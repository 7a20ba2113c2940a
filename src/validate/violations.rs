//! Program violations reported by the validation pass.

use thiserror::Error;

/// A cross-reference problem in a program.
///
/// Rule indices are zero-based positions within the owning state's rule
/// list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProgramViolation {
    #[error("state `{state}` rule #{rule} targets undefined state `{target}`")]
    DanglingTarget {
        state: String,
        rule: usize,
        target: String,
    },

    #[error("state `{state}` buffer rule #{rule} overrides to undefined state `{target}`")]
    DanglingBufferTarget {
        state: String,
        rule: usize,
        target: String,
    },

    #[error("state `{state}` rule #{rule} expects a return from undefined state `{target}`")]
    DanglingReturnTarget {
        state: String,
        rule: usize,
        target: String,
    },

    #[error("state `{state}` cannot be reached from initial state `{initial}`")]
    Unreachable { state: String, initial: String },
}
