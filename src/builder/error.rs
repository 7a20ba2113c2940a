//! Build errors for program construction.

use thiserror::Error;

/// Errors that can occur when building a program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Initial state `{0}` is not among the defined states")]
    UnknownInitialState(String),

    #[error("State `{0}` is defined more than once")]
    DuplicateState(String),

    #[error("No states defined. Add at least one state")]
    NoStates,
}
