//! Builder API for ergonomic program construction.
//!
//! This module provides fluent builders and macros for authoring programs
//! with minimal boilerplate while keeping the data model strongly typed:
//! absent, false, and empty are distinct and explicit.

pub mod error;
pub mod macros;
pub mod program;
pub mod state;

pub use error::BuildError;
pub use program::ProgramBuilder;
pub use state::{BufferRuleBuilder, RuleBuilder, StateBuilder};
