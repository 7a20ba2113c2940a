//! Builder for whole programs.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::{Program, StateDef, StateName};
use std::collections::HashMap;

/// Builder for constructing programs with a fluent API.
///
/// # Example
///
/// ```rust
/// use lexion::builder::{ProgramBuilder, RuleBuilder, StateBuilder};
/// use lexion::core::Predicate;
///
/// let program = ProgramBuilder::<String, u8>::new()
///     .initial("plain")
///     .state(
///         StateBuilder::new("plain")
///             .rule(RuleBuilder::when(Predicate::regex("^[0-9]$").unwrap()).to("number")),
///     )
///     .state(StateBuilder::new("number").rule(RuleBuilder::when(Predicate::always()).to("plain")))
///     .build()
///     .unwrap();
///
/// assert_eq!(program.initial(), "plain");
/// assert_eq!(program.state_count(), 2);
/// ```
pub struct ProgramBuilder<T, A> {
    initial: Option<StateName>,
    states: Vec<(StateName, StateDef<T, A>)>,
}

impl<T, A> ProgramBuilder<T, A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
        }
    }

    /// Set the initial state name (required).
    pub fn initial(mut self, name: impl Into<StateName>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Add a state.
    pub fn state(mut self, builder: StateBuilder<T, A>) -> Self {
        self.states.push(builder.into_parts());
        self
    }

    /// Build the program.
    ///
    /// Fails when no state was added, the initial state is missing or not
    /// among the defined states, or a state name appears twice. Dangling
    /// transition targets are not checked here; use
    /// [`validate::check`](crate::validate::check) for a full
    /// cross-reference pass.
    pub fn build(self) -> Result<Program<T, A>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut states = HashMap::with_capacity(self.states.len());
        for (name, def) in self.states {
            if states.insert(name.clone(), def).is_some() {
                return Err(BuildError::DuplicateState(name));
            }
        }

        if !states.contains_key(&initial) {
            return Err(BuildError::UnknownInitialState(initial));
        }

        Ok(Program::new(initial, states))
    }
}

impl<T, A> Default for ProgramBuilder<T, A> {
    fn default() -> Self {
        Self::new()
    }
}
