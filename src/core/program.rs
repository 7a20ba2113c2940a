//! The program data model: an immutable, named graph of states.
//!
//! A program is the static lexical definition the engine interprets. It is
//! read-only after construction; build one with
//! [`ProgramBuilder`](crate::builder::ProgramBuilder).

use super::action::Action;
use super::predicate::Predicate;
use std::collections::HashMap;

/// Name of a program state.
pub type StateName = String;

/// Where a `return` rule sends control when it pops the active sub-program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturnTarget {
    /// Pop unconditionally.
    Any,
    /// Pop and assert the sub-program being closed was entered through this
    /// state; anything else is a return mismatch.
    Expect(StateName),
}

/// A rule evaluated against the raw input event.
///
/// Rules are tried in list order and the first whose predicate matches
/// wins. A rule with no `target` and no `returns` still counts as a match:
/// the event is absorbed in place (buffer extended, contexts shifted) and
/// the rule's action fires.
#[derive(Clone, Debug)]
pub struct EventRule<T, A> {
    /// Condition on the incoming event.
    pub when: Predicate<T>,
    /// State to transition to; absent means stay in the current state.
    pub target: Option<StateName>,
    /// Re-evaluate the same event against the new state after a switch.
    pub propagate: bool,
    /// Action executed when the rule fires, before the finishing action.
    pub action: Option<Action<A>>,
    /// Run the finishing action of the state being left instead of the
    /// destination state's at the end of the call.
    pub delay_finish: bool,
    /// Pop the active sub-program frame.
    pub returns: Option<ReturnTarget>,
    /// Replaces `action` when a return mismatch is detected.
    pub error_action: Option<Action<A>>,
    /// Keep the frame's origin context instead of resetting it to the
    /// triggering event's context.
    pub keep_origin: bool,
    /// When returning, prepend the popped frame's trailing buffer onto the
    /// event before seeding the parent's buffer.
    pub merge_buffer: bool,
}

impl<T, A> EventRule<T, A> {
    /// Rule with the given predicate and every other field at its default.
    pub fn new(when: Predicate<T>) -> Self {
        Self {
            when,
            target: None,
            propagate: false,
            action: None,
            delay_finish: false,
            returns: None,
            error_action: None,
            keep_origin: false,
            merge_buffer: false,
        }
    }
}

/// A rule evaluated against the accumulated buffer at the instant its
/// state is about to be left.
///
/// Every field other than the predicate is an override: `Some` replaces
/// the corresponding field of the event rule that triggered the
/// transition, for that transition only.
#[derive(Clone, Debug)]
pub struct BufferRule<A> {
    /// Condition on the accumulated buffer text.
    pub when: Predicate<String>,
    pub target: Option<StateName>,
    pub propagate: Option<bool>,
    pub action: Option<Action<A>>,
    pub delay_finish: Option<bool>,
    pub returns: Option<ReturnTarget>,
    pub error_action: Option<Action<A>>,
    pub keep_origin: Option<bool>,
    pub merge_buffer: Option<bool>,
}

impl<A> BufferRule<A> {
    /// Override rule with the given predicate and no overrides.
    pub fn new(when: Predicate<String>) -> Self {
        Self {
            when,
            target: None,
            propagate: None,
            action: None,
            delay_finish: None,
            returns: None,
            error_action: None,
            keep_origin: None,
            merge_buffer: None,
        }
    }
}

/// One state of a program.
#[derive(Clone, Debug)]
pub struct StateDef<T, A> {
    /// Action executed once per processed event while this state is current
    /// at the end of the call (or the state that armed a delayed finish).
    pub finish: Option<Action<A>>,
    /// Entering this state pushes a new frame instead of overwriting the
    /// current one.
    pub is_sub_program: bool,
    /// Buffer rules; presence means the state accumulates a buffer.
    pub buffer: Option<Vec<BufferRule<A>>>,
    /// Event rules in priority order.
    pub rules: Vec<EventRule<T, A>>,
}

impl<T, A> StateDef<T, A> {
    /// Empty state: no finishing action, not a sub-program, no buffering,
    /// no rules.
    pub fn new() -> Self {
        Self {
            finish: None,
            is_sub_program: false,
            buffer: None,
            rules: Vec::new(),
        }
    }

    /// Whether this state accumulates a buffer.
    pub fn buffers(&self) -> bool {
        self.buffer.is_some()
    }
}

impl<T, A> Default for StateDef<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable program: initial state plus the named state table.
///
/// Construction goes through [`ProgramBuilder`](crate::builder::ProgramBuilder),
/// which guarantees the initial state exists and state names are unique.
#[derive(Clone, Debug)]
pub struct Program<T, A> {
    initial: StateName,
    states: HashMap<StateName, StateDef<T, A>>,
}

impl<T, A> Program<T, A> {
    pub(crate) fn new(initial: StateName, states: HashMap<StateName, StateDef<T, A>>) -> Self {
        Self { initial, states }
    }

    /// Name of the state the engine starts in.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Look up a state by name.
    pub fn state(&self, name: &str) -> Option<&StateDef<T, A>> {
        self.states.get(name)
    }

    /// Iterate over all states.
    pub fn states(&self) -> impl Iterator<Item = (&str, &StateDef<T, A>)> {
        self.states.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Look up a state that the program itself references. A miss means the
    /// program is malformed, which is an authoring error, so this fails
    /// fast instead of returning an `Option`.
    pub(crate) fn expect_state(&self, name: &str) -> &StateDef<T, A> {
        self.states
            .get(name)
            .unwrap_or_else(|| panic!("program references undefined state `{name}`"))
    }
}
