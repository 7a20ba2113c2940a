//! Lexion: an incremental pushdown state-machine engine for
//! character-level text classification.
//!
//! A *program* is an immutable table of named states and ordered rules,
//! the lexical definition of a language. The *engine* interprets it one
//! input symbol at a time: it matches the symbol against the current
//! state's rules, switches states, pushes and pops nested sub-programs
//! for delimiter matching, and invokes caller-registered *host methods*
//! as its only side effect. It owns no text, no cursor, and no screen;
//! what an action means is entirely up to the host.
//!
//! # Core Concepts
//!
//! - **Program**: the static state/rule graph, built with
//!   [`builder::ProgramBuilder`]
//! - **Engine**: the runtime that walks a program via
//!   [`engine::Engine::push_event`]
//! - **Frame**: one level of the engine's stack, one per active
//!   sub-program
//! - **Buffer**: text accumulated by a buffering state, reclassified
//!   retroactively by buffer rules (keywords out of identifiers)
//! - **Host methods**: named callbacks in an [`engine::HostTable`],
//!   invoked with the triggering event's context
//!
//! # Example
//!
//! ```rust
//! use lexion::action;
//! use lexion::builder::{ProgramBuilder, RuleBuilder, StateBuilder};
//! use lexion::core::Predicate;
//! use lexion::engine::{Engine, HostTable};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let program = ProgramBuilder::new()
//!     .initial("plain")
//!     .state(
//!         StateBuilder::new("plain")
//!             .finish(action!("paint", "plain"))
//!             .rule(RuleBuilder::when(Predicate::regex("^[0-9]$").unwrap()).to("number")),
//!     )
//!     .state(
//!         StateBuilder::new("number")
//!             .finish(action!("paint", "number"))
//!             .rule(RuleBuilder::when(Predicate::regex("^[0-9]$").unwrap()))
//!             .rule(RuleBuilder::when(Predicate::always()).to("plain").propagate()),
//!     )
//!     .build()
//!     .unwrap();
//!
//! // Host methods paint into caller-owned storage; here, a plain vector
//! // of (position, class) pairs.
//! let painted: Rc<RefCell<Vec<(usize, &str)>>> = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&painted);
//! let mut host: HostTable<usize, &str> = HostTable::new();
//! host.register("paint", move |inv| {
//!     sink.borrow_mut().push((*inv.ctx, inv.args[0]));
//! });
//!
//! let mut engine = Engine::new(program, host);
//! for (at, ch) in "a1".char_indices() {
//!     engine.push_event(ch.to_string(), at);
//! }
//! assert_eq!(painted.borrow().as_slice(), &[(0, "plain"), (1, "number")]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod validate;

// Re-export commonly used types
pub use crate::core::{Action, ActionCall, Predicate, Program};
pub use builder::ProgramBuilder;
pub use engine::{Engine, HostTable, Invocation};
