//! The host-method table: named callbacks the engine invokes for effects.
//!
//! The engine itself owns no text and paints nothing. Every observable
//! effect goes through a method registered here, keyed by the name an
//! action descriptor carries. Unregistered names are skipped, so a
//! program may reference methods its host has not wired up.

use crate::core::{Action, ActionCall};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Argument pack handed to a host method.
pub struct Invocation<'a, C, A> {
    /// Context most relevant to the call, usually the triggering event's.
    pub ctx: &'a C,
    /// Secondary context for span-wide effects: the origin of a buffered
    /// run, or the entry point of the sub-program a return just closed.
    pub alt: Option<&'a C>,
    /// Buffer captured at transition time; absent for per-event finishing
    /// actions.
    pub buffer: Option<&'a str>,
    /// Trailing arguments from the action descriptor.
    pub args: &'a [A],
}

type HostMethod<C, A> = Box<dyn FnMut(Invocation<'_, C, A>)>;

/// Name-keyed table of host methods, supplied once at engine construction.
///
/// # Example
///
/// ```rust
/// use lexion::engine::HostTable;
///
/// let mut table: HostTable<usize, &str> = HostTable::new();
/// table.register("style", |inv| {
///     let _ = (inv.ctx, inv.args);
/// });
/// assert!(table.contains("style"));
/// assert!(!table.contains("hint"));
/// ```
pub struct HostTable<C, A> {
    methods: HashMap<String, HostMethod<C, A>>,
}

impl<C, A> HostTable<C, A> {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Register a method under a name, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: FnMut(Invocation<'_, C, A>) + 'static,
    {
        self.methods.insert(name.into(), Box::new(method));
    }

    /// Chainable [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: FnMut(Invocation<'_, C, A>) + 'static,
    {
        self.register(name, method);
        self
    }

    /// Whether a method is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Run every call of an action in order. Each call resolves
    /// independently; unknown names are skipped.
    pub(crate) fn run(
        &mut self,
        action: &Action<A>,
        ctx: &C,
        alt: Option<&C>,
        buffer: Option<&str>,
    ) {
        for call in action.calls() {
            self.run_call(call, ctx, alt, buffer);
        }
    }

    fn run_call(&mut self, call: &ActionCall<A>, ctx: &C, alt: Option<&C>, buffer: Option<&str>) {
        match self.methods.get_mut(&call.name) {
            Some(method) => method(Invocation {
                ctx,
                alt,
                buffer,
                args: &call.args,
            }),
            None => {
                trace!(target: "lexion::engine", method = %call.name, "unregistered host method, skipped");
            }
        }
    }
}

impl<C, A> Default for HostTable<C, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A> fmt::Debug for HostTable<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.methods.keys().collect();
        names.sort();
        f.debug_struct("HostTable").field("methods", &names).finish()
    }
}
