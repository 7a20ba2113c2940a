//! Action descriptors attached to states and rules.
//!
//! An action names a host method plus the trailing arguments to hand it.
//! The engine never interprets the arguments; it forwards them to the
//! registered callback together with the invocation contexts.

/// One named call descriptor: a host-method name and its trailing arguments.
///
/// `A` is the caller's argument payload type, typically a style value or
/// some other piece of data the host methods know how to apply.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionCall<A> {
    /// Host-method name looked up in the host table at dispatch time.
    pub name: String,
    /// Trailing arguments forwarded verbatim to the host method.
    pub args: Vec<A>,
}

impl<A> ActionCall<A> {
    /// Descriptor with no trailing arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Descriptor with trailing arguments.
    pub fn with_args(name: impl Into<String>, args: Vec<A>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// An action value: a single call or an ordered batch of calls.
///
/// Batches execute in list order and each call resolves independently
/// against the host table, so one unregistered name does not stop the rest.
///
/// # Example
///
/// ```rust
/// use lexion::core::{Action, ActionCall};
///
/// let single: Action<u8> = ActionCall::new("style").into();
/// assert_eq!(single.calls().count(), 1);
///
/// let batch: Action<u8> = vec![
///     ActionCall::with_args("style", vec![1]),
///     ActionCall::with_args("hint", vec![2]),
/// ]
/// .into();
/// assert_eq!(batch.calls().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Action<A> {
    /// A single call descriptor.
    One(ActionCall<A>),
    /// An ordered batch of call descriptors.
    Seq(Vec<ActionCall<A>>),
}

impl<A> Action<A> {
    /// Iterate the call descriptors in execution order.
    pub fn calls(&self) -> std::slice::Iter<'_, ActionCall<A>> {
        match self {
            Self::One(call) => std::slice::from_ref(call).iter(),
            Self::Seq(calls) => calls.iter(),
        }
    }
}

impl<A> From<ActionCall<A>> for Action<A> {
    fn from(call: ActionCall<A>) -> Self {
        Self::One(call)
    }
}

impl<A> From<Vec<ActionCall<A>>> for Action<A> {
    fn from(calls: Vec<ActionCall<A>>) -> Self {
        Self::Seq(calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_call_iterates_once() {
        let action: Action<&str> = ActionCall::with_args("style", vec!["bold"]).into();
        let calls: Vec<_> = action.calls().collect();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "style");
        assert_eq!(calls[0].args, vec!["bold"]);
    }

    #[test]
    fn batch_preserves_order() {
        let action: Action<u8> = vec![
            ActionCall::new("first"),
            ActionCall::new("second"),
            ActionCall::new("third"),
        ]
        .into();
        let names: Vec<_> = action.calls().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn new_has_no_args() {
        let call: ActionCall<u8> = ActionCall::new("hint");
        assert!(call.args.is_empty());
    }
}
