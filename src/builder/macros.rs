//! Macros for writing action descriptors with minimal noise.

/// Build an [`ActionCall`](crate::core::ActionCall) from a name and
/// trailing arguments.
///
/// # Example
///
/// ```rust
/// use lexion::call;
///
/// let call = call!("style", 1u8, 2u8);
/// assert_eq!(call.name, "style");
/// assert_eq!(call.args, vec![1, 2]);
/// ```
#[macro_export]
macro_rules! call {
    ($name:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::ActionCall {
            name: ::std::string::String::from($name),
            args: ::std::vec![$($arg),*],
        }
    };
}

/// Build a single-call [`Action`](crate::core::Action) from a name and
/// trailing arguments. For a batch, collect [`call!`](crate::call)
/// descriptors into a `Vec` and use `Action::from`.
///
/// # Example
///
/// ```rust
/// use lexion::core::Action;
/// use lexion::{action, call};
///
/// let single: Action<u8> = action!("style", 7);
/// assert_eq!(single.calls().count(), 1);
///
/// let batch: Action<u8> = vec![call!("style", 7), call!("hint")].into();
/// assert_eq!(batch.calls().count(), 2);
/// ```
#[macro_export]
macro_rules! action {
    ($name:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::Action::One($crate::call!($name $(, $arg)*))
    };
}
