//! The runtime: frame stack, host dispatch, and the interpreter itself.

mod frame;
mod host;
mod machine;

pub use frame::Frame;
pub use host::{HostTable, Invocation};
pub use machine::Engine;
