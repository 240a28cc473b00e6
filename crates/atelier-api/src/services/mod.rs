//! Request-scoped services.

mod works;

pub use works::{CleanupError, WorkService};
