pub mod diagnostics;
pub mod node;
pub mod receiver;
pub mod task;

/// The payload that flows between tasks.
pub use serde_json::Value;

// Re-export key types for easier access from other relay modules (and lib.rs)
pub use diagnostics::{Diagnostics, RoutingWarning, WarningKind};
pub use node::{Node, TaskMeta};
pub use receiver::Receiver;
pub use task::{FnTask, Task, TaskFn};
