// src/lib.rs

//! Relay: a small, synchronous task pipeline engine for Rust.
//!
//! A `Pipeline` runs an ordered list of tasks one after another. Each task may
//! forward its output to later tasks by index:
//!  - Chained pipelines link every task to the next one unless told otherwise.
//!  - Receivers can be negative (counted from the end) or lists (fan-out).
//!  - Several outputs sent to the same task are merged into a list, or into one
//!    mapping when they are all objects.
//!  - A pipeline is itself a task, so pipelines nest.
//!  - Misrouted outputs are dropped and reported, never fatal.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod results;

// --- Re-exports for the Public API ---

pub use crate::core::diagnostics::{Diagnostics, RoutingWarning, WarningKind};
pub use crate::core::node::{Node, TaskMeta};
pub use crate::core::receiver::Receiver;
pub use crate::core::task::{FnTask, Task, TaskFn};
pub use crate::core::Value;

pub use crate::pipeline::{Lifecycle, Pipeline, PipelineOptions};
pub use crate::results::{ResultStore, Slot};

pub use crate::error::{RelayError, RelayResult};

/*
    Typical use:
    1. Wrap each unit of work as a `Task` (or a closure via `Node::from_fn`).
    2. Build a `Pipeline` from the nodes; set explicit receivers with `.to(..)`.
    3. Call `pipeline.run(Some(seed))` and read the last task's output.
    4. Inspect `pipeline.diagnostics()` for outputs that could not be delivered.
*/
