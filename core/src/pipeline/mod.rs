// relay/src/pipeline/mod.rs

//! Defines the `Pipeline<Err>` struct, its construction, initialization and execution logic.

pub mod definition;
pub mod execution;
pub mod init;
pub mod options;

// Re-export the main Pipeline struct
pub use definition::{Lifecycle, Pipeline};
pub use options::PipelineOptions;
