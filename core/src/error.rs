// relay/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
  #[error("Pipeline '{pipeline}' has already been initialized; its task list can no longer change")]
  AlreadyInitialized { pipeline: String },

  #[error("Cannot merge a {incoming} into a {existing} pending at results slot {key}")]
  IncompatibleMerge {
    key: usize,
    existing: &'static str,
    incoming: &'static str,
  },

  #[error("Task position {index} is out of bounds for a pipeline of {len} tasks")]
  IndexOutOfBounds { index: usize, len: usize },

  #[error("Task '{task}' failed. Source: {source}")]
  TaskFailed {
    task: String,
    #[source]
    source: AnyhowError,
  },
}

// Lets `?` on anyhow results work inside closures handed to `FnTask`.
impl From<AnyhowError> for RelayError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a RelayError that was boxed into anyhow instead of nesting it.
    match err.downcast::<RelayError>() {
      Ok(relay_err) => relay_err,
      Err(err) => RelayError::TaskFailed {
        task: "<unknown>".to_string(),
        source: err,
      },
    }
  }
}

pub type RelayResult<T, E = RelayError> = std::result::Result<T, E>;
