// relay/src/core/diagnostics.rs

//! Structured routing warnings and the shared sink that collects them.

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// Why a routed value was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
  /// The receiver resolved to the sender itself or an earlier task.
  NotForward,
  /// The receiver resolved past the last task of the pipeline.
  OutOfRange,
}

/// A dropped value, as seen by the pipeline that dropped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingWarning {
  pub kind: WarningKind,
  pub pipeline: String,
  pub task: String,
  pub sequence_index: usize,
  /// The receiver index as the author wrote it.
  pub receiver: isize,
  /// `receiver` after negative indices were resolved against the task count.
  pub resolved: isize,
}

impl fmt::Display for RoutingWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      WarningKind::NotForward => write!(
        f,
        "task '{}' (#{}) in pipeline '{}': receiver {} resolves to {}, which is not after the task; output ignored",
        self.task, self.sequence_index, self.pipeline, self.receiver, self.resolved
      ),
      WarningKind::OutOfRange => write!(
        f,
        "task '{}' (#{}) in pipeline '{}': receiver {} resolves to {}, past the last task; output ignored",
        self.task, self.sequence_index, self.pipeline, self.receiver, self.resolved
      ),
    }
  }
}

/// Shared, append-only collection of routing warnings.
///
/// Cloning yields another handle to the same collection. A pipeline hands its
/// handle to nested pipelines during `init`, so one handle sees the whole tree.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Arc<Mutex<Vec<RoutingWarning>>>);

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Emits `warning` as a WARN event and stores it.
  pub fn record(&self, warning: RoutingWarning) {
    event!(
      Level::WARN,
      kind = ?warning.kind,
      pipeline = %warning.pipeline,
      task = %warning.task,
      sequence_index = warning.sequence_index,
      receiver = warning.receiver,
      resolved = warning.resolved,
      "{}", warning
    );
    self.0.lock().push(warning);
  }

  /// Snapshot of everything recorded so far.
  pub fn warnings(&self) -> Vec<RoutingWarning> {
    self.0.lock().clone()
  }

  pub fn len(&self) -> usize {
    self.0.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.lock().is_empty()
  }

  /// Removes and returns everything recorded so far.
  pub fn drain(&self) -> Vec<RoutingWarning> {
    std::mem::take(&mut *self.0.lock())
  }

  /// True if both handles point at the same collection.
  pub fn shares_with(&self, other: &Diagnostics) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}
