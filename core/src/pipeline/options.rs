// relay/src/pipeline/options.rs

use crate::core::receiver::Receiver;
use serde::{Deserialize, Serialize};

/// Construction-time settings of a `Pipeline`.
///
/// Deserializable, so a pipeline's shape can live next to the rest of an
/// application's configuration:
///
/// ```
/// let opts: relay::PipelineOptions =
///   serde_json::from_str(r#"{ "chained": false, "receiver": [2, -1] }"#).unwrap();
/// assert!(!opts.chained);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
  /// Give every task without an explicit receiver the next task as receiver.
  pub chained: bool,
  /// Routing of the pipeline's own output when it is nested in another one.
  pub receiver: Option<Receiver>,
  pub name: Option<String>,
}

impl Default for PipelineOptions {
  fn default() -> Self {
    Self {
      chained: true,
      receiver: None,
      name: None,
    }
  }
}
