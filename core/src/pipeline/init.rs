// relay/src/pipeline/init.rs

//! Index assignment and the chaining policy.

use crate::core::diagnostics::Diagnostics;
use crate::core::node::Node;
use crate::core::receiver::Receiver;
use crate::error::RelayError;
use crate::pipeline::definition::{Lifecycle, Pipeline};
use tracing::{event, instrument, Level};

impl<Err> Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  /// Assigns every task its position, initializes nested pipelines and, for a
  /// chained pipeline, fills in missing receivers.
  ///
  /// Runs once per pipeline; `run` calls it if needed. Later calls do nothing.
  #[instrument(
        name = "Pipeline::init",
        skip_all,
        fields(pipeline = %self.name, num_tasks = self.nodes.len(), chained = self.chained)
    )]
  pub fn init(&mut self) {
    if self.lifecycle == Lifecycle::Initialized {
      event!(Level::TRACE, "Pipeline already initialized, skipping.");
      return;
    }

    let len = self.nodes.len();
    for (position, node) in self.nodes.iter_mut().enumerate() {
      let meta = node.meta_mut();
      meta.sequence_index = Some(position);
      meta.inverse_index = Some(position as isize - len as isize);
    }

    // Nested pipelines number their own tasks from zero and must be settled
    // before chaining overwrites their outer receiver.
    for node in self.nodes.iter_mut() {
      if let Node::Composite(child) = node {
        child.adopt_diagnostics(&self.diagnostics);
        child.init();
      }
    }

    if self.chained {
      apply_chaining(&mut self.nodes);
    }

    self.lifecycle = Lifecycle::Initialized;
    event!(Level::DEBUG, "Pipeline initialized.");
  }

  /// Points this pipeline and everything nested in it at `diagnostics`.
  pub(crate) fn adopt_diagnostics(&mut self, diagnostics: &Diagnostics) {
    self.diagnostics = diagnostics.clone();
    for node in self.nodes.iter_mut() {
      if let Node::Composite(child) = node {
        child.adopt_diagnostics(diagnostics);
      }
    }
  }
}

/// Links every task without a receiver to the task after it. The last task
/// never forwards, whatever it was set to.
pub(crate) fn apply_chaining<Err>(nodes: &mut [Node<Err>])
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  for (position, node) in nodes.iter_mut().enumerate() {
    if node.receiver().is_none() {
      node.set_receiver(Some(Receiver::One(position as isize + 1)));
    }
  }
  if let Some(last) = nodes.last_mut() {
    last.set_receiver(None);
  }
}
