// relay/src/pipeline/execution.rs

//! Contains `Pipeline::run()`, which executes the tasks in order and routes
//! each output to its receivers.

use crate::core::diagnostics::{Diagnostics, RoutingWarning, WarningKind};
use crate::core::receiver::{resolve, Receiver, Resolution};
use crate::core::task::Task;
use crate::core::Value;
use crate::error::{RelayError, RelayResult};
use crate::pipeline::definition::{Lifecycle, Pipeline};
use crate::results::ResultStore;
use tracing::{event, instrument, span, Level};

/// The task whose output is being routed.
struct Origin<'a> {
  pipeline: &'a str,
  task: &'a str,
  sequence_index: usize,
}

impl<Err> Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  /// Runs every task once, in order, and returns the output of the last one
  /// (`None` for an empty pipeline).
  ///
  /// `seed`, if given, becomes the input of the first task. A task's failure
  /// stops the run and is returned as is. A receiver that does not point
  /// strictly forward, or points past the last task, only costs that one
  /// delivery: it is reported to the diagnostics sink and the run goes on.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline = %self.name,
            num_tasks = self.nodes.len(),
            seeded = seed.is_some(),
        ),
        err(Display)
    )]
  pub fn run(&mut self, seed: Option<Value>) -> Result<Option<Value>, Err> {
    if self.lifecycle == Lifecycle::Uninitialized {
      self.init();
    }
    event!(Level::DEBUG, "Pipeline execution starting.");

    let outcome = self.run_tasks(seed);

    // Cleared on every exit path, failed runs included.
    if !self.results.is_empty() {
      let unconsumed: Vec<usize> = self.results.pending_keys().collect();
      event!(Level::DEBUG, ?unconsumed, "Discarding values no task consumed.");
      self.results.clear();
    }

    if outcome.is_ok() {
      event!(Level::DEBUG, "Pipeline execution completed.");
    }
    outcome
  }

  fn run_tasks(&mut self, seed: Option<Value>) -> Result<Option<Value>, Err> {
    if let Some(seed) = seed {
      self.results.deposit(0, seed).map_err(Err::from)?;
    }

    let len = self.nodes.len();
    let mut last_output = None;

    for (position, node) in self.nodes.iter_mut().enumerate() {
      let sequence_index = node.sequence_index().unwrap_or(position);
      let task_span = span!(
        Level::INFO,
        "task_execution",
        task_name = node.name(),
        sequence_index,
        composite = node.is_composite()
      );
      let _task_span_guard = task_span.enter();

      let input = self.results.take(sequence_index);
      event!(Level::DEBUG, has_input = input.is_some(), "Running task.");

      let output = match node.run(input) {
        Ok(output) => output,
        Err(e) => {
          event!(Level::ERROR, error = %e, "Task failed.");
          return Err(e);
        }
      };

      match (&output, node.receiver()) {
        (Some(value), Some(receiver)) => {
          let origin = Origin {
            pipeline: &self.name,
            task: node.name(),
            sequence_index,
          };
          route(&mut self.results, &self.diagnostics, &origin, receiver, value, len).map_err(Err::from)?;
        }
        (None, Some(_)) => event!(Level::TRACE, "Task produced nothing to route."),
        _ => {}
      }

      last_output = output;
    }

    Ok(last_output)
  }
}

/// Delivers a copy of `value` to every valid destination in `receiver`.
fn route(
  results: &mut ResultStore,
  diagnostics: &Diagnostics,
  origin: &Origin<'_>,
  receiver: &Receiver,
  value: &Value,
  len: usize,
) -> RelayResult<()> {
  for &raw in receiver.indices() {
    let (kind, resolved) = match resolve(raw, origin.sequence_index, len) {
      Resolution::Forward(destination) => {
        event!(Level::TRACE, receiver = raw, destination, "Routing output.");
        results.deposit(destination, value.clone())?;
        continue;
      }
      Resolution::NotForward(resolved) => (WarningKind::NotForward, resolved),
      Resolution::OutOfRange(resolved) => (WarningKind::OutOfRange, resolved),
    };
    diagnostics.record(RoutingWarning {
      kind,
      pipeline: origin.pipeline.to_string(),
      task: origin.task.to_string(),
      sequence_index: origin.sequence_index,
      receiver: raw,
      resolved,
    });
  }
  Ok(())
}

impl<Err> Task<Err> for Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn run(&mut self, input: Option<Value>) -> Result<Option<Value>, Err> {
    Pipeline::run(self, input)
  }

  fn name(&self) -> &str {
    &self.name
  }
}
