// relay/src/pipeline/definition.rs

//! Contains the `Pipeline<Err>` struct definition and methods for its
//! construction and structural modification.

use crate::core::diagnostics::Diagnostics;
use crate::core::node::{Node, TaskMeta};
use crate::core::receiver::Receiver;
use crate::error::{RelayError, RelayResult};
use crate::pipeline::options::PipelineOptions;
use crate::results::ResultStore;
use tracing::{event, Level};

const DEFAULT_NAME: &str = "pipeline";

/// Where a pipeline is in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
  /// Tasks can still be added; indices are not assigned yet.
  Uninitialized,
  /// Indices and receivers are fixed. Entered on the first `init` or `run`.
  Initialized,
}

/// An ordered list of tasks that run one after another, each task's output
/// routed by index to later tasks.
///
/// A `Pipeline` is itself a `Task`, so pipelines nest.
///
/// `Err` is the error type of every task in the tree. It must be
/// `From<RelayError>` so that framework failures (a rejected merge, a mutation
/// after initialization) can be reported through it.
pub struct Pipeline<Err = RelayError>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  /// Ordered task list. Frozen once `lifecycle` is `Initialized`.
  pub(crate) nodes: Vec<Node<Err>>,
  pub(crate) chained: bool,
  /// This pipeline's identity inside an enclosing pipeline.
  pub(crate) meta: TaskMeta,
  pub(crate) lifecycle: Lifecycle,
  pub(crate) results: ResultStore,
  pub(crate) diagnostics: Diagnostics,
}

impl<Err> Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  /// Creates a chained pipeline over `nodes`.
  pub fn new(nodes: Vec<Node<Err>>) -> Self {
    Self::with_options(nodes, PipelineOptions::default())
  }

  pub fn with_options(nodes: Vec<Node<Err>>, options: PipelineOptions) -> Self {
    Self {
      name: options.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
      nodes,
      chained: options.chained,
      meta: TaskMeta::with_receiver(options.receiver),
      lifecycle: Lifecycle::Uninitialized,
      results: ResultStore::new(),
      diagnostics: Diagnostics::new(),
    }
  }

  /// Selects the linking policy. Only has an effect before initialization.
  pub fn chained(mut self, chained: bool) -> Self {
    self.chained = chained;
    self
  }

  pub fn with_receiver(mut self, receiver: impl Into<Receiver>) -> Self {
    self.meta.receiver = Some(receiver.into());
    self
  }

  pub fn named(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  /// Records routing warnings into `diagnostics` instead of a private sink.
  ///
  /// Only takes effect on the outermost pipeline: once this pipeline is nested
  /// in another, the enclosing pipeline's `init` replaces the sink with its own.
  pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
    self.diagnostics = diagnostics;
    self
  }

  pub(crate) fn ensure_uninitialized(&self) -> RelayResult<()> {
    if self.lifecycle == Lifecycle::Initialized {
      event!(Level::ERROR, pipeline = %self.name, "Attempt to modify an initialized pipeline.");
      return Err(RelayError::AlreadyInitialized {
        pipeline: self.name.clone(),
      });
    }
    Ok(())
  }

  // --- Task list manipulation, only before init ---

  pub fn add(&mut self, node: impl Into<Node<Err>>) -> RelayResult<()> {
    self.ensure_uninitialized()?;
    self.nodes.push(node.into());
    Ok(())
  }

  pub fn extend<I>(&mut self, nodes: I) -> RelayResult<()>
  where
    I: IntoIterator<Item = Node<Err>>,
  {
    self.ensure_uninitialized()?;
    self.nodes.extend(nodes);
    Ok(())
  }

  /// Mutable access to the task at `index`, e.g. to set its receiver.
  pub fn node_mut(&mut self, index: usize) -> RelayResult<&mut Node<Err>> {
    self.ensure_uninitialized()?;
    let len = self.nodes.len();
    self.nodes.get_mut(index).ok_or(RelayError::IndexOutOfBounds { index, len })
  }

  /// Builds a new, uninitialized pipeline from this pipeline's tasks followed
  /// by `nodes`. Name, linking policy and receiver carry over; results and
  /// diagnostics start empty.
  pub fn compose<I>(self, nodes: I) -> RelayResult<Self>
  where
    I: IntoIterator<Item = Node<Err>>,
  {
    self.ensure_uninitialized()?;
    let mut combined = self.nodes;
    combined.extend(nodes);
    event!(Level::DEBUG, pipeline = %self.name, num_tasks = combined.len(), "Pipeline composed.");
    Ok(Self::with_options(
      combined,
      PipelineOptions {
        chained: self.chained,
        receiver: self.meta.receiver,
        name: Some(self.name),
      },
    ))
  }

  // --- Accessors ---

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn tasks(&self) -> &[Node<Err>] {
    &self.nodes
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn is_chained(&self) -> bool {
    self.chained
  }

  pub fn lifecycle(&self) -> Lifecycle {
    self.lifecycle
  }

  pub fn is_initialized(&self) -> bool {
    self.lifecycle == Lifecycle::Initialized
  }

  pub fn meta(&self) -> &TaskMeta {
    &self.meta
  }

  pub fn receiver(&self) -> Option<&Receiver> {
    self.meta.receiver.as_ref()
  }

  pub fn set_receiver(&mut self, receiver: Option<Receiver>) {
    self.meta.receiver = receiver;
  }

  pub fn results(&self) -> &ResultStore {
    &self.results
  }

  /// Direct access to the pending values, e.g. to pre-load inputs for tasks
  /// other than the first before calling `run`.
  pub fn results_mut(&mut self) -> &mut ResultStore {
    &mut self.results
  }

  pub fn diagnostics(&self) -> &Diagnostics {
    &self.diagnostics
  }
}

impl<Err> Default for Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

impl<Err> std::ops::Add<Node<Err>> for Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  type Output = RelayResult<Pipeline<Err>>;

  fn add(self, node: Node<Err>) -> Self::Output {
    self.compose([node])
  }
}

impl<Err> std::ops::Add<Vec<Node<Err>>> for Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  type Output = RelayResult<Pipeline<Err>>;

  fn add(self, nodes: Vec<Node<Err>>) -> Self::Output {
    self.compose(nodes)
  }
}

impl<Err> std::fmt::Debug for Pipeline<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("name", &self.name)
      .field("chained", &self.chained)
      .field("sequence_index", &self.meta.sequence_index)
      .field("receiver", &self.meta.receiver)
      .field("lifecycle", &self.lifecycle)
      .field("tasks", &self.nodes)
      .finish()
  }
}
