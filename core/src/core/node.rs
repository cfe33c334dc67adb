// relay/src/core/node.rs

//! Defines the entries of a pipeline's task list: `Node<Err>` (leaf task or
//! nested pipeline) and the identity fields every entry carries.

use crate::core::receiver::Receiver;
use crate::core::task::{FnTask, Task};
use crate::core::Value;
use crate::error::RelayError;
use crate::pipeline::definition::Pipeline;

/// Identity of a task inside its enclosing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMeta {
  /// Zero-based position, written by the enclosing pipeline during `init`.
  pub(crate) sequence_index: Option<usize>,
  /// The same position counted from the end (`-1` is the last task).
  pub(crate) inverse_index: Option<isize>,
  pub receiver: Option<Receiver>,
}

impl TaskMeta {
  pub fn with_receiver(receiver: Option<Receiver>) -> Self {
    Self {
      receiver,
      ..Default::default()
    }
  }

  pub fn sequence_index(&self) -> Option<usize> {
    self.sequence_index
  }

  pub fn inverse_index(&self) -> Option<isize> {
    self.inverse_index
  }
}

/// One entry in a pipeline's task list.
///
/// Nested pipelines get their own variant so that `init` can descend into them
/// with a plain match.
pub enum Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  Leaf { task: Box<dyn Task<Err>>, meta: TaskMeta },
  Composite(Pipeline<Err>),
}

impl<Err> Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  pub fn leaf(task: impl Task<Err> + 'static) -> Self {
    Node::Leaf {
      task: Box::new(task),
      meta: TaskMeta::default(),
    }
  }

  /// Shorthand for a leaf backed by a closure. See `FnTask::new`.
  pub fn from_fn<F, UserErr>(name: impl Into<String>, func: F) -> Self
  where
    F: FnMut(Option<Value>) -> Result<Option<Value>, UserErr> + Send + 'static,
    UserErr: Into<Err> + 'static,
  {
    Node::leaf(FnTask::new(name, func))
  }

  /// Builder form of `set_receiver`.
  pub fn to(mut self, receiver: impl Into<Receiver>) -> Self {
    self.set_receiver(Some(receiver.into()));
    self
  }

  pub fn meta(&self) -> &TaskMeta {
    match self {
      Node::Leaf { meta, .. } => meta,
      Node::Composite(pipeline) => &pipeline.meta,
    }
  }

  pub(crate) fn meta_mut(&mut self) -> &mut TaskMeta {
    match self {
      Node::Leaf { meta, .. } => meta,
      Node::Composite(pipeline) => &mut pipeline.meta,
    }
  }

  pub fn receiver(&self) -> Option<&Receiver> {
    self.meta().receiver.as_ref()
  }

  pub fn set_receiver(&mut self, receiver: Option<Receiver>) {
    self.meta_mut().receiver = receiver;
  }

  pub fn sequence_index(&self) -> Option<usize> {
    self.meta().sequence_index
  }

  pub fn inverse_index(&self) -> Option<isize> {
    self.meta().inverse_index
  }

  pub fn is_composite(&self) -> bool {
    matches!(self, Node::Composite(_))
  }

  pub fn as_pipeline(&self) -> Option<&Pipeline<Err>> {
    match self {
      Node::Composite(pipeline) => Some(pipeline),
      Node::Leaf { .. } => None,
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Node::Leaf { task, .. } => task.name(),
      Node::Composite(pipeline) => pipeline.name(),
    }
  }

  pub(crate) fn run(&mut self, input: Option<Value>) -> Result<Option<Value>, Err> {
    match self {
      Node::Leaf { task, .. } => task.run(input),
      Node::Composite(pipeline) => pipeline.run(input),
    }
  }
}

impl<Err> From<Pipeline<Err>> for Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn from(pipeline: Pipeline<Err>) -> Self {
    Node::Composite(pipeline)
  }
}

impl<Err> From<FnTask<Err>> for Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn from(task: FnTask<Err>) -> Self {
    Node::leaf(task)
  }
}

// `dyn Task` has no Debug, so print the identity fields and the task's name.
impl<Err> std::fmt::Debug for Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Node::Leaf { task, meta } => f
        .debug_struct("Task")
        .field("name", &task.name())
        .field("sequence_index", &meta.sequence_index)
        .field("receiver", &meta.receiver)
        .finish(),
      Node::Composite(pipeline) => std::fmt::Debug::fmt(pipeline, f),
    }
  }
}
