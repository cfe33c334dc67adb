// relay/src/core/task.rs

//! Defines the `Task<Err>` contract and `FnTask`, a task backed by a closure.

use crate::core::Value;
use crate::error::RelayError;

/// A unit of executable work.
///
/// The pipeline only looks at what `run` returns: `Ok(Some(value))` is routed
/// to the task's receivers, `Ok(None)` means nothing was produced, and `Err` is
/// handed back to the caller of the pipeline untouched.
///
/// `Err` is the error type of the enclosing pipeline. It must be constructible
/// from `RelayError` so framework failures can travel on the same channel.
pub trait Task<Err>: Send
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn run(&mut self, input: Option<Value>) -> Result<Option<Value>, Err>;

  /// Label used in diagnostics and tracing spans.
  fn name(&self) -> &str {
    std::any::type_name::<Self>()
  }
}

/// Type alias for the boxed closure inside a `FnTask`.
///
/// The closure has already had its own error type mapped into `Err`.
pub type TaskFn<Err> = Box<dyn FnMut(Option<Value>) -> Result<Option<Value>, Err> + Send>;

/// A leaf task whose work is a closure.
pub struct FnTask<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  name: String,
  func: TaskFn<Err>,
}

impl<Err> FnTask<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  /// Wraps `func`. Its error type only has to convert into the pipeline's `Err`.
  pub fn new<F, UserErr>(name: impl Into<String>, mut func: F) -> Self
  where
    F: FnMut(Option<Value>) -> Result<Option<Value>, UserErr> + Send + 'static,
    UserErr: Into<Err> + 'static,
  {
    Self {
      name: name.into(),
      func: Box::new(move |input: Option<Value>| -> Result<Option<Value>, Err> { func(input).map_err(Into::into) }),
    }
  }
}

impl<Err> Task<Err> for FnTask<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn run(&mut self, input: Option<Value>) -> Result<Option<Value>, Err> {
    (self.func)(input)
  }

  fn name(&self) -> &str {
    &self.name
  }
}

impl<Err> std::fmt::Debug for FnTask<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FnTask").field("name", &self.name).finish()
  }
}
