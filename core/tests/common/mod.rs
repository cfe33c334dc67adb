// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use relay::{Node, RelayError, Value};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("Relay framework error: {0}")]
  Relay(String), // Store as String for Eq comparison

  #[error("Test task failed: {0}")]
  Task(String),
}

impl From<RelayError> for TestError {
  fn from(re: RelayError) -> Self {
    TestError::Relay(format!("{:?}", re))
  }
}

/// Every input a recording task has seen, in call order.
pub type Inbox = Arc<Mutex<Vec<Option<Value>>>>;

pub fn inbox() -> Inbox {
  Arc::new(Mutex::new(Vec::new()))
}

// --- Common Task Creators ---

/// Adds one to a numeric input (missing input counts as 0).
pub fn increment_task<Err>(name: &'static str) -> Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  Node::from_fn(name, |input: Option<Value>| {
    let n = input.as_ref().and_then(Value::as_i64).unwrap_or(0);
    Ok::<_, Err>(Some(json!(n + 1)))
  })
}

/// Always returns `value`, ignoring its input.
pub fn constant_task<Err>(name: &'static str, value: Value) -> Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  Node::from_fn(name, move |_input: Option<Value>| Ok::<_, Err>(Some(value.clone())))
}

/// Records its input into `seen` and returns it unchanged.
pub fn echo_task<Err>(name: &'static str, seen: &Inbox) -> Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  let seen = Arc::clone(seen);
  Node::from_fn(name, move |input: Option<Value>| {
    seen.lock().unwrap().push(input.clone());
    Ok::<_, Err>(input)
  })
}

/// Records its input and produces nothing.
pub fn sink_task<Err>(name: &'static str, seen: &Inbox) -> Node<Err>
where
  Err: std::error::Error + From<RelayError> + Send + Sync + 'static,
{
  let seen = Arc::clone(seen);
  Node::from_fn(name, move |input: Option<Value>| {
    seen.lock().unwrap().push(input);
    Ok::<_, Err>(None)
  })
}

pub fn failing_task(name: &'static str, error_message: &'static str) -> Node<TestError> {
  Node::from_fn(name, move |_input: Option<Value>| {
    tracing::warn!(target: "test_tasks", task = name, "failing with: '{}'", error_message);
    Err(TestError::Task(error_message.to_string()))
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
