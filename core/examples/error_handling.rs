// relay/examples/error_handling.rs

use relay::{Node, Pipeline, RelayError, Value};
use serde_json::json;
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),

  #[error("Relay framework error during pipeline execution: {0}")]
  RelayFramework(#[from] RelayError), // Allows RelayError to be converted into ExampleAppError
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: A task returns a custom error
  info!("\nScenario 1: Task returns a custom error");
  run_pipeline_with_task_error();

  // Scenario 2: Framework error (incompatible merge)
  info!("\nScenario 2: Relay framework error (IncompatibleMerge)");
  run_pipeline_with_framework_error();

  // Scenario 3: A misrouted output is only a warning
  info!("\nScenario 3: Misrouted output");
  run_pipeline_with_routing_warning();
}

fn run_pipeline_with_task_error() {
  let mut pipeline = Pipeline::<ExampleAppError>::new(vec![
    Node::from_fn("step_one", |_input: Option<Value>| {
      info!("Executing step_one");
      Ok::<_, ExampleAppError>(Some(json!(1)))
    }),
    Node::from_fn("step_two_fails", |_input: Option<Value>| {
      info!("Executing step_two_fails - this will error");
      Err(ExampleAppError::CustomError("Something went wrong in step_two!".to_string()))
    }),
    Node::from_fn("step_three", |_input: Option<Value>| {
      error!("Executing step_three (should not be reached)");
      Ok::<_, ExampleAppError>(None)
    }),
  ]);

  match pipeline.run(None) {
    Ok(result) => error!("Pipeline unexpectedly succeeded: {:?}", result),
    Err(e) => {
      info!("Pipeline failed as expected: {}", e);
      assert!(matches!(e, ExampleAppError::CustomError(_)));
    }
  }
}

fn run_pipeline_with_framework_error() {
  // A scalar is pending at index 2 when a mapping arrives for the same slot.
  let mut pipeline = Pipeline::<ExampleAppError>::new(vec![
    Node::from_fn("scalar", |_input: Option<Value>| Ok::<_, ExampleAppError>(Some(json!(1)))).to(2),
    Node::from_fn("mapping", |_input: Option<Value>| {
      Ok::<_, ExampleAppError>(Some(json!({ "a": 1 })))
    })
    .to(2),
    Node::from_fn("target", |input: Option<Value>| Ok::<_, ExampleAppError>(input)),
  ])
  .chained(false);

  match pipeline.run(None) {
    Ok(result) => error!("Pipeline unexpectedly succeeded: {:?}", result),
    Err(e) => {
      info!("Pipeline failed as expected: {}", e);
      assert!(matches!(
        e,
        ExampleAppError::RelayFramework(RelayError::IncompatibleMerge { key: 2, .. })
      ));
    }
  }
}

fn run_pipeline_with_routing_warning() {
  let mut pipeline = Pipeline::<ExampleAppError>::new(vec![
    Node::from_fn("first", |_input: Option<Value>| Ok::<_, ExampleAppError>(Some(json!("hello")))),
    Node::from_fn("backwards", |input: Option<Value>| Ok::<_, ExampleAppError>(input)).to(0),
    Node::from_fn("last", |input: Option<Value>| Ok::<_, ExampleAppError>(input)),
  ]);

  match pipeline.run(None) {
    Ok(result) => {
      info!("Pipeline completed: {:?}", result);
      info!("Warnings recorded: {}", pipeline.diagnostics().len());
    }
    Err(e) => error!("Pipeline unexpectedly failed: {}", e),
  }
}
