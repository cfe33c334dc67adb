// relay/examples/nested_pipeline.rs

use relay::{Node, Pipeline, RelayError, Value};
use serde_json::json;
use tracing::info;

fn add(name: &'static str, amount: i64) -> Node<RelayError> {
  Node::from_fn(name, move |input: Option<Value>| {
    let n = input.as_ref().and_then(Value::as_i64).unwrap_or(0);
    info!("{}: {} + {}", name, n, amount);
    Ok::<_, RelayError>(Some(json!(n + amount)))
  })
}

fn main() -> Result<(), RelayError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Nested Pipeline Example ---");

  // The inner pipeline numbers its tasks 0 and 1 on its own; to the outer
  // pipeline it is just the task at index 1.
  let inner: Pipeline = Pipeline::new(vec![add("inner_ten", 10), add("inner_hundred", 100)]).named("inner");

  let mut outer: Pipeline = Pipeline::new(vec![add("one", 1), Node::from(inner), add("thousand", 1000)]).named("outer");

  let result = outer.run(Some(json!(0)))?;
  info!("Result: {:?}", result);
  assert_eq!(result, Some(json!(1111)));

  // Composition builds a new pipeline from the old one's tasks.
  let mut longer = (Pipeline::new(vec![add("a", 1)]) + add("b", 2))?;
  assert_eq!(longer.run(Some(json!(0)))?, Some(json!(3)));
  Ok(())
}
