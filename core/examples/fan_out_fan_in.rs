// relay/examples/fan_out_fan_in.rs

use relay::{Node, Pipeline, RelayError, Value};
use serde_json::json;
use tracing::{info, warn};

fn main() -> Result<(), RelayError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Fan-out / Fan-in Example ---");

  // Task 0 sends the same order to both pricing tasks; both report into
  // the last task, whose input becomes one mapping.
  let mut pipeline: Pipeline = Pipeline::new(vec![
    Node::from_fn("order", |_input: Option<Value>| {
      Ok::<_, RelayError>(Some(json!({ "sku": "A-1", "qty": 3, "unit": 250 })))
    })
    .to([1, 2]),
    Node::from_fn("subtotal", |input: Option<Value>| {
      let order = input.unwrap_or_default();
      let subtotal = order["qty"].as_i64().unwrap_or(0) * order["unit"].as_i64().unwrap_or(0);
      Ok::<_, RelayError>(Some(json!({ "subtotal": subtotal })))
    })
    .to(-1),
    Node::from_fn("shipping", |input: Option<Value>| {
      let qty = input.unwrap_or_default()["qty"].as_i64().unwrap_or(0);
      Ok::<_, RelayError>(Some(json!({ "shipping": 100 + 20 * qty })))
    })
    .to([-1, 0]), // 0 points backwards and is reported, not delivered
    Node::from_fn("invoice", |input: Option<Value>| {
      info!("invoice received: {:?}", input);
      Ok::<_, RelayError>(input)
    }),
  ])
  .chained(false)
  .named("checkout");

  let result = pipeline.run(None)?;
  info!("Invoice: {:?}", result);
  assert_eq!(result, Some(json!({ "subtotal": 750, "shipping": 160 })));

  for warning in pipeline.diagnostics().warnings() {
    warn!("Undelivered output: {}", warning);
  }
  Ok(())
}
