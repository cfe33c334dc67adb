// relay/examples/basic_pipeline.rs

use relay::{Node, Pipeline, RelayError, Value};
use serde_json::json;
use tracing::info;

fn main() -> Result<(), RelayError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 1. Each task takes the previous task's output as its input.
  //    Closures pick their own error type; here it is RelayError.
  let mut pipeline: Pipeline = Pipeline::new(vec![
    Node::from_fn("parse", |input: Option<Value>| {
      let raw = input.as_ref().and_then(Value::as_str).unwrap_or_default();
      let words: Vec<Value> = raw.split_whitespace().map(|w| json!(w)).collect();
      info!("parse: {} words", words.len());
      Ok::<_, RelayError>(Some(Value::Array(words)))
    }),
    Node::from_fn("count", |input: Option<Value>| {
      let count = input.as_ref().and_then(Value::as_array).map_or(0, Vec::len);
      info!("count: {}", count);
      Ok::<_, RelayError>(Some(json!(count)))
    }),
    Node::from_fn("report", |input: Option<Value>| {
      Ok::<_, RelayError>(Some(json!({ "word_count": input })))
    }),
  ])
  .named("word_count");

  // 2. Run it. The seed becomes the first task's input.
  let result = pipeline.run(Some(json!("the quick brown fox")))?;

  info!("Pipeline finished: {:?}", result);
  assert_eq!(result, Some(json!({ "word_count": 4 })));
  Ok(())
}
