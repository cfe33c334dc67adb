// tests/lifecycle_tests.rs
mod common;

use common::*;
use pretty_assertions::assert_eq;
use relay::{Lifecycle, Node, Pipeline, PipelineOptions, Receiver, RelayError};
use serde_json::json;

fn receivers(pipeline: &Pipeline) -> Vec<Option<Receiver>> {
  pipeline.tasks().iter().map(|node| node.receiver().cloned()).collect()
}

#[test]
fn test_init_assigns_sequence_and_inverse_indices() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(vec![
    increment_task("a"),
    increment_task("b"),
    increment_task("c"),
    increment_task("d"),
  ]);
  assert_eq!(pipeline.tasks()[0].sequence_index(), None);

  pipeline.init();

  for (position, node) in pipeline.tasks().iter().enumerate() {
    assert_eq!(node.sequence_index(), Some(position));
    assert_eq!(node.inverse_index(), Some(position as isize - 4));
  }
  assert_eq!(pipeline.lifecycle(), Lifecycle::Initialized);
}

#[test]
fn test_chaining_links_each_task_to_the_next() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(vec![increment_task("a"), increment_task("b"), increment_task("c")]);

  pipeline.init();

  assert_eq!(
    receivers(&pipeline),
    vec![Some(Receiver::One(1)), Some(Receiver::One(2)), None]
  );
}

#[test]
fn test_chaining_keeps_explicit_receivers() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(vec![
    increment_task("a").to([2, 3]),
    increment_task("b"),
    increment_task("c").to(-1),
    increment_task("d"),
  ]);

  pipeline.init();

  assert_eq!(
    receivers(&pipeline),
    vec![
      Some(Receiver::Many(vec![2, 3])),
      Some(Receiver::One(2)),
      Some(Receiver::One(-1)),
      None
    ]
  );
}

#[test]
fn test_chaining_clears_explicit_receiver_of_last_task() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(vec![increment_task("a"), increment_task("b").to(0)]);

  pipeline.init();

  assert_eq!(receivers(&pipeline), vec![Some(Receiver::One(1)), None]);
}

#[test]
fn test_unchained_pipeline_leaves_receivers_alone() {
  setup_tracing();
  let mut pipeline: Pipeline =
    Pipeline::new(vec![increment_task("a"), increment_task("b").to(0), increment_task("c")]).chained(false);

  pipeline.init();

  assert_eq!(receivers(&pipeline), vec![None, Some(Receiver::One(0)), None]);
}

#[test]
fn test_empty_chained_pipeline_initializes() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(Vec::new());

  pipeline.init();

  assert!(pipeline.is_initialized());
  assert!(pipeline.is_empty());
}

#[test]
fn test_nested_pipelines_number_their_own_tasks() {
  setup_tracing();
  let inner: Pipeline = Pipeline::new(vec![increment_task("x"), increment_task("y")]).named("inner");
  let mut outer: Pipeline = Pipeline::new(vec![
    increment_task("a"),
    increment_task("b"),
    Node::from(inner),
    increment_task("c"),
  ]);

  outer.init();

  let nested = &outer.tasks()[2];
  assert_eq!(nested.sequence_index(), Some(2));
  assert_eq!(nested.receiver(), Some(&Receiver::One(3)));

  let inner = nested.as_pipeline().unwrap();
  assert!(inner.is_initialized());
  assert_eq!(inner.tasks()[0].sequence_index(), Some(0));
  assert_eq!(inner.tasks()[1].sequence_index(), Some(1));
  assert_eq!(receivers(inner), vec![Some(Receiver::One(1)), None]);
}

#[test]
fn test_nested_pipeline_explicit_receiver_survives_outer_chaining() {
  setup_tracing();
  let inner: Pipeline = Pipeline::new(vec![increment_task("x")]).with_receiver(-1);
  let mut outer: Pipeline = Pipeline::new(vec![Node::from(inner), increment_task("a"), increment_task("b")]);

  outer.init();

  assert_eq!(outer.tasks()[0].receiver(), Some(&Receiver::One(-1)));
}

#[test]
fn test_init_runs_once() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(vec![increment_task("a"), increment_task("b")]);
  pipeline.init();

  pipeline.init();
  pipeline.run(None).unwrap();

  assert_eq!(receivers(&pipeline), vec![Some(Receiver::One(1)), None]);
  assert_eq!(pipeline.tasks()[1].sequence_index(), Some(1));
}

#[test]
fn test_add_before_init_appends() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(vec![increment_task("a")]);

  pipeline.add(increment_task("b")).unwrap();
  pipeline.extend(vec![increment_task("c"), increment_task("d")]).unwrap();
  pipeline.add(Pipeline::new(vec![increment_task("nested")])).unwrap();

  assert_eq!(pipeline.len(), 5);
  assert!(pipeline.tasks()[4].is_composite());
  assert_eq!(pipeline.run(Some(json!(0))).unwrap(), Some(json!(5)));
}

#[test]
fn test_add_after_init_fails() {
  setup_tracing();
  let mut pipeline: Pipeline = Pipeline::new(vec![increment_task("a")]).named("frozen");
  pipeline.run(None).unwrap();

  let err = pipeline.add(increment_task("late")).unwrap_err();
  assert!(matches!(err, RelayError::AlreadyInitialized { ref pipeline } if pipeline == "frozen"));

  assert!(matches!(
    pipeline.extend(vec![increment_task("later")]),
    Err(RelayError::AlreadyInitialized { .. })
  ));
  assert!(matches!(pipeline.node_mut(0), Err(RelayError::AlreadyInitialized { .. })));
  assert_eq!(pipeline.len(), 1);
}

#[test]
fn test_node_mut_sets_receiver_before_init() {
  setup_tracing();
  let seen = inbox();
  let mut pipeline: Pipeline =
    Pipeline::new(vec![constant_task("a", json!(1)), increment_task("b"), echo_task("c", &seen)]);

  pipeline.node_mut(0).unwrap().set_receiver(Some(Receiver::One(2)));
  assert!(matches!(
    pipeline.node_mut(7),
    Err(RelayError::IndexOutOfBounds { index: 7, len: 3 })
  ));
  pipeline.run(None).unwrap();

  assert_eq!(*seen.lock().unwrap(), vec![Some(json!([1, 1]))]);
}

#[test]
fn test_compose_builds_new_pipeline_with_same_settings() {
  setup_tracing();
  let base: Pipeline = Pipeline::new(vec![increment_task("a")])
    .named("base")
    .chained(false)
    .with_receiver(3);

  let composed = base.compose(vec![increment_task("b"), increment_task("c")]).unwrap();

  assert_eq!(composed.len(), 3);
  assert_eq!(composed.name(), "base");
  assert!(!composed.is_chained());
  assert_eq!(composed.receiver(), Some(&Receiver::One(3)));
  assert!(!composed.is_initialized());
}

#[test]
fn test_add_operator_composes() {
  setup_tracing();
  let base: Pipeline = Pipeline::new(vec![increment_task("a")]);

  let mut composed = ((base + increment_task("b")).unwrap() + vec![increment_task("c")]).unwrap();

  assert_eq!(composed.run(Some(json!(0))).unwrap(), Some(json!(3)));
}

#[test]
fn test_compose_after_init_fails() {
  setup_tracing();
  let mut base: Pipeline = Pipeline::new(vec![increment_task("a")]);
  base.init();

  let result = base + increment_task("b");

  assert!(matches!(result, Err(RelayError::AlreadyInitialized { .. })));
}

#[test]
fn test_options_deserialize_from_config() {
  setup_tracing();
  let options: PipelineOptions =
    serde_json::from_str(r#"{ "chained": false, "receiver": [2, -1], "name": "from_config" }"#).unwrap();
  assert_eq!(options.receiver, Some(Receiver::Many(vec![2, -1])));
  assert!(options.receiver.as_ref().is_some_and(Receiver::is_fan_out));

  let pipeline: Pipeline = Pipeline::with_options(vec![increment_task("a")], options);
  assert_eq!(pipeline.name(), "from_config");
  assert!(!pipeline.is_chained());

  let defaults: PipelineOptions = serde_json::from_str("{}").unwrap();
  assert_eq!(defaults, PipelineOptions::default());
  assert!(defaults.chained);

  let single: PipelineOptions = serde_json::from_str(r#"{ "receiver": 4 }"#).unwrap();
  assert_eq!(single.receiver, Some(Receiver::One(4)));
  assert!(!single.receiver.as_ref().is_some_and(Receiver::is_fan_out));
}

#[test]
fn test_debug_output_shows_the_tree() {
  setup_tracing();
  let inner: Pipeline = Pipeline::new(vec![increment_task("leaf_inside")]).named("inner");
  let mut outer: Pipeline = Pipeline::new(vec![increment_task("leaf_outside"), Node::from(inner)]).named("outer");
  outer.init();

  let rendered = format!("{:?}", outer);

  assert!(rendered.contains("\"outer\""));
  assert!(rendered.contains("\"inner\""));
  assert!(rendered.contains("leaf_inside"));
  assert!(rendered.contains("receiver: Some(One(1))"));
}
