use serde_json::json;
use tsops_core::config::EngineConfig;
use tsops_core::dag::StageSpec;
use tsops_core::{Record, Value};
use tsops_exec::{Engine, ExecError, Pipeline};
use tsops_operators::ops;

fn rec(v: serde_json::Value) -> Record {
    Record::from_json(v).unwrap()
}

fn nested_input() -> Vec<Record> {
    vec![
        rec(json!({"t": 0, "pos": {"x": 1, "y": 10}, "tag": "a"})),
        rec(json!({"t": 1, "pos": {"x": 3, "y": 10}})),
        rec(json!({"t": 2, "pos": {"x": 6, "y": 12}})),
    ]
}

#[test]
fn test_flatten_dt_nest_pipeline() {
    let specs = vec![
        StageSpec::Flatten,
        StageSpec::Dt { key: "t".into() },
        StageSpec::Nest,
    ];
    let out = Engine::default().run(&specs, nested_input()).unwrap();

    assert_eq!(
        out.records[0],
        rec(json!({"t": 0, "pos": {"x": null, "y": null}, "tag": "a"}))
    );
    assert_eq!(out.records[1], rec(json!({"t": 1, "pos": {"x": 2, "y": 0}})));
    assert_eq!(out.records[2], rec(json!({"t": 2, "pos": {"x": 3, "y": 2}})));

    let names: Vec<&str> = out.manifest.stages.iter().map(|s| s.stage.as_str()).collect();
    assert_eq!(names, vec!["flatten", "dt", "nest"]);
}

#[test]
fn test_elapsed_field_from_config() {
    let engine = Engine::new(EngineConfig {
        elapsed_field: "gap".into(),
        ..EngineConfig::default()
    });
    let out = engine
        .run(&[StageSpec::Elapsed { key: "t".into() }], nested_input())
        .unwrap();
    assert_eq!(out.records[0].get("gap"), Some(&Value::Null));
    assert_eq!(out.records[2].get("gap"), Some(&Value::Number(1.0)));
    assert!(out.records[2].get("elapsed").is_none());
}

#[test]
fn test_run_yaml_end_to_end() {
    let yaml = r#"
config:
  default_key: t
steps:
  - op: into
    path: pos
  - op: sma
    n: 2
"#;
    let out = Engine::default().run_yaml(yaml, nested_input()).unwrap();
    assert_eq!(out.records[0], rec(json!({"t": 0, "pos.x": 1, "pos.y": 10})));
    assert_eq!(out.records[2], rec(json!({"t": 2, "pos.x": 4.5, "pos.y": 11})));
    assert_eq!(out.manifest.stages.len(), 2);
}

#[test]
fn test_plan_errors_surface_from_run_yaml() {
    let err = Engine::default()
        .run_yaml("steps:\n  - op: dt\n", nested_input())
        .unwrap_err();
    assert!(matches!(err, ExecError::Plan(_)));
}

#[test]
fn test_manifest_is_deterministic_for_same_plan() {
    let specs = vec![StageSpec::Cumsum { key: "t".into() }];
    let engine = Engine::default();
    let a = engine.run(&specs, nested_input()).unwrap();
    let b = engine.run(&specs, nested_input()).unwrap();
    assert_eq!(a.manifest.plan_hash, b.manifest.plan_hash);
    assert_eq!(a.manifest.outputs_digest, b.manifest.outputs_digest);

    let other = engine
        .run(&[StageSpec::Dt { key: "t".into() }], nested_input())
        .unwrap();
    assert_ne!(a.manifest.plan_hash, other.manifest.plan_hash);
}

#[test]
fn test_manifest_serializes() {
    let out = Engine::default()
        .run(&[StageSpec::Flatten], nested_input())
        .unwrap();
    let json = serde_json::to_value(&out.manifest).unwrap();
    assert_eq!(json["stages"][0]["records_out"], 3);
    assert_eq!(json["engine_version"], tsops_core::VERSION);
}

#[test]
fn test_hand_built_pipeline_streams_lazily() {
    let mut pipeline = Pipeline::new()
        .then(ops::into("t", "pos.x", Some("x")).unwrap())
        .then(ops::cumsum("t"));
    let mut stream = pipeline.run(nested_input());
    assert_eq!(stream.next(), Some(rec(json!({"t": 0, "x": 1}))));
    assert_eq!(stream.next(), Some(rec(json!({"t": 1, "x": 4}))));
    drop(stream);
    assert_eq!(pipeline.counts()[0].records_out, 2);

    // state carries into the next batch
    let more: Vec<Record> = pipeline.run(vec![rec(json!({"t": 9, "pos": {"x": 10}}))]).collect();
    assert_eq!(more[0], rec(json!({"t": 9, "x": 14})));
}
