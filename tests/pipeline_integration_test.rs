//! Integration tests for the end-to-end pipeline

use labelfuse::config::LabelFuseConfig;
use labelfuse::core::dataset::DatasetEnvelope;
use labelfuse::core::pipeline::Pipeline;
use labelfuse::domain::{FusedAnnotation, LabelFuseError, Unit};
use serde_json::{json, Number, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec(value).unwrap()).unwrap();
    path
}

fn config_with(dir: &TempDir, structural: &Value, values: &Value) -> LabelFuseConfig {
    let mut config = LabelFuseConfig::default();
    config.input.structural_path = write_json(dir.path(), "coco.json", structural);
    config.input.values_path = write_json(dir.path(), "labels.json", values);
    config.output.path = dir.path().join("ml_training_dataset.json");
    config
}

fn scenario_structural() -> Value {
    json!({
        "images": [
            {"id": 1, "file_name": "images/page_1.png", "width": 2550, "height": 1650},
            {"id": 2, "file_name": "images/page_2.png", "width": 2550, "height": 1650}
        ],
        "categories": [
            {"id": 1, "name": "ZONE_CODE"},
            {"id": 2, "name": "MIN_LOT_AREA"}
        ],
        "annotations": [
            {"id": 1, "image_id": 1, "category_id": 1, "bbox": [100, 100, 50, 20]},
            {"id": 2, "image_id": 1, "category_id": 1, "bbox": [100, 200, 50, 20]},
            {"id": 3, "image_id": 1, "category_id": 2, "bbox": [300, 100, 80, 20]}
        ]
    })
}

fn scenario_values() -> Value {
    json!([
        {
            "file_upload": "page_1.png",
            "annotations": [{"result": [
                {"from_name": "zone_code_text", "value": {"text": ["R-1"], "x": 5, "y": 5}},
                {"from_name": "zone_code_text", "value": {"text": ["R-1"], "x": 5, "y": 12}},
                {"from_name": "normalized_value", "value": {"number": 5000, "x": 12, "y": 6}},
                {"from_name": "unit", "value": {"choices": ["sqft"], "x": 14, "y": 6}}
            ]}]
        },
        {"file_upload": "page_2.png", "annotations": [{"result": []}]}
    ])
}

fn all_records(envelope: &DatasetEnvelope) -> Vec<&FusedAnnotation> {
    envelope.train.iter().chain(&envelope.validation).collect()
}

fn by_id(envelope: &DatasetEnvelope, id: u64) -> FusedAnnotation {
    all_records(envelope)
        .into_iter()
        .find(|a| a.id.value() == id)
        .cloned()
        .unwrap()
}

#[test]
fn test_zone_and_numeric_scenario() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, &scenario_structural(), &scenario_values());

    let outcome = Pipeline::new(config).unwrap().run().unwrap();
    let envelope = &outcome.envelope;

    let first = by_id(envelope, 1);
    assert_eq!(first.zone_code.as_deref(), Some("R-1"));
    assert!(first.has_values);

    let second = by_id(envelope, 2);
    assert!(second.zone_code.is_none());
    assert!(!second.has_values);

    let area = by_id(envelope, 3);
    assert_eq!(area.normalized_value, Some(Number::from(5000)));
    assert_eq!(area.unit, Some(Unit::Sqft));
    assert!(area.has_values);
    assert_eq!(area.bbox_area, 1600.0);
    assert_eq!(area.image_filename.as_str(), "page_1.png");

    assert_eq!(envelope.metadata.total_annotations, 3);
    assert_eq!(envelope.metadata.with_values, 2);
    assert_eq!(envelope.metadata.categories, vec!["MIN_LOT_AREA", "ZONE_CODE"]);
    assert_eq!(outcome.summary.fusion.unique_zones, 1);
}

#[test]
fn test_counts_are_conserved() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, &scenario_structural(), &scenario_values());
    let envelope = Pipeline::new(config).unwrap().run().unwrap().envelope;

    let total = envelope.metadata.total_annotations;
    assert_eq!(envelope.train.len() + envelope.validation.len(), total);
    assert_eq!(envelope.high_quality.len() + envelope.medium_quality.len(), total);
    assert_eq!(envelope.metadata.train_count, envelope.train.len());
    assert_eq!(envelope.metadata.validation_count, envelope.validation.len());
    assert!(envelope.high_quality.iter().all(|a| a.has_values));
    assert!(envelope.medium_quality.iter().all(|a| !a.has_values));
}

#[test]
fn test_zone_codes_never_repeat() {
    let annotations: Vec<Value> = (1..=12)
        .map(|id| json!({"id": id, "image_id": 1 + id % 2, "category_id": 1, "bbox": [0, 0, 1, 1]}))
        .collect();
    let structural = json!({
        "images": [
            {"id": 1, "file_name": "page_1.png"},
            {"id": 2, "file_name": "page_2.png"}
        ],
        "categories": [{"id": 1, "name": "ZONE_CODE"}],
        "annotations": annotations
    });
    let zones = |texts: &[&str]| -> Vec<Value> {
        texts
            .iter()
            .map(|t| json!({"from_name": "zone_code_text", "value": {"text": [t]}}))
            .collect()
    };
    let values = json!([
        {"file_upload": "page_1.png", "annotations": [{"result": zones(&["R-1", "R-2", "C-1"])}]},
        {"file_upload": "page_2.png", "annotations": [{"result": zones(&["R-2", "C-1", "M-1"])}]}
    ]);

    let dir = TempDir::new().unwrap();
    let mut config = config_with(&dir, &structural, &values);
    config.application.dry_run = true;
    let envelope = Pipeline::new(config).unwrap().run().unwrap().envelope;

    let assigned: Vec<&str> = all_records(&envelope)
        .iter()
        .filter_map(|a| a.zone_code.as_deref())
        .collect();
    let unique: HashSet<&str> = assigned.iter().copied().collect();
    assert_eq!(assigned.len(), unique.len());
    assert_eq!(unique.len(), 4);
}

#[test]
fn test_page_without_value_entry() {
    let structural = json!({
        "images": [{"id": 1, "file_name": "page_9.png"}],
        "categories": [{"id": 1, "name": "MIN_LOT_AREA"}],
        "annotations": [{"id": 1, "image_id": 1, "category_id": 1, "bbox": [0, 0, 10, 10]}]
    });

    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, &structural, &scenario_values());
    let outcome = Pipeline::new(config).unwrap().run().unwrap();

    let record = by_id(&outcome.envelope, 1);
    assert!(record.normalized_value.is_none());
    assert!(record.unit.is_none());
    assert!(record.zone_code.is_none());
    assert!(!record.has_values);
    assert_eq!(outcome.summary.fusion.without_page_values, 1);
    // Single medium-quality record: split index 0 sends it to validation
    assert!(outcome.envelope.train.is_empty());
    assert_eq!(outcome.envelope.validation.len(), 1);
}

#[test]
fn test_empty_annotations() {
    let structural = json!({"images": [], "categories": [], "annotations": []});

    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, &structural, &json!([]));
    let output = config.output.path.clone();
    let envelope = Pipeline::new(config).unwrap().run().unwrap().envelope;

    assert_eq!(envelope.metadata.total_annotations, 0);
    assert!(envelope.train.is_empty());
    assert!(envelope.validation.is_empty());
    assert!(output.exists());
}

#[test]
fn test_fixed_seed_is_reproducible() {
    let annotations: Vec<Value> = (1..=40)
        .map(|id| json!({"id": id, "image_id": 1, "category_id": 1 + id % 2, "bbox": [id, id, 5, 5]}))
        .collect();
    let structural = json!({
        "images": [{"id": 1, "file_name": "page_1.png"}],
        "categories": [{"id": 1, "name": "ZONE_CODE"}, {"id": 2, "name": "FRONT_YARD"}],
        "annotations": annotations
    });

    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, &structural, &scenario_values());
    let output = config.output.path.clone();

    Pipeline::new(config.clone()).unwrap().run().unwrap();
    let first = fs::read(&output).unwrap();
    Pipeline::new(config).unwrap().run().unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_spatial_assignment_never_reuses_a_value() {
    let structural = json!({
        "images": [{"id": 1, "file_name": "page_1.png", "width": 1000, "height": 1000}],
        "categories": [{"id": 1, "name": "FRONT_YARD"}],
        "annotations": [
            {"id": 1, "image_id": 1, "category_id": 1, "bbox": [100, 100, 10, 10]},
            {"id": 2, "image_id": 1, "category_id": 1, "bbox": [800, 800, 10, 10]},
            {"id": 3, "image_id": 1, "category_id": 1, "bbox": [120, 120, 10, 10]}
        ]
    });
    let values = json!([{
        "file_upload": "page_1.png",
        "annotations": [{"result": [
            {"from_name": "normalized_value", "value": {"number": 25, "x": 80.5, "y": 80.5}},
            {"from_name": "normalized_value", "value": {"number": 10, "x": 10.5, "y": 10.5}}
        ]}]
    }]);

    let dir = TempDir::new().unwrap();
    let mut config = config_with(&dir, &structural, &values);
    config.fusion.value_assignment = "spatial".to_string();
    config.application.dry_run = true;
    let envelope = Pipeline::new(config).unwrap().run().unwrap().envelope;

    assert_eq!(by_id(&envelope, 1).normalized_value, Some(Number::from(10)));
    assert_eq!(by_id(&envelope, 2).normalized_value, Some(Number::from(25)));
    assert_eq!(by_id(&envelope, 3).normalized_value, None);
    assert_eq!(envelope.metadata.value_assignment.as_str(), "spatial");
}

#[test]
fn test_missing_structural_export() {
    let dir = TempDir::new().unwrap();
    let mut config = config_with(&dir, &scenario_structural(), &scenario_values());
    config.input.structural_path = dir.path().join("nope.json");

    match Pipeline::new(config).unwrap().run() {
        Err(LabelFuseError::MissingFile { path }) => assert!(path.ends_with("nope.json")),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_malformed_structural_export() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, &json!({"images": [], "categories": []}), &json!([]));
    let output = config.output.path.clone();

    match Pipeline::new(config).unwrap().run() {
        Err(LabelFuseError::MalformedExport { field, .. }) => assert_eq!(field, "annotations"),
        other => panic!("expected MalformedExport, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_written_dataset_shape() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, &scenario_structural(), &scenario_values());
    let output = config.output.path.clone();
    Pipeline::new(config).unwrap().run().unwrap();

    let written: Value = serde_json::from_slice(&fs::read(output).unwrap()).unwrap();
    for key in ["train", "validation", "high_quality", "medium_quality", "metadata"] {
        assert!(written.get(key).is_some(), "missing {key}");
    }
    let metadata = &written["metadata"];
    assert_eq!(metadata["seed"], 42);
    assert_eq!(metadata["value_assignment"], "positional");
    assert_eq!(metadata["sources"].as_array().unwrap().len(), 2);

    let record = written["high_quality"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == 3)
        .unwrap();
    assert_eq!(record["unit"], "sqft");
    assert_eq!(record["bbox"], json!([300.0, 100.0, 80.0, 20.0]));
}
