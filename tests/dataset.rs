use std::fs;

use indexmap::IndexMap;
use lexrel::{
    data::dataset::{load_split, DatasetAssembly, RelationVocabulary},
    error::PipelineError,
    nlp::paths::PathCounts,
};
use tempfile::TempDir;

fn vocabulary() -> RelationVocabulary {
    RelationVocabulary::from_relations(vec![
        "hypernym".to_string(),
        "meronym".to_string(),
        "random".to_string(),
    ])
    .unwrap()
}

#[test]
fn relation_labels_round_trip_through_the_index() {
    let relations = vocabulary();
    for (i, label) in relations.relations().iter().enumerate() {
        let id = relations.id(label).unwrap();
        assert_eq!(id, i);
        assert_eq!(relations.label(id), Some(label.as_str()));
    }
}

#[test]
fn duplicate_relation_is_a_contract_violation() {
    let err = RelationVocabulary::from_relations(vec![
        "hypernym".to_string(),
        "hypernym".to_string(),
    ])
    .unwrap_err();
    assert!(matches!(err, PipelineError::DataContract(_)));
}

#[test]
fn split_rows_keep_their_order_and_labels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("train.tsv");
    fs::write(&path, "dog\tanimal\thypernym\nwheel\tcar\tmeronym\n").unwrap();

    let split = load_split(&path, &vocabulary()).unwrap();
    let keys: Vec<_> = split.keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            ("dog".to_string(), "animal".to_string()),
            ("wheel".to_string(), "car".to_string())
        ]
    );
    assert_eq!(split[&keys[0]], "hypernym");
}

#[test]
fn unknown_relation_in_a_split_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("val.tsv");
    fs::write(&path, "dog\tanimal\tantonym\n").unwrap();

    let err = load_split(&path, &vocabulary()).unwrap_err();
    assert!(matches!(err, PipelineError::DataContract(_)));
}

#[test]
fn assembly_concatenates_splits_in_fixed_order() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("relations.txt"), "hypernym\nmeronym\nrandom\n").unwrap();
    fs::write(
        dir.path().join("train.tsv"),
        "dog\tanimal\thypernym\nwheel\tcar\tmeronym\n",
    )
    .unwrap();
    fs::write(dir.path().join("val.tsv"), "cat\tanimal\thypernym\n").unwrap();
    fs::write(dir.path().join("test.tsv"), "sky\tblue\trandom\n").unwrap();

    let assembly = DatasetAssembly::load(dir.path()).unwrap();
    assert_eq!(assembly.y_train, vec![0, 1]);
    assert_eq!(assembly.y_val, vec![0]);
    assert_eq!(assembly.y_test, vec![2]);

    let keys = assembly.dataset_keys();
    assert_eq!(keys.len(), 4);
    assert_eq!(keys[0], ("dog".to_string(), "animal".to_string()));
    assert_eq!(keys[2], ("cat".to_string(), "animal".to_string()));
    assert_eq!(keys[3], ("sky".to_string(), "blue".to_string()));

    // The aligned feature list re-slices at split boundaries.
    let instances = vec![PathCounts::new(); keys.len()];
    let (train, val, test) = assembly.slice_instances(&instances).unwrap();
    assert_eq!(train.len(), 2);
    assert_eq!(val.len(), 1);
    assert_eq!(test.len(), 1);
}

#[test]
fn slicing_rejects_count_drift() {
    let relations = vocabulary();
    let mut train = IndexMap::new();
    train.insert(
        ("dog".to_string(), "animal".to_string()),
        "hypernym".to_string(),
    );
    let assembly =
        DatasetAssembly::from_splits(relations, train, IndexMap::new(), IndexMap::new()).unwrap();

    let instances = vec![PathCounts::new(); 3];
    let err = assembly.slice_instances(&instances).unwrap_err();
    assert!(matches!(err, PipelineError::DataContract(_)));
}
