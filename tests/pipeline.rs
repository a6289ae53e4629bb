use std::fs;

use lexrel::{
    data::{corpus::FileCorpus, dataset::DatasetAssembly},
    model::{
        classifier::{ClassifierSpec, PathRelationClassifier},
        sweep::{self, GridPoint, SweepData},
    },
    nlp,
};
use tempfile::TempDir;

fn write_fixtures(root: &std::path::Path) {
    let dataset = root.join("dataset");
    let corpus = root.join("corpus");
    fs::create_dir_all(&dataset).unwrap();
    fs::create_dir_all(&corpus).unwrap();

    fs::write(dataset.join("relations.txt"), "hypernym\nmeronym\n").unwrap();
    fs::write(
        dataset.join("train.tsv"),
        "dog\tanimal\thypernym\ncat\tanimal\thypernym\nwheel\tcar\tmeronym\ndoor\tcar\tmeronym\n",
    )
    .unwrap();
    fs::write(
        dataset.join("val.tsv"),
        "cat\tanimal\thypernym\nwheel\tcar\tmeronym\n",
    )
    .unwrap();
    fs::write(
        dataset.join("test.tsv"),
        "dog\tanimal\thypernym\ndoor\tcar\tmeronym\n",
    )
    .unwrap();

    fs::write(
        corpus.join("entities.tsv"),
        "dog\nanimal\ncat\nwheel\ncar\ndoor\n",
    )
    .unwrap();
    // Entity ids follow line numbers: dog=0, animal=1, cat=2, wheel=3,
    // car=4, door=5.
    fs::write(
        corpus.join("paths.tsv"),
        "0\t1\tdog/NN/nsubj/>_animal/NN/attr/<\t3\n\
         2\t1\tcat/NN/nsubj/>_animal/NN/attr/<\t2\n\
         3\t4\twheel/NN/pobj/<_of/IN/prep/<_car/NN/root/-\t4\n\
         5\t4\tdoor/NN/pobj/<_of/IN/prep/<_car/NN/root/-\t1\n",
    )
    .unwrap();

    fs::write(
        root.join("vectors.txt"),
        "dog 0.4 -0.1\nanimal 0.5 0.0\ncat 0.3 -0.2\nwheel -0.4 0.6\ncar -0.5 0.5\ndoor -0.3 0.4\nof -0.1 0.1\n",
    )
    .unwrap();
}

#[test]
fn trains_selects_and_persists_over_a_real_grid() {
    let root = TempDir::new().unwrap();
    write_fixtures(root.path());

    let assembly = DatasetAssembly::load(&root.path().join("dataset")).unwrap();
    let corpus = FileCorpus::open(&root.path().join("corpus")).unwrap();

    let dataset_keys = assembly.dataset_keys();
    let prepared = nlp::prepare(&corpus, &dataset_keys, &root.path().join("vectors.txt"), 2).unwrap();

    assert_eq!(prepared.instances.len(), 8);
    assert_eq!(prepared.pairs_without_paths, 0);
    assert_eq!(prepared.dropped_paths, 0);

    let (x_train, x_val, x_test) = assembly.slice_instances(&prepared.instances).unwrap();
    assert_eq!(x_train.len(), 4);
    assert_eq!(x_val.len(), 2);
    assert_eq!(x_test.len(), 2);

    let points = sweep::grid(&[0.001], &[0.0, 0.2]);
    let relations = assembly.relations.relations();
    let prefix = root.path().join("model");
    let factory = |point: GridPoint| {
        PathRelationClassifier::new(ClassifierSpec {
            num_pos: prepared.tables.pos.len(),
            num_dep: prepared.tables.dep.len(),
            num_directions: prepared.tables.dir.len(),
            num_relations: relations.len(),
            lemma_embeddings: prepared.word_vectors.clone(),
            relations: relations.to_vec(),
            hyper: point,
            seed: 133,
            max_iterations: 200,
        })
    };

    let outcome = sweep::run_sweep(
        &points,
        factory,
        SweepData {
            x_train,
            y_train: &assembly.y_train,
            x_val,
            y_val: &assembly.y_val,
            x_test,
            y_test: &assembly.y_test,
        },
        relations,
        &prepared.tables,
        &prefix,
    )
    .unwrap();

    // Validation pairs repeat training evidence, so the best point should
    // classify them cleanly.
    assert!(outcome.best_val_f1 > 0.99);
    assert_eq!(outcome.val_scores.len(), 2);

    assert!(prefix.exists());
    assert!(root.path().join("model.0.0").exists());
    assert!(root.path().join("model.0.2").exists());
}
