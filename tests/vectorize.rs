use lexrel::nlp::{
    index::SymbolIndex,
    vectorizer::{edge_lemma, vectorize_path},
};

fn lemma_index(words: &[&str]) -> SymbolIndex {
    let mut index = SymbolIndex::with_sentinel();
    for word in words {
        index.lookup_or_insert(word);
    }
    index
}

#[test]
fn vectorizes_every_edge_in_order() {
    let lemmas = lemma_index(&["dog", "animal"]);
    let mut pos = SymbolIndex::with_sentinel();
    let mut dep = SymbolIndex::with_sentinel();
    let mut dir = SymbolIndex::with_sentinel();

    let path = vectorize_path("dog/NN/nsubj/>_animal/NN/attr/<", &lemmas, &mut pos, &mut dep, &mut dir)
        .expect("both lemmas are in vocabulary");

    assert_eq!(path.len(), 2);
    assert_eq!(path.edges[0].lemma, lemmas.get("dog").unwrap());
    assert_eq!(path.edges[1].lemma, lemmas.get("animal").unwrap());
    // Both edges share the NN tag, so the pos table grew by exactly one.
    assert_eq!(path.edges[0].pos, path.edges[1].pos);
    assert_eq!(pos.len(), 2);
    assert_eq!(dep.len(), 3);
    assert_eq!(dir.len(), 3);
}

#[test]
fn one_oov_lemma_voids_the_whole_path() {
    let lemmas = lemma_index(&["dog"]);
    let mut pos = SymbolIndex::with_sentinel();
    let mut dep = SymbolIndex::with_sentinel();
    let mut dir = SymbolIndex::with_sentinel();

    let path = vectorize_path(
        "dog/NN/nsubj/>_animal/NN/attr/<",
        &lemmas,
        &mut pos,
        &mut dep,
        &mut dir,
    );
    assert!(path.is_none());
}

#[test]
fn rejects_empty_and_malformed_paths() {
    let lemmas = lemma_index(&["dog"]);
    let mut pos = SymbolIndex::with_sentinel();
    let mut dep = SymbolIndex::with_sentinel();
    let mut dir = SymbolIndex::with_sentinel();

    assert!(vectorize_path("", &lemmas, &mut pos, &mut dep, &mut dir).is_none());
    // Missing the direction field.
    assert!(vectorize_path("dog/NN/nsubj", &lemmas, &mut pos, &mut dep, &mut dir).is_none());
    // One field too many.
    assert!(vectorize_path("dog/NN/nsubj/>/extra", &lemmas, &mut pos, &mut dep, &mut dir).is_none());
}

#[test]
fn edge_lemma_extracts_first_field() {
    assert_eq!(edge_lemma("dog/NN/nsubj/>"), Some("dog"));
    assert_eq!(edge_lemma("/NN/nsubj/>"), None);
}
