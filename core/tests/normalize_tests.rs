use pesona_core::normalize::{Normalizer, SnowballNormalizer};

#[test]
fn english_normalizes_and_stems() {
    let n = SnowballNormalizer::english();
    let words = n.normalize("Running Runners RUN! The menu.");
    assert!(words.contains(&"run".to_string()));
    assert!(!words.contains(&"the".to_string()));
    assert!(words.contains(&"menu".to_string()));
}

#[test]
fn indonesian_filters_stopwords() {
    let n = SnowballNormalizer::indonesian();
    let words = n.normalize("Danau Toba adalah danau terbesar yang ada di Sumatera");
    assert!(!words.contains(&"adalah".to_string()));
    assert!(!words.contains(&"yang".to_string()));
    assert!(!words.contains(&"di".to_string()));
    assert_eq!(words.iter().filter(|w| *w == "danau").count(), 2);
}

#[test]
fn tokens_start_with_a_letter() {
    let n = SnowballNormalizer::indonesian();
    let words = n.normalize("2024 pantai! (kuta)");
    assert_eq!(words, vec!["pantai", "kuta"]);
}

#[test]
fn corpus_and_query_share_the_contract() {
    // The same normalizer output feeds both sides of the ranker.
    let n = SnowballNormalizer::english();
    let doc = n.normalize("Beautiful beaches of Bali");
    let query = n.normalize("beach");
    assert!(query.iter().all(|q| doc.contains(q)));
}
