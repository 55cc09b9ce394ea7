use criterion::{criterion_group, criterion_main, Criterion};
use pesona_core::Bm25;

const VOCAB: &[&str] = &[
    "pantai", "gunung", "candi", "kuliner", "danau", "wisata", "indah", "bali",
    "jawa", "sumatera", "pedas", "murah", "lezat", "sate", "kopi", "pulau",
    "air", "terjun", "pasir", "putih", "taman", "nasional", "khas", "kota",
];

fn synthetic_corpus(docs: usize, len: usize) -> Vec<Vec<String>> {
    (0..docs)
        .map(|i| {
            (0..len)
                .map(|j| VOCAB[(i * 7 + j * 3) % VOCAB.len()].to_string())
                .collect()
        })
        .collect()
}

fn bench_ranked(c: &mut Criterion) {
    let corpus = synthetic_corpus(2000, 12);
    let bm25 = Bm25::build(&corpus);
    let query: Vec<String> = ["wisata", "pantai", "indah", "bali"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    c.bench_function("ranked_2000_docs", |b| b.iter(|| bm25.ranked(&query, 10)));
}

fn bench_build(c: &mut Criterion) {
    let corpus = synthetic_corpus(500, 12);
    c.bench_function("build_500_docs", |b| b.iter(|| Bm25::build(&corpus)));
}

criterion_group!(benches, bench_ranked, bench_build);
criterion_main!(benches);
