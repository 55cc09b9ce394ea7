use serde::Serialize;
use std::collections::HashMap;

/// BM25 tuning constants: `k1` controls term-frequency saturation, `b`
/// controls how strongly scores are normalized by document length.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }
}

/// One row of a per-term score breakdown, as produced by [`Bm25::explain`].
#[derive(Debug, Clone, Serialize)]
pub struct TermContribution {
    pub doc: usize,
    pub term: String,
    pub tf: u32,
    pub idf: f64,
    pub k: f64,
    pub score: f64,
}

/// BM25 ranker over a fixed corpus of pre-tokenized documents.
///
/// Documents are identified by their 0-based position in the corpus passed
/// to [`Bm25::build`]; the corpus is never mutated after construction, so a
/// built ranker is safe to share across threads for concurrent queries.
pub struct Bm25 {
    params: Bm25Params,
    doc_count: usize,
    avgdl: f64,
    doc_lens: Vec<usize>,
    term_freqs: Vec<HashMap<String, u32>>,
    doc_freqs: HashMap<String, u32>,
}

impl Bm25 {
    /// Builds the ranker with the standard constants (k1 = 1.2, b = 0.75).
    pub fn build(corpus: &[Vec<String>]) -> Self {
        Self::with_params(corpus, Bm25Params::default())
    }

    /// Builds the ranker, precomputing per-document lengths and term
    /// frequencies plus corpus-wide document frequencies. An empty corpus is
    /// fine: N = 0 and avgdl = 0 are stored and ranking returns nothing.
    pub fn with_params(corpus: &[Vec<String>], params: Bm25Params) -> Self {
        let doc_count = corpus.len();
        let mut doc_lens = Vec::with_capacity(doc_count);
        let mut term_freqs: Vec<HashMap<String, u32>> = Vec::with_capacity(doc_count);
        let mut doc_freqs: HashMap<String, u32> = HashMap::new();
        let mut total_tokens = 0usize;

        for tokens in corpus {
            doc_lens.push(tokens.len());
            total_tokens += tokens.len();
            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *tf.entry(token.clone()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            term_freqs.push(tf);
        }

        let avgdl = if doc_count > 0 {
            total_tokens as f64 / doc_count as f64
        } else {
            0.0
        };
        tracing::debug!(doc_count, num_terms = doc_freqs.len(), avgdl, "bm25 ranker built");

        Self { params, doc_count, avgdl, doc_lens, term_freqs, doc_freqs }
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    pub fn avgdl(&self) -> f64 {
        self.avgdl
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Classic BM25 IDF: `ln(N - df + 0.5) - ln(df + 0.5)`.
    ///
    /// Goes negative for terms present in more than half the corpus; that is
    /// accepted behavior and never clamped. `None` for terms the corpus has
    /// never seen (df = 0), which contribute nothing to any score.
    pub fn idf(&self, term: &str) -> Option<f64> {
        let df = *self.doc_freqs.get(term)? as f64;
        let n = self.doc_count as f64;
        Some((n - df + 0.5).ln() - (df + 0.5).ln())
    }

    /// Total BM25 score of every document against `query`, in corpus order.
    ///
    /// The query token sequence is walked as given, so a token repeated in
    /// the query accumulates its contribution once per occurrence. Documents
    /// sharing nothing with the query score 0.0 and are kept; filtering for
    /// relevance is the caller's concern, not the ranker's.
    pub fn scores(&self, query: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0; self.doc_count];
        if self.doc_count == 0 || query.is_empty() {
            return scores;
        }
        let Bm25Params { k1, b } = self.params;
        for term in query {
            let idf = match self.idf(term) {
                Some(v) => v,
                None => continue,
            };
            for doc in 0..self.doc_count {
                let tf = self.term_freqs[doc].get(term).copied().unwrap_or(0) as f64;
                if tf == 0.0 {
                    continue;
                }
                let k = k1 * (1.0 - b + b * (self.doc_lens[doc] as f64 / self.avgdl));
                scores[doc] += idf * tf * (k1 + 1.0) / (tf + k);
            }
        }
        scores
    }

    /// Ranks the whole corpus against `query` and returns the first `top_k`
    /// document indices by descending score. Score ties keep corpus order,
    /// so output is deterministic. Empty corpus, empty query, or
    /// `top_k == 0` all yield an empty result; `top_k > N` returns all N.
    pub fn ranked(&self, query: &[String], top_k: usize) -> Vec<usize> {
        if self.doc_count == 0 || query.is_empty() || top_k == 0 {
            return Vec::new();
        }
        let scores = self.scores(query);
        let mut order: Vec<usize> = (0..self.doc_count).collect();
        // sort_by is stable: equal scores retain corpus-index order.
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order.truncate(top_k);
        order
    }

    /// Per-term breakdown of `query` against every document, one row per
    /// document and distinct in-vocabulary query term. Rows with tf = 0 are
    /// included (their contribution is 0), so the full arithmetic behind a
    /// ranking can be inspected.
    pub fn explain(&self, query: &[String]) -> Vec<TermContribution> {
        let mut rows = Vec::new();
        if self.doc_count == 0 {
            return rows;
        }
        let Bm25Params { k1, b } = self.params;
        let mut terms: Vec<&String> = Vec::new();
        for term in query {
            if self.doc_freqs.contains_key(term) && !terms.contains(&term) {
                terms.push(term);
            }
        }
        for doc in 0..self.doc_count {
            let k = k1 * (1.0 - b + b * (self.doc_lens[doc] as f64 / self.avgdl));
            for &term in &terms {
                let idf = self.idf(term).unwrap_or(0.0);
                let tf = self.term_freqs[doc].get(term).copied().unwrap_or(0);
                let score = idf * tf as f64 * (k1 + 1.0) / (tf as f64 + k);
                rows.push(TermContribution {
                    doc,
                    term: term.clone(),
                    tf,
                    idf,
                    k,
                    score,
                });
            }
        }
        rows
    }
}
