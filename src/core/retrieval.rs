use std::collections::HashMap;

use crate::models::HistoricalEvent;

/// Immutable TF-IDF index snapshot over historical event descriptions
///
/// Built once from the corpus and read-only afterwards, so it can be shared
/// across concurrent scoring runs without locking. Corpus updates build a
/// fresh snapshot that the owner swaps in atomically.
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    events: Vec<HistoricalEvent>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    // Sparse document vectors: (term id, weight) sorted by term id,
    // L2-normalized at build time. Sorted storage keeps dot products
    // deterministic.
    doc_vectors: Vec<Vec<(usize, f64)>>,
}

/// One retrieved historical event with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievedEvent {
    pub index: usize,
    pub similarity: f64,
}

impl TfIdfIndex {
    /// Fit the index over a corpus of historical events
    pub fn build(events: Vec<HistoricalEvent>) -> Self {
        let tokenized: Vec<Vec<String>> = events
            .iter()
            .map(|ev| tokenize(&ev.description))
            .collect();

        // Vocabulary in first-seen order
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                let next_id = vocabulary.len();
                vocabulary.entry(token.clone()).or_insert(next_id);
            }
        }

        // Document frequency per term
        let mut df = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokens {
                let id = vocabulary[token.as_str()];
                if !seen.contains(&id) {
                    df[id] += 1;
                    seen.push(id);
                }
            }
        }

        let n_docs = events.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| {
                if d == 0 {
                    0.0
                } else {
                    (n_docs / d as f64).ln() + 1.0
                }
            })
            .collect();

        let doc_vectors = tokenized
            .iter()
            .map(|tokens| weighted_vector(tokens, &vocabulary, &idf))
            .collect();

        Self {
            events,
            vocabulary,
            idf,
            doc_vectors,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    /// Retrieve the top-k most similar historical events for a query text
    ///
    /// Ordering is deterministic: similarity descending, then corpus
    /// insertion order. Events with zero similarity are not retrieved.
    pub fn retrieve(&self, query: &str, k: usize) -> Vec<RetrievedEvent> {
        if k == 0 || self.events.is_empty() {
            return Vec::new();
        }

        let query_vec = self.query_vector(query);
        if query_vec.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<RetrievedEvent> = self
            .doc_vectors
            .iter()
            .enumerate()
            .filter_map(|(index, doc)| {
                let similarity = sparse_dot(&query_vec, doc);
                if similarity > 0.0 {
                    Some(RetrievedEvent { index, similarity })
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });

        scored.truncate(k);
        scored
    }

    /// Derive the per-venue RAG signal from a retrieval pass
    ///
    /// Each venue appearing among the retrieved events gets the mean
    /// similarity of its events; absent venues simply have no entry and
    /// default to zero at the ranking stage.
    pub fn venue_scores(&self, query: &str, k: usize) -> HashMap<String, f64> {
        let retrieved = self.retrieve(query, k);

        let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
        for hit in &retrieved {
            let venue_id = &self.events[hit.index].venue_id;
            let entry = sums.entry(venue_id.clone()).or_insert((0.0, 0));
            entry.0 += hit.similarity;
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|(venue_id, (sum, count))| (venue_id, sum / count as f64))
            .collect()
    }

    /// Vectorize a query with the fitted vocabulary; out-of-vocabulary
    /// terms contribute nothing
    fn query_vector(&self, text: &str) -> Vec<(usize, f64)> {
        let tokens = tokenize(text);
        weighted_vector(&tokens, &self.vocabulary, &self.idf)
    }
}

/// Tokenize text: lowercase, split on non-alphanumeric, drop short tokens
/// and stopwords. The same policy is applied at indexing and query time.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|s| s.to_lowercase())
        .filter(|s| s.len() >= 2 && !is_stopword(s))
        .collect()
}

fn is_stopword(word: &str) -> bool {
    matches!(
        word,
        "a" | "an"
            | "and"
            | "are"
            | "as"
            | "at"
            | "be"
            | "by"
            | "for"
            | "from"
            | "has"
            | "have"
            | "in"
            | "into"
            | "is"
            | "it"
            | "its"
            | "of"
            | "on"
            | "or"
            | "that"
            | "the"
            | "this"
            | "to"
            | "was"
            | "were"
            | "will"
            | "with"
    )
}

/// Build a sparse L2-normalized TF-IDF vector, sorted by term id
fn weighted_vector(
    tokens: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> Vec<(usize, f64)> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<usize, usize> = HashMap::new();
    let mut in_vocab = 0usize;
    for token in tokens {
        if let Some(&id) = vocabulary.get(token.as_str()) {
            *counts.entry(id).or_insert(0) += 1;
            in_vocab += 1;
        }
    }

    if in_vocab == 0 {
        return Vec::new();
    }

    let total = tokens.len() as f64;
    let mut vector: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(id, count)| (id, (count as f64 / total) * idf[id]))
        .filter(|&(_, w)| w > 0.0)
        .collect();

    vector.sort_by_key(|&(id, _)| id);

    let norm: f64 = vector.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for entry in &mut vector {
            entry.1 /= norm;
        }
    }

    vector
}

/// Dot product of two sorted sparse vectors
///
/// Both sides are unit vectors, so this is the cosine similarity.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    sum
}
