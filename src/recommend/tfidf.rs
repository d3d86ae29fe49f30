use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// English stop words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself",
    "yourselves",
];

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    // Two or more word characters, as sklearn's default token pattern.
    TOKEN_RE.get_or_init(|| Regex::new(r"[a-z0-9][a-z0-9]+").unwrap())
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercased word tokens with stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_re()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|t| !is_stop_word(t))
        .collect()
}

/// A TF-IDF weighted, L2-normalized document vector. Term ids are sorted
/// so cosine is a linear merge.
#[derive(Debug, Clone)]
pub struct SparseVector {
    pub terms: Vec<(u32, f32)>,
}

pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let mut dot = 0.0f32;
    let (mut i, mut j) = (0, 0);
    while i < a.terms.len() && j < b.terms.len() {
        let (ta, wa) = a.terms[i];
        let (tb, wb) = b.terms[j];
        match ta.cmp(&tb) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += wa * wb;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
}

impl TfIdfVectorizer {
    /// Learn the vocabulary (capped at `max_features` terms, most frequent
    /// first) and smoothed IDF weights from the corpus.
    pub fn fit(documents: &[String], max_features: usize) -> Self {
        let mut corpus_counts: HashMap<String, u64> = HashMap::new();
        let mut doc_counts: HashMap<String, u32> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            for token in &tokens {
                *corpus_counts.entry(token.clone()).or_default() += 1;
            }
            let unique: std::collections::HashSet<&str> =
                tokens.iter().map(|t| t.as_str()).collect();
            for token in unique {
                *doc_counts.entry(token.to_string()).or_default() += 1;
            }
        }

        let mut terms: Vec<(String, u64)> = corpus_counts.into_iter().collect();
        // Most frequent first; ties broken alphabetically for determinism.
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(max_features);
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n_docs = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (id, (term, _)) in terms.into_iter().enumerate() {
            let df = doc_counts.get(&term).copied().unwrap_or(0) as f32;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, id as u32);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for token in tokenize(document) {
            if let Some(&id) = self.vocabulary.get(&token) {
                *counts.entry(id).or_default() += 1.0;
            }
        }

        let mut terms: Vec<(u32, f32)> = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id as usize]))
            .collect();
        terms.sort_unstable_by_key(|&(id, _)| id);

        let norm = terms.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in terms.iter_mut() {
                *w /= norm;
            }
        }

        SparseVector { terms }
    }
}
