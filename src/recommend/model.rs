use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use super::tfidf::{cosine, TfIdfVectorizer};
use super::ModelError;
use crate::catalog::{normalize_title, Catalog};

/// Vocabulary cap used when building the model.
pub const MAX_FEATURES: usize = 20_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Neighbor {
    pub index: u32,
    pub score: f32,
}

/// The precomputed similarity model: for every movie, its top-K cosine
/// neighbors (best first) over TF-IDF vectors of the combined features,
/// plus a normalized-title lookup. Persisted as JSON by `cinematch-train`
/// and tied to the dataset it was built from by a content fingerprint.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityModel {
    pub dataset_fingerprint: String,
    pub movie_count: usize,
    pub top_k: usize,
    pub title_index: HashMap<String, usize>,
    pub neighbors: Vec<Vec<Neighbor>>,
}

impl SimilarityModel {
    pub fn build(catalog: &Catalog, top_k: usize, dataset_fingerprint: String) -> Self {
        let documents: Vec<String> = catalog
            .movies()
            .iter()
            .map(|m| m.combined_features())
            .collect();

        info!("Creating TF-IDF matrix over {} movies", documents.len());
        let vectorizer = TfIdfVectorizer::fit(&documents, MAX_FEATURES);
        let vectors: Vec<_> = documents.iter().map(|d| vectorizer.transform(d)).collect();

        info!("Building top-{} similarity index", top_k);
        let mut neighbors = Vec::with_capacity(vectors.len());
        for (i, vector) in vectors.iter().enumerate() {
            let mut scored: Vec<Neighbor> = vectors
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, other)| Neighbor {
                    index: j as u32,
                    score: cosine(vector, other),
                })
                .filter(|n| n.score > 0.0)
                .collect();
            scored.sort_unstable_by(|a, b| b.score.total_cmp(&a.score));
            scored.truncate(top_k);
            neighbors.push(scored);

            if i > 0 && i % 2000 == 0 {
                info!("Processed {}/{} movies", i, vectors.len());
            }
        }

        let mut title_index = HashMap::with_capacity(catalog.len());
        for (i, movie) in catalog.movies().iter().enumerate() {
            title_index.entry(normalize_title(&movie.title)).or_insert(i);
        }

        Self {
            dataset_fingerprint,
            movie_count: catalog.len(),
            top_k,
            title_index,
            neighbors,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let display = path.display().to_string();
        let json = serde_json::to_string(self).map_err(|e| ModelError::Parse(display.clone(), e))?;
        std::fs::write(path, json).map_err(|e| ModelError::Write(display, e))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ModelError::Missing(display));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ModelError::Read(display.clone(), e))?;
        serde_json::from_str(&content).map_err(|e| ModelError::Parse(display, e))
    }

    /// A loaded model is only valid against the dataset it was trained on.
    pub fn verify(&self, catalog: &Catalog, dataset_fingerprint: &str) -> Result<(), ModelError> {
        if self.movie_count != catalog.len() {
            return Err(ModelError::Mismatch(format!(
                "model has {} movies, dataset has {}",
                self.movie_count,
                catalog.len()
            )));
        }
        if self.dataset_fingerprint != dataset_fingerprint {
            return Err(ModelError::Mismatch(
                "dataset fingerprint changed since training".to_string(),
            ));
        }
        Ok(())
    }

    pub fn lookup_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(&normalize_title(title)).copied()
    }

    pub fn neighbors_of(&self, index: usize) -> &[Neighbor] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// sha-256 of the dataset file contents, hex encoded.
pub fn fingerprint_file(path: &Path) -> Result<String, ModelError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ModelError::Read(path.display().to_string(), e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
