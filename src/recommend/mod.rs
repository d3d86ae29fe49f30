pub mod engine;
pub mod model;
pub mod tfidf;

pub use engine::{recommend, RecommendOptions, ScoredMovie};
pub use model::{fingerprint_file, Neighbor, SimilarityModel};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not found at {0}. Run cinematch-train first.")]
    Missing(String),
    #[error("Failed to read model {0}: {1}")]
    Read(String, std::io::Error),
    #[error("Failed to write model {0}: {1}")]
    Write(String, std::io::Error),
    #[error("Failed to parse model {0}: {1}")]
    Parse(String, serde_json::Error),
    #[error("Model does not match the dataset: {0}")]
    Mismatch(String),
}
