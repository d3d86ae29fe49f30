pub mod dataset;
pub mod movie;
pub mod poster;
pub mod store;
pub mod summary;

pub use movie::{normalize_tags, normalize_title, Movie};
pub use poster::PosterResolver;
pub use store::Catalog;
pub use summary::{summarize, DatasetSummary};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read dataset {0}: {1}")]
    Read(String, std::io::Error),
    #[error("Failed to parse dataset {0}: {1}")]
    Parse(String, serde_json::Error),
    #[error("Dataset {0} contains no movies")]
    Empty(String),
}
