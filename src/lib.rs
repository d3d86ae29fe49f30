pub mod catalog;
pub mod config;
pub mod db;
pub mod middleware;
pub mod recommend;
pub mod server;
pub mod web;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use catalog::{Catalog, PosterResolver};
use db::SqliteRepository;
use recommend::SimilarityModel;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
    #[error("Model error: {0}")]
    Model(#[from] recommend::ModelError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str) -> Result<(), ServerError> {
    let config = config::Config::from_file(config_path)?;

    info!("Using config file: {}", config_path);
    info!("Server name: {}", config.server.name);

    let db_path = config
        .get_database_path()
        .ok_or_else(|| ServerError::Server("No database path configured".to_string()))?;

    info!("Opening database at {}", db_path);
    let db = Arc::new(SqliteRepository::new(&db_path).await?);

    let dataset_path = Path::new(&config.catalog.dataset);
    let catalog = Arc::new(Catalog::load(dataset_path)?);
    info!("Catalog ready. Total movies: {}", catalog.len());

    let fingerprint = recommend::fingerprint_file(dataset_path)?;
    let model = SimilarityModel::load(Path::new(&config.model.path))?;
    model.verify(&catalog, &fingerprint)?;
    info!(
        "Similarity model loaded ({} movies, top-{})",
        model.movie_count, model.top_k
    );

    let posters = Arc::new(PosterResolver::new(config.posters.check));

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let has_tls = config.listen.tlscert.is_some() && config.listen.tlskey.is_some();

    let state = server::AppState::new(config.clone(), db, catalog, Arc::new(model), posters);
    let app = server::build_router(state);

    if has_tls {
        let cert_path = config.listen.tlscert.as_ref().unwrap();
        let key_path = config.listen.tlskey.as_ref().unwrap();

        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
