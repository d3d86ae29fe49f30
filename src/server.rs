use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::catalog::{Catalog, PosterResolver};
use crate::config::Config;
use crate::db::SqliteRepository;
use crate::recommend::{RecommendOptions, SimilarityModel};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<SqliteRepository>,
    pub catalog: Arc<Catalog>,
    pub model: Arc<SimilarityModel>,
    pub posters: Arc<PosterResolver>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Arc<SqliteRepository>,
        catalog: Arc<Catalog>,
        model: Arc<SimilarityModel>,
        posters: Arc<PosterResolver>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            db,
            catalog,
            model,
            posters,
        }
    }

    pub fn recommend_opts(&self) -> RecommendOptions {
        RecommendOptions {
            pool_size: self.config.recommend.pool_size,
            result_count: self.config.recommend.result_count,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(crate::web::home))
        .route("/recommend", post(crate::web::recommend))
        .route(
            "/api/favorites",
            post(crate::web::toggle_favorite).get(crate::web::list_favorites),
        )
        .route("/summary", get(crate::web::summary))
        .route("/health", get(crate::web::health))
        .route("/robots.txt", get(robots_txt_handler))
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.nest_service("/static", ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // OPTIONS must succeed for CORS preflight even on unmatched paths
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
