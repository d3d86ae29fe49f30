use axum::{extract::State, http::StatusCode, response::Html, Json};
use tracing::{error, info};

use super::page::{render_index, PageData};
use super::render::{render_cards, results_title};
use super::types::*;
use crate::catalog::{summarize, DatasetSummary, Movie};
use crate::db::sqlite::DEFAULT_USER_ID;
use crate::db::{Favorite, FavoriteRepo};
use crate::recommend::recommend as run_query;
use crate::server::AppState;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let picks = state.catalog.featured_picks();
    let picks = if picks.is_empty() {
        state.catalog.random_movies(10)
    } else {
        picks
    };

    let featured = to_dtos(&state, &picks).await;

    let data = PageData {
        server_name: state.config.server.name.clone(),
        titles: state
            .catalog
            .all_titles()
            .into_iter()
            .map(str::to_string)
            .collect(),
        genres: state.catalog.all_genres(),
        languages: state.catalog.all_languages(),
        featured_cards: render_cards(&featured),
    };

    Html(render_index(&data))
}

pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(name) = request.searched_title() else {
        return Err(bad_request("No movie selected"));
    };
    let name = name.to_string();

    let genres: Vec<String> = request
        .genres
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();
    let languages: Vec<String> = request
        .languages
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    info!(movie = %name, "recommendation request");

    let scored = run_query(
        &state.catalog,
        &state.model,
        &request.movies,
        &genres,
        &languages,
        state.recommend_opts(),
    );

    if scored.is_empty() {
        let picks = state.catalog.featured_picks();
        let suggestions = to_dtos(&state, &picks).await;
        return Ok(Json(RecommendResponse::not_found(name, suggestions)));
    }

    let mut recommendations = Vec::with_capacity(scored.len());
    for entry in &scored {
        if let Some(movie) = state.catalog.get(entry.index) {
            recommendations.push(to_dto(&state, movie, Some(entry.similarity)).await);
        }
    }

    let title = results_title(&name, request.genre(), request.language());
    Ok(Json(RecommendResponse::Recommendations {
        recommendations,
        title,
    }))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(request): Json<FavoriteToggleRequest>,
) -> Result<Json<FavoriteToggleResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.action != "toggle" {
        return Err(bad_request("Unsupported action"));
    }

    let favorite = Favorite {
        user_id: DEFAULT_USER_ID,
        movie_id: request.movie_id,
        movie_title: request.movie_title,
        overview: request.overview,
        genres: request.genres,
        year: request.year,
        rating: request.rating,
        poster_url: request.poster_url,
        created: None,
    };

    match state.db.toggle_favorite(&favorite).await {
        Ok(favorited) => Ok(Json(FavoriteToggleResponse {
            success: true,
            favorited,
        })),
        Err(e) => {
            error!("Failed to toggle favorite {}: {}", favorite.movie_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update favorites".to_string(),
                }),
            ))
        }
    }
}

pub async fn list_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<Favorite>>, StatusCode> {
    state
        .db
        .list_favorites(DEFAULT_USER_ID)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to list favorites: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub async fn summary(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(summarize(&state.catalog))
}

async fn to_dto(state: &AppState, movie: &Movie, similarity: Option<f64>) -> MovieDto {
    let mut dto = MovieDto::from_movie(movie, similarity);
    dto.poster_url = state.posters.resolve(&movie.poster_url).await;
    dto
}

async fn to_dtos(state: &AppState, movies: &[&Movie]) -> Vec<MovieDto> {
    let mut dtos = Vec::with_capacity(movies.len());
    for movie in movies {
        dtos.push(to_dto(state, movie, None).await);
    }
    dtos
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
