use serde::{Deserialize, Serialize};

use crate::catalog::Movie;

/// Body of POST /recommend. The selects on the page submit at most one
/// genre/language each, wrapped in single-element arrays.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub movies: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    /// Sent by the form, not used by the query.
    #[serde(default)]
    #[allow(dead_code)]
    pub keyword: String,
}

impl RecommendRequest {
    pub fn searched_title(&self) -> Option<&str> {
        self.movies
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn genre(&self) -> Option<&str> {
        self.genres
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn language(&self) -> Option<&str> {
        self.languages
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// One movie on the wire, for both recommendation and suggestion lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub genres: String,
    pub languages: String,
    pub year: Option<i32>,
    pub rating: f64,
    pub poster_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl MovieDto {
    pub fn from_movie(movie: &Movie, similarity: Option<f64>) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            genres: movie.genres.clone(),
            languages: movie.languages.clone(),
            year: movie.year,
            rating: movie.rating,
            poster_url: movie.poster_url.clone(),
            similarity,
        }
    }
}

/// The two mutually exclusive response forms of POST /recommend.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    NotFound {
        not_found: bool,
        searched_movie: String,
        suggestions: Vec<MovieDto>,
    },
    Recommendations {
        recommendations: Vec<MovieDto>,
        title: String,
    },
}

impl RecommendResponse {
    pub fn not_found(searched_movie: String, suggestions: Vec<MovieDto>) -> Self {
        Self::NotFound {
            not_found: true,
            searched_movie,
            suggestions,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of POST /api/favorites.
#[derive(Debug, Deserialize)]
pub struct FavoriteToggleRequest {
    pub action: String,
    pub movie_id: i64,
    pub movie_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub poster_url: String,
}

/// `favorited` is the authoritative new state; the page applies it instead
/// of guessing which way the toggle went.
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub success: bool,
    pub favorited: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accessors_trim_and_drop_empty() {
        let req: RecommendRequest = serde_json::from_str(
            r#"{"movies": ["  Inception "], "genres": [""], "languages": [], "keyword": ""}"#,
        )
        .unwrap();
        assert_eq!(req.searched_title(), Some("Inception"));
        assert_eq!(req.genre(), None);
        assert_eq!(req.language(), None);
    }

    #[test]
    fn test_request_defaults_for_missing_fields() {
        let req: RecommendRequest = serde_json::from_str(r#"{"movies": ["X"]}"#).unwrap();
        assert!(req.genres.is_empty());
        assert!(req.languages.is_empty());
    }

    #[test]
    fn test_not_found_response_shape() {
        let resp = RecommendResponse::not_found("Ghost Film".to_string(), Vec::new());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["not_found"], true);
        assert_eq!(json["searched_movie"], "Ghost Film");
        assert!(json["suggestions"].is_array());
        assert!(json.get("recommendations").is_none());
    }

    #[test]
    fn test_recommendations_response_shape() {
        let dto = MovieDto {
            id: 1,
            title: "A".to_string(),
            overview: String::new(),
            genres: String::new(),
            languages: String::new(),
            year: None,
            rating: 6.0,
            poster_url: String::new(),
            similarity: Some(87.5),
        };
        let resp = RecommendResponse::Recommendations {
            recommendations: vec![dto],
            title: "Movies similar to \"A\"".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("not_found").is_none());
        assert_eq!(json["recommendations"][0]["similarity"], 87.5);
    }

    #[test]
    fn test_similarity_omitted_when_absent() {
        let movie = Movie {
            id: 9,
            title: "B".to_string(),
            overview: String::new(),
            genres: String::new(),
            languages: String::new(),
            year: None,
            rating: 0.0,
            poster_url: String::new(),
            industry: String::new(),
            cast: String::new(),
        };
        let json = serde_json::to_value(MovieDto::from_movie(&movie, None)).unwrap();
        assert!(json.get("similarity").is_none());
    }
}
