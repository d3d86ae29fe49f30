use serde::{Deserialize, Serialize};

/// One movie as served to the frontend. `genres` and `languages` are
/// space-delimited tag strings, normalized at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub genres: String,
    pub languages: String,
    pub year: Option<i32>,
    pub rating: f64,
    pub poster_url: String,
    pub industry: String,
    pub cast: String,
}

impl Movie {
    pub fn genre_tags(&self) -> impl Iterator<Item = &str> {
        self.genres.split_whitespace()
    }

    pub fn language_tokens(&self) -> impl Iterator<Item = &str> {
        self.languages.split_whitespace()
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre_tags().any(|g| g == genre)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.language_tokens().any(|l| l == language)
    }

    /// The text the similarity model is trained on.
    pub fn combined_features(&self) -> String {
        format!(
            "{} {} {} {}",
            self.overview, self.genres, self.cast, self.industry
        )
    }
}

/// Titles are matched case-insensitively after trimming.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Collapse the separators seen in the raw data (" | ", ", ") into single
/// spaces so tag strings are uniformly space-delimited.
pub fn normalize_tags(raw: &str) -> String {
    raw.replace(['|', ','], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A language token is kept only if it looks like an actual language name:
/// more than one character, letters (hyphen allowed), no question marks.
pub fn is_clean_language(token: &str) -> bool {
    token.len() > 1
        && !token.contains('?')
        && token.chars().all(|c| c.is_alphabetic() || c == '-')
}
