use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::movie::{normalize_tags, Movie};
use super::CatalogError;

/// One record of the dataset file. The raw data is messy: numeric columns
/// arrive as numbers, floats, strings like "1999.0", "nan", or are missing
/// entirely, so everything questionable comes in as a loose `Value`.
#[derive(Debug, Deserialize)]
struct RawMovie {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    languages: Option<String>,
    #[serde(default)]
    release_year: Value,
    #[serde(default)]
    vote_average: Value,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    cast: Option<String>,
}

/// Load the dataset file: a JSON array of movie records. Duplicate titles
/// are dropped, first occurrence wins.
pub fn load_dataset(path: &Path) -> Result<Vec<Movie>, CatalogError> {
    let display = path.display().to_string();
    let content =
        std::fs::read_to_string(path).map_err(|e| CatalogError::Read(display.clone(), e))?;

    let raw: Vec<RawMovie> =
        serde_json::from_str(&content).map_err(|e| CatalogError::Parse(display.clone(), e))?;

    let mut seen_titles = HashSet::new();
    let mut movies = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;

    for record in raw {
        let title = match record.title {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => "Unknown Movie".to_string(),
        };

        if !seen_titles.insert(title.to_lowercase()) {
            skipped += 1;
            continue;
        }

        let id = safe_int(&record.id).unwrap_or_else(|| synthesize_id(&title));

        movies.push(Movie {
            id,
            title,
            overview: record.overview.unwrap_or_default(),
            genres: normalize_tags(record.genres.as_deref().unwrap_or("")),
            languages: {
                let langs = normalize_tags(record.languages.as_deref().unwrap_or(""));
                if langs.is_empty() {
                    "English".to_string()
                } else {
                    langs
                }
            },
            year: safe_int(&record.release_year).map(|y| y as i32),
            rating: safe_float(&record.vote_average).unwrap_or(0.0),
            poster_url: record.poster_url.unwrap_or_default().trim().to_string(),
            industry: match record.industry {
                Some(i) if !i.trim().is_empty() => i.trim().to_string(),
                _ => "Hollywood".to_string(),
            },
            cast: record.cast.unwrap_or_else(|| "unknown".to_string()),
        });
    }

    if skipped > 0 {
        warn!("Dropped {} duplicate titles from {}", skipped, display);
    }
    if movies.is_empty() {
        return Err(CatalogError::Empty(display));
    }

    info!("Loaded {} movies from {}", movies.len(), display);
    Ok(movies)
}

/// Convert a loose JSON value to an integer, tolerating floats, numeric
/// strings ("1999", "1999.0"), and treating null/NaN/empty as missing.
pub fn safe_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

pub fn safe_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return None;
            }
            s.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Stable id for rows the dataset shipped without one, derived from the
/// title. Kept positive so it round-trips through the JSON wire and sqlite.
fn synthesize_id(title: &str) -> i64 {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    (i64::from_be_bytes(bytes) & i64::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int(&json!(42)), Some(42));
        assert_eq!(safe_int(&json!(1999.0)), Some(1999));
        assert_eq!(safe_int(&json!("1999")), Some(1999));
        assert_eq!(safe_int(&json!("1999.0")), Some(1999));
        assert_eq!(safe_int(&json!("nan")), None);
        assert_eq!(safe_int(&json!("")), None);
        assert_eq!(safe_int(&json!(null)), None);
        assert_eq!(safe_int(&json!("garbage")), None);
    }

    #[test]
    fn test_safe_float() {
        assert_eq!(safe_float(&json!(7.5)), Some(7.5));
        assert_eq!(safe_float(&json!("7.5")), Some(7.5));
        assert_eq!(safe_float(&json!("NaN")), None);
        assert_eq!(safe_float(&json!(null)), None);
    }

    #[test]
    fn test_synthesized_ids_are_stable_and_positive() {
        let a = synthesize_id("Some Movie");
        let b = synthesize_id("Some Movie");
        let c = synthesize_id("Another Movie");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a > 0);
    }

    #[test]
    fn test_load_dataset_applies_defaults_and_dedup() {
        let dir = std::env::temp_dir().join("cinematch-dataset-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("movies.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "title": "First", "overview": "o", "genres": "Action | Drama",
                 "release_year": "1999.0", "vote_average": 7.1, "languages": "English, French"},
                {"title": "first", "overview": "dup"},
                {"title": "Second", "release_year": "nan"}
            ]"#,
        )
        .unwrap();

        let movies = load_dataset(&path).unwrap();
        assert_eq!(movies.len(), 2);

        let first = &movies[0];
        assert_eq!(first.genres, "Action Drama");
        assert_eq!(first.languages, "English French");
        assert_eq!(first.year, Some(1999));

        let second = &movies[1];
        assert_eq!(second.year, None);
        assert_eq!(second.languages, "English");
        assert_eq!(second.industry, "Hollywood");
        assert!(second.id > 0);
    }
}
