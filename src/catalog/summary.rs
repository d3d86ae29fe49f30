use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::movie::is_clean_language;
use super::store::Catalog;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_unique_languages: usize,
    pub total_unique_genres: usize,
    pub year_range: YearRange,
    pub industry_counts: BTreeMap<String, usize>,
    pub language_counts: BTreeMap<String, usize>,
    pub genre_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

/// High-level statistics over the whole catalog.
pub fn summarize(catalog: &Catalog) -> DatasetSummary {
    let mut language_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut genre_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut industry_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut min_year: Option<i32> = None;
    let mut max_year: Option<i32> = None;

    for movie in catalog.movies() {
        for token in movie.language_tokens() {
            if is_clean_language(token) {
                *language_counts.entry(token.to_string()).or_default() += 1;
            }
        }
        for tag in movie.genre_tags() {
            *genre_counts.entry(tag.to_string()).or_default() += 1;
        }
        if !movie.industry.is_empty() {
            *industry_counts.entry(movie.industry.clone()).or_default() += 1;
        }
        if let Some(year) = movie.year {
            min_year = Some(min_year.map_or(year, |y| y.min(year)));
            max_year = Some(max_year.map_or(year, |y| y.max(year)));
        }
    }

    DatasetSummary {
        total_unique_languages: language_counts.len(),
        total_unique_genres: genre_counts.len(),
        year_range: YearRange {
            start: min_year,
            end: max_year,
        },
        industry_counts,
        language_counts,
        genre_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Movie;

    #[test]
    fn test_summarize() {
        let catalog = Catalog::new(vec![
            Movie {
                id: 1,
                title: "A".to_string(),
                overview: String::new(),
                genres: "Action Drama".to_string(),
                languages: "English".to_string(),
                year: Some(1994),
                rating: 8.0,
                poster_url: String::new(),
                industry: "Hollywood".to_string(),
                cast: String::new(),
            },
            Movie {
                id: 2,
                title: "B".to_string(),
                overview: String::new(),
                genres: "Drama".to_string(),
                languages: "Hindi ??".to_string(),
                year: Some(2010),
                rating: 7.0,
                poster_url: String::new(),
                industry: "Indian Cinema".to_string(),
                cast: String::new(),
            },
            Movie {
                id: 3,
                title: "C".to_string(),
                overview: String::new(),
                genres: String::new(),
                languages: "English".to_string(),
                year: None,
                rating: 0.0,
                poster_url: String::new(),
                industry: "Hollywood".to_string(),
                cast: String::new(),
            },
        ]);

        let summary = summarize(&catalog);
        assert_eq!(summary.total_unique_languages, 2);
        assert_eq!(summary.total_unique_genres, 2);
        assert_eq!(summary.year_range.start, Some(1994));
        assert_eq!(summary.year_range.end, Some(2010));
        assert_eq!(summary.language_counts["English"], 2);
        assert_eq!(summary.genre_counts["Drama"], 2);
        assert_eq!(summary.industry_counts["Hollywood"], 2);
    }
}
