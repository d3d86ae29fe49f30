use rand::seq::SliceRandom;
use rand::Rng;

use super::model::SimilarityModel;
use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy)]
pub struct RecommendOptions {
    /// Neighbors considered for sampling (the head of the top-K list).
    pub pool_size: usize,
    /// How many recommendations a query aims to return.
    pub result_count: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            pool_size: 50,
            result_count: 10,
        }
    }
}

/// A recommendation: a catalog index and its similarity to the seed as a
/// percentage of the best sampled score, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMovie {
    pub index: usize,
    pub similarity: f64,
}

pub fn recommend(
    catalog: &Catalog,
    model: &SimilarityModel,
    titles: &[String],
    genres: &[String],
    languages: &[String],
    opts: RecommendOptions,
) -> Vec<ScoredMovie> {
    recommend_with_rng(
        catalog,
        model,
        titles,
        genres,
        languages,
        opts,
        &mut rand::thread_rng(),
    )
}

/// The query path: look up the first title, sample from the head of its
/// neighbor list for variety, then apply the optional genre/language
/// filters. An unknown title yields an empty result (the caller turns that
/// into the not-found response).
pub fn recommend_with_rng<R: Rng>(
    catalog: &Catalog,
    model: &SimilarityModel,
    titles: &[String],
    genres: &[String],
    languages: &[String],
    opts: RecommendOptions,
    rng: &mut R,
) -> Vec<ScoredMovie> {
    let Some(seed_title) = titles.first() else {
        return Vec::new();
    };
    let Some(seed) = model.lookup_title(seed_title) else {
        return Vec::new();
    };

    let neighbors = model.neighbors_of(seed);
    let slice = &neighbors[..opts.pool_size.min(neighbors.len())];

    let chosen: Vec<_> = slice
        .choose_multiple(rng, opts.result_count.min(slice.len()))
        .collect();

    let max_score = chosen
        .iter()
        .map(|n| n.score)
        .fold(f32::NEG_INFINITY, f32::max);
    let max_score = if max_score > 0.0 { max_score } else { 1.0 };

    let mut results = Vec::with_capacity(chosen.len());
    for neighbor in chosen {
        if neighbor.index as usize == seed || neighbor.score <= 0.0 {
            continue;
        }
        let Some(movie) = catalog.get(neighbor.index as usize) else {
            continue;
        };

        if !genres.is_empty() && !genres.iter().any(|g| movie.has_genre(g)) {
            continue;
        }
        if !languages.is_empty() && !languages.iter().any(|l| movie.has_language(l)) {
            continue;
        }

        let percent = (neighbor.score / max_score) as f64 * 100.0;
        results.push(ScoredMovie {
            index: neighbor.index as usize,
            similarity: (percent * 10.0).round() / 10.0,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Movie;
    use crate::recommend::SimilarityModel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn movie(id: i64, title: &str, overview: &str, genres: &str, languages: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: overview.to_string(),
            genres: genres.to_string(),
            languages: languages.to_string(),
            year: Some(2000),
            rating: 7.0,
            poster_url: String::new(),
            industry: "Hollywood".to_string(),
            cast: "unknown".to_string(),
        }
    }

    fn fixtures() -> (Catalog, SimilarityModel) {
        let catalog = Catalog::new(vec![
            movie(1, "Seed", "heist crew robs a casino vault", "Crime Thriller", "English"),
            movie(2, "Close A", "a crew plans a casino vault heist", "Crime", "English"),
            movie(3, "Close B", "casino robbery heist gone wrong", "Thriller", "French"),
            movie(4, "Far", "two friends hike a quiet mountain", "Drama", "English"),
        ]);
        let model = SimilarityModel::build(&catalog, 50, "fp".to_string());
        (catalog, model)
    }

    #[test]
    fn test_unknown_title_yields_empty() {
        let (catalog, model) = fixtures();
        let mut rng = StdRng::seed_from_u64(1);
        let out = recommend_with_rng(
            &catalog,
            &model,
            &["No Such Movie".to_string()],
            &[],
            &[],
            RecommendOptions::default(),
            &mut rng,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_titles_yields_empty() {
        let (catalog, model) = fixtures();
        let mut rng = StdRng::seed_from_u64(1);
        let out = recommend_with_rng(
            &catalog,
            &model,
            &[],
            &[],
            &[],
            RecommendOptions::default(),
            &mut rng,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_results_exclude_seed_and_stay_in_percent_range() {
        let (catalog, model) = fixtures();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = recommend_with_rng(
                &catalog,
                &model,
                &["seed".to_string()],
                &[],
                &[],
                RecommendOptions::default(),
                &mut rng,
            );
            assert!(!out.is_empty());
            for r in &out {
                assert_ne!(r.index, 0);
                assert!(r.similarity > 0.0 && r.similarity <= 100.0);
            }
            // the full sample includes every positive-score neighbor, so the
            // best of them is the 100% reference
            assert!(out.iter().any(|r| r.similarity == 100.0));
        }
    }

    #[test]
    fn test_genre_filter() {
        let (catalog, model) = fixtures();
        let mut rng = StdRng::seed_from_u64(3);
        let out = recommend_with_rng(
            &catalog,
            &model,
            &["Seed".to_string()],
            &["Thriller".to_string()],
            &[],
            RecommendOptions::default(),
            &mut rng,
        );
        for r in &out {
            assert!(catalog.get(r.index).unwrap().has_genre("Thriller"));
        }
    }

    #[test]
    fn test_language_filter() {
        let (catalog, model) = fixtures();
        let mut rng = StdRng::seed_from_u64(3);
        let out = recommend_with_rng(
            &catalog,
            &model,
            &["Seed".to_string()],
            &[],
            &["French".to_string()],
            RecommendOptions::default(),
            &mut rng,
        );
        for r in &out {
            assert!(catalog.get(r.index).unwrap().has_language("French"));
        }
    }

    #[test]
    fn test_pool_size_limits_candidates() {
        let (catalog, model) = fixtures();
        let mut rng = StdRng::seed_from_u64(5);
        let opts = RecommendOptions {
            pool_size: 1,
            result_count: 10,
        };
        let out = recommend_with_rng(
            &catalog,
            &model,
            &["Seed".to_string()],
            &[],
            &[],
            opts,
            &mut rng,
        );
        assert!(out.len() <= 1);
    }
}
