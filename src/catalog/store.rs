use std::collections::{HashMap, HashSet};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use super::dataset::load_dataset;
use super::movie::{is_clean_language, normalize_title, Movie};
use super::CatalogError;

/// Number of movies a featured set aims for.
const FEATURED_COUNT: usize = 10;
/// How many of those come from the top-rated pool.
const FEATURED_TOP_PICKS: usize = 6;
/// Size of the top-rated pool the picks are drawn from.
const FEATURED_TOP_POOL: usize = 100;

/// The in-memory movie catalog. Loaded once at startup; lookups are by
/// normalized title.
pub struct Catalog {
    movies: Vec<Movie>,
    title_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        for (i, movie) in movies.iter().enumerate() {
            title_index.entry(normalize_title(&movie.title)).or_insert(i);
        }
        Self {
            movies,
            title_index,
        }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self::new(load_dataset(path)?))
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn find_by_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(&normalize_title(title)).copied()
    }

    /// All titles, sorted, for the search input's datalist.
    pub fn all_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.movies.iter().map(|m| m.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }

    pub fn all_genres(&self) -> Vec<String> {
        let mut set = HashSet::new();
        for movie in &self.movies {
            for tag in movie.genre_tags() {
                set.insert(tag.to_string());
            }
        }
        let mut genres: Vec<String> = set.into_iter().collect();
        genres.sort_unstable();
        genres
    }

    pub fn all_languages(&self) -> Vec<String> {
        let mut set = HashSet::new();
        for movie in &self.movies {
            for token in movie.language_tokens() {
                if is_clean_language(token) {
                    set.insert(token.to_string());
                }
            }
        }
        let mut languages: Vec<String> = set.into_iter().collect();
        languages.sort_unstable();
        languages
    }

    pub fn random_movies(&self, count: usize) -> Vec<&Movie> {
        self.random_movies_with_rng(count, &mut rand::thread_rng())
    }

    pub fn random_movies_with_rng<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<&Movie> {
        self.movies
            .choose_multiple(rng, count.min(self.movies.len()))
            .collect()
    }

    /// A varied featured set drawn from one random language: up to 6 picks
    /// from the top-100-by-rating pool of that language, filled to 10 with
    /// random picks from the rest, shuffled.
    pub fn featured_picks(&self) -> Vec<&Movie> {
        self.featured_picks_with_rng(&mut rand::thread_rng())
    }

    pub fn featured_picks_with_rng<R: Rng>(&self, rng: &mut R) -> Vec<&Movie> {
        let languages = self.all_languages();
        let Some(language) = languages.choose(rng) else {
            return Vec::new();
        };

        let lang_movies: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|m| m.has_language(language))
            .collect();

        let total = FEATURED_COUNT.min(lang_movies.len());
        if total == 0 {
            return Vec::new();
        }

        let mut top_pool = lang_movies.clone();
        top_pool.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        top_pool.truncate(FEATURED_TOP_POOL);

        let top_picks: Vec<&Movie> = top_pool
            .choose_multiple(rng, FEATURED_TOP_PICKS.min(top_pool.len()).min(total))
            .copied()
            .collect();

        let picked_ids: HashSet<i64> = top_picks.iter().map(|m| m.id).collect();
        let remaining: Vec<&Movie> = lang_movies
            .into_iter()
            .filter(|m| !picked_ids.contains(&m.id))
            .collect();

        let mut featured = top_picks;
        let fill = total.saturating_sub(featured.len());
        featured.extend(remaining.choose_multiple(rng, fill.min(remaining.len())).copied());

        featured.shuffle(rng);
        featured
    }
}
