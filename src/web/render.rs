use super::types::MovieDto;

/// How many characters of the overview a card shows.
const EXCERPT_LEN: usize = 100;
/// How many genre tags a card shows.
const CARD_GENRE_TAGS: usize = 2;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First 100 characters of the overview, always followed by an ellipsis.
pub fn excerpt(overview: &str) -> String {
    let head: String = overview.chars().take(EXCERPT_LEN).collect();
    format!("{}...", head)
}

/// Similarity percentages print without a trailing ".0".
pub fn format_similarity(similarity: f64) -> String {
    if similarity.fract() == 0.0 {
        format!("{}", similarity as i64)
    } else {
        format!("{:.1}", similarity)
    }
}

/// The heading above the results grid, suffixed with the active filters.
pub fn results_title(movie_name: &str, genre: Option<&str>, language: Option<&str>) -> String {
    let mut title = format!("Movies similar to \"{}\"", movie_name);
    if let Some(genre) = genre {
        title.push_str(&format!(" in {}", genre));
    }
    if let Some(language) = language {
        title.push_str(&format!(" ({})", language));
    }
    title
}

/// Render one movie card. The same rules drive the client-side renderer in
/// webapp/app.js; the full movie payload rides along in `data-movie` for
/// the detail modal.
pub fn render_card(movie: &MovieDto) -> String {
    let title = escape_html(&movie.title);
    let payload = escape_html(&serde_json::to_string(movie).unwrap_or_default());

    let poster = if movie.poster_url.trim().is_empty() {
        format!(r#"<div class="poster-placeholder">{}</div>"#, title)
    } else {
        format!(
            concat!(
                r#"<img class="poster-img" src="{}" alt="{}" loading="lazy" "#,
                r#"onerror="this.style.display='none';this.nextElementSibling.style.display='flex';">"#,
                r#"<div class="poster-placeholder" style="display:none">{}</div>"#
            ),
            escape_html(&movie.poster_url),
            title,
            title
        )
    };

    let mut badges = String::new();
    if let Some(year) = movie.year {
        badges.push_str(&format!(r#"<span class="badge badge-year">{}</span>"#, year));
    }
    if movie.rating > 0.0 {
        badges.push_str(&format!(
            r#"<span class="badge badge-rating">&#9733; {:.1}</span>"#,
            movie.rating
        ));
    }
    if movie.similarity.unwrap_or(0.0) > 0.0 {
        badges.push_str(&format!(
            r#"<span class="badge badge-similarity">{}% match</span>"#,
            format_similarity(movie.similarity.unwrap_or(0.0))
        ));
    }

    let tags: String = movie
        .genres
        .split_whitespace()
        .take(CARD_GENRE_TAGS)
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
        .collect();

    let languages = escape_html(
        &movie
            .languages
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("/"),
    );

    // The footer shows the rating twice; keep both until product signs off
    // on collapsing them.
    let rating_pill = format!(
        r#"<span class="rating-pill">&#9733; {:.1}/10</span>"#,
        movie.rating
    );

    format!(
        concat!(
            r#"<div class="movie-card" data-movie="{payload}">"#,
            r#"<div class="card-poster">{poster}</div>"#,
            r#"<div class="card-info">"#,
            r#"<h3 class="card-title">{title}</h3>"#,
            r#"<div class="card-badges">{badges}</div>"#,
            r#"<div class="card-tags">{tags}</div>"#,
            r#"<p class="card-overview">{overview}</p>"#,
            r#"<div class="card-footer">"#,
            "{rating_pill}{rating_pill}",
            r#"<span class="card-languages">{languages}</span>"#,
            r#"<button class="favorite-btn" type="button" aria-label="Toggle favorite">&#9829;</button>"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"</div>"#
        ),
        payload = payload,
        poster = poster,
        title = title,
        badges = badges,
        tags = tags,
        overview = escape_html(&excerpt(&movie.overview)),
        rating_pill = rating_pill,
        languages = languages,
    )
}

pub fn render_cards(movies: &[MovieDto]) -> String {
    movies.iter().map(render_card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(similarity: Option<f64>) -> MovieDto {
        MovieDto {
            id: 7,
            title: "The <Great> Escape".to_string(),
            overview: "x".repeat(150),
            genres: "Action Drama Thriller War".to_string(),
            languages: "English French".to_string(),
            year: Some(1963),
            rating: 8.2,
            poster_url: "https://example.com/p.jpg".to_string(),
            similarity,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_excerpt_always_appends_ellipsis() {
        assert_eq!(excerpt("short"), "short...");
        let long = excerpt(&"y".repeat(200));
        assert_eq!(long.chars().count(), 103);
        assert!(long.ends_with("..."));
    }

    #[test]
    fn test_results_title_suffixes() {
        assert_eq!(
            results_title("Dune", None, None),
            "Movies similar to \"Dune\""
        );
        assert_eq!(
            results_title("Dune", Some("SciFi"), None),
            "Movies similar to \"Dune\" in SciFi"
        );
        assert_eq!(
            results_title("Dune", Some("SciFi"), Some("English")),
            "Movies similar to \"Dune\" in SciFi (English)"
        );
        assert_eq!(
            results_title("Dune", None, Some("English")),
            "Movies similar to \"Dune\" (English)"
        );
    }

    #[test]
    fn test_card_shows_first_two_genre_tags() {
        let html = render_card(&dto(None));
        assert!(html.contains(r#"<span class="tag">Action</span>"#));
        assert!(html.contains(r#"<span class="tag">Drama</span>"#));
        assert!(!html.contains(r#"<span class="tag">Thriller</span>"#));
    }

    #[test]
    fn test_card_similarity_badge_rules() {
        let none = render_card(&dto(None));
        assert!(!none.contains("badge-similarity"));

        let zero = render_card(&dto(Some(0.0)));
        assert!(!zero.contains("badge-similarity"));

        let some = render_card(&dto(Some(42.0)));
        assert!(some.contains("badge-similarity"));
        assert!(some.contains("42%"));
    }

    #[test]
    fn test_card_without_poster_renders_placeholder_directly() {
        let mut movie = dto(None);
        movie.poster_url = String::new();
        let html = render_card(&movie);
        assert!(!html.contains("<img"));
        assert!(html.contains("poster-placeholder"));
    }

    #[test]
    fn test_card_with_poster_includes_error_fallback() {
        let html = render_card(&dto(None));
        assert!(html.contains("<img"));
        assert!(html.contains("onerror="));
        assert!(html.contains(r#"style="display:none""#));
    }

    #[test]
    fn test_card_footer_rating_is_duplicated() {
        let html = render_card(&dto(None));
        assert_eq!(html.matches("8.2/10").count(), 2);
    }

    #[test]
    fn test_card_escapes_title() {
        let html = render_card(&dto(None));
        assert!(html.contains("The &lt;Great&gt; Escape"));
        assert!(!html.contains("<Great>"));
    }

    #[test]
    fn test_format_similarity() {
        assert_eq!(format_similarity(42.0), "42");
        assert_eq!(format_similarity(87.5), "87.5");
    }

    #[test]
    fn test_year_badge_only_when_present() {
        let mut movie = dto(None);
        movie.year = None;
        assert!(!render_card(&movie).contains("badge-year"));
        movie.year = Some(1999);
        assert!(render_card(&movie).contains("badge-year"));
    }
}
