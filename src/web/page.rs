use super::render::escape_html;

/// Everything the home page needs; the handler assembles it from the
/// catalog and the featured picks.
pub struct PageData {
    pub server_name: String,
    pub titles: Vec<String>,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub featured_cards: String,
}

/// Server-rendered home page. The element ids are part of the contract
/// with webapp/app.js.
pub fn render_index(data: &PageData) -> String {
    let name = escape_html(&data.server_name);

    let title_options: String = data
        .titles
        .iter()
        .map(|t| format!("<option value=\"{}\"></option>", escape_html(t)))
        .collect();

    let genre_options: String = data
        .genres
        .iter()
        .map(|g| {
            let g = escape_html(g);
            format!("<option value=\"{}\">{}</option>", g, g)
        })
        .collect();

    let language_options: String = data
        .languages
        .iter()
        .map(|l| {
            let l = escape_html(l);
            format!("<option value=\"{}\">{}</option>", l, l)
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{name}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header class="site-header">
  <h1>{name}</h1>
  <p class="tagline">Find movies similar to the ones you love</p>
</header>

<main>
  <form id="recommendForm" class="search-form" autocomplete="off">
    <input id="movieInput" name="movie" type="text" list="movieTitles"
           placeholder="Enter a movie title...">
    <datalist id="movieTitles">{title_options}</datalist>
    <select id="genreSelect" name="genre">
      <option value="">All Genres</option>
      {genre_options}
    </select>
    <select id="languageSelect" name="language">
      <option value="">All Languages</option>
      {language_options}
    </select>
    <button type="submit">Recommend</button>
  </form>

  <div id="loading" class="loading hidden">
    <div class="spinner"></div>
    <p>Finding recommendations...</p>
  </div>

  <section id="notFound" class="panel hidden">
    <h2>Movie not found</h2>
    <p>We couldn't find that title. Maybe one of these instead?</p>
    <div id="suggestionsGrid" class="movie-grid"></div>
  </section>

  <section id="results" class="panel hidden">
    <h2 id="resultsTitle"></h2>
    <div id="resultsGrid" class="movie-grid"></div>
  </section>

  <section id="featuredSection" class="panel">
    <h2>Featured picks</h2>
    <div id="featuredGrid" class="movie-grid">{featured_cards}</div>
  </section>
</main>

<div id="modal" class="modal hidden">
  <div id="modalGallery" class="modal-content"></div>
</div>

<button id="backToTop" class="back-to-top" type="button" aria-label="Back to top">&#8679;</button>

<script src="/static/app.js"></script>
</body>
</html>
"#,
        name = name,
        title_options = title_options,
        genre_options = genre_options,
        language_options = language_options,
        featured_cards = data.featured_cards,
    )
}
