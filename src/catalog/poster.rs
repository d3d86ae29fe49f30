use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w342";

/// Resolves raw poster references from the dataset into usable URLs.
///
/// Local `/static/` paths pass through untouched. Absolute http(s) URLs are
/// used as-is; bare TMDB paths get the image base prepended. When checking
/// is enabled, each URL is verified once with a HEAD request and the result
/// cached; unreachable posters resolve to the empty string so the frontend
/// renders its text placeholder.
pub struct PosterResolver {
    client: reqwest::Client,
    cache: RwLock<HashMap<String, bool>>,
    check_enabled: bool,
}

impl PosterResolver {
    pub fn new(check_enabled: bool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap_or_default();

        Self {
            client,
            cache: RwLock::new(HashMap::new()),
            check_enabled,
        }
    }

    pub async fn resolve(&self, poster: &str) -> String {
        let poster = poster.trim();
        if poster.is_empty() {
            return String::new();
        }

        if poster.starts_with("/static/") {
            return poster.to_string();
        }

        let full_url = if poster.starts_with("http://") || poster.starts_with("https://") {
            poster.to_string()
        } else {
            format!("{}/{}", TMDB_IMAGE_BASE, poster.trim_start_matches('/'))
        };

        if !self.check_enabled {
            return full_url;
        }

        {
            let cache = self.cache.read().await;
            if let Some(&ok) = cache.get(&full_url) {
                return if ok { full_url } else { String::new() };
            }
        }

        let ok = self.head_is_image(&full_url).await;
        debug!(url = %full_url, reachable = ok, "poster check");

        let mut cache = self.cache.write().await;
        cache.insert(full_url.clone(), ok);

        if ok {
            full_url
        } else {
            String::new()
        }
    }

    async fn head_is_image(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) => {
                resp.status() == reqwest::StatusCode::OK
                    && resp
                        .headers()
                        .get(reqwest::header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(|ct| ct.to_lowercase().contains("image"))
                        .unwrap_or(false)
            }
            Err(_) => false,
        }
    }
}
