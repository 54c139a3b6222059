use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use jiff::civil::Date;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided; movie database lookups will be rejected");
        }

        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(rps.max(1)).unwrap_or(NonZeroU32::MIN),
        )));
        Self { client, api_key, base_url, limiter }
    }

    /// Candidates for a free-text title, as TMDB ranks them.
    pub async fn search_movie(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(query = %query, results = resp.results.len(), "TMDB search");
        Ok(resp.results)
    }

    pub async fn get_movie_details(&self, tmdb_id: i64) -> AppResult<MovieDetails> {
        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        let details: MovieDetails = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(tmdb_id, title = %details.title, "TMDB details");
        Ok(details)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

impl MovieDetails {
    pub fn year(&self) -> AppResult<i32> {
        release_year(self.release_date.as_deref().unwrap_or_default())
    }

    pub fn poster_url(&self, image_base_url: &str) -> AppResult<String> {
        let path = self
            .poster_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::External(format!("\"{}\" has no poster", self.title)))?;
        Ok(format!("{}/{}", image_base_url.trim_end_matches('/'), path.trim_start_matches('/')))
    }
}

/// Year component of a TMDB release date (`YYYY-MM-DD`, sometimes just `YYYY`).
pub fn release_year(release_date: &str) -> AppResult<i32> {
    let release_date = release_date.trim();
    if let Ok(date) = release_date.parse::<Date>() {
        return Ok(i32::from(date.year()));
    }
    release_date
        .split('-')
        .next()
        .and_then(|year| year.parse::<i32>().ok())
        .ok_or_else(|| AppError::External(format!("unusable release date \"{release_date}\"")))
}
