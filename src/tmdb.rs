use crate::error::{ApiError, ApiResult};
use crate::models::{Credits, MovieDetail, MovieSummary, Results, Video};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/original";

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const YOUTUBE_PLAYER_PARAMS: &str =
    "?autoplay=1&mute=0&controls=1&showinfo=1&rel=0&modestbranding=1";

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn popular(&self) -> ApiResult<Vec<MovieSummary>>;
    async fn now_playing(&self) -> ApiResult<Vec<MovieSummary>>;
    async fn top_rated(&self) -> ApiResult<Vec<MovieSummary>>;
    async fn details(&self, id: i64) -> ApiResult<MovieDetail>;
    async fn credits(&self, id: i64) -> ApiResult<Credits>;
    async fn videos(&self, id: i64) -> ApiResult<Vec<Video>>;
    async fn similar(&self, id: i64) -> ApiResult<Vec<MovieSummary>>;
    async fn search(&self, query: &str) -> ApiResult<Vec<MovieSummary>>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: TMDB_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Points the client at another host, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Single GET against `base + path` with the credential and every query
    /// pair appended. Failures are logged here and then returned.
    pub async fn request(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Value> {
        let result = self.send(path, params).await;
        if let Err(e) = &result {
            error!(path = %path, "TMDB request failed: {}", e);
        }
        result
    }

    async fn send(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Value> {
        let url = self.url(path, params);
        debug!(path = %path, "GET");
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                path: path.to_string(),
                source,
            })?;
        let status = res.status();
        let text = res.text().await.map_err(|source| ApiError::Network {
            path: path.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<T> {
        let value = self.request(path, params).await?;
        serde_json::from_value(value).map_err(|source| {
            let err = ApiError::Decode {
                path: path.to_string(),
                source,
            };
            error!(path = %path, "TMDB response did not match the expected shape: {}", err);
            err
        })
    }

    async fn list(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Vec<MovieSummary>> {
        let data: Results<MovieSummary> = self.get_json(path, params).await?;
        Ok(data.results)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn popular(&self) -> ApiResult<Vec<MovieSummary>> {
        self.list("/movie/popular", &[]).await
    }

    async fn now_playing(&self) -> ApiResult<Vec<MovieSummary>> {
        self.list("/movie/now_playing", &[]).await
    }

    async fn top_rated(&self) -> ApiResult<Vec<MovieSummary>> {
        self.list("/movie/top_rated", &[]).await
    }

    async fn details(&self, id: i64) -> ApiResult<MovieDetail> {
        self.get_json(&format!("/movie/{id}"), &[]).await
    }

    async fn credits(&self, id: i64) -> ApiResult<Credits> {
        self.get_json(&format!("/movie/{id}/credits"), &[]).await
    }

    async fn videos(&self, id: i64) -> ApiResult<Vec<Video>> {
        let data: Results<Video> = self
            .get_json(&format!("/movie/{id}/videos"), &[])
            .await?;
        Ok(data.results)
    }

    async fn similar(&self, id: i64) -> ApiResult<Vec<MovieSummary>> {
        self.list(&format!("/movie/{id}/similar"), &[]).await
    }

    async fn search(&self, query: &str) -> ApiResult<Vec<MovieSummary>> {
        self.list("/search/movie", &[("query", query)]).await
    }
}

pub fn poster_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{POSTER_BASE}{p}"))
}

pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{BACKDROP_BASE}{p}"))
}

/// First YouTube trailer with a usable key, in source order.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos.iter().find(|v| {
        v.site.eq_ignore_ascii_case("YouTube")
            && v.video_type == "Trailer"
            && v.key.as_deref().is_some_and(|k| !k.is_empty())
    })
}

pub fn embed_url(key: &str) -> String {
    format!("{YOUTUBE_EMBED_BASE}{key}{YOUTUBE_PLAYER_PARAMS}")
}
