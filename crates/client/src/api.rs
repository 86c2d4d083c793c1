//! REST client for the episodes integration endpoints.
//!
//! Two read-only calls: one page of episodes, and one episode with its
//! characters and locations joined server-side.

use async_trait::async_trait;
use reqwest::Url;
use rickdex_core::{EpisodeDetailBundle, EpisodePage};

/// Errors from the episodes API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Malformed API response: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Read access to the remote episodes dataset.
#[async_trait]
pub trait EpisodeApi: Send + Sync {
    /// `GET /integrations/episodes?page=&take=`
    async fn list_episodes(&self, page: u32, take: u32) -> Result<EpisodePage, ApiError>;

    /// `GET /integrations/episode/{id}`
    async fn episode_detail(&self, episode_id: &str) -> Result<EpisodeDetailBundle, ApiError>;
}

/// [`EpisodeApi`] over HTTP.
pub struct HttpEpisodeApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpEpisodeApi {
    /// Create a client for the API rooted at `base_url`,
    /// e.g. `http://localhost:3001/api`.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Each segment is
    /// percent-encoded on its own, so an id can never add path levels.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, otherwise return
    /// [`ApiError::Status`] with the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl EpisodeApi for HttpEpisodeApi {
    async fn list_episodes(&self, page: u32, take: u32) -> Result<EpisodePage, ApiError> {
        let url = self.endpoint(&["integrations", "episodes"])?;
        tracing::debug!(%url, page, take, "Fetching episode page");

        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("take", take)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn episode_detail(&self, episode_id: &str) -> Result<EpisodeDetailBundle, ApiError> {
        let url = self.endpoint(&["integrations", "episode", episode_id])?;
        tracing::debug!(%url, episode_id, "Fetching episode detail");

        let response = self.client.get(url).send().await?;

        Self::parse_response(response).await
    }
}
