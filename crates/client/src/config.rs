use reqwest::Url;

/// Base URL used when `API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API_BASE_URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the integration API, without a trailing slash.
    pub base_url: Url,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var        | Default                     |
    /// |----------------|-----------------------------|
    /// | `API_BASE_URL` | `http://localhost:3001/api` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        Ok(Self {
            base_url: parse_base_url(&raw)?,
        })
    }
}

/// Parse and normalise an API base URL (absolute http(s), no trailing `/`).
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None).expect("default config");
        assert_eq!(config.base_url.as_str(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        let config = ClientConfig::from_lookup(|_| Some("  ".into())).expect("default config");
        assert_eq!(config.base_url.as_str(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "API_BASE_URL").then(|| "https://episodes.example.test/api/ ".to_string())
        })
        .expect("config");
        assert_eq!(config.base_url.as_str(), "https://episodes.example.test/api");
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = parse_base_url("/api").expect_err("relative url");
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = parse_base_url("ftp://example.test/api").expect_err("ftp url");
        assert!(err.to_string().contains("unsupported scheme"));
    }
}
