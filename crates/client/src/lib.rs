//! HTTP client for the episodes integration API.
//!
//! [`EpisodeApi`] is the seam the browsing controllers depend on;
//! [`HttpEpisodeApi`] implements it over [`reqwest`].

pub mod api;
pub mod config;

pub use api::{ApiError, EpisodeApi, HttpEpisodeApi};
pub use config::{ClientConfig, ConfigError};
