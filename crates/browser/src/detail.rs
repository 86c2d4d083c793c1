//! Episode detail view.
//!
//! [`DetailAggregator`] loads one episode together with its characters
//! and locations in a single request. The view holds either nothing, a
//! loader, a complete bundle, or a not-found marker; it never mixes data
//! from two episodes.

use std::sync::Arc;

use rickdex_client::EpisodeApi;
use rickdex_core::EpisodeDetailBundle;
use rickdex_events::{Notice, NoticeBus};
use tokio::sync::Mutex;

use crate::error::{BrowseError, LoadOutcome};
use crate::request::{RequestToken, RequestTracker};

const FAILURE_TITLE: &str = "Failed to fetch episode details";
const FAILURE_FALLBACK: &str = "Could not fetch details. Please try again.";

/// Snapshot of the detail view.
#[derive(Debug, Clone)]
pub enum DetailState {
    /// No episode requested yet.
    Idle,
    Loading { episode_id: String },
    Found(Arc<EpisodeDetailBundle>),
    /// Terminal for `episode_id`. Also used after network failures.
    NotFound { episode_id: String },
}

impl DetailState {
    pub fn bundle(&self) -> Option<&Arc<EpisodeDetailBundle>> {
        match self {
            DetailState::Found(bundle) => Some(bundle),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading { .. })
    }
}

struct DetailInner {
    state: DetailState,
    requests: RequestTracker,
    /// Identifier the view is currently tracking.
    episode_id: Option<String>,
}

/// Loads and holds the detail bundle for one episode at a time.
pub struct DetailAggregator {
    api: Arc<dyn EpisodeApi>,
    notices: Arc<NoticeBus>,
    inner: Mutex<DetailInner>,
}

impl DetailAggregator {
    pub fn new(api: Arc<dyn EpisodeApi>, notices: Arc<NoticeBus>) -> Self {
        Self {
            api,
            notices,
            inner: Mutex::new(DetailInner {
                state: DetailState::Idle,
                requests: RequestTracker::default(),
                episode_id: None,
            }),
        }
    }

    pub async fn state(&self) -> DetailState {
        self.inner.lock().await.state.clone()
    }

    pub async fn episode_id(&self) -> Option<String> {
        self.inner.lock().await.episode_id.clone()
    }

    /// Track `episode_id`, loading it only if it differs from the
    /// identifier already tracked. Returns `None` when nothing was
    /// requested, so a terminal not-found is never retried on its own.
    pub async fn show(&self, episode_id: &str) -> Option<LoadOutcome<Arc<EpisodeDetailBundle>>> {
        let token = {
            let mut inner = self.inner.lock().await;
            if inner.episode_id.as_deref() == Some(episode_id) {
                tracing::debug!(episode_id, "Episode already tracked, not reloading");
                return None;
            }
            Self::begin(&mut inner, episode_id)
        };
        Some(self.finish(episode_id, token).await)
    }

    /// Fetch the bundle for `episode_id` and replace the current view
    /// with it, or with `NotFound` on failure.
    pub async fn load_detail(&self, episode_id: &str) -> LoadOutcome<Arc<EpisodeDetailBundle>> {
        let token = {
            let mut inner = self.inner.lock().await;
            Self::begin(&mut inner, episode_id)
        };
        self.finish(episode_id, token).await
    }

    /// Stop tracking the current episode. Any in-flight load is
    /// superseded and the next [`show`](Self::show) fetches again, even
    /// for the same identifier.
    pub async fn leave(&self) {
        let mut inner = self.inner.lock().await;
        inner.requests.issue();
        inner.episode_id = None;
        inner.state = DetailState::Idle;
    }

    // ---- private helpers ----

    fn begin(inner: &mut DetailInner, episode_id: &str) -> RequestToken {
        let token = inner.requests.issue();
        inner.episode_id = Some(episode_id.to_string());
        inner.state = DetailState::Loading {
            episode_id: episode_id.to_string(),
        };
        token
    }

    async fn finish(
        &self,
        episode_id: &str,
        token: RequestToken,
    ) -> LoadOutcome<Arc<EpisodeDetailBundle>> {
        let result = if episode_id.trim().is_empty() {
            Err(BrowseError::NotFound {
                episode_id: episode_id.to_string(),
            })
        } else {
            tracing::debug!(episode_id, token = token.get(), "Requesting episode detail");
            self.api
                .episode_detail(episode_id)
                .await
                .map_err(|e| {
                    tracing::warn!(episode_id, error = %e, "Failed to fetch episode detail");
                    BrowseError::from_detail_error(&e, episode_id)
                })
        };

        let mut inner = self.inner.lock().await;
        if !inner.requests.is_current(token) {
            tracing::debug!(episode_id, token = token.get(), "Discarding stale episode detail");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(bundle) => {
                let bundle = Arc::new(bundle);
                tracing::debug!(
                    episode_id,
                    characters = bundle.characters.len(),
                    locations = bundle.locations.len(),
                    "Episode detail loaded",
                );
                inner.state = DetailState::Found(Arc::clone(&bundle));
                LoadOutcome::Applied(bundle)
            }
            Err(error) => {
                inner.state = DetailState::NotFound {
                    episode_id: episode_id.to_string(),
                };
                drop(inner);

                self.notices.publish(Notice::error(
                    FAILURE_TITLE,
                    &error.to_string(),
                    FAILURE_FALLBACK,
                ));
                LoadOutcome::Failed(error)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
