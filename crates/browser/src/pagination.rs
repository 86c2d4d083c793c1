//! Paginated episode list.
//!
//! [`PaginationController`] fetches one page at a time with a fixed page
//! size and gates previous/next navigation on the capability flags the
//! server reported for the page currently on screen.
//!
//! State machine:
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Ready(page)
//!                   │
//!                   └──err──▶ Failed(last_good, error)
//! ```
//!
//! While loading or after a failure, the last committed page stays
//! visible. A new load supersedes any in-flight one.

use std::sync::Arc;

use rickdex_client::EpisodeApi;
use rickdex_core::models::validate_page;
use rickdex_core::{EpisodePage, PageMeta, PAGE_SIZE};
use rickdex_events::{Notice, NoticeBus};
use tokio::sync::Mutex;

use crate::error::{BrowseError, LoadOutcome};
use crate::request::{RequestToken, RequestTracker};

const FAILURE_TITLE: &str = "Failed to fetch episodes";
const FAILURE_FALLBACK: &str = "Could not fetch episodes. Please try again.";

/// Snapshot of the list view.
#[derive(Debug, Clone)]
pub enum ListState {
    /// Nothing requested yet.
    Idle,
    /// A request for `page` is in flight. `previous` stays on screen.
    Loading {
        page: u32,
        previous: Option<Arc<EpisodePage>>,
    },
    Ready(Arc<EpisodePage>),
    /// The latest request failed. `last_good` stays on screen.
    Failed {
        last_good: Option<Arc<EpisodePage>>,
        error: BrowseError,
    },
}

impl ListState {
    /// The page the view should display: the last committed one.
    pub fn visible_page(&self) -> Option<&Arc<EpisodePage>> {
        match self {
            ListState::Idle => None,
            ListState::Loading { previous, .. } => previous.as_ref(),
            ListState::Ready(page) => Some(page),
            ListState::Failed { last_good, .. } => last_good.as_ref(),
        }
    }

    pub fn meta(&self) -> Option<PageMeta> {
        self.visible_page().map(|page| page.meta)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading { .. })
    }
}

struct ListInner {
    state: ListState,
    requests: RequestTracker,
    /// Most recently requested page, committed or not.
    last_requested: Option<u32>,
}

/// Drives the paginated episode list.
pub struct PaginationController {
    api: Arc<dyn EpisodeApi>,
    notices: Arc<NoticeBus>,
    inner: Mutex<ListInner>,
}

impl PaginationController {
    pub fn new(api: Arc<dyn EpisodeApi>, notices: Arc<NoticeBus>) -> Self {
        Self {
            api,
            notices,
            inner: Mutex::new(ListInner {
                state: ListState::Idle,
                requests: RequestTracker::default(),
                last_requested: None,
            }),
        }
    }

    pub async fn state(&self) -> ListState {
        self.inner.lock().await.state.clone()
    }

    /// Page number of the page on screen.
    pub async fn current_page(&self) -> Option<u32> {
        self.inner.lock().await.state.meta().map(|meta| meta.page)
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.state.is_loading()
    }

    /// Whether the previous-page control is enabled.
    pub async fn can_go_previous(&self) -> bool {
        self.inner
            .lock()
            .await
            .state
            .meta()
            .is_some_and(|meta| meta.has_previous_page)
    }

    /// Whether the next-page control is enabled.
    pub async fn can_go_next(&self) -> bool {
        self.inner
            .lock()
            .await
            .state
            .meta()
            .is_some_and(|meta| meta.has_next_page)
    }

    /// Fetch one page of [`PAGE_SIZE`] episodes and make it the visible
    /// page. The list and its meta are committed together.
    pub async fn load_page(&self, page: u32) -> LoadOutcome<Arc<EpisodePage>> {
        if validate_page(page).is_err() {
            tracing::warn!(page, "Rejecting episode page request");
            return LoadOutcome::Failed(BrowseError::InvalidPage(page));
        }

        let token = {
            let mut inner = self.inner.lock().await;
            Self::begin(&mut inner, page)
        };
        self.finish(page, token).await
    }

    /// Load the page before the visible one. No-op (`None`, no request)
    /// when the server reported no previous page.
    pub async fn go_to_previous_page(&self) -> Option<LoadOutcome<Arc<EpisodePage>>> {
        let meta = self.inner.lock().await.state.meta()?;
        if !meta.has_previous_page {
            return None;
        }
        Some(self.load_page(meta.page.saturating_sub(1)).await)
    }

    /// Load the page after the visible one. No-op (`None`, no request)
    /// when the server reported no next page.
    pub async fn go_to_next_page(&self) -> Option<LoadOutcome<Arc<EpisodePage>>> {
        let meta = self.inner.lock().await.state.meta()?;
        if !meta.has_next_page {
            return None;
        }
        Some(self.load_page(meta.page.checked_add(1)?).await)
    }

    /// Re-request the visible page, or the last requested one when
    /// nothing is visible yet, or page 1.
    pub async fn reload(&self) -> LoadOutcome<Arc<EpisodePage>> {
        let page = {
            let inner = self.inner.lock().await;
            inner
                .state
                .meta()
                .map(|meta| meta.page)
                .or(inner.last_requested)
                .unwrap_or(1)
        };
        self.load_page(page).await
    }

    // ---- private helpers ----

    /// Issue a token for `page` and enter `Loading`. Must be called with
    /// the lock held so issuing and the state change are one step.
    fn begin(inner: &mut ListInner, page: u32) -> RequestToken {
        let token = inner.requests.issue();
        let previous = inner.state.visible_page().cloned();
        inner.state = ListState::Loading { page, previous };
        inner.last_requested = Some(page);
        token
    }

    /// Await the response for `token` and commit it if still current.
    async fn finish(&self, page: u32, token: RequestToken) -> LoadOutcome<Arc<EpisodePage>> {
        tracing::debug!(page, take = PAGE_SIZE, token = token.get(), "Requesting episode page");
        let result = self.api.list_episodes(page, PAGE_SIZE).await;

        let mut inner = self.inner.lock().await;
        if !inner.requests.is_current(token) {
            tracing::debug!(page, token = token.get(), "Discarding stale episode page response");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(fetched) => {
                let fetched = Arc::new(fetched);
                tracing::debug!(
                    page = fetched.meta.page,
                    page_count = fetched.meta.page_count,
                    episodes = fetched.data.len(),
                    "Episode page loaded",
                );
                inner.state = ListState::Ready(Arc::clone(&fetched));
                LoadOutcome::Applied(fetched)
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "Failed to fetch episode page");
                let error = BrowseError::from_list_error(&e);
                let last_good = inner.state.visible_page().cloned();
                inner.state = ListState::Failed {
                    last_good,
                    error: error.clone(),
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
