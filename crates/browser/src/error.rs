use rickdex_client::ApiError;

/// Failure of a list or detail load, as seen by the views.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowseError {
    /// Transport failure or non-2xx response.
    #[error("{message}")]
    NetworkOrServer { message: String },

    /// Detail lookup for an identifier the API does not know.
    #[error("Episode {episode_id} not found")]
    NotFound { episode_id: String },

    /// Page numbers start at 1. Rejected before any request is made.
    #[error("Invalid page number: {0}")]
    InvalidPage(u32),
}

impl BrowseError {
    /// Classify an error from the list endpoint.
    pub fn from_list_error(err: &ApiError) -> Self {
        BrowseError::NetworkOrServer {
            message: err.to_string(),
        }
    }

    /// Classify an error from the detail endpoint. A 404 means the
    /// episode does not exist.
    pub fn from_detail_error(err: &ApiError, episode_id: &str) -> Self {
        if err.is_not_found() {
            BrowseError::NotFound {
                episode_id: episode_id.to_string(),
            }
        } else {
            BrowseError::NetworkOrServer {
                message: err.to_string(),
            }
        }
    }
}

/// What became of one load call.
#[derive(Debug, Clone)]
pub enum LoadOutcome<T> {
    /// The response was committed to the view.
    Applied(T),
    /// A newer request took over before this one resolved; its result
    /// was discarded.
    Superseded,
    /// The load failed and the view moved to its failure state.
    Failed(BrowseError),
}

impl<T> LoadOutcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            LoadOutcome::Applied(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, LoadOutcome::Superseded)
    }
}
