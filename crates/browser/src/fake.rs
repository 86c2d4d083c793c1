//! Scripted [`EpisodeApi`] for controller tests.
//!
//! Responses are queued per page / episode id. A response is either
//! ready up front ([`ScriptedApi::respond_page`]) or held behind a
//! oneshot gate ([`ScriptedApi::gate_page`]) so a test decides when, and
//! in which order, in-flight requests resolve.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use rickdex_client::{ApiError, EpisodeApi};
use rickdex_core::{
    Character, Episode, EpisodeDetailBundle, EpisodePage, Location, NamedResource, PageMeta,
    PAGE_SIZE,
};
use tokio::sync::oneshot;

type Gate<T> = oneshot::Receiver<Result<T, ApiError>>;
pub type Responder<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Default)]
pub struct ScriptedApi {
    pages: Mutex<HashMap<u32, VecDeque<Gate<EpisodePage>>>>,
    details: Mutex<HashMap<String, VecDeque<Gate<EpisodeDetailBundle>>>>,
    list_calls: Mutex<Vec<(u32, u32)>>,
    detail_calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn gate_page(&self, page: u32) -> Responder<EpisodePage> {
        let (tx, rx) = oneshot::channel();
        self.pages.lock().unwrap().entry(page).or_default().push_back(rx);
        tx
    }

    pub fn respond_page(&self, page: u32, result: Result<EpisodePage, ApiError>) {
        let _ = self.gate_page(page).send(result);
    }

    pub fn gate_detail(&self, episode_id: &str) -> Responder<EpisodeDetailBundle> {
        let (tx, rx) = oneshot::channel();
        self.details
            .lock()
            .unwrap()
            .entry(episode_id.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn respond_detail(&self, episode_id: &str, result: Result<EpisodeDetailBundle, ApiError>) {
        let _ = self.gate_detail(episode_id).send(result);
    }

    /// `(page, take)` of every list request, in issue order.
    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    /// Yield until at least `n` list requests have been issued.
    pub async fn wait_for_list_calls(&self, n: usize) {
        while self.list_calls.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }

    pub async fn wait_for_detail_calls(&self, n: usize) {
        while self.detail_calls.lock().unwrap().len() < n {
            tokio::task::yield_now().await;
        }
    }
}

async fn resolve<T>(gate: Option<Gate<T>>, what: String) -> Result<T, ApiError> {
    match gate {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err(ApiError::Transport(format!("gate for {what} dropped")))),
        None => Err(ApiError::Transport(format!("no scripted response for {what}"))),
    }
}

#[async_trait]
impl EpisodeApi for ScriptedApi {
    async fn list_episodes(&self, page: u32, take: u32) -> Result<EpisodePage, ApiError> {
        self.list_calls.lock().unwrap().push((page, take));
        let gate = self
            .pages
            .lock()
            .unwrap()
            .get_mut(&page)
            .and_then(VecDeque::pop_front);
        resolve(gate, format!("page {page}")).await
    }

    async fn episode_detail(&self, episode_id: &str) -> Result<EpisodeDetailBundle, ApiError> {
        self.detail_calls.lock().unwrap().push(episode_id.to_string());
        let gate = self
            .details
            .lock()
            .unwrap()
            .get_mut(episode_id)
            .and_then(VecDeque::pop_front);
        resolve(gate, format!("episode {episode_id}")).await
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn episode_fixture(id: i64) -> Episode {
    Episode {
        id,
        name: format!("Episode {id}"),
        air_date: "December 2, 2013".into(),
        episode: format!("S01E{id:02}"),
        image: String::new(),
        url: None,
        created: "2017-11-10T12:56:33.798Z".into(),
    }
}

/// Page `page` of `page_count`, with flags derived the way the server
/// derives them. Episode ids run `(page - 1) * 10 + 1 ..= page * 10`.
pub fn page_fixture(page: u32, page_count: u32) -> EpisodePage {
    let first = i64::from(page - 1) * i64::from(PAGE_SIZE);
    EpisodePage {
        data: (1..=i64::from(PAGE_SIZE))
            .map(|i| episode_fixture(first + i))
            .collect(),
        meta: PageMeta {
            page,
            take: PAGE_SIZE,
            item_count: u64::from(page_count) * u64::from(PAGE_SIZE),
            page_count,
            has_previous_page: page > 1,
            has_next_page: page < page_count,
        },
    }
}

pub fn bundle_fixture(id: i64) -> EpisodeDetailBundle {
    let place = |name: &str| NamedResource {
        name: name.into(),
        url: String::new(),
    };
    let character = |cid: i64, name: &str| Character {
        id: cid,
        name: name.into(),
        status: "Alive".into(),
        species: "Human".into(),
        kind: String::new(),
        gender: "Male".into(),
        origin: place("Earth (C-137)"),
        location: place("Citadel of Ricks"),
        image: String::new(),
        url: None,
        created: "2017-11-04T18:48:46.250Z".into(),
    };

    EpisodeDetailBundle {
        episode: episode_fixture(id),
        characters: vec![character(1, "Rick Sanchez"), character(2, "Morty Smith")],
        locations: vec![Location {
            id: 1,
            name: "Earth (C-137)".into(),
            kind: "Planet".into(),
            dimension: "Dimension C-137".into(),
            url: None,
            created: "2017-11-10T12:42:04.162Z".into(),
        }],
    }
}
