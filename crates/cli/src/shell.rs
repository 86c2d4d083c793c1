//! Interactive command loop.
//!
//! Reads commands line by line and runs every load as a spawned task so
//! the prompt stays responsive while a request is in flight. Views are
//! re-rendered when a load commits and its view is still the active one;
//! superseded loads render nothing.

use std::future::Future;
use std::sync::Arc;

use rickdex_browser::{DetailAggregator, LoadOutcome, PaginationController};
use rickdex_client::EpisodeApi;
use rickdex_core::EpisodePage;
use rickdex_events::{Notice, NoticeBus, NoticeLevel};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{mpsc, Mutex};

use crate::command::{parse_command, Command, HELP};
use crate::render::{render_detail, render_list};

/// Which view is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
}

/// Where rendered views and shell messages are written.
#[derive(Debug, Clone)]
pub enum Screen {
    Stdout,
    /// Each message is sent as one string instead of printed.
    Capture(mpsc::UnboundedSender<String>),
}

impl Screen {
    fn show(&self, text: impl Into<String>) {
        match self {
            Screen::Stdout => println!("{}", text.into()),
            Screen::Capture(tx) => {
                let _ = tx.send(text.into());
            }
        }
    }
}

pub struct Shell {
    list: Arc<PaginationController>,
    detail: Arc<DetailAggregator>,
    notices: Arc<NoticeBus>,
    route: Arc<Mutex<Route>>,
    screen: Screen,
}

impl Shell {
    pub fn new(api: Arc<dyn EpisodeApi>, notices: Arc<NoticeBus>) -> Self {
        Self {
            list: Arc::new(PaginationController::new(Arc::clone(&api), Arc::clone(&notices))),
            detail: Arc::new(DetailAggregator::new(api, Arc::clone(&notices))),
            notices,
            route: Arc::new(Mutex::new(Route::List)),
            screen: Screen::Stdout,
        }
    }

    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screen = screen;
        self
    }

    /// Run until `quit` or end of input.
    pub async fn run<R>(self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let notice_task = tokio::spawn(print_notices(self.notices.subscribe()));

        self.screen.show(format!("{HELP}\n"));
        self.spawn_list_load(|list| async move { Some(list.load_page(1).await) });

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(command) = parse_command(&line) else {
                if !line.trim().is_empty() {
                    self.screen.show("Unknown command. Type `h` for help.");
                }
                continue;
            };

            if command == Command::Quit {
                break;
            }
            self.dispatch(command).await;
        }

        notice_task.abort();
        tracing::info!("Shell closed");
        Ok(())
    }

    async fn dispatch(&self, command: Command) {
        let route = self.route.lock().await.clone();
        match (command, route) {
            (Command::Help, _) => self.screen.show(HELP),
            (Command::Next, Route::List) => {
                if !self.list.can_go_next().await {
                    self.screen.show("Already on the last page.");
                    return;
                }
                self.spawn_list_load(|list| async move { list.go_to_next_page().await });
            }
            (Command::Previous, Route::List) => {
                if !self.list.can_go_previous().await {
                    self.screen.show("Already on the first page.");
                    return;
                }
                self.spawn_list_load(|list| async move { list.go_to_previous_page().await });
            }
            (Command::Reload, Route::List) => {
                self.spawn_list_load(|list| async move { Some(list.reload().await) });
            }
            (Command::Next | Command::Previous, Route::Detail(_)) => {
                self.screen.show("Go back to the list (`b`) to change pages.");
            }
            (Command::Open(id), _) => {
                *self.route.lock().await = Route::Detail(id.clone());
                self.spawn_detail_load(id, false);
            }
            (Command::Reload, Route::Detail(id)) => self.spawn_detail_load(id, true),
            (Command::Back, _) => {
                self.detail.leave().await;
                *self.route.lock().await = Route::List;
                self.screen.show(render_list(&self.list.state().await));
            }
            (Command::Quit, _) => {}
        }
    }

    /// Run a list load in the background and render the list when it
    /// commits while the list is on screen.
    fn spawn_list_load<F, Fut>(&self, load: F)
    where
        F: FnOnce(Arc<PaginationController>) -> Fut + Send + 'static,
        Fut: Future<Output = Option<LoadOutcome<Arc<EpisodePage>>>> + Send + 'static,
    {
        let list = Arc::clone(&self.list);
        let route = Arc::clone(&self.route);
        let screen = self.screen.clone();
        tokio::spawn(async move {
            let outcome = load(Arc::clone(&list)).await;
            if matches!(outcome, None | Some(LoadOutcome::Superseded)) {
                return;
            }
            if *route.lock().await == Route::List {
                screen.show(render_list(&list.state().await));
            }
        });
    }

    /// Load details for `id` in the background. Without `force`, an id
    /// already tracked during this visit is shown as-is instead of
    /// refetched.
    fn spawn_detail_load(&self, id: String, force: bool) {
        let detail = Arc::clone(&self.detail);
        let route = Arc::clone(&self.route);
        let screen = self.screen.clone();
        tokio::spawn(async move {
            let outcome = if force {
                Some(detail.load_detail(&id).await)
            } else {
                detail.show(&id).await
            };
            if matches!(outcome, Some(LoadOutcome::Superseded)) {
                return;
            }
            if *route.lock().await == Route::Detail(id) {
                screen.show(render_detail(&detail.state().await));
            }
        });
    }
}

async fn print_notices(mut rx: broadcast::Receiver<Notice>) {
    loop {
        match rx.recv().await {
            Ok(notice) => {
                let tag = match notice.level {
                    NoticeLevel::Error => "error",
                    NoticeLevel::Info => "info",
                };
                eprintln!("[{tag}] {}: {}", notice.title, notice.description);
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Notice printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
