// Driver - runs the async side of a Session
//
// Each ticket the session hands out becomes one spawned task. Tasks report
// back over an unbounded channel as SessionEvents; the owner (TUI loop or
// headless runner) feeds them to `handle`. A new submission aborts whatever
// is still running, and the session's generation checks drop anything that
// slipped through before the abort landed.

use super::{PosterTicket, SearchTicket, Session, SettleTicket};
use crate::movie::MovieSummary;
use crate::omdb::{SearchClient, SearchError};
use crate::render::reconcile::{load_posters, PosterLoader, PosterResolution};
use crate::sort::SortKey;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Completion of a spawned step
#[derive(Debug)]
pub enum SessionEvent {
    SearchFinished {
        generation: u64,
        outcome: Result<Vec<MovieSummary>, SearchError>,
    },
    Settled {
        generation: u64,
    },
    PostersResolved {
        render: u64,
        resolutions: Vec<PosterResolution>,
    },
}

pub struct Driver<C: SearchClient, L: PosterLoader> {
    session: Session,
    client: Arc<C>,
    loader: Arc<L>,
    settle_delay: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
    /// Search or settle task for the current generation
    flow: Option<AbortHandle>,
    /// Poster loads for the current render
    posters: Option<(u64, AbortHandle)>,
}

impl<C: SearchClient, L: PosterLoader> Driver<C, L> {
    pub fn new(
        session: Session,
        client: Arc<C>,
        loader: Arc<L>,
        settle_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let driver = Self {
            session,
            client,
            loader,
            settle_delay,
            events,
            flow: None,
            posters: None,
        };
        (driver, rx)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// No task is outstanding
    pub fn is_idle(&self) -> bool {
        self.flow.is_none() && self.posters.is_none()
    }

    /// Submit a query; returns false if the input was blank
    pub fn submit(&mut self, raw: &str) -> bool {
        let Some(ticket) = self.session.submit(raw) else {
            return false;
        };
        self.abort_all();
        self.spawn_search(ticket);
        true
    }

    /// Change the sort order; returns false if nothing was re-rendered
    pub fn change_sort(&mut self, key: SortKey) -> bool {
        match self.session.change_sort(key) {
            Some(ticket) => {
                self.spawn_posters(ticket);
                true
            }
            None => false,
        }
    }

    /// Apply a completed step and start the next one
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SearchFinished {
                generation,
                outcome,
            } => {
                self.finish_flow(generation);
                if let Some(ticket) = self.session.complete_search(generation, outcome) {
                    self.spawn_settle(ticket);
                }
            }
            SessionEvent::Settled { generation } => {
                self.finish_flow(generation);
                if let Some(ticket) = self.session.settle(generation) {
                    self.spawn_posters(ticket);
                }
            }
            SessionEvent::PostersResolved {
                render,
                resolutions,
            } => {
                if matches!(self.posters, Some((current, _)) if current == render) {
                    self.posters = None;
                }
                self.session.reconcile(render, &resolutions);
            }
        }
    }

    fn finish_flow(&mut self, generation: u64) {
        if generation == self.session.generation() {
            self.flow = None;
        }
    }

    fn abort_all(&mut self) {
        if let Some(handle) = self.flow.take() {
            handle.abort();
        }
        if let Some((_, handle)) = self.posters.take() {
            handle.abort();
        }
    }

    fn spawn_search(&mut self, ticket: SearchTicket) {
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let outcome = client.search(&ticket.query).await;
            // Receiver gone means we are shutting down
            let _ = events.send(SessionEvent::SearchFinished {
                generation: ticket.generation,
                outcome,
            });
        });
        self.flow = Some(task.abort_handle());
    }

    fn spawn_settle(&mut self, ticket: SettleTicket) {
        let delay = self.settle_delay;
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::Settled {
                generation: ticket.generation,
            });
        });
        self.flow = Some(task.abort_handle());
    }

    fn spawn_posters(&mut self, ticket: PosterTicket) {
        if let Some((_, handle)) = self.posters.take() {
            handle.abort();
        }
        if ticket.posters.is_empty() {
            return;
        }

        let loader = Arc::clone(&self.loader);
        let events = self.events.clone();
        let render = ticket.render;
        let task = tokio::spawn(async move {
            let resolutions = load_posters(loader, ticket.posters).await;
            let _ = events.send(SessionEvent::PostersResolved {
                render,
                resolutions,
            });
        });
        self.posters = Some((render, task.abort_handle()));
    }
}

/// Feed events to the driver until it has nothing left running
pub async fn run_until_idle<C: SearchClient, L: PosterLoader>(
    driver: &mut Driver<C, L>,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) {
    while !driver.is_idle() {
        match events.recv().await {
            Some(event) => driver.handle(event),
            None => break,
        }
    }
}
