// Session module - the search/sort state machine
//
// Session owns every piece of mutable UI state: the results container, the
// last result set, the sort selection and the page phase. It does no I/O.
// Methods take the outcome of async work (search results, elapsed delays,
// poster loads) and return tickets describing the next async step, which
// the driver runs.
//
// Phases:
//   Idle ──submit──▶ Loading ──ok──▶ Settling ──delay──▶ Displaying
//                       │                                   │  ▲
//                       └─err/empty──▶ Message              └──┘ sort change
//
// Every submission bumps a generation counter. Completions carrying an older
// generation are dropped, so a newer search always wins.

pub mod driver;

use crate::dom::{Container, MessageKind};
use crate::movie::{MovieSummary, ResultSet};
use crate::omdb::SearchError;
use crate::render::reconcile::{self, PosterResolution};
use crate::render::skeleton::{fade_skeletons, show_skeletons};
use crate::render::{render_movies, PendingPoster};
use crate::sort::SortKey;

/// Shown when the search request fails
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Shown when the search succeeds with zero matches
pub const NOT_FOUND_MESSAGE: &str = "No movies found.";

/// Where the page is in the search flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing searched yet
    #[default]
    Idle,
    /// Search in flight, skeletons visible
    Loading,
    /// Results stored, skeletons fading out
    Settling,
    /// Cards visible, sort control enabled
    Displaying,
    /// Idle with an error or "not found" message
    Message,
}

/// Page spacing: roomy before the first result, compact after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLayout {
    #[default]
    Spaced,
    Compact,
}

/// A search the driver should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

/// A settle delay the driver should wait out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket {
    pub generation: u64,
}

/// Poster loads the driver should run for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterTicket {
    pub render: u64,
    pub posters: Vec<PendingPoster>,
}

/// All session state for one run
#[derive(Debug, Default)]
pub struct Session {
    container: Container,
    results: ResultSet,
    phase: Phase,
    layout: PageLayout,
    sort: Option<SortKey>,
    sort_visible: bool,
    skeleton_count: usize,
    generation: u64,
    render_generation: u64,
    last_query: Option<String>,
}

impl Session {
    pub fn new(skeleton_count: usize) -> Self {
        Self {
            skeleton_count,
            ..Self::default()
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    /// Current sort selection; `None` means API order
    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn sort_visible(&self) -> bool {
        self.sort_visible
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Handle a submitted query
    ///
    /// Blank input is ignored. Anything else supersedes whatever search was
    /// in flight and asks for exactly one request with the trimmed query.
    pub fn submit(&mut self, raw: &str) -> Option<SearchTicket> {
        let query = raw.trim();
        if query.is_empty() {
            return None;
        }

        self.generation += 1;
        self.phase = Phase::Loading;
        self.last_query = Some(query.to_string());
        show_skeletons(&mut self.container, self.skeleton_count);

        tracing::debug!("Search #{} submitted: {:?}", self.generation, query);
        Some(SearchTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Apply a finished search
    ///
    /// Returns a settle ticket when there are results to show.
    pub fn complete_search(
        &mut self,
        generation: u64,
        outcome: Result<Vec<MovieSummary>, SearchError>,
    ) -> Option<SettleTicket> {
        if generation != self.generation || self.phase != Phase::Loading {
            tracing::debug!("Ignoring stale search result #{}", generation);
            return None;
        }

        match outcome {
            Err(e) => {
                tracing::warn!("Search #{} failed: {}", generation, e);
                self.container
                    .show_message(NETWORK_ERROR_MESSAGE, MessageKind::Error);
                self.phase = Phase::Message;
                None
            }
            Ok(movies) if movies.is_empty() => {
                self.container
                    .show_message(NOT_FOUND_MESSAGE, MessageKind::Error);
                self.phase = Phase::Message;
                None
            }
            Ok(movies) => {
                tracing::debug!("Search #{} found {} movies", generation, movies.len());
                self.results.replace(movies);
                self.layout = PageLayout::Compact;
                fade_skeletons(&mut self.container);
                self.phase = Phase::Settling;
                Some(SettleTicket { generation })
            }
        }
    }

    /// Settle delay elapsed: render the stored results in API order
    pub fn settle(&mut self, generation: u64) -> Option<PosterTicket> {
        if generation != self.generation || self.phase != Phase::Settling {
            tracing::debug!("Ignoring stale settle #{}", generation);
            return None;
        }

        self.sort = None;
        self.sort_visible = true;
        self.phase = Phase::Displaying;
        let ticket = self.render(None);
        Some(ticket)
    }

    /// Re-render the stored results under `key`
    ///
    /// No-op until a search has succeeded at least once.
    pub fn change_sort(&mut self, key: SortKey) -> Option<PosterTicket> {
        if self.results.is_empty() {
            tracing::debug!("Sort {} ignored: nothing loaded", key);
            return None;
        }

        self.sort = Some(key);
        if matches!(self.phase, Phase::Message | Phase::Idle) {
            self.phase = Phase::Displaying;
        }
        Some(self.render(Some(key)))
    }

    /// Apply poster load results for a render
    ///
    /// Results for a render that has since been replaced are dropped.
    pub fn reconcile(&mut self, render: u64, resolutions: &[PosterResolution]) -> Option<u16> {
        if render != self.render_generation {
            tracing::debug!("Ignoring posters for superseded render #{}", render);
            return None;
        }
        reconcile::apply(&mut self.container, resolutions)
    }

    fn render(&mut self, key: Option<SortKey>) -> PosterTicket {
        let pass = match key {
            Some(key) => render_movies(&mut self.container, &self.results.sorted(key)),
            None => render_movies(&mut self.container, self.results.movies()),
        };
        self.render_generation += 1;
        PosterTicket {
            render: self.render_generation,
            posters: pass.posters,
        }
    }
}
