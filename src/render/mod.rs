// Render module - builds the results grid from a result set
//
// Rendering is synchronous and deterministic: it always clears the container
// first, then appends one card per movie. Posters that need loading are
// returned in a RenderPass so the caller can run reconciliation afterwards.

pub mod poster;
pub mod reconcile;
pub mod skeleton;

use crate::dom::{create_el, Container, MessageKind, Tag};
use crate::movie::MovieSummary;
use poster::{no_poster, poster_image, select_poster, PosterChoice};

/// Message shown when rendering an empty result set
pub const EMPTY_RESULTS_MESSAGE: &str = "No movies to display.";

/// Class of a rendered result card
pub const MOVIE_CARD_CLASS: &str = "movie-card";

/// A poster the renderer attempted to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPoster {
    /// Index of the card in the container
    pub card: usize,
    pub url: String,
}

/// Output of one render: the posters awaiting reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPass {
    pub posters: Vec<PendingPoster>,
}

impl RenderPass {
    pub fn is_empty(&self) -> bool {
        self.posters.is_empty()
    }
}

/// Rebuild the container from `movies`
///
/// Card layout is poster, title, year, in that order. The poster slot is
/// always child 0, which is what reconciliation relies on when it swaps a
/// failed image for a placeholder.
pub fn render_movies(container: &mut Container, movies: &[MovieSummary]) -> RenderPass {
    container.clear();
    if movies.is_empty() {
        container.show_message(EMPTY_RESULTS_MESSAGE, MessageKind::Info);
        return RenderPass::default();
    }

    let mut pass = RenderPass::default();
    let fragment = movies.iter().enumerate().map(|(idx, movie)| {
        let mut card = create_el(Tag::Div, "", "movie-card fade__in");

        match select_poster(movie) {
            PosterChoice::Image(url) => {
                card.append(poster_image(url, &movie.title));
                pass.posters.push(PendingPoster {
                    card: idx,
                    url: url.to_string(),
                });
            }
            PosterChoice::Fallback => card.append(no_poster()),
        }

        card.append(create_el(Tag::H3, &movie.title, ""));
        card.append(create_el(Tag::P, &movie.year, ""));
        card
    });
    container.append_all(fragment.collect::<Vec<_>>());

    tracing::debug!(
        "Rendered {} cards ({} posters pending)",
        movies.len(),
        pass.posters.len()
    );
    pass
}
