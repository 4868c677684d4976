//! Poster loading and height reconciliation
//!
//! After a render, every attempted poster gets its own load task on a
//! `JoinSet`. Failures are expected (dead links, non-image bodies) and
//! resolve to a placeholder, not an error. Once all tasks are in, the
//! tallest resolved poster sets the height of every placeholder in the
//! container so cards with and without artwork line up.

use super::poster::{no_poster, NO_POSTER_CLASS, NO_POSTER_HEIGHT};
use super::PendingPoster;
use crate::dom::{Container, Element, Tag};
use std::fmt;
use std::future::Future;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Errors that can occur while loading a poster
#[derive(Debug)]
pub enum PosterError {
    /// Transport failure or timeout
    Network(String),
    /// Server answered with a non-success status
    Status(u16),
    /// Body is not an image we can read dimensions from
    Decode(String),
}

impl fmt::Display for PosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "HTTP status {}", code),
            Self::Decode(msg) => write!(f, "Not a readable image: {}", msg),
        }
    }
}

impl std::error::Error for PosterError {}

/// Resolves a poster URL to its rendered height in rows
pub trait PosterLoader: Send + Sync + 'static {
    fn load(&self, url: &str) -> impl Future<Output = Result<u16, PosterError>> + Send;
}

/// How image pixels map to terminal rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosterSizing {
    /// Card width in columns
    pub card_width: u16,
    pub min_rows: u16,
    pub max_rows: u16,
}

impl PosterSizing {
    /// Rows needed to show a `width`x`height` image at card width.
    /// Terminal cells are roughly twice as tall as they are wide.
    pub fn rows_for(&self, width: u32, height: u32) -> u16 {
        if width == 0 {
            return self.min_rows;
        }
        let rows = (self.card_width as f64 * height as f64 / width as f64 / 2.0).round();
        (rows.min(u16::MAX as f64) as u16).clamp(self.min_rows, self.max_rows)
    }
}

/// Bytes read from a poster before giving up on its dimensions.
/// Image headers sit at the front; pixel data is never needed.
const MAX_PROBE_BYTES: usize = 512 * 1024;

/// Dimensions from the start of an image file
///
/// Fails while `prefix` is still too short to hold the whole header.
fn probe_dimensions(prefix: &[u8]) -> Result<(u32, u32), image::ImageError> {
    image::ImageReader::new(Cursor::new(prefix))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .into_dimensions()
}

/// Poster loader that streams the image until its header can be read
pub struct HttpPosterLoader {
    client: reqwest::Client,
    sizing: PosterSizing,
}

impl HttpPosterLoader {
    pub fn new(sizing: PosterSizing, timeout: Duration) -> Result<Self, PosterError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PosterError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, sizing })
    }
}

impl PosterLoader for HttpPosterLoader {
    async fn load(&self, url: &str) -> Result<u16, PosterError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PosterError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::Status(status.as_u16()));
        }

        let mut prefix = Vec::new();
        loop {
            let chunk = response
                .chunk()
                .await
                .map_err(|e| PosterError::Network(e.to_string()))?;

            let Some(chunk) = chunk else {
                // Body ended: last chance with everything we have
                let (width, height) =
                    probe_dimensions(&prefix).map_err(|e| PosterError::Decode(e.to_string()))?;
                return Ok(self.sizing.rows_for(width, height));
            };

            let room = MAX_PROBE_BYTES - prefix.len();
            prefix.extend_from_slice(&chunk[..chunk.len().min(room)]);

            if let Ok((width, height)) = probe_dimensions(&prefix) {
                return Ok(self.sizing.rows_for(width, height));
            }
            if prefix.len() >= MAX_PROBE_BYTES {
                return Err(PosterError::Decode(format!(
                    "no image header in the first {} bytes",
                    MAX_PROBE_BYTES
                )));
            }
        }
    }
}

/// Outcome of one poster load task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterResolution {
    /// Image loaded; `height` is its rendered height in rows
    Loaded { card: usize, height: u16 },
    /// Load failed; the image gets swapped for a placeholder
    Fallback { card: usize },
}

impl PosterResolution {
    /// Index of the card this resolution belongs to
    pub fn card(&self) -> usize {
        match self {
            Self::Loaded { card, .. } | Self::Fallback { card } => *card,
        }
    }

    /// Height of the element this resolution leaves in the poster slot
    pub fn height(&self) -> u16 {
        match self {
            Self::Loaded { height, .. } => *height,
            Self::Fallback { .. } => NO_POSTER_HEIGHT,
        }
    }
}

/// Load every poster concurrently and wait for all of them
///
/// Dropping the returned future aborts the outstanding loads (JoinSet
/// aborts its tasks on drop), which is how a superseded render cancels.
pub async fn load_posters<L: PosterLoader>(
    loader: Arc<L>,
    posters: Vec<PendingPoster>,
) -> Vec<PosterResolution> {
    let mut tasks = JoinSet::new();

    for poster in posters {
        let loader = Arc::clone(&loader);
        tasks.spawn(async move {
            match loader.load(&poster.url).await {
                Ok(height) => PosterResolution::Loaded {
                    card: poster.card,
                    height,
                },
                Err(e) => {
                    tracing::debug!("Poster failed for card {}: {} ({})", poster.card, e, poster.url);
                    PosterResolution::Fallback { card: poster.card }
                }
            }
        });
    }

    let mut resolutions = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(resolution) => resolutions.push(resolution),
            Err(e) => tracing::warn!("Poster task did not complete: {}", e),
        }
    }
    resolutions
}

/// Poster slot (child 0) of a card, if the card exists
fn poster_slot(container: &mut Container, card: usize) -> Option<&mut Element> {
    container
        .children_mut()
        .get_mut(card)
        .and_then(|c| c.children_mut().first_mut())
}

/// Apply load results to the container
///
/// Returns the height given to placeholders, or `None` when there was
/// nothing to reconcile.
pub fn apply(container: &mut Container, resolutions: &[PosterResolution]) -> Option<u16> {
    if resolutions.is_empty() {
        return None;
    }

    for resolution in resolutions {
        let Some(slot) = poster_slot(container, resolution.card()) else {
            continue;
        };
        if slot.tag != Tag::Img {
            continue;
        }
        match resolution {
            PosterResolution::Loaded { height, .. } => slot.style.height = Some(*height),
            PosterResolution::Fallback { .. } => *slot = no_poster(),
        }
    }

    let max_height = resolutions
        .iter()
        .map(PosterResolution::height)
        .max()
        .unwrap_or(0);

    container.for_each_class_mut(NO_POSTER_CLASS, |el| el.style.height = Some(max_height));
    tracing::debug!(
        "Reconciled {} posters, placeholders set to {} rows",
        resolutions.len(),
        max_height
    );
    Some(max_height)
}
