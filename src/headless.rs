// Headless mode - one search, printed as plain text
//
// Drives the same Session/Driver pair as the TUI, then walks the finished
// container and prints one line per card. Useful for scripting and for
// checking an API key without opening the full interface.

use crate::config::Config;
use crate::dom::{Container, Element, Tag};
use crate::omdb::OmdbClient;
use crate::render::poster::NO_POSTER_CLASS;
use crate::render::reconcile::HttpPosterLoader;
use crate::render::MOVIE_CARD_CLASS;
use crate::session::driver::{run_until_idle, Driver};
use crate::session::Session;
use crate::sort::SortKey;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Run a single search and print the result to stdout
pub async fn run_search(config: &Config, query: &str, sort: Option<SortKey>) -> Result<()> {
    let client = OmdbClient::new(&config.omdb).context("Failed to create OMDb client")?;
    let loader = HttpPosterLoader::new(
        config.display.poster_sizing(),
        config.display.poster_timeout(),
    )
    .context("Failed to create poster loader")?;

    // No skeleton fade to watch in a terminal pipe
    let (mut driver, mut events) = Driver::new(
        Session::new(config.display.skeleton_count),
        Arc::new(client),
        Arc::new(loader),
        std::time::Duration::ZERO,
    );

    if !driver.submit(query) {
        anyhow::bail!("Search query is empty");
    }
    run_until_idle(&mut driver, &mut events).await;

    if let Some(key) = sort {
        driver.change_sort(key);
        run_until_idle(&mut driver, &mut events).await;
    }

    print!("{}", render_text(driver.session().container()));
    Ok(())
}

/// Plain-text view of the container: a message line or one line per card
pub fn render_text(container: &Container) -> String {
    if let Some((message, _)) = container.message() {
        return format!("{}\n", message);
    }

    container
        .children()
        .iter()
        .filter(|card| card.has_class(MOVIE_CARD_CLASS))
        .map(|card| format!("{}\n", card_line(card)))
        .collect()
}

fn card_line(card: &Element) -> String {
    let mut title = "";
    let mut year = "";
    let mut poster = String::new();

    for child in card.children() {
        match child.tag {
            Tag::H3 => title = child.text().unwrap_or_default(),
            Tag::P => year = child.text().unwrap_or_default(),
            Tag::Img => poster = child.attr("src").unwrap_or_default().to_string(),
            Tag::Div if child.has_class(NO_POSTER_CLASS) => {
                // Skip the icon, keep the caption
                poster = child
                    .children()
                    .last()
                    .and_then(Element::text)
                    .unwrap_or_default()
                    .to_string()
            }
            Tag::Div => {}
        }
    }

    format!("{:<40} {:>9}  {}", title, year, poster)
}
