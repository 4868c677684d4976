//! Loading placeholders shown while a search is in flight

use crate::dom::{create_el, Container, Tag};

/// Number of skeleton cards when the config doesn't say otherwise
pub const DEFAULT_SKELETON_COUNT: usize = 6;

/// Class carried by every skeleton card; the fade-out targets it
pub const SKELETON_FADE_CLASS: &str = "skeleton__fade";

/// Clear the container and fill it with `count` placeholder cards
pub fn show_skeletons(container: &mut Container, count: usize) {
    container.clear();

    let fragment = (0..count).map(|_| {
        let mut card = create_el(Tag::Div, "", "movie-card skeleton__fade");
        card.append(create_el(Tag::Div, "", "skeleton-card"));
        card.append(create_el(Tag::Div, "", "skeleton-text"));
        card.append(create_el(Tag::Div, "", "skeleton-text"));
        card
    });
    container.append_all(fragment);
}

/// Start the fade-out on every skeleton card. Returns how many were faded.
pub fn fade_skeletons(container: &mut Container) -> usize {
    let mut faded = 0;
    container.for_each_class_mut(SKELETON_FADE_CLASS, |card| {
        card.style.opacity = Some(0.0);
        faded += 1;
    });
    faded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_skeletons_count_and_shape() {
        let mut container = Container::new();
        show_skeletons(&mut container, DEFAULT_SKELETON_COUNT);

        assert_eq!(container.children().len(), 6);
        for card in container.children() {
            assert!(card.has_class("movie-card"));
            assert!(card.has_class(SKELETON_FADE_CLASS));
            let kinds: Vec<_> = card.children().iter().map(|c| c.class_name()).collect();
            assert_eq!(kinds, ["skeleton-card", "skeleton-text", "skeleton-text"]);
        }
    }

    #[test]
    fn test_show_skeletons_clears_previous_content() {
        let mut container = Container::new();
        container.show_message("No movies found.", crate::dom::MessageKind::Error);
        show_skeletons(&mut container, 2);
        assert_eq!(container.children().len(), 2);
        assert_eq!(container.message(), None);
    }

    #[test]
    fn test_zero_skeletons_is_empty() {
        let mut container = Container::new();
        show_skeletons(&mut container, 0);
        assert!(container.is_empty());
    }

    #[test]
    fn test_fade_sets_opacity() {
        let mut container = Container::new();
        show_skeletons(&mut container, 3);
        assert_eq!(fade_skeletons(&mut container), 3);
        assert!(container
            .children()
            .iter()
            .all(|c| c.style.opacity == Some(0.0)));
    }
}
