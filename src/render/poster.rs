//! Poster element selection and the "no poster" placeholder

use crate::dom::{create_el, Element, Tag};
use crate::movie::{MovieSummary, POSTER_NOT_AVAILABLE};

/// Class of the placeholder; reconciliation resizes every element carrying it
pub const NO_POSTER_CLASS: &str = "no-poster";

/// Rows the placeholder takes before reconciliation (icon line + caption line)
pub const NO_POSTER_HEIGHT: u16 = 2;

/// What to show in a card's poster slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterChoice<'a> {
    /// Try to load this URL
    Image(&'a str),
    /// No usable URL, show the placeholder right away
    Fallback,
}

/// Poster rule: non-empty, not "N/A", and an http(s) URL
pub fn select_poster(movie: &MovieSummary) -> PosterChoice<'_> {
    let poster = movie.poster.as_str();
    if !poster.is_empty() && poster != POSTER_NOT_AVAILABLE && poster.starts_with("http") {
        PosterChoice::Image(poster)
    } else {
        PosterChoice::Fallback
    }
}

/// Fresh placeholder element
pub fn no_poster() -> Element {
    create_el(Tag::Div, "", NO_POSTER_CLASS)
        .with_child(create_el(Tag::Div, "🎬", "film-icon"))
        .with_child(create_el(Tag::Div, "Poster Not Available", ""))
}

/// Lazy-loading image element for a poster URL
pub fn poster_image(url: &str, title: &str) -> Element {
    let mut img = Element::new(Tag::Img);
    img.set_attr("src", url);
    img.set_attr("alt", format!("{} poster", title));
    img.set_attr("loading", "lazy");
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_poster_rules() {
        let cases = [
            ("https://img/a.jpg", true),
            ("http://img/a.jpg", true),
            ("N/A", false),
            ("", false),
            ("ftp://img/a.jpg", false),
            ("/relative/a.jpg", false),
        ];
        for (poster, expect_image) in cases {
            let movie = MovieSummary::new("T", "2000", poster);
            let is_image = matches!(select_poster(&movie), PosterChoice::Image(_));
            assert_eq!(is_image, expect_image, "poster = {:?}", poster);
        }
    }

    #[test]
    fn test_no_poster_shape() {
        let el = no_poster();
        assert!(el.has_class(NO_POSTER_CLASS));
        assert_eq!(el.children().len(), 2);
        assert_eq!(el.children()[0].text(), Some("🎬"));
        assert_eq!(el.children()[1].text(), Some("Poster Not Available"));
        assert_eq!(el.style.height, None);
    }

    #[test]
    fn test_poster_image_attrs() {
        let img = poster_image("https://x/y.jpg", "Heat");
        assert_eq!(img.tag, Tag::Img);
        assert_eq!(img.attr("src"), Some("https://x/y.jpg"));
        assert_eq!(img.attr("alt"), Some("Heat poster"));
        assert_eq!(img.attr("loading"), Some("lazy"));
    }
}
