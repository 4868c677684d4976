//! Owned element tree for the results area
//!
//! The renderer builds plain `Element` values; the TUI paints them and the
//! headless mode prints them. Nothing here knows about terminals or HTTP.

use std::collections::BTreeMap;

/// Element kinds the results area is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    P,
    H3,
    Img,
}

/// Inline style. Heights are in terminal rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub height: Option<u16>,
    pub opacity: Option<f32>,
}

/// A node in the results tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    classes: Vec<String>,
    text: Option<String>,
    attrs: BTreeMap<String, String>,
    pub style: Style,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            text: None,
            attrs: BTreeMap::new(),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-separated class list, like `className`
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Replace the class list from a space-separated string
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Builder form of `append`
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Number of elements in this subtree (self included) carrying `class`
    pub fn count_class(&self, class: &str) -> usize {
        let own = usize::from(self.has_class(class));
        own + self
            .children
            .iter()
            .map(|c| c.count_class(class))
            .sum::<usize>()
    }

    /// Visit every element in this subtree (self included) carrying `class`
    pub fn for_each_class_mut(&mut self, class: &str, f: &mut impl FnMut(&mut Element)) {
        if self.has_class(class) {
            f(self);
        }
        for child in &mut self.children {
            child.for_each_class_mut(class, f);
        }
    }

    /// Concatenated text of this subtree, depth-first
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }
}

/// Build an element; empty text and empty class are left unset
pub fn create_el(tag: Tag, text: &str, class_name: &str) -> Element {
    let mut el = Element::new(tag);
    if !text.is_empty() {
        el.set_text(text);
    }
    if !class_name.is_empty() {
        el.set_class_name(class_name);
    }
    el
}

/// Styling for single-line messages in the results area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Error => "error",
        }
    }
}

/// The results container: an ordered list of top-level elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    children: Vec<Element>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every child
    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, el: Element) {
        self.children.push(el);
    }

    /// Append a batch at once (the fragment pattern)
    pub fn append_all(&mut self, fragment: impl IntoIterator<Item = Element>) {
        self.children.extend(fragment);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Replace everything with a single `p.msg.msg--{kind}`
    pub fn show_message(&mut self, msg: &str, kind: MessageKind) {
        self.clear();
        let p = create_el(Tag::P, msg, &format!("msg msg--{}", kind.as_str()));
        self.append(p);
    }

    /// The message currently shown, if the container holds exactly one
    pub fn message(&self) -> Option<(&str, MessageKind)> {
        let [only] = self.children.as_slice() else {
            return None;
        };
        if !only.has_class("msg") {
            return None;
        }
        let kind = if only.has_class("msg--error") {
            MessageKind::Error
        } else {
            MessageKind::Info
        };
        Some((only.text().unwrap_or_default(), kind))
    }

    pub fn count_class(&self, class: &str) -> usize {
        self.children.iter().map(|c| c.count_class(class)).sum()
    }

    pub fn for_each_class_mut(&mut self, class: &str, mut f: impl FnMut(&mut Element)) {
        for child in &mut self.children {
            child.for_each_class_mut(class, &mut f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_el_skips_empty_fields() {
        let el = create_el(Tag::Div, "", "");
        assert_eq!(el.text(), None);
        assert_eq!(el.class_name(), "");

        let el = create_el(Tag::H3, "Alien", "title big");
        assert_eq!(el.text(), Some("Alien"));
        assert!(el.has_class("title"));
        assert!(el.has_class("big"));
    }

    #[test]
    fn test_show_message_replaces_content() {
        let mut container = Container::new();
        container.append(create_el(Tag::Div, "", "movie-card"));
        container.append(create_el(Tag::Div, "", "movie-card"));

        container.show_message("No movies found.", MessageKind::Error);

        assert_eq!(container.children().len(), 1);
        assert_eq!(
            container.message(),
            Some(("No movies found.", MessageKind::Error))
        );
        assert_eq!(container.children()[0].class_name(), "msg msg--error");
    }

    #[test]
    fn test_class_queries_walk_subtree() {
        let card = create_el(Tag::Div, "", "movie-card")
            .with_child(create_el(Tag::Div, "", "no-poster"))
            .with_child(create_el(Tag::H3, "A", ""));
        let mut container = Container::new();
        container.append(card.clone());
        container.append(card);

        assert_eq!(container.count_class("no-poster"), 2);

        container.for_each_class_mut("no-poster", |el| el.style.height = Some(7));
        let heights: Vec<_> = container
            .children()
            .iter()
            .map(|c| c.children()[0].style.height)
            .collect();
        assert_eq!(heights, [Some(7), Some(7)]);
    }

    #[test]
    fn test_message_none_for_cards() {
        let mut container = Container::new();
        container.append(create_el(Tag::Div, "", "movie-card"));
        assert_eq!(container.message(), None);
    }
}
