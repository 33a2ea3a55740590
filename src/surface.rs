//! The view surface: stable mount-point ids, a small node tree, and the
//! `Surface` trait the rendering layer writes through.
//!
//! `MemorySurface` keeps the whole tree in memory. The HTTP shell serves it as
//! JSON or HTML, and tests assert against it directly.

use crate::carousel::{CARD_GAP, CARD_WIDTH};
use crate::events::Action;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::str::FromStr;

macro_rules! view_ids {
    ($($variant:ident => $id:literal),* $(,)?) => {
        /// Mount points the markup must provide, by stable id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ViewId {
            $($variant),*
        }

        impl ViewId {
            pub const ALL: &'static [ViewId] = &[$(ViewId::$variant),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ViewId::$variant => $id),*
                }
            }
        }
    };
}

view_ids! {
    LoadingScreen => "loading-screen",
    Navbar => "navbar",
    Body => "body",
    SearchInput => "search-input",
    SearchResults => "search-results",
    HeroTitle => "hero-title",
    HeroOverview => "hero-overview",
    HeroYear => "hero-year",
    HeroRating => "hero-rating",
    HeroBackdropImg => "hero-backdrop-img",
    HeroPlayBtn => "hero-play-btn",
    HeroInfoBtn => "hero-info-btn",
    PopularMovies => "popular-movies",
    NowPlayingMovies => "now-playing-movies",
    TopRatedMovies => "top-rated-movies",
    PopularPrev => "popular-prev",
    PopularNext => "popular-next",
    NowPlayingPrev => "now-playing-prev",
    NowPlayingNext => "now-playing-next",
    TopRatedPrev => "top-rated-prev",
    TopRatedNext => "top-rated-next",
    MovieModal => "movie-modal",
    ModalCloseBtn => "modal-close-btn",
    ModalBackdropImg => "modal-backdrop-img",
    ModalPosterImg => "modal-poster-img",
    ModalTitle => "modal-title",
    ModalYear => "modal-year",
    ModalRuntime => "modal-runtime",
    ModalRating => "modal-rating",
    ModalOverview => "modal-overview",
    ModalGenres => "modal-genres",
    ModalActions => "modal-actions",
    CastList => "cast-list",
    SimilarMovies => "similar-movies",
    TrailerModal => "trailer-modal",
    TrailerBackdrop => "trailer-backdrop",
    TrailerCloseBtn => "trailer-close-btn",
    TrailerLoading => "trailer-loading",
    TrailerError => "trailer-error",
    TrailerIframe => "trailer-iframe",
}

impl FromStr for ViewId {
    type Err = UnknownViewId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownViewId(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown view id '{0}'")]
pub struct UnknownViewId(pub String);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
            action: None,
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape(v));
        }
        if let Some(action) = &self.action {
            let _ = write!(out, " data-action=\"{}\"", action.name());
            if self.get_attr("data-movie-id").is_none() {
                let _ = write!(out, " data-movie-id=\"{}\"", action.movie_id());
            }
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        if self.tag != "img" {
            let _ = write!(out, "</{}>", self.tag);
        }
    }
}

/// Horizontal measurements of a scrollable container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub content_width: u32,
    pub viewport_width: u32,
}

impl Extent {
    pub fn max_scroll(&self) -> u32 {
        self.content_width.saturating_sub(self.viewport_width)
    }
}

pub trait Surface: Send + 'static {
    fn set_text(&mut self, id: ViewId, text: &str);
    fn set_attr(&mut self, id: ViewId, name: &str, value: &str);
    fn set_style(&mut self, id: ViewId, property: &str, value: &str);
    fn set_class(&mut self, id: ViewId, class: &str, enabled: bool);
    fn set_disabled(&mut self, id: ViewId, disabled: bool);
    fn replace_children(&mut self, id: ViewId, children: Vec<Node>);
    fn extent(&self, id: ViewId) -> Extent;

    fn show(&mut self, id: ViewId) {
        self.set_class(id, "hidden", false);
    }

    fn hide(&mut self, id: ViewId) {
        self.set_class(id, "hidden", true);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Element {
    pub text: String,
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub disabled: bool,
    pub children: Vec<Node>,
}

static EMPTY: Element = Element {
    text: String::new(),
    attrs: BTreeMap::new(),
    style: BTreeMap::new(),
    classes: BTreeSet::new(),
    disabled: false,
    children: Vec::new(),
};

#[derive(Debug, Clone)]
pub struct MemorySurface {
    elements: BTreeMap<ViewId, Element>,
    viewport_width: u32,
}

impl MemorySurface {
    /// Fresh page: modals, player, error and results panel hidden; the loading
    /// screen and trailer spinner visible.
    pub fn new(viewport_width: u32) -> Self {
        let mut surface = Self {
            elements: ViewId::ALL
                .iter()
                .map(|id| (*id, Element::default()))
                .collect(),
            viewport_width,
        };
        for id in [
            ViewId::SearchResults,
            ViewId::MovieModal,
            ViewId::TrailerModal,
            ViewId::TrailerError,
            ViewId::TrailerIframe,
        ] {
            surface.hide(id);
        }
        surface
    }

    pub fn element(&self, id: ViewId) -> &Element {
        self.elements.get(&id).unwrap_or(&EMPTY)
    }

    pub fn is_hidden(&self, id: ViewId) -> bool {
        self.element(id).classes.contains("hidden")
    }

    pub fn attr(&self, id: ViewId, name: &str) -> Option<&str> {
        self.element(id).attrs.get(name).map(String::as_str)
    }

    pub fn style(&self, id: ViewId, property: &str) -> Option<&str> {
        self.element(id).style.get(property).map(String::as_str)
    }

    pub fn snapshot(&self) -> BTreeMap<&'static str, Element> {
        self.elements
            .iter()
            .map(|(id, el)| (id.as_str(), el.clone()))
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>MovieStream</title></head>\n<body>\n",
        );
        for (id, el) in &self.elements {
            let _ = write!(out, "<div id=\"{}\"", id.as_str());
            if !el.classes.is_empty() {
                let classes: Vec<&str> = el.classes.iter().map(String::as_str).collect();
                let _ = write!(out, " class=\"{}\"", escape(&classes.join(" ")));
            }
            if !el.style.is_empty() {
                let style: Vec<String> = el.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                let _ = write!(out, " style=\"{}\"", escape(&style.join("; ")));
            }
            for (k, v) in &el.attrs {
                let _ = write!(out, " data-{}=\"{}\"", k, escape(v));
            }
            if el.disabled {
                out.push_str(" aria-disabled=\"true\"");
            }
            out.push('>');
            out.push_str(&escape(&el.text));
            for child in &el.children {
                child.write_html(&mut out);
            }
            out.push_str("</div>\n");
        }
        out.push_str("</body>\n</html>\n");
        out
    }

    fn element_mut(&mut self, id: ViewId) -> &mut Element {
        self.elements.entry(id).or_default()
    }
}

impl Surface for MemorySurface {
    fn set_text(&mut self, id: ViewId, text: &str) {
        self.element_mut(id).text = text.to_string();
    }

    fn set_attr(&mut self, id: ViewId, name: &str, value: &str) {
        self.element_mut(id)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&mut self, id: ViewId, property: &str, value: &str) {
        let style = &mut self.element_mut(id).style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn set_class(&mut self, id: ViewId, class: &str, enabled: bool) {
        let classes = &mut self.element_mut(id).classes;
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_disabled(&mut self, id: ViewId, disabled: bool) {
        self.element_mut(id).disabled = disabled;
    }

    fn replace_children(&mut self, id: ViewId, children: Vec<Node>) {
        self.element_mut(id).children = children;
    }

    /// Cards are laid out in a row with a fixed gap.
    fn extent(&self, id: ViewId) -> Extent {
        let cards = self.element(id).children.len() as u32;
        let content_width = match cards {
            0 => 0,
            n => n * CARD_WIDTH + (n - 1) * CARD_GAP,
        };
        Extent {
            content_width,
            viewport_width: self.viewport_width,
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
