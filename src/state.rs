use crate::models::MovieSummary;
use crate::surface::ViewId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Popular,
    NowPlaying,
    TopRated,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Popular, Section::NowPlaying, Section::TopRated];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Popular => "popular",
            Section::NowPlaying => "now-playing",
            Section::TopRated => "top-rated",
        }
    }

    pub fn container(self) -> ViewId {
        match self {
            Section::Popular => ViewId::PopularMovies,
            Section::NowPlaying => ViewId::NowPlayingMovies,
            Section::TopRated => ViewId::TopRatedMovies,
        }
    }

    pub fn prev_button(self) -> ViewId {
        match self {
            Section::Popular => ViewId::PopularPrev,
            Section::NowPlaying => ViewId::NowPlayingPrev,
            Section::TopRated => ViewId::TopRatedPrev,
        }
    }

    pub fn next_button(self) -> ViewId {
        match self {
            Section::Popular => ViewId::PopularNext,
            Section::NowPlaying => ViewId::NowPlayingNext,
            Section::TopRated => ViewId::TopRatedNext,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailPhase {
    #[default]
    Closed,
    Loading,
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailerPhase {
    #[default]
    Closed,
    Loading,
    Playing,
    NotFound,
}

/// Request flows whose responses can be superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Search,
    Detail,
    Trailer,
}

/// Everything the page knows. One per frontend, owned by it and handed to
/// controllers and the renderer by reference.
#[derive(Debug, Default)]
pub struct AppState {
    pub popular: Vec<MovieSummary>,
    pub now_playing: Vec<MovieSummary>,
    pub top_rated: Vec<MovieSummary>,
    pub current_hero: Option<i64>,
    pub scroll_offsets: HashMap<Section, u32>,
    pub search_input: String,
    pub search_results: Vec<MovieSummary>,
    pub is_searching: bool,
    pub detail: DetailPhase,
    pub trailer: TrailerPhase,
    pub trailer_embed: Option<String>,
    sequences: HashMap<Flow, u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self, section: Section) -> &[MovieSummary] {
        match section {
            Section::Popular => &self.popular,
            Section::NowPlaying => &self.now_playing,
            Section::TopRated => &self.top_rated,
        }
    }

    pub fn scroll_offset(&self, section: Section) -> u32 {
        self.scroll_offsets.get(&section).copied().unwrap_or(0)
    }

    pub fn hero(&self) -> Option<&MovieSummary> {
        let id = self.current_hero?;
        self.popular.iter().find(|m| m.id == id)
    }

    /// Issues the next sequence number for `flow`, superseding earlier ones.
    pub fn begin(&mut self, flow: Flow) -> u64 {
        let seq = self.sequences.entry(flow).or_insert(0);
        *seq += 1;
        *seq
    }

    pub fn is_current(&self, flow: Flow, seq: u64) -> bool {
        self.sequences.get(&flow).copied().unwrap_or(0) == seq
    }
}
