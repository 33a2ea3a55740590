use crate::carousel::Direction;
use crate::state::Section;
use crate::surface::ViewId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Interaction attached to a rendered item (a card, a search row, a button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    OpenDetail { movie_id: i64 },
    OpenTrailer { movie_id: i64 },
    SelectSearchResult { movie_id: i64 },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::OpenDetail { .. } => "open_detail",
            Action::OpenTrailer { .. } => "open_trailer",
            Action::SelectSearchResult { .. } => "select_search_result",
        }
    }

    pub fn movie_id(&self) -> i64 {
        match self {
            Action::OpenDetail { movie_id }
            | Action::OpenTrailer { movie_id }
            | Action::SelectSearchResult { movie_id } => *movie_id,
        }
    }
}

/// Events as the page reports them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// `target` is the id of the clicked mount point, if it has one.
    Click {
        #[serde(default)]
        target: Option<String>,
    },
    Input { target: String, value: String },
    Focus { target: String },
    /// Content-loaded signal, e.g. from the embedded player.
    Load { target: String },
    KeyDown { key: String },
    Scroll { top: u32 },
    Activate(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    Input,
    Focus,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CloseDetail,
    CloseTrailer,
    SearchInput,
    SearchFocus,
    Scroll(Section, Direction),
    PlayerLoaded,
    HeroTrailer,
    HeroDetail,
}

/// Fixed mapping from (trigger, mount point) to the command it runs.
#[derive(Debug, Clone)]
pub struct HandlerMap {
    bindings: HashMap<(Trigger, ViewId), Command>,
}

impl HandlerMap {
    pub fn standard() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert((Trigger::Click, ViewId::ModalCloseBtn), Command::CloseDetail);
        bindings.insert((Trigger::Click, ViewId::MovieModal), Command::CloseDetail);
        bindings.insert((Trigger::Click, ViewId::TrailerCloseBtn), Command::CloseTrailer);
        bindings.insert((Trigger::Click, ViewId::TrailerModal), Command::CloseTrailer);
        bindings.insert((Trigger::Click, ViewId::TrailerBackdrop), Command::CloseTrailer);
        bindings.insert((Trigger::Input, ViewId::SearchInput), Command::SearchInput);
        bindings.insert((Trigger::Focus, ViewId::SearchInput), Command::SearchFocus);
        bindings.insert((Trigger::Load, ViewId::TrailerIframe), Command::PlayerLoaded);
        bindings.insert((Trigger::Click, ViewId::HeroPlayBtn), Command::HeroTrailer);
        bindings.insert((Trigger::Click, ViewId::HeroInfoBtn), Command::HeroDetail);
        for section in Section::ALL {
            bindings.insert(
                (Trigger::Click, section.prev_button()),
                Command::Scroll(section, Direction::Previous),
            );
            bindings.insert(
                (Trigger::Click, section.next_button()),
                Command::Scroll(section, Direction::Next),
            );
        }
        Self { bindings }
    }

    pub fn lookup(&self, trigger: Trigger, target: ViewId) -> Option<Command> {
        self.bindings.get(&(trigger, target)).copied()
    }

}
