use crate::state::{AppState, Section};
use crate::surface::Surface;
use tracing::debug;

pub const CARD_WIDTH: u32 = 200;
pub const CARD_GAP: u32 = 16;
pub const CARDS_PER_STEP: u32 = 3;
pub const STEP: u32 = CARDS_PER_STEP * (CARD_WIDTH + CARD_GAP);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Offset after one step in `direction`, kept within `[0, max_scroll]`.
pub fn step_offset(current: u32, direction: Direction, step: u32, max_scroll: u32) -> u32 {
    let tentative = match direction {
        Direction::Next => current.saturating_add(step),
        Direction::Previous => current.saturating_sub(step),
    };
    tentative.min(max_scroll)
}

/// Moves a section by one step and updates its translation and nav buttons.
pub fn advance(state: &mut AppState, surface: &mut dyn Surface, section: Section, direction: Direction) {
    let max_scroll = surface.extent(section.container()).max_scroll();
    let offset = step_offset(state.scroll_offset(section), direction, STEP, max_scroll);
    debug!(section = section.as_str(), offset, max_scroll, "carousel moved");
    state.scroll_offsets.insert(section, offset);
    surface.set_style(
        section.container(),
        "transform",
        &format!("translateX(-{offset}px)"),
    );
    update_nav_buttons(surface, section, offset, max_scroll);
}

pub fn update_nav_buttons(surface: &mut dyn Surface, section: Section, offset: u32, max_scroll: u32) {
    surface.set_disabled(section.prev_button(), offset == 0);
    surface.set_disabled(section.next_button(), offset >= max_scroll);
}

/// Resets a freshly rendered section to offset zero.
pub fn reset(state: &mut AppState, surface: &mut dyn Surface, section: Section) {
    let max_scroll = surface.extent(section.container()).max_scroll();
    state.scroll_offsets.insert(section, 0);
    surface.set_style(section.container(), "transform", "translateX(-0px)");
    update_nav_buttons(surface, section, 0, max_scroll);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, Node, ViewId};

    #[test]
    fn step_is_three_card_footprints() {
        assert_eq!(STEP, 648);
    }

    #[test]
    fn offsets_never_leave_bounds() {
        for max in [0u32, 1, 100, 648, 1000, 5000] {
            for step in [0u32, 1, 216, 648, 10_000] {
                let mut offset = 0;
                for direction in [
                    Direction::Next,
                    Direction::Next,
                    Direction::Previous,
                    Direction::Next,
                    Direction::Previous,
                    Direction::Previous,
                ] {
                    offset = step_offset(offset, direction, step, max);
                    assert!(offset <= max, "offset {offset} > max {max}");
                }
            }
        }
    }

    #[test]
    fn previous_at_zero_and_next_at_max_are_fixed_points() {
        assert_eq!(step_offset(0, Direction::Previous, STEP, 900), 0);
        assert_eq!(step_offset(900, Direction::Next, STEP, 900), 900);
    }

    #[test]
    fn content_narrower_than_viewport_never_scrolls() {
        assert_eq!(step_offset(0, Direction::Next, STEP, 0), 0);
    }

    fn surface_with_cards(count: usize, viewport: u32) -> MemorySurface {
        let mut surface = MemorySurface::new(viewport);
        surface.replace_children(
            ViewId::PopularMovies,
            (0..count).map(|_| Node::new("div").class("movie-card")).collect(),
        );
        surface
    }

    #[test]
    fn advance_translates_container_and_toggles_buttons() {
        // 10 cards: 2000 + 9 * 16 = 2144 wide, max scroll 1144 in a 1000px viewport.
        let mut surface = surface_with_cards(10, 1000);
        let mut state = AppState::new();

        advance(&mut state, &mut surface, Section::Popular, Direction::Next);
        assert_eq!(state.scroll_offset(Section::Popular), 648);
        assert_eq!(
            surface.style(ViewId::PopularMovies, "transform"),
            Some("translateX(-648px)")
        );
        assert!(!surface.element(ViewId::PopularPrev).disabled);
        assert!(!surface.element(ViewId::PopularNext).disabled);

        advance(&mut state, &mut surface, Section::Popular, Direction::Next);
        assert_eq!(state.scroll_offset(Section::Popular), 1144);
        assert!(surface.element(ViewId::PopularNext).disabled);

        advance(&mut state, &mut surface, Section::Popular, Direction::Previous);
        advance(&mut state, &mut surface, Section::Popular, Direction::Previous);
        assert_eq!(state.scroll_offset(Section::Popular), 0);
        assert!(surface.element(ViewId::PopularPrev).disabled);
        assert!(!surface.element(ViewId::PopularNext).disabled);
    }

    #[test]
    fn sections_scroll_independently() {
        let mut surface = surface_with_cards(10, 1000);
        let mut state = AppState::new();
        advance(&mut state, &mut surface, Section::Popular, Direction::Next);
        assert_eq!(state.scroll_offset(Section::TopRated), 0);
    }
}
