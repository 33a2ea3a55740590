//! Projects state into surface nodes. Nothing in here talks to the network
//! or mutates `AppState`.

use crate::events::Action;
use crate::models::{CastMember, Credits, MovieDetail, MovieSummary};
use crate::surface::{Node, Surface, ViewId};
use crate::tmdb::{backdrop_url, poster_url};
use crate::utils::{format_rating, format_runtime, format_year, overview_or_default};

pub const SKELETON_COUNT: usize = 10;
pub const SEARCH_DISPLAY_LIMIT: usize = 8;
pub const CAST_LIMIT: usize = 10;
pub const SIMILAR_LIMIT: usize = 10;

const CARD_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjMwMCIgdmlld0JveD0iMCAwIDIwMCAzMDAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+PHJlY3Qgd2lkdGg9IjIwMCIgaGVpZ2h0PSIzMDAiIGZpbGw9IiMzNzQxNTEiLz48L3N2Zz4=";
const MODAL_POSTER_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMzAwIiBoZWlnaHQ9IjQ1MCIgdmlld0JveD0iMCAwIDMwMCA0NTAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+PHJlY3Qgd2lkdGg9IjMwMCIgaGVpZ2h0PSI0NTAiIGZpbGw9IiMzNzQxNTEiLz48L3N2Zz4=";
const CAST_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iODAiIGhlaWdodD0iODAiIHZpZXdCb3g9IjAgMCA4MCA4MCIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48Y2lyY2xlIGN4PSI0MCIgY3k9IjQwIiByPSI0MCIgZmlsbD0iIzM3NDE1MSIvPjwvc3ZnPg==";
const SIMILAR_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTUwIiBoZWlnaHQ9IjIyNSIgdmlld0JveD0iMCAwIDE1MCAyMjUiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+PHJlY3Qgd2lkdGg9IjE1MCIgaGVpZ2h0PSIyMjUiIGZpbGw9IiMzNzQxNTEiLz48L3N2Zz4=";
const SEARCH_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNTAiIGhlaWdodD0iNzUiIHZpZXdCb3g9IjAgMCA1MCA3NSIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iNTAiIGhlaWdodD0iNzUiIGZpbGw9IiMzNzQxNTEiLz48L3N2Zz4=";

fn rating_label(rating: Option<f64>) -> String {
    format!("⭐ {}", format_rating(rating))
}

/// Poster card. The card opens the detail modal; its play overlay opens the
/// trailer.
pub fn movie_card(movie: &MovieSummary, placeholder: &'static str) -> Node {
    let poster = poster_url(movie.poster_path.as_deref()).unwrap_or_else(|| placeholder.to_string());
    Node::new("div")
        .class("movie-card")
        .attr("data-movie-id", movie.id.to_string())
        .on_click(Action::OpenDetail { movie_id: movie.id })
        .child(
            Node::new("div")
                .class("movie-poster")
                .child(
                    Node::new("img")
                        .class("movie-poster-img")
                        .attr("src", poster)
                        .attr("alt", movie.title.clone())
                        .attr("loading", "lazy"),
                )
                .child(
                    Node::new("div")
                        .class("movie-overlay")
                        .on_click(Action::OpenTrailer { movie_id: movie.id })
                        .child(Node::new("div").class("play-icon")),
                ),
        )
        .child(
            Node::new("div")
                .class("movie-info")
                .child(Node::new("h3").class("movie-title").text(movie.title.clone()))
                .child(
                    Node::new("div")
                        .class("movie-meta")
                        .child(
                            Node::new("span")
                                .class("movie-year")
                                .text(format_year(movie.release_date.as_deref())),
                        )
                        .child(
                            Node::new("div")
                                .class("movie-rating")
                                .child(Node::new("span").text("⭐"))
                                .child(Node::new("span").text(format_rating(movie.vote_average))),
                        ),
                ),
        )
}

pub fn skeleton_card() -> Node {
    Node::new("div")
        .class("movie-card skeleton")
        .child(Node::new("div").class("movie-poster skeleton"))
        .child(
            Node::new("div")
                .class("movie-info")
                .child(Node::new("div").class("movie-title skeleton"))
                .child(
                    Node::new("div")
                        .class("movie-meta")
                        .child(Node::new("div").class("skeleton"))
                        .child(Node::new("div").class("skeleton")),
                ),
        )
}

pub fn render_movies(surface: &mut dyn Surface, container: ViewId, movies: &[MovieSummary]) {
    let cards = movies
        .iter()
        .map(|m| movie_card(m, CARD_PLACEHOLDER))
        .collect();
    surface.replace_children(container, cards);
}

pub fn render_skeletons(surface: &mut dyn Surface, container: ViewId, count: usize) {
    surface.replace_children(container, (0..count).map(|_| skeleton_card()).collect());
}

pub fn render_hero(surface: &mut dyn Surface, movie: &MovieSummary) {
    surface.set_text(ViewId::HeroTitle, &movie.title);
    surface.set_text(
        ViewId::HeroOverview,
        overview_or_default(movie.overview.as_deref()),
    );
    surface.set_text(ViewId::HeroYear, &format_year(movie.release_date.as_deref()));
    surface.set_text(ViewId::HeroRating, &rating_label(movie.vote_average));
    if let Some(url) = backdrop_url(movie.backdrop_path.as_deref()) {
        surface.set_attr(ViewId::HeroBackdropImg, "src", &url);
        surface.set_attr(ViewId::HeroBackdropImg, "alt", &movie.title);
    }
}

fn cast_member(actor: &CastMember) -> Node {
    let photo = poster_url(actor.profile_path.as_deref()).unwrap_or_else(|| CAST_PLACEHOLDER.to_string());
    Node::new("div")
        .class("cast-member")
        .child(
            Node::new("img")
                .class("cast-photo")
                .attr("src", photo)
                .attr("alt", actor.name.clone())
                .attr("loading", "lazy"),
        )
        .child(Node::new("div").class("cast-name").text(actor.name.clone()))
        .child(
            Node::new("div")
                .class("cast-character")
                .text(actor.character.clone().unwrap_or_default()),
        )
}

pub fn populate_detail_modal(
    surface: &mut dyn Surface,
    movie: &MovieDetail,
    credits: &Credits,
    similar: &[MovieSummary],
) {
    let summary = &movie.summary;
    let backdrop = backdrop_url(summary.backdrop_path.as_deref()).unwrap_or_default();
    surface.set_attr(ViewId::ModalBackdropImg, "src", &backdrop);
    let poster = poster_url(summary.poster_path.as_deref())
        .unwrap_or_else(|| MODAL_POSTER_PLACEHOLDER.to_string());
    surface.set_attr(ViewId::ModalPosterImg, "src", &poster);

    surface.set_text(ViewId::ModalTitle, &summary.title);
    surface.set_text(ViewId::ModalYear, &format_year(summary.release_date.as_deref()));
    surface.set_text(ViewId::ModalRuntime, &format_runtime(movie.runtime));
    surface.set_text(ViewId::ModalRating, &rating_label(summary.vote_average));
    surface.set_text(
        ViewId::ModalOverview,
        overview_or_default(summary.overview.as_deref()),
    );

    let genres = movie
        .genres
        .iter()
        .map(|g| Node::new("span").class("genre-tag").text(g.name.clone()))
        .collect();
    surface.replace_children(ViewId::ModalGenres, genres);

    surface.replace_children(
        ViewId::ModalActions,
        vec![Node::new("button")
            .class("btn btn-primary modal-play-btn")
            .on_click(Action::OpenTrailer {
                movie_id: summary.id,
            })
            .text("Watch Trailer")],
    );

    let cast = credits.cast.iter().take(CAST_LIMIT).map(cast_member).collect();
    surface.replace_children(ViewId::CastList, cast);

    let similar = similar
        .iter()
        .take(SIMILAR_LIMIT)
        .map(similar_card)
        .collect();
    surface.replace_children(ViewId::SimilarMovies, similar);
}

/// Similar titles only open their own detail modal; the overlay is decorative.
fn similar_card(movie: &MovieSummary) -> Node {
    let mut card = movie_card(movie, SIMILAR_PLACEHOLDER);
    if let Some(poster) = card.children.first_mut() {
        if let Some(overlay) = poster.children.get_mut(1) {
            overlay.action = None;
        }
    }
    card
}

fn search_result_row(movie: &MovieSummary) -> Node {
    let poster = poster_url(movie.poster_path.as_deref()).unwrap_or_else(|| SEARCH_PLACEHOLDER.to_string());
    Node::new("div")
        .class("search-result-item")
        .attr("data-movie-id", movie.id.to_string())
        .on_click(Action::SelectSearchResult { movie_id: movie.id })
        .child(
            Node::new("img")
                .class("search-result-poster")
                .attr("src", poster)
                .attr("alt", movie.title.clone())
                .attr("loading", "lazy"),
        )
        .child(
            Node::new("div")
                .class("search-result-info")
                .child(Node::new("h4").text(movie.title.clone()))
                .child(Node::new("p").text(format!(
                    "{} • {}",
                    format_year(movie.release_date.as_deref()),
                    rating_label(movie.vote_average)
                ))),
        )
}

/// Shows the panel with the first `SEARCH_DISPLAY_LIMIT` results, or a single
/// "No movies found" row.
pub fn render_search_results(surface: &mut dyn Surface, results: &[MovieSummary]) {
    let rows = if results.is_empty() {
        vec![Node::new("div")
            .class("search-result-item")
            .child(Node::new("p").text("No movies found"))]
    } else {
        results
            .iter()
            .take(SEARCH_DISPLAY_LIMIT)
            .map(search_result_row)
            .collect()
    };
    surface.replace_children(ViewId::SearchResults, rows);
    surface.show(ViewId::SearchResults);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use crate::surface::MemorySurface;

    fn movie(id: i64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/{id}.jpg")),
            backdrop_path: None,
            release_date: Some("2010-07-16".to_string()),
            overview: None,
            vote_average: Some(8.36),
        }
    }

    #[test]
    fn card_shows_year_and_rating() {
        let card = movie_card(&movie(27205, "Inception"), CARD_PLACEHOLDER);
        assert_eq!(card.get_attr("data-movie-id"), Some("27205"));
        assert_eq!(card.action, Some(Action::OpenDetail { movie_id: 27205 }));
        let text = card.text_content();
        assert!(text.contains("Inception"));
        assert!(text.contains("2010"));
        assert!(text.contains("8.4"));
        let overlay = &card.children[0].children[1];
        assert_eq!(overlay.action, Some(Action::OpenTrailer { movie_id: 27205 }));
    }

    #[test]
    fn card_without_poster_uses_placeholder() {
        let mut m = movie(1, "Blank");
        m.poster_path = None;
        let card = movie_card(&m, CARD_PLACEHOLDER);
        let img = &card.children[0].children[0];
        assert_eq!(img.get_attr("src"), Some(CARD_PLACEHOLDER));
    }

    #[test]
    fn search_results_are_capped() {
        let mut surface = MemorySurface::new(1000);
        let results: Vec<_> = (0..20).map(|i| movie(i, "Result")).collect();
        render_search_results(&mut surface, &results);
        assert_eq!(surface.element(ViewId::SearchResults).children.len(), 8);
        assert!(!surface.is_hidden(ViewId::SearchResults));
    }

    #[test]
    fn empty_search_renders_placeholder_row() {
        let mut surface = MemorySurface::new(1000);
        render_search_results(&mut surface, &[]);
        let rows = &surface.element(ViewId::SearchResults).children;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text_content(), "No movies found");
        assert!(rows[0].action.is_none());
    }

    #[test]
    fn hero_falls_back_on_missing_overview() {
        let mut surface = MemorySurface::new(1000);
        render_hero(&mut surface, &movie(5, "Hero"));
        assert_eq!(surface.element(ViewId::HeroTitle).text, "Hero");
        assert_eq!(
            surface.element(ViewId::HeroOverview).text,
            "No overview available."
        );
        assert_eq!(surface.element(ViewId::HeroRating).text, "⭐ 8.4");
        assert_eq!(surface.attr(ViewId::HeroBackdropImg, "src"), None);
    }

    #[test]
    fn detail_modal_limits_cast_and_similar() {
        let mut surface = MemorySurface::new(1000);
        let detail = MovieDetail {
            summary: movie(10, "Main"),
            runtime: Some(148),
            genres: vec![
                Genre {
                    name: "Action".to_string(),
                },
                Genre {
                    name: "Sci-Fi".to_string(),
                },
            ],
        };
        let credits = Credits {
            cast: (0..15)
                .map(|i| CastMember {
                    name: format!("Actor {i}"),
                    character: None,
                    profile_path: None,
                })
                .collect(),
        };
        let similar: Vec<_> = (100..112).map(|i| movie(i, "Similar")).collect();

        populate_detail_modal(&mut surface, &detail, &credits, &similar);

        assert_eq!(surface.element(ViewId::ModalRuntime).text, "2h 28m");
        assert_eq!(surface.element(ViewId::ModalYear).text, "2010");
        assert_eq!(surface.element(ViewId::ModalGenres).children.len(), 2);
        assert_eq!(surface.element(ViewId::CastList).children.len(), 10);
        let similar_cards = &surface.element(ViewId::SimilarMovies).children;
        assert_eq!(similar_cards.len(), 10);
        assert_eq!(
            similar_cards[0].action,
            Some(Action::OpenDetail { movie_id: 100 })
        );
        assert_eq!(
            surface.element(ViewId::ModalActions).children[0].action,
            Some(Action::OpenTrailer { movie_id: 10 })
        );
        assert_eq!(
            surface.attr(ViewId::ModalPosterImg, "src"),
            Some("https://image.tmdb.org/t/p/w500/10.jpg")
        );
    }
}
