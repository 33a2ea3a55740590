//! Detail and trailer modal flows.
//!
//! Detail: Closed -> Loading -> Populated, or back to Closed when any of the
//! three fetches fails. Trailer: Closed -> Loading -> Playing | NotFound, where
//! Playing is only entered on the player's load signal.

use crate::error::ApiError;
use crate::frontend::{Frontend, Ui};
use crate::render;
use crate::state::{AppState, DetailPhase, Flow, TrailerPhase};
use crate::surface::{Surface, ViewId};
use crate::tmdb::{embed_url, select_trailer};
use tracing::{debug, error, info, warn};

impl<S: Surface> Frontend<S> {
    pub async fn open_detail(&self, movie_id: i64) {
        let seq = {
            let mut ui = self.ui.lock().await;
            let Ui { state, surface } = &mut *ui;
            state.detail = DetailPhase::Loading;
            surface.show(ViewId::MovieModal);
            surface.set_style(ViewId::Body, "overflow", "hidden");
            state.begin(Flow::Detail)
        };

        let result = tokio::try_join!(
            self.api.details(movie_id),
            self.api.credits(movie_id),
            self.api.similar(movie_id),
        );

        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        if !state.is_current(Flow::Detail, seq) {
            debug!(movie_id, "Discarding superseded detail response");
            return;
        }
        match result {
            Ok((detail, credits, similar)) => {
                render::populate_detail_modal(surface, &detail, &credits, &similar);
                state.detail = DetailPhase::Populated;
                info!(movie_id, title = %detail.summary.title, "Detail modal populated");
            }
            Err(e) => {
                error!(movie_id, "Error loading movie details: {}", e);
                close_detail_view(state, surface);
            }
        }
    }

    pub async fn close_detail(&self) {
        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        close_detail_view(state, surface);
    }

    pub async fn open_trailer(&self, movie_id: i64) {
        let seq = {
            let mut ui = self.ui.lock().await;
            let Ui { state, surface } = &mut *ui;
            state.trailer = TrailerPhase::Loading;
            state.trailer_embed = None;
            surface.show(ViewId::TrailerModal);
            surface.show(ViewId::TrailerLoading);
            surface.hide(ViewId::TrailerError);
            surface.set_attr(ViewId::TrailerIframe, "src", "");
            surface.hide(ViewId::TrailerIframe);
            surface.set_style(ViewId::Body, "overflow", "hidden");
            state.begin(Flow::Trailer)
        };

        let result = self.api.videos(movie_id).await.and_then(|videos| {
            select_trailer(&videos)
                .and_then(|v| v.key.as_deref())
                .map(embed_url)
                .ok_or(ApiError::NotFound(movie_id))
        });

        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        if !state.is_current(Flow::Trailer, seq) {
            debug!(movie_id, "Discarding superseded trailer response");
            return;
        }
        match result {
            Ok(url) => {
                surface.set_attr(ViewId::TrailerIframe, "src", &url);
                state.trailer_embed = Some(url);
                debug!(movie_id, "Trailer embed set, waiting for player");
            }
            Err(e) => {
                match &e {
                    ApiError::NotFound(_) => warn!(movie_id, "{}", e),
                    _ => error!(movie_id, "Error loading trailer: {}", e),
                }
                state.trailer = TrailerPhase::NotFound;
                surface.hide(ViewId::TrailerLoading);
                surface.show(ViewId::TrailerError);
            }
        }
    }

    /// Load signal from the embedded player.
    pub async fn player_loaded(&self) {
        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        if state.trailer != TrailerPhase::Loading || state.trailer_embed.is_none() {
            debug!("Ignoring player load signal with no pending trailer");
            return;
        }
        state.trailer = TrailerPhase::Playing;
        surface.hide(ViewId::TrailerLoading);
        surface.show(ViewId::TrailerIframe);
    }

    pub async fn close_trailer(&self) {
        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        state.begin(Flow::Trailer);
        state.trailer = TrailerPhase::Closed;
        state.trailer_embed = None;
        surface.hide(ViewId::TrailerModal);
        surface.set_style(ViewId::Body, "overflow", "");
        surface.set_attr(ViewId::TrailerIframe, "src", "");
        surface.hide(ViewId::TrailerIframe);
        surface.show(ViewId::TrailerLoading);
        surface.hide(ViewId::TrailerError);
    }
}

/// Closing also supersedes any in-flight detail request.
fn close_detail_view(state: &mut AppState, surface: &mut dyn Surface) {
    state.begin(Flow::Detail);
    state.detail = DetailPhase::Closed;
    surface.hide(ViewId::MovieModal);
    surface.set_style(ViewId::Body, "overflow", "");
}
