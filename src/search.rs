use crate::frontend::{Frontend, Ui};
use crate::render;
use crate::state::Flow;
use crate::surface::{Surface, ViewId};
use tracing::{debug, info, warn};

impl<S: Surface> Frontend<S> {
    /// Keystroke in the search box. The query only goes out once input has
    /// been quiet for the debounce period.
    pub async fn search_input(&self, value: String) {
        self.ui.lock().await.state.search_input = value.clone();
        let frontend = self.clone();
        self.search_debounce.schedule(async move {
            frontend.perform_search(&value).await;
        });
    }

    pub async fn perform_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            let mut ui = self.ui.lock().await;
            let Ui { state, surface } = &mut *ui;
            state.begin(Flow::Search);
            state.search_results.clear();
            state.is_searching = false;
            surface.hide(ViewId::SearchResults);
            return;
        }

        let seq = {
            let mut ui = self.ui.lock().await;
            ui.state.is_searching = true;
            ui.state.begin(Flow::Search)
        };

        let result = self.api.search(query).await;

        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        if !state.is_current(Flow::Search, seq) {
            debug!(query, "Discarding superseded search response");
            return;
        }
        state.is_searching = false;
        match result {
            Ok(results) => {
                info!(query, results = results.len(), "Search completed");
                state.search_results = results;
                render::render_search_results(surface, &state.search_results);
            }
            Err(e) => {
                warn!(query, "Search error: {}", e);
                state.search_results.clear();
                surface.hide(ViewId::SearchResults);
            }
        }
    }

    /// Re-opens the panel when the box still holds a query with results.
    pub async fn search_focus(&self) {
        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        if !state.search_input.trim().is_empty() && !state.search_results.is_empty() {
            render::render_search_results(surface, &state.search_results);
        }
    }

    pub async fn hide_search_results(&self) {
        self.ui.lock().await.surface.hide(ViewId::SearchResults);
    }

    pub async fn select_search_result(&self, movie_id: i64) {
        self.search_debounce.cancel();
        {
            let mut ui = self.ui.lock().await;
            let Ui { state, surface } = &mut *ui;
            state.begin(Flow::Search);
            state.search_input.clear();
            state.search_results.clear();
            state.is_searching = false;
            surface.hide(ViewId::SearchResults);
            surface.set_attr(ViewId::SearchInput, "value", "");
        }
        self.open_detail(movie_id).await;
    }
}
