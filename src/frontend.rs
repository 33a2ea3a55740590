use crate::carousel::{self, Direction};
use crate::debounce::Debouncer;
use crate::error::ApiResult;
use crate::events::{Action, Command, HandlerMap, Trigger, UiEvent};
use crate::render;
use crate::state::{AppState, Section};
use crate::surface::{Surface, ViewId};
use crate::tmdb::TmdbApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

const NAVBAR_SCROLL_THRESHOLD: u32 = 100;

#[derive(Debug, Clone, Copy)]
pub struct FrontendSettings {
    pub search_debounce: Duration,
    pub loading_screen_delay: Duration,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            loading_screen_delay: Duration::from_millis(500),
        }
    }
}

/// State and the surface it renders to, locked together so every mutation
/// is followed by its render before anyone else looks.
#[derive(Debug)]
pub struct Ui<S> {
    pub state: AppState,
    pub surface: S,
}

pub struct Frontend<S> {
    pub(crate) api: Arc<dyn TmdbApi>,
    pub(crate) ui: Arc<Mutex<Ui<S>>>,
    pub(crate) search_debounce: Arc<Debouncer>,
    handlers: Arc<HandlerMap>,
    settings: FrontendSettings,
}

impl<S> Clone for Frontend<S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            ui: self.ui.clone(),
            search_debounce: self.search_debounce.clone(),
            handlers: self.handlers.clone(),
            settings: self.settings,
        }
    }
}

impl<S: Surface> Frontend<S> {
    pub fn new(api: Arc<dyn TmdbApi>, surface: S, settings: FrontendSettings) -> Self {
        Self {
            api,
            ui: Arc::new(Mutex::new(Ui {
                state: AppState::new(),
                surface,
            })),
            search_debounce: Arc::new(Debouncer::new(settings.search_debounce)),
            handlers: Arc::new(HandlerMap::standard()),
            settings,
        }
    }

    pub fn ui(&self) -> &Arc<Mutex<Ui<S>>> {
        &self.ui
    }

    /// Loads the catalog, then hides the loading screen after a short delay
    /// whether or not the catalog arrived.
    pub async fn start(&self) {
        if let Err(e) = self.load_catalog().await {
            error!("Error loading movie data: {}", e);
        }

        let ui = self.ui.clone();
        let delay = self.settings.loading_screen_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            ui.lock().await.surface.hide(ViewId::LoadingScreen);
        });
        info!("MovieStream frontend initialized");
    }

    /// Skeletons first, then the three lists together. On failure the
    /// skeletons stay where they are.
    pub async fn load_catalog(&self) -> ApiResult<()> {
        {
            let mut ui = self.ui.lock().await;
            for section in Section::ALL {
                render::render_skeletons(&mut ui.surface, section.container(), render::SKELETON_COUNT);
            }
        }

        let (popular, now_playing, top_rated) = tokio::try_join!(
            self.api.popular(),
            self.api.now_playing(),
            self.api.top_rated(),
        )?;
        info!(
            popular = popular.len(),
            now_playing = now_playing.len(),
            top_rated = top_rated.len(),
            "Catalog loaded"
        );

        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        state.popular = popular;
        state.now_playing = now_playing;
        state.top_rated = top_rated;

        for section in Section::ALL {
            render::render_movies(surface, section.container(), state.movies(section));
            carousel::reset(state, surface, section);
        }

        if let Some(hero) = state.popular.first() {
            state.current_hero = Some(hero.id);
            render::render_hero(surface, hero);
        }
        Ok(())
    }

    pub async fn dispatch(&self, event: UiEvent) {
        match event {
            UiEvent::Click { target } => {
                let target = target.as_deref().and_then(|t| t.parse::<ViewId>().ok());
                if !matches!(target, Some(ViewId::SearchInput | ViewId::SearchResults)) {
                    self.hide_search_results().await;
                }
                if let Some(id) = target {
                    self.trigger(Trigger::Click, id, None).await;
                }
            }
            UiEvent::Input { target, value } => {
                self.trigger_named(Trigger::Input, &target, Some(value)).await
            }
            UiEvent::Focus { target } => self.trigger_named(Trigger::Focus, &target, None).await,
            UiEvent::Load { target } => self.trigger_named(Trigger::Load, &target, None).await,
            UiEvent::KeyDown { key } => {
                if key == "Escape" {
                    self.escape().await;
                }
            }
            UiEvent::Scroll { top } => self.page_scrolled(top).await,
            UiEvent::Activate(action) => self.activate(action).await,
        }
    }

    pub async fn activate(&self, action: Action) {
        match action {
            Action::OpenDetail { movie_id } => {
                self.hide_search_results().await;
                self.open_detail(movie_id).await;
            }
            Action::OpenTrailer { movie_id } => {
                self.hide_search_results().await;
                self.open_trailer(movie_id).await;
            }
            Action::SelectSearchResult { movie_id } => self.select_search_result(movie_id).await,
        }
    }

    async fn trigger_named(&self, trigger: Trigger, target: &str, value: Option<String>) {
        match target.parse::<ViewId>() {
            Ok(id) => self.trigger(trigger, id, value).await,
            Err(e) => debug!(?trigger, "Ignoring event: {}", e),
        }
    }

    async fn trigger(&self, trigger: Trigger, target: ViewId, value: Option<String>) {
        let Some(command) = self.handlers.lookup(trigger, target) else {
            debug!(?trigger, target = target.as_str(), "No handler bound");
            return;
        };
        self.run(command, value).await;
    }

    async fn run(&self, command: Command, value: Option<String>) {
        match command {
            Command::CloseDetail => self.close_detail().await,
            Command::CloseTrailer => self.close_trailer().await,
            Command::SearchInput => self.search_input(value.unwrap_or_default()).await,
            Command::SearchFocus => self.search_focus().await,
            Command::Scroll(section, direction) => self.scroll_section(section, direction).await,
            Command::PlayerLoaded => self.player_loaded().await,
            Command::HeroTrailer => {
                if let Some(id) = self.hero_id().await {
                    self.open_trailer(id).await;
                }
            }
            Command::HeroDetail => {
                if let Some(id) = self.hero_id().await {
                    self.open_detail(id).await;
                }
            }
        }
    }

    async fn hero_id(&self) -> Option<i64> {
        self.ui.lock().await.state.current_hero
    }

    pub async fn scroll_section(&self, section: Section, direction: Direction) {
        let mut ui = self.ui.lock().await;
        let Ui { state, surface } = &mut *ui;
        carousel::advance(state, surface, section, direction);
    }

    /// Escape closes both modals and the search panel.
    pub async fn escape(&self) {
        self.close_detail().await;
        self.close_trailer().await;
        self.hide_search_results().await;
    }

    pub async fn page_scrolled(&self, top: u32) {
        let mut ui = self.ui.lock().await;
        ui.surface
            .set_class(ViewId::Navbar, "scrolled", top > NAVBAR_SCROLL_THRESHOLD);
    }
}
