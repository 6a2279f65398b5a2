//! Application root state.
//!
//! `App` owns the catalog client, the favorites store, the current mood and
//! category selection, the per-screen load state and the navigation history.
//! Front ends read it through shared references and change it only through
//! its methods.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{choose_category, CatalogClient, CategoryChoice};
use crate::config::AppConfig;
use crate::error::{CatalogError, FetchError};
use crate::favorites::{FavoritesStore, Toggled};
use crate::mood::Mood;
use crate::navigation::{History, Route};
use crate::storage::FileStore;
use crate::types::Recipe;
use crate::view::{
    BrowseContent, BrowseParams, BrowseScreen, DetailContent, DetailScreen, Loadable, Ticket,
    BROWSE_FAILED, DETAIL_FAILED,
};

/// A browse fetch that has been started but not applied yet.
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    ticket: Ticket<BrowseParams>,
    choice: CategoryChoice,
}

impl BrowseRequest {
    pub fn params(&self) -> &BrowseParams {
        self.ticket.params()
    }

    pub fn choice(&self) -> &CategoryChoice {
        &self.choice
    }
}

pub struct App {
    catalog: CatalogClient,
    favorites: FavoritesStore,
    rng: ChaCha8Rng,
    mood: Mood,
    category: Option<String>,
    categories: Vec<String>,
    browse: BrowseScreen,
    detail: DetailScreen,
    history: History,
}

impl App {
    pub fn new(catalog: CatalogClient, favorites: FavoritesStore) -> Self {
        Self {
            catalog,
            favorites,
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
            mood: Mood::default(),
            category: None,
            categories: Vec::new(),
            browse: BrowseScreen::new(),
            detail: DetailScreen::new(),
            history: History::default(),
        }
    }

    /// Build the production app: HTTP catalog client and file-backed favorites.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let catalog = CatalogClient::from_config(config)?;
        let favorites = FavoritesStore::open(FileStore::new(config.data_dir.clone()));
        Ok(Self::new(catalog, favorites))
    }

    /// Use a seeded random source for mood category picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Categories offered by the catalog; empty until loaded or when loading failed.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn browse(&self) -> &BrowseScreen {
        &self.browse
    }

    pub fn detail(&self) -> &DetailScreen {
        &self.detail
    }

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Fetch the category filter list. Failure leaves it empty.
    pub async fn load_categories(&mut self) -> &[String] {
        match self.catalog.list_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                tracing::warn!(error = %e, "categories unavailable");
                self.categories.clear();
            }
        }
        &self.categories
    }

    /// Switch mood. Clears any explicit category and restarts the browse load.
    pub fn select_mood(&mut self, mood: Mood) -> BrowseRequest {
        self.mood = mood;
        self.category = None;
        self.start_browse()
    }

    /// Set or clear ("All") the explicit category and restart the browse load.
    pub fn select_category(&mut self, category: Option<String>) -> BrowseRequest {
        self.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self.start_browse()
    }

    /// Start a browse load for the current selection.
    ///
    /// Without an explicit category a new one is drawn from the mood every time.
    pub fn start_browse(&mut self) -> BrowseRequest {
        let params = BrowseParams {
            mood: self.mood,
            category: self.category.clone(),
        };
        let choice = choose_category(params.mood, params.category.as_deref(), &mut self.rng);
        tracing::debug!(mood = %params.mood, category = choice.name(), "browse requested");
        BrowseRequest {
            ticket: self.browse.begin(params),
            choice,
        }
    }

    /// Run the fetch for a started browse load. Does not touch screen state.
    pub async fn fetch_browse(&self, request: &BrowseRequest) -> Result<BrowseContent, String> {
        match self.catalog.browse(request.choice.name()).await {
            Ok(results) => Ok(BrowseContent {
                choice: request.choice.clone(),
                results,
            }),
            Err(e) => {
                tracing::warn!(category = request.choice.name(), error = %e, "browse failed");
                Err(BROWSE_FAILED.to_string())
            }
        }
    }

    /// Apply a browse result. Returns false when a newer load has started since.
    pub fn finish_browse(
        &mut self,
        request: BrowseRequest,
        outcome: Result<BrowseContent, String>,
    ) -> bool {
        self.browse.resolve(request.ticket, outcome)
    }

    /// Start, fetch and apply a browse load for the current selection.
    pub async fn refresh_browse(&mut self) -> bool {
        let request = self.start_browse();
        self.complete_browse(request).await
    }

    /// Fetch and apply an already started browse load.
    pub async fn complete_browse(&mut self, request: BrowseRequest) -> bool {
        let outcome = self.fetch_browse(&request).await;
        self.finish_browse(request, outcome)
    }

    /// Start a detail load for a recipe id.
    pub fn start_detail(&mut self, id: &str) -> Ticket<String> {
        self.detail.begin(id.to_string())
    }

    /// Run the fetch for a started detail load. Does not touch screen state.
    pub async fn fetch_detail(&self, ticket: &Ticket<String>) -> Result<DetailContent, String> {
        detail_outcome(ticket.params(), self.catalog.get_detail(ticket.params()).await)
    }

    pub fn finish_detail(
        &mut self,
        ticket: Ticket<String>,
        outcome: Result<DetailContent, String>,
    ) -> bool {
        self.detail.resolve(ticket, outcome)
    }

    pub async fn load_detail(&mut self, id: &str) -> bool {
        let ticket = self.start_detail(id);
        let outcome = self.fetch_detail(&ticket).await;
        self.finish_detail(ticket, outcome)
    }

    /// Navigate to a recipe and load it.
    pub async fn open_recipe(&mut self, id: &str) {
        self.history.push(Route::Recipe(id.to_string()));
        self.sync_route().await;
    }

    /// Navigate home. Keeps the previous browse results; loads only if never loaded.
    pub async fn go_home(&mut self) {
        self.history.push(Route::Home);
        self.sync_route().await;
    }

    pub fn show_favorites(&mut self) {
        self.history.push(Route::Favorites);
    }

    /// Step back in history. Returns false when there is nothing to go back to.
    pub async fn back(&mut self) -> bool {
        if self.history.back().is_none() {
            return false;
        }
        self.sync_route().await;
        true
    }

    pub async fn forward(&mut self) -> bool {
        if self.history.forward().is_none() {
            return false;
        }
        self.sync_route().await;
        true
    }

    /// Re-run the load behind the current route.
    pub async fn retry(&mut self) {
        match self.history.current().clone() {
            Route::Home => {
                if let Some(ticket) = self.browse.retry() {
                    let choice = choose_category(
                        ticket.params().mood,
                        ticket.params().category.as_deref(),
                        &mut self.rng,
                    );
                    self.complete_browse(BrowseRequest { ticket, choice }).await;
                } else {
                    self.refresh_browse().await;
                }
            }
            Route::Recipe(_) => {
                if let Some(ticket) = self.detail.retry() {
                    let outcome = self.fetch_detail(&ticket).await;
                    self.finish_detail(ticket, outcome);
                }
            }
            Route::Favorites => {}
        }
    }

    /// Bring the screen behind the current route up to date.
    async fn sync_route(&mut self) {
        match self.history.current().clone() {
            Route::Home => {
                if self.browse.params().is_none() {
                    self.refresh_browse().await;
                }
            }
            Route::Recipe(id) => {
                let failed = matches!(self.detail.state(), Loadable::Failed(_));
                if failed || self.detail.params() != Some(&id) {
                    self.load_detail(&id).await;
                }
            }
            Route::Favorites => {}
        }
    }

    /// Add or remove a recipe from favorites.
    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> Toggled {
        let toggled = self.favorites.toggle(recipe.clone());
        tracing::info!(id = %recipe.id, name = %recipe.name, ?toggled, "favorite toggled");
        toggled
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Find a recipe the app already holds: the open detail, the browse
    /// results, or the favorites.
    pub fn find_recipe(&self, id: &str) -> Option<&Recipe> {
        let from_detail = match self.detail.state().loaded() {
            Some(DetailContent::Found(recipe)) if recipe.id == id => Some(recipe),
            _ => None,
        };
        from_detail
            .or_else(|| {
                self.browse
                    .state()
                    .loaded()
                    .and_then(|content| content.results.recipes.iter().find(|r| r.id == id))
            })
            .or_else(|| self.favorites.get(id))
    }
}

fn detail_outcome(
    id: &str,
    result: Result<Option<Recipe>, CatalogError>,
) -> Result<DetailContent, String> {
    match result {
        Ok(Some(recipe)) => Ok(DetailContent::Found(recipe)),
        Ok(None) => Ok(DetailContent::NotFound),
        Err(e) => {
            tracing::warn!(id, error = %e, "recipe failed to load");
            Err(DETAIL_FAILED.to_string())
        }
    }
}
