pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod http;
pub mod mood;
pub mod navigation;
pub mod normalize;
pub mod storage;
pub mod types;
pub mod view;

pub use app::{App, BrowseRequest};
pub use catalog::{
    choose_category, CatalogClient, CategoryChoice, Hydrated, HydrationFailure, BROWSE_LIMIT,
};
pub use config::{AppConfig, ConfigError};
pub use error::{CatalogError, FetchError, StorageError};
pub use favorites::{FavoritesStore, Toggled, FAVORITES_KEY};
pub use http::{CatalogHttpClient, CatalogHttpClientBuilder, HttpClient, MockClient, MockResponse};
pub use mood::{all_profiles, profile, Mood, MoodProfile, UnknownMood};
pub use navigation::{History, Route};
pub use normalize::{extract_ingredients, recipe_from_raw, INGREDIENT_SLOTS};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Ingredient, Recipe, RecipeSummary};
pub use view::{
    BrowseContent, BrowseParams, BrowseScreen, DetailContent, DetailScreen, Loadable, Screen,
    Ticket,
};
