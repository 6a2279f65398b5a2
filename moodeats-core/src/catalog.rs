//! Read-only client for the recipe catalog service.
//!
//! Three endpoints are used, each answering with a JSON envelope whose payload
//! list is `null` when there is nothing to return:
//! - `categories.php` → `{"categories": [...]}`
//! - `filter.php?c=<category>` → `{"meals": [summary, ...]}`
//! - `lookup.php?i=<id>` → `{"meals": [detail]}`

use futures_util::future::join_all;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::error::{CatalogError, FetchError};
use crate::http::{CatalogHttpClient, HttpClient};
use crate::mood::Mood;
use crate::normalize::recipe_from_raw;
use crate::types::{Recipe, RecipeSummary};

/// Maximum number of recipes hydrated for one browse listing.
pub const BROWSE_LIMIT: usize = 12;

#[derive(Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Option<Vec<CategoryEntry>>,
}

#[derive(Deserialize)]
struct CategoryEntry {
    #[serde(rename = "strCategory")]
    name: String,
}

/// The category a browse listing is filtered by, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    /// Picked by the user; overrides the mood.
    Explicit(String),
    /// Drawn at random from the mood's profile.
    FromMood { mood: Mood, category: String },
}

impl CategoryChoice {
    pub fn name(&self) -> &str {
        match self {
            CategoryChoice::Explicit(category) => category,
            CategoryChoice::FromMood { category, .. } => category,
        }
    }
}

/// Resolve the category to browse.
///
/// A non-blank explicit category always wins. Otherwise one of the mood's
/// categories is drawn uniformly at random, fresh on every call.
pub fn choose_category<R: Rng + ?Sized>(
    mood: Mood,
    explicit: Option<&str>,
    rng: &mut R,
) -> CategoryChoice {
    if let Some(category) = explicit.map(str::trim).filter(|c| !c.is_empty()) {
        return CategoryChoice::Explicit(category.to_string());
    }

    let category = mood
        .profile()
        .categories
        .choose(rng)
        .copied()
        .unwrap_or_default();

    CategoryChoice::FromMood {
        mood,
        category: category.to_string(),
    }
}

/// A recipe from a listing whose detail could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationFailure {
    pub id: String,
    pub name: String,
    pub error: String,
}

/// Result of hydrating a listing: every recipe that loaded, plus the ones that did not.
#[derive(Debug, Clone, Default)]
pub struct Hydrated {
    /// Loaded recipes, in listing order.
    pub recipes: Vec<Recipe>,
    pub failures: Vec<HydrationFailure>,
}

impl Hydrated {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty() && self.failures.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Client for the recipe catalog.
pub struct CatalogClient {
    http: Box<dyn HttpClient>,
    base_url: String,
}

impl CatalogClient {
    /// Create a client over any transport. `base_url` has no trailing slash.
    pub fn new(http: impl HttpClient + 'static, base_url: impl Into<String>) -> Self {
        Self {
            http: Box::new(http),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with the production transport.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let http = CatalogHttpClient::builder()
            .rate_limit_ms(config.rate_limit_ms)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::new(http, config.base_url.clone()))
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> String {
        let raw = format!("{}/{}", self.base_url, path);
        if params.is_empty() {
            return raw;
        }
        match url::Url::parse_with_params(&raw, params) {
            Ok(url) => url.to_string(),
            // Leave it to the transport to report the bad URL
            Err(_) => raw,
        }
    }

    pub fn categories_url(&self) -> String {
        self.endpoint("categories.php", &[])
    }

    pub fn filter_url(&self, category: &str) -> String {
        self.endpoint("filter.php", &[("c", category)])
    }

    pub fn lookup_url(&self, id: &str) -> String {
        self.endpoint("lookup.php", &[("i", id)])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let body = self.http.get_text(url).await?;
        let parsed = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(url, error = %e, "unexpected response shape");
            e
        })?;
        Ok(parsed)
    }

    /// List all category names offered by the catalog.
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let envelope: CategoriesEnvelope = self.get_json(&self.categories_url()).await?;
        Ok(envelope
            .categories
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// List recipe summaries in a category. No matches is an empty list.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<RecipeSummary>, CatalogError> {
        let envelope: MealsEnvelope<RecipeSummary> =
            self.get_json(&self.filter_url(category)).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    /// Fetch the full recipe for an id. `Ok(None)` means the catalog has no such recipe.
    pub async fn get_detail(&self, id: &str) -> Result<Option<Recipe>, CatalogError> {
        let envelope: MealsEnvelope<Map<String, Value>> =
            self.get_json(&self.lookup_url(id)).await?;

        match envelope.meals.and_then(|meals| meals.into_iter().next()) {
            Some(raw) => Ok(Some(recipe_from_raw(raw)?)),
            None => Ok(None),
        }
    }

    /// Fetch details for all summaries concurrently.
    ///
    /// Each fetch stands on its own: failures are collected next to the
    /// recipes that did load instead of failing the batch.
    pub async fn hydrate(&self, summaries: &[RecipeSummary]) -> Hydrated {
        let fetches = summaries.iter().map(|summary| async move {
            let result = self.get_detail(&summary.id).await;
            (summary, result)
        });

        let mut hydrated = Hydrated::default();
        for (summary, result) in join_all(fetches).await {
            let error = match result {
                Ok(Some(recipe)) => {
                    hydrated.recipes.push(recipe);
                    continue;
                }
                Ok(None) => CatalogError::NotFound(summary.id.clone()),
                Err(e) => e,
            };
            tracing::warn!(id = %summary.id, error = %error, "failed to load recipe detail");
            hydrated.failures.push(HydrationFailure {
                id: summary.id.clone(),
                name: summary.name.clone(),
                error: error.to_string(),
            });
        }
        hydrated
    }

    /// List a category and hydrate the first [`BROWSE_LIMIT`] entries.
    ///
    /// Only a failed listing fails the whole call.
    pub async fn browse(&self, category: &str) -> Result<Hydrated, CatalogError> {
        let summaries = self.list_by_category(category).await?;
        let take = summaries.len().min(BROWSE_LIMIT);
        tracing::debug!(category, listed = summaries.len(), hydrating = take, "browse");
        Ok(self.hydrate(&summaries[..take]).await)
    }
}
