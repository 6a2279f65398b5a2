//! User favorites, unique by recipe id and kept in favoriting order.
//!
//! The whole collection is written to storage after every change and read back
//! once when the store is opened.

use std::collections::HashSet;

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use crate::types::Recipe;

/// Storage key holding the serialized collection.
pub const FAVORITES_KEY: &str = "favoriteRecipes";

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

pub struct FavoritesStore {
    recipes: Vec<Recipe>,
    storage: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Open the store, rehydrating from storage.
    ///
    /// Missing or unreadable data starts an empty collection; it is never an error.
    pub fn open(storage: impl KeyValueStore + 'static) -> Self {
        let recipes = match storage.get(FAVORITES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Recipe>>(&json) {
                Ok(recipes) => dedup_by_id(recipes),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding malformed favorites");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites");
                Vec::new()
            }
        };

        tracing::debug!(count = recipes.len(), "favorites loaded");
        Self {
            recipes,
            storage: Box::new(storage),
        }
    }

    /// Remove the recipe if its id is present, else append it. Writes through.
    pub fn toggle(&mut self, recipe: Recipe) -> Toggled {
        let toggled = match self.position(&recipe.id) {
            Some(index) => {
                self.recipes.remove(index);
                Toggled::Removed
            }
            None => {
                self.recipes.push(recipe);
                Toggled::Added
            }
        };
        self.persist();
        toggled
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Favorites in the order they were added.
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.recipes.iter().position(|r| r.id == id)
    }

    // A failed write keeps the in-memory change; the next toggle writes everything again.
    fn persist(&self) {
        let result = serde_json::to_string(&self.recipes)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(FAVORITES_KEY, &json));

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist favorites");
        }
    }
}

fn dedup_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}
