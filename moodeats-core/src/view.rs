//! Per-screen load state with stale-response protection.
//!
//! A screen moves to `Loading` whenever its parameters change and then to
//! `Loaded` or `Failed` when the fetch resolves. Every fetch is started with a
//! [`Ticket`]; only the most recently issued ticket may resolve the screen, so a
//! slow response for old parameters can never overwrite a newer one.

use crate::catalog::{CategoryChoice, Hydrated};
use crate::mood::Mood;
use crate::types::Recipe;

/// Load state of a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded(T),
    /// User-facing failure message.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Handle for one in-flight fetch: the generation it was issued at and the
/// parameters it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<P> {
    generation: u64,
    params: P,
}

impl<P> Ticket<P> {
    pub fn params(&self) -> &P {
        &self.params
    }
}

/// A data-fetching screen keyed by parameters `P` and showing `T`.
#[derive(Debug, Clone)]
pub struct Screen<P, T> {
    generation: u64,
    params: Option<P>,
    state: Loadable<T>,
}

impl<P, T> Default for Screen<P, T> {
    fn default() -> Self {
        Self {
            generation: 0,
            params: None,
            state: Loadable::Idle,
        }
    }
}

impl<P: Clone + PartialEq, T> Screen<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `params`: bumps the generation and resets to `Loading`.
    pub fn begin(&mut self, params: P) -> Ticket<P> {
        self.generation += 1;
        self.params = Some(params.clone());
        self.state = Loadable::Loading;
        Ticket {
            generation: self.generation,
            params,
        }
    }

    /// Re-issue a fetch for the current parameters, if any.
    pub fn retry(&mut self) -> Option<Ticket<P>> {
        let params = self.params.clone()?;
        Some(self.begin(params))
    }

    /// Apply a fetch result. Returns false (and changes nothing) when the
    /// ticket has been superseded.
    pub fn resolve(&mut self, ticket: Ticket<P>, outcome: Result<T, String>) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }
        self.state = match outcome {
            Ok(value) => Loadable::Loaded(value),
            Err(message) => Loadable::Failed(message),
        };
        true
    }

    pub fn is_current(&self, ticket: &Ticket<P>) -> bool {
        ticket.generation == self.generation && self.params.as_ref() == Some(&ticket.params)
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }

    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }
}

/// Message shown when a browse listing fails.
pub const BROWSE_FAILED: &str = "Failed to load recipes. Please try again later.";
/// Message shown when a browse listing is empty.
pub const BROWSE_EMPTY: &str = "No recipes found. Try a different category or mood.";
/// Message shown when a recipe id does not exist.
pub const DETAIL_NOT_FOUND: &str = "Recipe not found";
/// Message shown when a recipe fails to load.
pub const DETAIL_FAILED: &str = "Failed to load recipe. Please try again later.";

/// Parameters of the browse screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseParams {
    pub mood: Mood,
    /// Explicit category; `None` means "pick from the mood".
    pub category: Option<String>,
}

/// Loaded content of the browse screen.
#[derive(Debug, Clone)]
pub struct BrowseContent {
    /// Category the listing was actually filtered by.
    pub choice: CategoryChoice,
    pub results: Hydrated,
}

impl BrowseContent {
    /// True when the listing had no recipes at all (not an error).
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Loaded content of the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailContent {
    Found(Recipe),
    NotFound,
}

pub type BrowseScreen = Screen<BrowseParams, BrowseContent>;
pub type DetailScreen = Screen<String, DetailContent>;
