//! Routes and back/forward history.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Browse by mood or category.
    #[default]
    Home,
    /// Detail for one recipe id.
    Recipe(String),
    Favorites,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Recipe(id) => format!("/recipe/{}", id),
            Route::Favorites => "/favorites".to_string(),
        }
    }

    /// Parse a path; unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        match trimmed.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/favorites" => Some(Route::Favorites),
            other => other
                .strip_prefix("/recipe/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::Recipe(id.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Browser-style history: navigating drops any forward entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    /// Go to a route. Navigating to the current route is a no-op.
    pub fn push(&mut self, route: Route) {
        if *self.current() == route {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(route);
        self.cursor += 1;
    }

    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
