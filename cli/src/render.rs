//! Plain-text rendering of app screens.

use moodeats_core::view::{BROWSE_EMPTY, DETAIL_NOT_FOUND};
use moodeats_core::{
    all_profiles, App, CategoryChoice, DetailContent, FavoritesStore, Loadable, Mood, Recipe,
    Route,
};

const RETRY_HINT: &str = "Type `retry` to try again.";

/// "1 recipe", "3 recipes".
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Mood picker. The current mood, if any, is marked.
pub fn render_moods(current: Option<Mood>) -> String {
    all_profiles()
        .iter()
        .map(|p| {
            let marker = if Some(p.mood) == current { ">" } else { " " };
            format!(
                "{} {} {:<12} {:<12} {}",
                marker,
                p.emoji,
                p.label,
                p.mood.as_str(),
                p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn favorite_marker(favorite: bool) -> &'static str {
    if favorite {
        "♥"
    } else {
        " "
    }
}

/// One numbered recipe card: name, category, area, favorite marker and image link.
pub fn render_card(index: usize, recipe: &Recipe, favorite: bool) -> String {
    let mut card = format!(
        "{:>3}. {} {}  (#{})\n       {} · {} Cuisine",
        index,
        favorite_marker(favorite),
        recipe.name,
        recipe.id,
        recipe.category,
        recipe.area_or_default()
    );
    if let Some(image) = image_link(recipe) {
        card.push_str(&format!("\n       Image: {}", image));
    }
    card
}

fn image_link(recipe: &Recipe) -> Option<&str> {
    Some(recipe.thumbnail.trim()).filter(|url| !url.is_empty())
}

fn render_cards(recipes: &[Recipe], favorites: &FavoritesStore) -> Vec<String> {
    recipes
        .iter()
        .enumerate()
        .map(|(i, r)| render_card(i + 1, r, favorites.is_favorite(&r.id)))
        .collect()
}

fn category_filter(app: &App) -> Option<String> {
    if app.categories().is_empty() {
        return None;
    }
    let selected = app.category();
    let mut entries = vec![if selected.is_none() {
        "[All]".to_string()
    } else {
        "All".to_string()
    }];
    entries.extend(app.categories().iter().map(|c| {
        if Some(c.as_str()) == selected {
            format!("[{}]", c)
        } else {
            c.clone()
        }
    }));
    Some(format!("Categories: {}", entries.join(" ")))
}

/// Home screen: heading for the current selection, filter list and results.
pub fn render_browse(app: &App) -> String {
    let profile = app.mood().profile();
    let mut lines = match app.category() {
        Some(category) => vec![
            format!("{} Recipes", category),
            format!("Showing {} recipes.", category.to_lowercase()),
        ],
        None => vec![
            format!("{} {} Picks", profile.emoji, profile.label),
            profile.description.to_string(),
        ],
    };
    if let Some(filter) = category_filter(app) {
        lines.push(filter);
    }
    lines.push(String::new());

    match app.browse().state() {
        Loadable::Idle | Loadable::Loading => lines.push("Loading recipes...".to_string()),
        Loadable::Failed(message) => {
            lines.push(message.clone());
            lines.push(RETRY_HINT.to_string());
        }
        Loadable::Loaded(content) if content.is_empty() => lines.push(BROWSE_EMPTY.to_string()),
        Loadable::Loaded(content) => {
            if let CategoryChoice::FromMood { category, .. } = &content.choice {
                lines.push(format!("Picked from {}", category));
            }
            lines.extend(render_cards(&content.results.recipes, app.favorites()));
            if content.results.is_partial() {
                lines.push(String::new());
                lines.push(format!(
                    "{} could not be loaded.",
                    plural(content.results.failures.len(), "recipe")
                ));
            }
        }
    }
    lines.join("\n")
}

/// Full recipe view.
pub fn render_recipe(recipe: &Recipe, favorite: bool) -> String {
    let mut lines = vec![
        format!("{} {}", recipe.name, favorite_marker(favorite)).trim_end().to_string(),
        format!("{} · {}", recipe.category, recipe.area_or_default()),
    ];
    if let Some(image) = image_link(recipe) {
        lines.push(format!("Image: {}", image));
    }
    let tags = recipe.tags();
    if !tags.is_empty() {
        lines.push(format!("Tags: {}", tags.join(", ")));
    }

    lines.push(String::new());
    lines.push("Ingredients".to_string());
    for item in &recipe.ingredients {
        let text = format!("{} {}", item.measure.trim(), item.ingredient.trim());
        lines.push(format!("  - {}", text.trim()));
    }

    lines.push(String::new());
    lines.push("Instructions".to_string());
    for (i, step) in recipe.instruction_steps().iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, step));
    }

    if let Some(embed) = recipe.video_embed_url() {
        lines.push(String::new());
        lines.push(format!("Video: {}", embed));
    }
    if let Some(source) = &recipe.source_url {
        lines.push(format!("Source: {}", source));
    }
    lines.join("\n")
}

/// Detail screen for whatever the detail state currently holds.
pub fn render_detail(app: &App) -> String {
    match app.detail().state() {
        Loadable::Idle | Loadable::Loading => "Loading recipe...".to_string(),
        Loadable::Failed(message) => format!("{}\n{}", message, RETRY_HINT),
        Loadable::Loaded(DetailContent::NotFound) => DETAIL_NOT_FOUND.to_string(),
        Loadable::Loaded(DetailContent::Found(recipe)) => {
            render_recipe(recipe, app.is_favorite(&recipe.id))
        }
    }
}

pub fn render_favorites(favorites: &FavoritesStore) -> String {
    if favorites.is_empty() {
        return "No favorites yet\nSave your favorite recipes to see them here!".to_string();
    }
    let mut lines = vec![
        "Your Favorite Recipes".to_string(),
        format!("{} saved", plural(favorites.len(), "recipe")),
        String::new(),
    ];
    lines.extend(render_cards(favorites.all(), favorites));
    lines.join("\n")
}

/// Whatever screen the current route shows.
pub fn render_current(app: &App) -> String {
    match app.route() {
        Route::Home => render_browse(app),
        Route::Recipe(_) => render_detail(app),
        Route::Favorites => render_favorites(app.favorites()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodeats_core::view::{BROWSE_FAILED, DETAIL_FAILED};
    use moodeats_core::{
        BrowseContent, CatalogClient, FavoritesStore, Hydrated, HydrationFailure, MemoryStore,
        MockClient,
    };
    use serde_json::json;

    fn test_app() -> App {
        App::new(
            CatalogClient::new(MockClient::new(), "https://catalog.test/api"),
            FavoritesStore::open(MemoryStore::new()),
        )
        .with_seed(7)
    }

    fn recipe(id: &str, name: &str) -> Recipe {
        serde_json::from_value(json!({
            "idMeal": id,
            "strMeal": name,
            "strCategory": "Seafood",
            "strArea": "",
            "strInstructions": "Mix.\r\n\r\nBake.",
            "strYoutube": "https://www.youtube.com/watch?v=abc123",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/fish.jpg",
            "ingredients": [
                {"ingredient": "Salmon", "measure": "2 fillets"},
                {"ingredient": "Salt", "measure": ""}
            ]
        }))
        .unwrap()
    }

    fn loaded_browse(app: &mut App, category: &str, results: Hydrated) {
        let request = app.select_category(Some(category.to_string()));
        let content = BrowseContent {
            choice: request.choice().clone(),
            results,
        };
        assert!(app.finish_browse(request, Ok(content)));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "recipe"), "0 recipes");
        assert_eq!(plural(1, "recipe"), "1 recipe");
        assert_eq!(plural(2, "recipe"), "2 recipes");
    }

    #[test]
    fn test_moods_list_all_profiles() {
        let text = render_moods(Some(Mood::Tired));
        assert_eq!(text.lines().count(), 6);
        assert!(text.lines().nth(2).unwrap().starts_with('>'));
        assert!(text.contains("Quick and easy meals"));
    }

    #[test]
    fn test_browse_heading_for_mood_and_category() {
        let mut app = test_app();
        app.select_mood(Mood::Tired);
        let text = render_browse(&app);
        assert!(text.starts_with("😴 Tired Picks\nQuick and easy meals"));
        assert!(text.contains("Loading recipes..."));

        app.select_category(Some("Seafood".to_string()));
        let text = render_browse(&app);
        assert!(text.starts_with("Seafood Recipes\nShowing seafood recipes."));
    }

    #[test]
    fn test_browse_empty_is_not_an_error() {
        let mut app = test_app();
        loaded_browse(&mut app, "Exotic", Hydrated::default());
        let text = render_browse(&app);
        assert!(text.contains(BROWSE_EMPTY));
        assert!(!text.contains(BROWSE_FAILED));
    }

    #[test]
    fn test_browse_failure_offers_retry() {
        let mut app = test_app();
        let request = app.select_category(Some("Beef".to_string()));
        app.finish_browse(request, Err(BROWSE_FAILED.to_string()));
        let text = render_browse(&app);
        assert!(text.contains(BROWSE_FAILED));
        assert!(text.contains(RETRY_HINT));
    }

    #[test]
    fn test_browse_partial_shows_successes_and_count() {
        let mut app = test_app();
        let results = Hydrated {
            recipes: vec![recipe("1", "Fish pie")],
            failures: vec![
                HydrationFailure {
                    id: "2".to_string(),
                    name: "Broken".to_string(),
                    error: "timeout".to_string(),
                },
                HydrationFailure {
                    id: "3".to_string(),
                    name: "Missing".to_string(),
                    error: "not found".to_string(),
                },
            ],
        };
        loaded_browse(&mut app, "Seafood", results);

        let text = render_browse(&app);
        assert!(text.contains("  1.   Fish pie  (#1)"));
        assert!(text.contains("Seafood · International Cuisine"));
        assert!(text.contains("2 recipes could not be loaded."));
    }

    #[test]
    fn test_category_filter_marks_selection() {
        let mut app = test_app();
        app.select_category(Some("Seafood".to_string()));
        // No categories loaded: no filter line
        assert!(!render_browse(&app).contains("Categories:"));
    }

    #[test]
    fn test_card_shows_favorite_marker_and_image() {
        let card = render_card(4, &recipe("9", "Fish pie"), true);
        assert!(card.starts_with("  4. ♥ Fish pie  (#9)"));
        assert!(card.ends_with("Image: https://www.themealdb.com/images/media/meals/fish.jpg"));
    }

    #[test]
    fn test_card_without_image_has_no_image_line() {
        let mut plain = recipe("9", "Fish pie");
        plain.thumbnail = String::new();
        assert!(!render_card(1, &plain, false).contains("Image:"));
    }

    #[test]
    fn test_recipe_view() {
        let text = render_recipe(&recipe("1", "Fish pie"), false);
        assert!(text.starts_with(
            "Fish pie\nSeafood · International\nImage: https://www.themealdb.com/images/media/meals/fish.jpg"
        ));
        assert!(text.contains("  - 2 fillets Salmon"));
        assert!(text.contains("  - Salt"));
        assert!(text.contains("  1. Mix.\n  2. Bake."));
        assert!(text.contains("Video: https://www.youtube.com/embed/abc123"));
        assert!(!text.contains("Source:"));
    }

    #[test]
    fn test_detail_not_found_differs_from_failure() {
        let mut app = test_app();
        let ticket = app.start_detail("1");
        app.finish_detail(ticket, Ok(DetailContent::NotFound));
        let not_found = render_detail(&app);

        let ticket = app.start_detail("2");
        app.finish_detail(ticket, Err(DETAIL_FAILED.to_string()));
        let failed = render_detail(&app);

        assert_eq!(not_found, DETAIL_NOT_FOUND);
        assert!(failed.starts_with(DETAIL_FAILED));
        assert_ne!(not_found, failed);
    }

    #[test]
    fn test_favorites_screen() {
        let mut favorites = FavoritesStore::open(MemoryStore::new());
        assert!(render_favorites(&favorites).starts_with("No favorites yet"));

        favorites.toggle(recipe("1", "Fish pie"));
        let text = render_favorites(&favorites);
        assert!(text.starts_with("Your Favorite Recipes\n1 recipe saved"));
        assert!(text.contains("♥ Fish pie"));
    }
}
