//! Turns raw catalog detail records into [`Recipe`]s.
//!
//! The catalog stores ingredients as twenty numbered field pairs
//! (`strIngredient1`/`strMeasure1` … `strIngredient20`/`strMeasure20`), with
//! unused slots left empty or null.

use serde_json::{Map, Value};

use crate::types::{Ingredient, Recipe};

/// Number of ingredient/measure slots in a catalog record.
pub const INGREDIENT_SLOTS: usize = 20;

fn ingredient_key(slot: usize) -> String {
    format!("strIngredient{}", slot)
}

fn measure_key(slot: usize) -> String {
    format!("strMeasure{}", slot)
}

/// Collect the populated ingredient slots in slot order.
///
/// A slot is kept when its ingredient is a string with non-whitespace content.
/// A missing, null or non-string measure becomes the empty string.
pub fn extract_ingredients(raw: &Map<String, Value>) -> Vec<Ingredient> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let ingredient = raw.get(&ingredient_key(slot))?.as_str()?;
            if ingredient.trim().is_empty() {
                return None;
            }
            let measure = raw
                .get(&measure_key(slot))
                .and_then(Value::as_str)
                .unwrap_or("");
            Some(Ingredient::new(ingredient, measure))
        })
        .collect()
}

/// Build a [`Recipe`] from a raw detail record.
///
/// The numbered slots are folded into `ingredients` and dropped from the
/// passthrough fields. Fails only when the record is not recipe-shaped
/// (e.g. no `idMeal`).
pub fn recipe_from_raw(mut raw: Map<String, Value>) -> Result<Recipe, serde_json::Error> {
    let ingredients = extract_ingredients(&raw);

    for slot in 1..=INGREDIENT_SLOTS {
        raw.remove(&ingredient_key(slot));
        raw.remove(&measure_key(slot));
    }
    // Never trust an `ingredients` key coming from the catalog itself
    raw.remove("ingredients");

    let mut recipe: Recipe = serde_json::from_value(Value::Object(raw))?;
    recipe.ingredients = ingredients;
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_skips_blank_slot_between_populated_ones() {
        let record = raw(json!({
            "strIngredient1": "Flour",
            "strMeasure1": "2 cups",
            "strIngredient2": "  ",
            "strMeasure2": "1 tsp",
            "strIngredient3": "Eggs",
            "strMeasure3": "3"
        }));
        let ingredients = extract_ingredients(&record);
        assert_eq!(
            ingredients,
            vec![Ingredient::new("Flour", "2 cups"), Ingredient::new("Eggs", "3")]
        );
    }

    #[test]
    fn test_missing_or_null_measure_is_empty() {
        let record = raw(json!({
            "strIngredient1": "Salt",
            "strMeasure1": null,
            "strIngredient2": "Pepper"
        }));
        let ingredients = extract_ingredients(&record);
        assert_eq!(ingredients[0].measure, "");
        assert_eq!(ingredients[1].measure, "");
    }

    #[test]
    fn test_null_and_non_string_ingredients_are_skipped() {
        let record = raw(json!({
            "strIngredient1": null,
            "strIngredient2": 42,
            "strIngredient3": "",
            "strIngredient4": "Butter",
            "strMeasure4": "1 stick"
        }));
        assert_eq!(
            extract_ingredients(&record),
            vec![Ingredient::new("Butter", "1 stick")]
        );
    }

    #[test]
    fn test_slots_beyond_twenty_are_ignored() {
        let record = raw(json!({
            "strIngredient20": "Parsley",
            "strIngredient21": "Ghost"
        }));
        let ingredients = extract_ingredients(&record);
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].ingredient, "Parsley");
    }

    #[test]
    fn test_text_is_kept_as_given() {
        let record = raw(json!({
            "strIngredient1": "Olive Oil ",
            "strMeasure1": " 2 tbs"
        }));
        assert_eq!(
            extract_ingredients(&record),
            vec![Ingredient::new("Olive Oil ", " 2 tbs")]
        );
    }

    #[test]
    fn test_recipe_from_raw_folds_slots() {
        let record = raw(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strCategory": "Chicken",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "",
            "strMeasure2": "",
            "strDrinkAlternate": null
        }));
        let recipe = recipe_from_raw(record).unwrap();
        assert_eq!(recipe.id, "52772");
        assert_eq!(recipe.ingredients, vec![Ingredient::new("soy sauce", "3/4 cup")]);
        assert!(!recipe.extra.contains_key("strIngredient1"));
        assert!(!recipe.extra.contains_key("strMeasure2"));
        assert!(recipe.extra.contains_key("strDrinkAlternate"));
    }

    #[test]
    fn test_recipe_from_raw_requires_id() {
        let record = raw(json!({"strMeal": "Nameless"}));
        assert!(recipe_from_raw(record).is_err());
    }
}
