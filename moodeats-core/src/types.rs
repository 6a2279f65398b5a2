use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Base URL for embedded video players.
pub const VIDEO_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Area shown when a recipe has none.
pub const DEFAULT_AREA: &str = "International";

/// One ingredient line. The measure may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub measure: String,
}

impl Ingredient {
    pub fn new(ingredient: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            measure: measure.into(),
        }
    }
}

/// Partial recipe returned by category listings (no ingredients or instructions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
}

/// Full recipe record.
///
/// Serialized with the catalog's field names so persisted favorites look like
/// catalog records with an extra `ingredients` array. Fields the catalog sends
/// that are not modelled here are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "strCategory", default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(rename = "strArea", default, deserialize_with = "null_as_empty")]
    pub area: String,
    /// Free text with embedded line breaks.
    #[serde(rename = "strInstructions", default, deserialize_with = "null_as_empty")]
    pub instructions: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
    /// Comma-delimited tag list.
    #[serde(rename = "strTags", default, deserialize_with = "empty_as_none")]
    pub tags: Option<String>,
    #[serde(rename = "strYoutube", default, deserialize_with = "empty_as_none")]
    pub video_url: Option<String>,
    #[serde(rename = "strSource", default, deserialize_with = "empty_as_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

impl Recipe {
    /// Tags split on commas, trimmed, blanks dropped.
    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Instruction paragraphs, one per non-blank line.
    pub fn instruction_steps(&self) -> Vec<&str> {
        self.instructions
            .lines()
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .collect()
    }

    /// Video id from the `v` query parameter of the video URL.
    pub fn video_id(&self) -> Option<String> {
        let url = url::Url::parse(self.video_url.as_deref()?).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty())
    }

    /// Embeddable player URL for the recipe video.
    pub fn video_embed_url(&self) -> Option<String> {
        self.video_id()
            .map(|id| format!("{}{}", VIDEO_EMBED_BASE, id))
    }

    pub fn area_or_default(&self) -> &str {
        if self.area.trim().is_empty() {
            DEFAULT_AREA
        } else {
            &self.area
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}
