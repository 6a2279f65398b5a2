//! Static mood catalog: each mood maps to a curated list of recipe categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-selectable moods, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Happy,
    Stressed,
    Tired,
    Adventurous,
    Comfort,
    Romantic,
}

/// Display data and candidate categories for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodProfile {
    pub mood: Mood,
    pub label: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    /// Candidate category names, matched by name against the catalog.
    pub categories: &'static [&'static str],
}

// Order must match Mood declaration order; `profile` indexes into it.
static PROFILES: [MoodProfile; 6] = [
    MoodProfile {
        mood: Mood::Happy,
        label: "Happy",
        emoji: "😊",
        description: "Feeling joyful and energetic",
        categories: &["Dessert", "Pasta", "Pork", "Chicken"],
    },
    MoodProfile {
        mood: Mood::Stressed,
        label: "Stressed",
        emoji: "😫",
        description: "Need something comforting",
        categories: &["Pasta", "Dessert", "Chocolate", "Comfort Food"],
    },
    MoodProfile {
        mood: Mood::Tired,
        label: "Tired",
        emoji: "😴",
        description: "Quick and easy meals",
        categories: &["Quick & Easy", "One-Pot", "Pasta", "Chicken"],
    },
    MoodProfile {
        mood: Mood::Adventurous,
        label: "Adventurous",
        emoji: "🌍",
        description: "Ready to try something new",
        categories: &["Exotic", "Gourmet", "Seafood", "Vegetarian"],
    },
    MoodProfile {
        mood: Mood::Comfort,
        label: "Comfort Food",
        emoji: "🍲",
        description: "Classic comfort dishes",
        categories: &["Comfort Food", "Pasta", "Beef", "Chicken"],
    },
    MoodProfile {
        mood: Mood::Romantic,
        label: "Romantic",
        emoji: "💝",
        description: "Perfect for a special night",
        categories: &["Gourmet", "Seafood", "Dessert", "Italian"],
    },
];

impl Mood {
    /// All moods in display order
    pub const ALL: &'static [Mood] = &[
        Mood::Happy,
        Mood::Stressed,
        Mood::Tired,
        Mood::Adventurous,
        Mood::Comfort,
        Mood::Romantic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Stressed => "stressed",
            Mood::Tired => "tired",
            Mood::Adventurous => "adventurous",
            Mood::Comfort => "comfort",
            Mood::Romantic => "romantic",
        }
    }

    pub fn profile(&self) -> &'static MoodProfile {
        profile(*self)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mood name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood: {0} (expected one of happy, stressed, tired, adventurous, comfort, romantic)")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Look up the profile for a mood.
pub fn profile(mood: Mood) -> &'static MoodProfile {
    &PROFILES[mood as usize]
}

/// All profiles in display order.
pub fn all_profiles() -> &'static [MoodProfile] {
    &PROFILES
}
