//! Entity type names used for routing, API paths and search.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four entity types managed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Ingredient,
    Recipe,
    Step,
    Technique,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Ingredient,
        EntityKind::Recipe,
        EntityKind::Step,
        EntityKind::Technique,
    ];

    /// Singular name, also the client route segment (`/recipe`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Ingredient => "ingredient",
            EntityKind::Recipe => "recipe",
            EntityKind::Step => "step",
            EntityKind::Technique => "technique",
        }
    }

    /// Plural name, the REST resource segment (`/api/recipes`).
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Ingredient => "ingredients",
            EntityKind::Recipe => "recipes",
            EntityKind::Step => "steps",
            EntityKind::Technique => "techniques",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Ingredient => "Ingredient",
            EntityKind::Recipe => "Recipe",
            EntityKind::Step => "Step",
            EntityKind::Technique => "Technique",
        }
    }

    pub fn title_plural(&self) -> &'static str {
        match self {
            EntityKind::Ingredient => "Ingredients",
            EntityKind::Recipe => "Recipes",
            EntityKind::Step => "Steps",
            EntityKind::Technique => "Techniques",
        }
    }

    /// Upper-case name used in action type strings (`FETCH_RECIPE_LIST`).
    pub fn action_name(&self) -> &'static str {
        match self {
            EntityKind::Ingredient => "INGREDIENT",
            EntityKind::Recipe => "RECIPE",
            EntityKind::Step => "STEP",
            EntityKind::Technique => "TECHNIQUE",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts singular or plural names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower || kind.plural() == lower)
            .ok_or_else(|| format!("unknown entity type: {}", s))
    }
}
