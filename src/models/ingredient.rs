//! Ingredient model.

use serde::{Deserialize, Serialize};

use super::{is_blank, Entity, EntityKind, FieldError, Recipe};

/// An ingredient used by any number of recipes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
}

impl Ingredient {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl Entity for Ingredient {
    const KIND: EntityKind = EntityKind::Ingredient;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        if is_blank(&self.name) {
            return Err(vec![FieldError::required("name")]);
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &Self) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
    }
}
