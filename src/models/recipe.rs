//! Recipe model.

use serde::{Deserialize, Serialize};

use super::{blob, is_blank, Entity, EntityKind, FieldError, Ingredient, Step};

/// Upper bound for `cookingTime`, in minutes.
pub const MAX_COOKING_TIME: i64 = 65535;

/// Whether a recipe needs to be cooked.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cooking {
    #[default]
    WithCooking,
    WithoutCooking,
}

impl Cooking {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cooking::WithCooking => "WITH_COOKING",
            Cooking::WithoutCooking => "WITHOUT_COOKING",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WITH_COOKING" => Some(Cooking::WithCooking),
            "WITHOUT_COOKING" => Some(Cooking::WithoutCooking),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cooking::WithCooking => "With cooking",
            Cooking::WithoutCooking => "Without cooking",
        }
    }
}

/// A recipe with its ingredients, steps and an optional picture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking: Option<Cooking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<i64>,
    /// Base64 encoded image data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

impl Recipe {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            cooking: Some(Cooking::default()),
            ..Default::default()
        }
    }

    /// Attach a picture; data and content type always travel together.
    pub fn set_picture(&mut self, bytes: &[u8], content_type: impl Into<String>) {
        self.picture = Some(blob::encode(bytes));
        self.picture_content_type = Some(content_type.into());
    }

    pub fn clear_picture(&mut self) {
        self.picture = None;
        self.picture_content_type = None;
    }

    pub fn picture_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        self.picture.as_deref().map(blob::decode)
    }

    pub fn ingredient_ids(&self) -> Vec<i64> {
        self.ingredients
            .iter()
            .flatten()
            .filter_map(|i| i.id)
            .collect()
    }

    pub fn step_ids(&self) -> Vec<i64> {
        self.steps.iter().flatten().filter_map(|s| s.id).collect()
    }
}

impl Entity for Recipe {
    const KIND: EntityKind = EntityKind::Recipe;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if is_blank(&self.name) {
            errors.push(FieldError::required("name"));
        }
        if let Some(time) = self.cooking_time {
            if time < 0 {
                errors.push(FieldError::new(
                    "cookingTime",
                    "This field should be at least 0.",
                ));
            } else if time > MAX_COOKING_TIME {
                errors.push(FieldError::new(
                    "cookingTime",
                    format!("This field cannot be more than {}.", MAX_COOKING_TIME),
                ));
            }
        }
        if self.picture.is_some() != self.picture_content_type.is_some() {
            errors.push(FieldError::new(
                "picture",
                "Picture and picture content type must be set together.",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Relations are not patchable; only scalar columns are merged.
    fn apply_patch(&mut self, patch: &Self) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(cooking) = patch.cooking {
            self.cooking = Some(cooking);
        }
        if let Some(cooking_time) = patch.cooking_time {
            self.cooking_time = Some(cooking_time);
        }
        if let Some(picture) = &patch.picture {
            self.picture = Some(picture.clone());
        }
        if let Some(content_type) = &patch.picture_content_type {
            self.picture_content_type = Some(content_type.clone());
        }
    }
}
