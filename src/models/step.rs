//! Cooking step model.

use serde::{Deserialize, Serialize};

use super::{is_blank, Entity, EntityKind, FieldError, Recipe};

/// A single cooking action, shared between recipes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
}

impl Step {
    pub fn with_action(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Default::default()
        }
    }
}

impl Entity for Step {
    const KIND: EntityKind = EntityKind::Step;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        if is_blank(&self.action) {
            return Err(vec![FieldError::required("action")]);
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &Self) {
        if let Some(action) = &patch.action {
            self.action = Some(action.clone());
        }
    }
}
