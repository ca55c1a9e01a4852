//! Technique model.

use serde::{Deserialize, Serialize};

use super::{is_blank, Entity, EntityKind, FieldError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Technique {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: Some(description.into()),
        }
    }
}

impl Entity for Technique {
    const KIND: EntityKind = EntityKind::Technique;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        if is_blank(&self.description) {
            return Err(vec![FieldError::required("description")]);
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &Self) {
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
    }
}
