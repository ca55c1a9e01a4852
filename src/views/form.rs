//! Edit forms. Inputs are kept as the text the user typed and converted to
//! entity values on validation and submit.

use thiserror::Error;

use crate::models::{
    blob, id_refs, Cooking, Entity, EntityKind, FieldError, Ingredient, Recipe, Step, Technique,
};
use crate::store::Slice;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Form model bound to one entity type.
pub trait EntityForm: Default + Clone + std::fmt::Debug {
    type Entity: Slice;

    /// Entity lists the form's relation selectors are filled from.
    const RELATED: &'static [EntityKind];

    /// Fill the inputs from a loaded entity.
    fn load(entity: &Self::Entity) -> Self;

    /// Set a text input by its JSON field name.
    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError>;

    /// Stage file content for a binary field.
    fn stage_blob(
        &mut self,
        field: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<(), FormError> {
        Err(FormError::UnknownField(field.to_string()))
    }

    /// Overlay the form values on `base`, the last loaded entity.
    fn apply_to(&self, base: &Self::Entity) -> Self::Entity;

    /// Input-level errors (unparseable numbers, ids); entity rules are checked on top.
    fn parse_errors(&self) -> Vec<FieldError> {
        Vec::new()
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = self.parse_errors();
        if let Err(entity_errors) = self.apply_to(&Self::Entity::default()).validate() {
            let fresh: Vec<FieldError> = entity_errors
                .into_iter()
                .filter(|e| !errors.iter().any(|p| p.field == e.field))
                .collect();
            errors.extend(fresh);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Empty inputs are absent values.
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_ids(value: &str) -> Result<Vec<i64>, std::num::ParseIntError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientForm {
    pub name: String,
}

impl EntityForm for IngredientForm {
    type Entity = Ingredient;
    const RELATED: &'static [EntityKind] = &[];

    fn load(entity: &Ingredient) -> Self {
        Self {
            name: entity.name.clone().unwrap_or_default(),
        }
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "name" => self.name = value.to_string(),
            _ => return Err(FormError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn apply_to(&self, base: &Ingredient) -> Ingredient {
        Ingredient {
            name: non_empty(&self.name),
            ..base.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepForm {
    pub action: String,
}

impl EntityForm for StepForm {
    type Entity = Step;
    const RELATED: &'static [EntityKind] = &[];

    fn load(entity: &Step) -> Self {
        Self {
            action: entity.action.clone().unwrap_or_default(),
        }
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "action" => self.action = value.to_string(),
            _ => return Err(FormError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn apply_to(&self, base: &Step) -> Step {
        Step {
            action: non_empty(&self.action),
            ..base.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechniqueForm {
    pub description: String,
}

impl EntityForm for TechniqueForm {
    type Entity = Technique;
    const RELATED: &'static [EntityKind] = &[];

    fn load(entity: &Technique) -> Self {
        Self {
            description: entity.description.clone().unwrap_or_default(),
        }
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "description" => self.description = value.to_string(),
            _ => return Err(FormError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn apply_to(&self, base: &Technique) -> Technique {
        Technique {
            description: non_empty(&self.description),
            ..base.clone()
        }
    }
}

/// Recipe form; the picture is staged as base64 with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeForm {
    pub name: String,
    pub cooking: String,
    pub cooking_time: String,
    pub picture: Option<String>,
    pub picture_content_type: Option<String>,
    /// Comma-separated ids, as picked in the multi-select.
    pub ingredients: String,
    pub steps: String,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            cooking: Cooking::default().as_str().to_string(),
            cooking_time: String::new(),
            picture: None,
            picture_content_type: None,
            ingredients: String::new(),
            steps: String::new(),
        }
    }
}

impl RecipeForm {
    pub fn stage_picture(&mut self, bytes: &[u8], content_type: impl Into<String>) {
        self.picture = Some(blob::encode(bytes));
        self.picture_content_type = Some(content_type.into());
    }

    pub fn clear_picture(&mut self) {
        self.picture = None;
        self.picture_content_type = None;
    }
}

impl EntityForm for RecipeForm {
    type Entity = Recipe;
    const RELATED: &'static [EntityKind] = &[EntityKind::Ingredient, EntityKind::Step];

    fn load(entity: &Recipe) -> Self {
        Self {
            name: entity.name.clone().unwrap_or_default(),
            cooking: entity.cooking.unwrap_or_default().as_str().to_string(),
            cooking_time: entity
                .cooking_time
                .map(|t| t.to_string())
                .unwrap_or_default(),
            picture: entity.picture.clone(),
            picture_content_type: entity.picture_content_type.clone(),
            ingredients: join_ids(&entity.ingredient_ids()),
            steps: join_ids(&entity.step_ids()),
        }
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "name" => self.name = value.to_string(),
            "cooking" => self.cooking = value.to_string(),
            "cookingTime" => self.cooking_time = value.to_string(),
            "ingredients" => self.ingredients = value.to_string(),
            "steps" => self.steps = value.to_string(),
            _ => return Err(FormError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn stage_blob(&mut self, field: &str, bytes: &[u8], content_type: &str) -> Result<(), FormError> {
        match field {
            "picture" => self.stage_picture(bytes, content_type),
            _ => return Err(FormError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn apply_to(&self, base: &Recipe) -> Recipe {
        Recipe {
            name: non_empty(&self.name),
            cooking: Cooking::parse(&self.cooking).or(base.cooking),
            cooking_time: self.cooking_time.trim().parse().ok(),
            picture: self.picture.clone(),
            picture_content_type: self.picture_content_type.clone(),
            ingredients: Some(id_refs(&parse_ids(&self.ingredients).unwrap_or_default())),
            steps: Some(id_refs(&parse_ids(&self.steps).unwrap_or_default())),
            ..base.clone()
        }
    }

    fn parse_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if Cooking::parse(&self.cooking).is_none() {
            errors.push(FieldError::new("cooking", "Unknown cooking value."));
        }
        let time = self.cooking_time.trim();
        if !time.is_empty() && time.parse::<i64>().is_err() {
            errors.push(FieldError::new("cookingTime", "This field should be a number."));
        }
        if parse_ids(&self.ingredients).is_err() {
            errors.push(FieldError::new("ingredients", "Invalid ingredient ids."));
        }
        if parse_ids(&self.steps).is_err() {
            errors.push(FieldError::new("steps", "Invalid step ids."));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_form_requires_action() {
        let mut form = StepForm::load(&Step {
            id: Some(7),
            action: Some("Whisk".to_string()),
            recipes: None,
        });
        assert!(form.validate().is_ok());

        form.set("action", "").unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![FieldError::required("action")]);
    }

    #[test]
    fn test_unknown_field() {
        let mut form = TechniqueForm::default();
        assert_eq!(
            form.set("name", "x"),
            Err(FormError::UnknownField("name".to_string()))
        );
    }

    #[test]
    fn test_recipe_form_rejects_cooking_time_out_of_range() {
        let mut form = RecipeForm::default();
        form.set("name", "Stew").unwrap();
        form.set("cookingTime", "70000").unwrap();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "cookingTime");
        assert_eq!(errors[0].message, "This field cannot be more than 65535.");

        form.set("cookingTime", "soon").unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].message, "This field should be a number.");

        form.set("cookingTime", "").unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_recipe_form_overlays_loaded_entity() {
        let mut base = Recipe::named("Soup");
        base.id = Some(4);
        base.cooking_time = Some(30);

        let mut form = RecipeForm::load(&base);
        assert_eq!(form.cooking, "WITH_COOKING");
        assert_eq!(form.cooking_time, "30");

        form.set("name", "Omelette").unwrap();
        form.set("cooking", "WITHOUT_COOKING").unwrap();
        form.set("cookingTime", "5").unwrap();
        form.set("ingredients", "2, 3").unwrap();
        form.stage_picture(&[1, 2, 3], "image/png");

        let recipe = form.apply_to(&base);
        assert_eq!(recipe.id, Some(4));
        assert_eq!(recipe.name.as_deref(), Some("Omelette"));
        assert_eq!(recipe.cooking, Some(Cooking::WithoutCooking));
        assert_eq!(recipe.cooking_time, Some(5));
        assert_eq!(recipe.picture.as_deref(), Some("AQID"));
        assert_eq!(recipe.picture_content_type.as_deref(), Some("image/png"));
        assert_eq!(recipe.ingredient_ids(), vec![2, 3]);
        assert_eq!(recipe.step_ids(), Vec::<i64>::new());

        form.clear_picture();
        let recipe = form.apply_to(&base);
        assert!(form.stage_blob("thumbnail", &[0], "image/png").is_err());
        assert!(recipe.picture.is_none());
        assert!(recipe.picture_content_type.is_none());
    }

    #[test]
    fn test_recipe_form_rejects_bad_ids() {
        let mut form = RecipeForm::default();
        form.set("name", "Salad").unwrap();
        form.set("steps", "1,x").unwrap();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "steps");
    }
}
