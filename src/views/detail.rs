use std::fmt;
use std::marker::PhantomData;

use super::ViewPhase;
use crate::actions::Store;
use crate::client::RequestFailure;
use crate::models::{blob, Entity, Ingredient, Recipe, Step, Technique};
use crate::routes::Route;
use crate::store::Slice;

/// A read-only value on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    Text(String),
    Binary {
        content_type: String,
        data_uri: String,
        size: String,
    },
    Empty,
}

impl DisplayValue {
    fn text(value: Option<impl ToString>) -> Self {
        value
            .map(|v| DisplayValue::Text(v.to_string()))
            .unwrap_or(DisplayValue::Empty)
    }

    /// Referenced entities shown as their ids, `"1, 4"`.
    fn ids<E: Entity>(related: &Option<Vec<E>>) -> Self {
        let ids: Vec<String> = related
            .iter()
            .flatten()
            .filter_map(|e| e.id())
            .map(|id| id.to_string())
            .collect();
        if ids.is_empty() {
            DisplayValue::Empty
        } else {
            DisplayValue::Text(ids.join(", "))
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(text) => f.write_str(text),
            DisplayValue::Binary {
                content_type, size, ..
            } => write!(f, "{}, {}", content_type, size),
            DisplayValue::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: DisplayValue,
}

impl Field {
    fn new(label: &'static str, value: DisplayValue) -> Self {
        Self { label, value }
    }
}

/// Labelled values of an entity, in display order.
pub trait Fields {
    fn fields(&self) -> Vec<Field>;
}

impl Fields for Ingredient {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("ID", DisplayValue::text(self.id)),
            Field::new("Name", DisplayValue::text(self.name.as_ref())),
        ]
    }
}

impl Fields for Recipe {
    fn fields(&self) -> Vec<Field> {
        let picture = match (&self.picture, &self.picture_content_type) {
            (Some(data), Some(content_type)) => DisplayValue::Binary {
                content_type: content_type.clone(),
                data_uri: blob::data_uri(content_type, data),
                size: blob::byte_size(data),
            },
            _ => DisplayValue::Empty,
        };

        vec![
            Field::new("ID", DisplayValue::text(self.id)),
            Field::new("Name", DisplayValue::text(self.name.as_ref())),
            Field::new("Cooking", DisplayValue::text(self.cooking.map(|c| c.as_str()))),
            Field::new("Cooking Time", DisplayValue::text(self.cooking_time)),
            Field::new("Picture", picture),
            Field::new("Ingredients", DisplayValue::ids(&self.ingredients)),
            Field::new("Steps", DisplayValue::ids(&self.steps)),
        ]
    }
}

impl Fields for Step {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("ID", DisplayValue::text(self.id)),
            Field::new("Action", DisplayValue::text(self.action.as_ref())),
        ]
    }
}

impl Fields for Technique {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("ID", DisplayValue::text(self.id)),
            Field::new("Description", DisplayValue::text(self.description.as_ref())),
        ]
    }
}

/// Read-only view of one entity.
#[derive(Debug)]
pub struct DetailView<E> {
    id: i64,
    mounted: bool,
    _entity: PhantomData<E>,
}

impl<E: Slice + Fields> DetailView<E> {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            mounted: false,
            _entity: PhantomData,
        }
    }

    pub async fn mount(&mut self, store: &mut Store) -> Result<(), RequestFailure> {
        self.mounted = true;
        store.get_entity::<E>(self.id).await.map(|_| ())
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn entity<'a>(&self, store: &'a Store) -> &'a E {
        &store.slice::<E>().entity
    }

    pub fn fields(&self, store: &Store) -> Vec<Field> {
        self.entity(store).fields()
    }

    pub fn back_route(&self) -> Route {
        Route::List(E::KIND)
    }

    pub fn edit_route(&self) -> Route {
        Route::Edit(E::KIND, self.id)
    }

    pub fn phase(&self, store: &Store) -> ViewPhase {
        ViewPhase::of(self.mounted, false, store.slice::<E>())
    }

    pub fn error_message<'a>(&self, store: &'a Store) -> Option<&'a str> {
        store.slice::<E>().error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{id_refs, Cooking};

    #[test]
    fn test_recipe_fields() {
        let mut recipe = Recipe::named("Omelette");
        recipe.id = Some(12);
        recipe.cooking = Some(Cooking::WithoutCooking);
        recipe.cooking_time = Some(5);
        recipe.set_picture(&[1, 2, 3], "image/png");
        recipe.ingredients = Some(id_refs(&[1, 4]));

        let fields = recipe.fields();
        let value = |label: &str| {
            fields
                .iter()
                .find(|f| f.label == label)
                .map(|f| f.value.clone())
                .unwrap()
        };

        assert_eq!(value("ID"), DisplayValue::Text("12".to_string()));
        assert_eq!(value("Cooking"), DisplayValue::Text("WITHOUT_COOKING".to_string()));
        assert_eq!(
            value("Picture"),
            DisplayValue::Binary {
                content_type: "image/png".to_string(),
                data_uri: "data:image/png;base64,AQID".to_string(),
                size: "3 bytes".to_string(),
            }
        );
        assert_eq!(value("Picture").to_string(), "image/png, 3 bytes");
        assert_eq!(value("Ingredients").to_string(), "1, 4");
        assert_eq!(value("Steps"), DisplayValue::Empty);
    }

    #[test]
    fn test_routes() {
        let view = DetailView::<Step>::new(7);
        assert_eq!(view.back_route().to_string(), "/step");
        assert_eq!(view.edit_route().to_string(), "/step/7/edit");
    }
}
