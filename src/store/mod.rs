//! Client-side application state.
//!
//! Each entity type owns one [`EntityState`] slice inside [`RootState`]; slices change
//! only through [`reduce`].

mod action;
mod reducer;

pub use action::*;
pub use reducer::*;

use crate::models::{Entity, Ingredient, Recipe, Step, Technique};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub ingredient: EntityState<Ingredient>,
    pub recipe: EntityState<Recipe>,
    pub step: EntityState<Step>,
    pub technique: EntityState<Technique>,
}

/// Typed access from an entity type to its own slice.
pub trait Slice: Entity {
    fn slice(root: &RootState) -> &EntityState<Self>;
    fn slice_mut(root: &mut RootState) -> &mut EntityState<Self>;
}

macro_rules! impl_slice {
    ($entity:ty, $field:ident) => {
        impl Slice for $entity {
            fn slice(root: &RootState) -> &EntityState<Self> {
                &root.$field
            }

            fn slice_mut(root: &mut RootState) -> &mut EntityState<Self> {
                &mut root.$field
            }
        }
    };
}

impl_slice!(Ingredient, ingredient);
impl_slice!(Recipe, recipe);
impl_slice!(Step, step);
impl_slice!(Technique, technique);

impl RootState {
    pub fn slice<E: Slice>(&self) -> &EntityState<E> {
        E::slice(self)
    }

    /// Apply an action to the slice of `E`; other slices are untouched.
    pub fn apply<E: Slice>(&mut self, action: Action<E>) {
        let slice = E::slice_mut(self);
        *slice = reduce(std::mem::take(slice), action);
    }
}
