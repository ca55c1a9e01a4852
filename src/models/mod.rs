//! Data models for the recipes gateway.
//!
//! These shapes mirror the gateway's JSON entities exactly, so the same types
//! are used by the REST handlers, the HTTP client and the client-side store.

pub mod blob;
mod ingredient;
mod kind;
mod recipe;
mod step;
mod technique;

pub use ingredient::*;
pub use kind::*;
pub use recipe::*;
pub use step::*;
pub use technique::*;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Validation failure on a single entity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "This field is required.")
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A domain record persisted by the gateway and referenced by numeric id.
///
/// `Default` is the empty entity (`{}` on the wire).
pub trait Entity:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);

    /// Check the constraints the gateway enforces before persisting.
    fn validate(&self) -> Result<(), Vec<FieldError>>;

    /// Copy every non-null scalar field of `patch` onto `self` (merge-patch semantics).
    fn apply_patch(&mut self, patch: &Self);
}

/// True when an optional text field is missing or only whitespace.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_none_or(str::is_empty)
}

/// Build a list of id-only references, the shape relation fields are sent in.
pub fn id_refs<E: Entity>(ids: &[i64]) -> Vec<E> {
    ids.iter()
        .map(|id| {
            let mut entity = E::default();
            entity.set_id(Some(*id));
            entity
        })
        .collect()
}
