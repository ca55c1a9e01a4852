//! View-models for the list, detail, update and delete screens of each entity.
//!
//! A view-model keeps only local UI state (search text, form values, the id from the
//! route); everything fetched lives in the [`Store`](crate::actions::Store), which the
//! host passes into every call. Hosts call `mount` when a screen opens and `unmount`
//! when it closes.

mod delete;
mod detail;
mod form;
mod list;
mod update;

pub use delete::DeleteDialog;
pub use detail::{DetailView, DisplayValue, Field, Fields};
pub use form::{EntityForm, FormError, IngredientForm, RecipeForm, StepForm, TechniqueForm};
pub use list::{ListView, RowLinks};
pub use update::{SubmitError, UpdateView};

use crate::store::EntityState;

/// Where a screen is in its load / submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Ready,
    Submitting,
    Success,
    Error,
}

impl ViewPhase {
    /// Derive the phase from the slice. `submitted` is set once the view issued a write.
    pub fn of<E>(mounted: bool, submitted: bool, slice: &EntityState<E>) -> Self {
        if !mounted {
            ViewPhase::Idle
        } else if slice.loading {
            ViewPhase::Loading
        } else if slice.updating {
            ViewPhase::Submitting
        } else if slice.error_message.is_some() {
            ViewPhase::Error
        } else if submitted && slice.update_success {
            ViewPhase::Success
        } else {
            ViewPhase::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Step;

    #[test]
    fn test_phase_from_slice() {
        let mut slice = EntityState::<Step>::default();
        assert_eq!(ViewPhase::of(false, false, &slice), ViewPhase::Idle);
        assert_eq!(ViewPhase::of(true, false, &slice), ViewPhase::Ready);

        slice.loading = true;
        assert_eq!(ViewPhase::of(true, false, &slice), ViewPhase::Loading);

        slice.loading = false;
        slice.updating = true;
        assert_eq!(ViewPhase::of(true, true, &slice), ViewPhase::Submitting);

        slice.updating = false;
        slice.update_success = true;
        assert_eq!(ViewPhase::of(true, true, &slice), ViewPhase::Success);
        assert_eq!(ViewPhase::of(true, false, &slice), ViewPhase::Ready);

        slice.update_success = false;
        slice.error_message = Some("Request failed with status code 500".to_string());
        assert_eq!(ViewPhase::of(true, true, &slice), ViewPhase::Error);
    }
}
