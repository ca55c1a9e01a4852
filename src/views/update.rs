use thiserror::Error;

use super::{EntityForm, FormError, ViewPhase};
use crate::actions::Store;
use crate::client::RequestFailure;
use crate::models::{Entity, FieldError};
use crate::routes::Route;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The form did not validate; nothing was sent.
    #[error("{}", join_errors(.0))]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Request(#[from] RequestFailure),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Create / edit screen.
#[derive(Debug)]
pub struct UpdateView<F> {
    id: Option<i64>,
    form: F,
    mounted: bool,
    submitted: bool,
    /// Set when this view's write succeeded. The list refresh that follows a create
    /// clears `update_success` again, so the flip is latched here.
    succeeded: bool,
}

impl<F: EntityForm> UpdateView<F> {
    /// `id` comes from the route: `None` for `/new`, `Some` for `/:id/edit`.
    pub fn new(id: Option<i64>) -> Self {
        Self {
            id,
            form: F::default(),
            mounted: false,
            submitted: false,
            succeeded: false,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Reset the slice (new) or load the entity (edit), then preload relation options.
    pub async fn mount(&mut self, store: &mut Store) -> Result<(), RequestFailure> {
        self.mounted = true;
        self.submitted = false;
        self.succeeded = false;

        let mut outcome = Ok(());
        match self.id {
            None => {
                store.reset::<F::Entity>();
                self.form = F::default();
            }
            Some(id) => match store.get_entity::<F::Entity>(id).await {
                Ok(entity) => self.form = F::load(&entity),
                Err(failure) => outcome = Err(failure),
            },
        }

        for kind in F::RELATED {
            if let Err(failure) = store.get_entities_of(*kind).await {
                if outcome.is_ok() {
                    outcome = Err(failure);
                }
            }
        }
        outcome
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        self.form.set(field, value)
    }

    /// Validate, then create or update. Invalid forms issue no request.
    pub async fn submit(&mut self, store: &mut Store) -> Result<F::Entity, SubmitError> {
        self.form.validate().map_err(SubmitError::Invalid)?;

        let entity = self.form.apply_to(&store.slice::<F::Entity>().entity);
        tracing::debug!(
            "Submitting {} {:?}",
            <F::Entity as Entity>::KIND,
            entity.id()
        );

        self.submitted = true;
        let saved = if self.is_new() {
            store.create_entity(&entity).await?
        } else {
            store.update_entity(&entity).await?
        };
        self.succeeded = true;
        Ok(saved)
    }

    /// The list route once the write has succeeded.
    pub fn poll_navigation(&self, store: &Store) -> Option<Route> {
        let slice = store.slice::<F::Entity>();
        if self.succeeded || (self.submitted && slice.update_success) {
            Some(self.cancel_route())
        } else {
            None
        }
    }

    pub fn cancel_route(&self) -> Route {
        Route::List(<F::Entity as Entity>::KIND)
    }

    pub fn phase(&self, store: &Store) -> ViewPhase {
        let slice = store.slice::<F::Entity>();
        if self.mounted && self.succeeded && !slice.updating {
            return ViewPhase::Success;
        }
        ViewPhase::of(self.mounted, self.submitted, slice)
    }

    pub fn error_message<'a>(&self, store: &'a Store) -> Option<&'a str> {
        store.slice::<F::Entity>().error_message.as_deref()
    }
}
