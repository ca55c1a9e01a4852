use std::marker::PhantomData;

use super::ViewPhase;
use crate::actions::Store;
use crate::client::RequestFailure;
use crate::routes::Route;
use crate::store::Slice;

/// Delete confirmation dialog.
#[derive(Debug)]
pub struct DeleteDialog<E> {
    id: i64,
    mounted: bool,
    submitted: bool,
    succeeded: bool,
    _entity: PhantomData<E>,
}

impl<E: Slice> DeleteDialog<E> {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            mounted: false,
            submitted: false,
            succeeded: false,
            _entity: PhantomData,
        }
    }

    /// Load the entity shown in the confirmation question.
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

    pub async fn confirm(&mut self, store: &mut Store) -> Result<(), RequestFailure> {
        self.submitted = true;
        store.delete_entity::<E>(self.id).await?;
        self.succeeded = true;
        Ok(())
    }

    pub fn poll_navigation(&self, store: &Store) -> Option<Route> {
        if self.succeeded || (self.submitted && store.slice::<E>().update_success) {
            Some(self.cancel_route())
        } else {
            None
        }
    }

    pub fn cancel_route(&self) -> Route {
        Route::List(E::KIND)
    }

    pub fn phase(&self, store: &Store) -> ViewPhase {
        let slice = store.slice::<E>();
        if self.mounted && self.succeeded && !slice.updating {
            return ViewPhase::Success;
        }
        ViewPhase::of(self.mounted, self.submitted, slice)
    }

    pub fn error_message<'a>(&self, store: &'a Store) -> Option<&'a str> {
        store.slice::<E>().error_message.as_deref()
    }
}
