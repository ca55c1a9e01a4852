use std::marker::PhantomData;

use super::ViewPhase;
use crate::actions::Store;
use crate::client::RequestFailure;
use crate::routes::Route;
use crate::store::Slice;

/// Navigation targets of one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLinks {
    pub detail: Route,
    pub edit: Route,
    pub delete: Route,
}

/// Entity table with a search box.
#[derive(Debug)]
pub struct ListView<E> {
    search: String,
    mounted: bool,
    _entity: PhantomData<E>,
}

impl<E: Slice> Default for ListView<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Slice> ListView<E> {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            mounted: false,
            _entity: PhantomData,
        }
    }

    pub async fn mount(&mut self, store: &mut Store) -> Result<(), RequestFailure> {
        self.mounted = true;
        store.get_entities::<E>().await.map(|_| ())
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.search.clear();
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Run the search; an empty search box does nothing.
    pub async fn search(&mut self, store: &mut Store) -> Result<(), RequestFailure> {
        if self.search.is_empty() {
            return Ok(());
        }
        store.get_search_entities::<E>(&self.search).await.map(|_| ())
    }

    /// Empty the search box and show the full list again.
    pub async fn clear(&mut self, store: &mut Store) -> Result<(), RequestFailure> {
        self.search.clear();
        store.get_entities::<E>().await.map(|_| ())
    }

    pub async fn sync_list(&mut self, store: &mut Store) -> Result<(), RequestFailure> {
        store.get_entities::<E>().await.map(|_| ())
    }

    pub fn rows<'a>(&self, store: &'a Store) -> &'a [E] {
        &store.slice::<E>().entities
    }

    /// Links for a persisted row; unsaved entities have none.
    pub fn row_links(&self, entity: &E) -> Option<RowLinks> {
        let id = entity.id()?;
        Some(RowLinks {
            detail: Route::Detail(E::KIND, id),
            edit: Route::Edit(E::KIND, id),
            delete: Route::Delete(E::KIND, id),
        })
    }

    pub fn create_route(&self) -> Route {
        Route::New(E::KIND)
    }

    /// The "No entities found" banner is shown for an empty, settled list.
    pub fn show_not_found(&self, store: &Store) -> bool {
        let slice = store.slice::<E>();
        slice.entities.is_empty() && !slice.loading
    }

    pub fn phase(&self, store: &Store) -> ViewPhase {
        ViewPhase::of(self.mounted, false, store.slice::<E>())
    }

    pub fn error_message<'a>(&self, store: &'a Store) -> Option<&'a str> {
        store.slice::<E>().error_message.as_deref()
    }
}
