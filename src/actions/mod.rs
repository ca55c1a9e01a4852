//! Action creators: run a request against the gateway and feed its lifecycle into the store.
//!
//! Every operation dispatches `REQUEST` before the call and `SUCCESS` or `FAILURE`
//! after it, then hands the outcome back so callers can await completion.

use crate::client::{ApiClient, RequestFailure};
use crate::models::{EntityKind, Ingredient, Recipe, Step, Technique};
use crate::store::{Action, EntityState, Payload, RequestKind, RootState, Slice};

/// Application state plus the client that feeds it.
#[derive(Debug, Clone)]
pub struct Store {
    pub state: RootState,
    pub client: ApiClient,
}

impl Store {
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: RootState::default(),
            client,
        }
    }

    pub fn slice<E: Slice>(&self) -> &EntityState<E> {
        self.state.slice::<E>()
    }

    pub fn dispatch<E: Slice>(&mut self, action: Action<E>) {
        tracing::trace!("dispatch {}", action);
        self.state.apply(action);
    }

    /// Dispatch the final phase of `kind` for a finished call.
    fn settle<E: Slice, T>(
        &mut self,
        kind: RequestKind,
        result: Result<T, RequestFailure>,
        payload: impl FnOnce(&T) -> Payload<E>,
    ) -> Result<T, RequestFailure> {
        match &result {
            Ok(value) => self.dispatch(Action::success(kind, payload(value))),
            Err(failure) => self.dispatch(Action::<E>::failure(kind, failure.message.clone())),
        }
        result
    }

    pub async fn get_entities<E: Slice>(&mut self) -> Result<Vec<E>, RequestFailure> {
        self.dispatch(Action::<E>::request(RequestKind::FetchList));
        let result = self.client.list::<E>().await;
        self.settle(RequestKind::FetchList, result, |list| {
            Payload::List(list.clone())
        })
    }

    pub async fn get_search_entities<E: Slice>(
        &mut self,
        query: &str,
    ) -> Result<Vec<E>, RequestFailure> {
        self.dispatch(Action::<E>::request(RequestKind::Search));
        let result = self.client.search::<E>(query).await;
        self.settle(RequestKind::Search, result, |list| Payload::List(list.clone()))
    }

    pub async fn get_entity<E: Slice>(&mut self, id: i64) -> Result<E, RequestFailure> {
        self.dispatch(Action::<E>::request(RequestKind::FetchOne));
        let result = self.client.get::<E>(id).await;
        self.settle(RequestKind::FetchOne, result, |entity| {
            Payload::One(entity.clone())
        })
    }

    /// Create `entity`, then refresh the list. A rejected create keeps its error in the slice.
    pub async fn create_entity<E: Slice>(&mut self, entity: &E) -> Result<E, RequestFailure> {
        self.dispatch(Action::<E>::request(RequestKind::Create));
        let result = self.client.create(entity).await;
        let result = self.settle(RequestKind::Create, result, |saved| {
            Payload::One(saved.clone())
        });
        if result.is_ok() {
            self.refresh::<E>().await;
        }
        result
    }

    pub async fn update_entity<E: Slice>(&mut self, entity: &E) -> Result<E, RequestFailure> {
        self.dispatch(Action::<E>::request(RequestKind::Update));
        let result = self.client.update(entity).await;
        self.settle(RequestKind::Update, result, |saved| {
            Payload::One(saved.clone())
        })
    }

    pub async fn partial_update_entity<E: Slice>(
        &mut self,
        entity: &E,
    ) -> Result<E, RequestFailure> {
        self.dispatch(Action::<E>::request(RequestKind::PartialUpdate));
        let result = self.client.partial_update(entity).await;
        self.settle(RequestKind::PartialUpdate, result, |saved| {
            Payload::One(saved.clone())
        })
    }

    /// Delete the entity with `id`, then refresh the list if the delete went through.
    pub async fn delete_entity<E: Slice>(&mut self, id: i64) -> Result<(), RequestFailure> {
        self.dispatch(Action::<E>::request(RequestKind::Delete));
        let result = self.client.delete::<E>(id).await;
        let result = self.settle(RequestKind::Delete, result, |_| Payload::<E>::Empty);
        if result.is_ok() {
            self.refresh::<E>().await;
        }
        result
    }

    pub fn reset<E: Slice>(&mut self) {
        self.dispatch(Action::<E>::reset());
    }

    /// Follow-up list fetch after a write. Its outcome lands in the slice only.
    async fn refresh<E: Slice>(&mut self) {
        if let Err(failure) = self.get_entities::<E>().await {
            tracing::debug!("List refresh for {} failed: {}", E::KIND, failure);
        }
    }

    /// Fetch the list of any entity type chosen at runtime.
    pub async fn get_entities_of(&mut self, kind: EntityKind) -> Result<usize, RequestFailure> {
        match kind {
            EntityKind::Ingredient => self.get_entities::<Ingredient>().await.map(|l| l.len()),
            EntityKind::Recipe => self.get_entities::<Recipe>().await.map(|l| l.len()),
            EntityKind::Step => self.get_entities::<Step>().await.map(|l| l.len()),
            EntityKind::Technique => self.get_entities::<Technique>().await.map(|l| l.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) is closed on test hosts, so every request fails to connect.
    fn offline_store() -> Store {
        Store::new(ApiClient::new("http://127.0.0.1:9"))
    }

    #[tokio::test]
    async fn test_failed_fetch_records_error() {
        let mut store = offline_store();
        let failure = store.get_entities::<Technique>().await.unwrap_err();

        let slice = store.slice::<Technique>();
        assert!(!slice.loading);
        assert_eq!(slice.error_message.as_deref(), Some(failure.message.as_str()));
        assert!(slice.entities.is_empty());
    }

    #[tokio::test]
    async fn test_update_without_id_records_failure() {
        let mut store = offline_store();
        let failure = store
            .update_entity(&Step::with_action("Whisk"))
            .await
            .unwrap_err();

        assert_eq!(failure.status, None);
        let slice = store.slice::<Step>();
        assert!(!slice.updating);
        assert!(!slice.update_success);
        assert_eq!(
            slice.error_message.as_deref(),
            Some("Cannot update a step without an id")
        );
    }

    #[test]
    fn test_reset_clears_slice() {
        let mut store = offline_store();
        store.dispatch(Action::<Recipe>::failure(RequestKind::FetchOne, "gone"));
        store.reset::<Recipe>();
        assert_eq!(*store.slice::<Recipe>(), EntityState::default());
    }
}
