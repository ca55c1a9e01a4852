//! Per-entity state slice and its transition function.

use super::action::{Action, ActionKind, Payload, Phase, RequestKind};
use crate::models::Entity;

/// State owned by one entity type. `Default` is the initial state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityState<E> {
    pub loading: bool,
    pub updating: bool,
    pub update_success: bool,
    pub error_message: Option<String>,
    /// Rows from the last list or search response.
    pub entities: Vec<E>,
    /// The last fetched or written entity; empty after a delete.
    pub entity: E,
}

/// Compute the next slice state. Combinations without a transition return `state` untouched.
pub fn reduce<E: Entity>(state: EntityState<E>, action: Action<E>) -> EntityState<E> {
    use RequestKind::*;

    match (action.kind, action.phase) {
        (ActionKind::Reset, Phase::Bare) => EntityState::default(),
        (ActionKind::Reset, Phase::Request | Phase::Success(_) | Phase::Failure(_)) => state,
        (ActionKind::Request(_), Phase::Bare) => state,

        (ActionKind::Request(Search | FetchList | FetchOne), Phase::Request) => EntityState {
            loading: true,
            error_message: None,
            update_success: false,
            ..state
        },
        (ActionKind::Request(Create | Update | PartialUpdate | Delete), Phase::Request) => {
            EntityState {
                updating: true,
                error_message: None,
                update_success: false,
                ..state
            }
        }

        (ActionKind::Request(_), Phase::Failure(message)) => EntityState {
            loading: false,
            updating: false,
            update_success: false,
            error_message: Some(message),
            ..state
        },

        (ActionKind::Request(Search | FetchList), Phase::Success(Payload::List(entities))) => {
            EntityState {
                loading: false,
                entities,
                ..state
            }
        }
        (ActionKind::Request(FetchOne), Phase::Success(Payload::One(entity))) => EntityState {
            loading: false,
            entity,
            ..state
        },
        (
            ActionKind::Request(Create | Update | PartialUpdate),
            Phase::Success(Payload::One(entity)),
        ) => EntityState {
            updating: false,
            update_success: true,
            entity,
            ..state
        },
        (ActionKind::Request(Delete), Phase::Success(_)) => EntityState {
            updating: false,
            update_success: true,
            entity: E::default(),
            ..state
        },

        // Payload shape does not match the request.
        (
            ActionKind::Request(Search | FetchList),
            Phase::Success(Payload::One(_) | Payload::Empty),
        )
        | (
            ActionKind::Request(FetchOne | Create | Update | PartialUpdate),
            Phase::Success(Payload::List(_) | Payload::Empty),
        ) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recipe, Step, Technique};

    fn loaded_state() -> EntityState<Technique> {
        EntityState {
            loading: false,
            updating: false,
            update_success: true,
            error_message: Some("old".to_string()),
            entities: vec![Technique::described("Blanching")],
            entity: Technique {
                id: Some(3),
                description: Some("Braising".to_string()),
            },
        }
    }

    #[test]
    fn test_request_phase_flags() {
        for kind in RequestKind::ALL {
            let next = reduce(loaded_state(), Action::request(kind));
            assert_eq!(next.loading, kind.is_read(), "{:?}", kind);
            assert_eq!(next.updating, !kind.is_read(), "{:?}", kind);
            assert!(next.error_message.is_none());
            assert!(!next.update_success);
            assert_eq!(next.entities, loaded_state().entities);
            assert_eq!(next.entity, loaded_state().entity);
        }
    }

    #[test]
    fn test_failure_records_message() {
        for kind in RequestKind::ALL {
            let mut state = loaded_state();
            state.loading = true;
            state.updating = true;

            let next = reduce(state, Action::failure(kind, "Request failed with status code 500"));
            assert!(!next.loading);
            assert!(!next.updating);
            assert!(!next.update_success);
            assert_eq!(
                next.error_message.as_deref(),
                Some("Request failed with status code 500")
            );
            assert_eq!(next.entity, loaded_state().entity);
        }
    }

    #[test]
    fn test_success_transitions() {
        let fresh = vec![Technique::described("Searing")];
        let cases: Vec<(RequestKind, Payload<Technique>, EntityState<Technique>)> = vec![
            (
                RequestKind::FetchList,
                Payload::List(fresh.clone()),
                EntityState {
                    entities: fresh.clone(),
                    ..loaded_state()
                },
            ),
            (
                RequestKind::Search,
                Payload::List(vec![]),
                EntityState {
                    entities: vec![],
                    ..loaded_state()
                },
            ),
            (
                RequestKind::FetchOne,
                Payload::One(Technique::described("Poaching")),
                EntityState {
                    entity: Technique::described("Poaching"),
                    ..loaded_state()
                },
            ),
        ];

        for (kind, payload, expected) in cases {
            let mut state = loaded_state();
            state.loading = true;
            assert_eq!(reduce(state, Action::success(kind, payload)), expected, "{:?}", kind);
        }
    }

    #[test]
    fn test_write_success_stores_payload() {
        for kind in [
            RequestKind::Create,
            RequestKind::Update,
            RequestKind::PartialUpdate,
        ] {
            let mut state = EntityState::<Step>::default();
            state.updating = true;
            let saved = Step {
                id: Some(7),
                action: Some("Whisk".to_string()),
                recipes: None,
            };

            let next = reduce(state, Action::success(kind, Payload::One(saved.clone())));
            assert!(!next.updating);
            assert!(next.update_success);
            assert_eq!(next.entity, saved);
        }
    }

    #[test]
    fn test_delete_success_empties_entity() {
        let mut state = loaded_state();
        state.updating = true;
        state.update_success = false;

        let next = reduce(state, Action::success(RequestKind::Delete, Payload::Empty));
        assert!(!next.updating);
        assert!(next.update_success);
        assert_eq!(next.entity, Technique::default());
        assert_eq!(next.entities, loaded_state().entities);
    }

    #[test]
    fn test_reset_returns_initial_state() {
        let mut state = EntityState::<Recipe>::default();
        state.loading = true;
        state.error_message = Some("x".to_string());
        state.entity = Recipe::named("Omelette");
        state.entities = vec![Recipe::named("Soup")];

        assert_eq!(reduce(state, Action::reset()), EntityState::default());
        assert_eq!(
            reduce(loaded_state(), Action::reset()),
            EntityState::default()
        );
    }

    #[test]
    fn test_unhandled_combinations_are_identity() {
        let mut unhandled: Vec<Action<Technique>> = vec![
            Action {
                kind: ActionKind::Reset,
                phase: Phase::Request,
            },
            Action {
                kind: ActionKind::Reset,
                phase: Phase::Failure("x".to_string()),
            },
            Action {
                kind: ActionKind::Reset,
                phase: Phase::Success(Payload::Empty),
            },
        ];
        for kind in RequestKind::ALL {
            unhandled.push(Action {
                kind: ActionKind::Request(kind),
                phase: Phase::Bare,
            });
        }
        for kind in [RequestKind::Search, RequestKind::FetchList] {
            unhandled.push(Action::success(kind, Payload::Empty));
            unhandled.push(Action::success(kind, Payload::One(Technique::default())));
        }
        for kind in [
            RequestKind::FetchOne,
            RequestKind::Create,
            RequestKind::Update,
            RequestKind::PartialUpdate,
        ] {
            unhandled.push(Action::success(kind, Payload::Empty));
            unhandled.push(Action::success(kind, Payload::List(vec![])));
        }

        for action in unhandled {
            let label = format!("{:?}", action);
            assert_eq!(reduce(loaded_state(), action), loaded_state(), "{}", label);
        }
    }
}
