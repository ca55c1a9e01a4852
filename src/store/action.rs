//! Actions dispatched to an entity slice.

use std::fmt;

use crate::models::Entity;

/// The network request an action tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    FetchList,
    FetchOne,
    Create,
    Update,
    PartialUpdate,
    Delete,
}

impl RequestKind {
    pub const ALL: [RequestKind; 7] = [
        RequestKind::Search,
        RequestKind::FetchList,
        RequestKind::FetchOne,
        RequestKind::Create,
        RequestKind::Update,
        RequestKind::PartialUpdate,
        RequestKind::Delete,
    ];

    /// Reads toggle `loading`; writes toggle `updating`.
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            RequestKind::Search | RequestKind::FetchList | RequestKind::FetchOne
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Request(RequestKind),
    Reset,
}

/// Data carried by a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<E> {
    List(Vec<E>),
    One(E),
    Empty,
}

/// Lifecycle stage of an action. `Bare` is the phase-less form used by `Reset`.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<E> {
    Request,
    Success(Payload<E>),
    Failure(String),
    Bare,
}

impl<E> Phase<E> {
    fn suffix(&self) -> Option<&'static str> {
        match self {
            Phase::Request => Some("REQUEST"),
            Phase::Success(_) => Some("SUCCESS"),
            Phase::Failure(_) => Some("FAILURE"),
            Phase::Bare => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action<E> {
    pub kind: ActionKind,
    pub phase: Phase<E>,
}

impl<E: Entity> Action<E> {
    pub fn request(kind: RequestKind) -> Self {
        Self {
            kind: ActionKind::Request(kind),
            phase: Phase::Request,
        }
    }

    pub fn success(kind: RequestKind, payload: Payload<E>) -> Self {
        Self {
            kind: ActionKind::Request(kind),
            phase: Phase::Success(payload),
        }
    }

    pub fn failure(kind: RequestKind, message: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Request(kind),
            phase: Phase::Failure(message.into()),
        }
    }

    pub fn reset() -> Self {
        Self {
            kind: ActionKind::Reset,
            phase: Phase::Bare,
        }
    }

    /// Type string without the phase suffix, e.g. `recipe/FETCH_RECIPE_LIST`.
    pub fn type_name(&self) -> String {
        let kind = E::KIND;
        let name = kind.action_name();
        let base = match self.kind {
            ActionKind::Request(RequestKind::Search) => {
                format!("SEARCH_{}", kind.plural().to_uppercase())
            }
            ActionKind::Request(RequestKind::FetchList) => format!("FETCH_{}_LIST", name),
            ActionKind::Request(RequestKind::FetchOne) => format!("FETCH_{}", name),
            ActionKind::Request(RequestKind::Create) => format!("CREATE_{}", name),
            ActionKind::Request(RequestKind::Update) => format!("UPDATE_{}", name),
            ActionKind::Request(RequestKind::PartialUpdate) => {
                format!("PARTIAL_UPDATE_{}", name)
            }
            ActionKind::Request(RequestKind::Delete) => format!("DELETE_{}", name),
            ActionKind::Reset => "RESET".to_string(),
        };
        format!("{}/{}", kind, base)
    }
}

impl<E: Entity> fmt::Display for Action<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase.suffix() {
            Some(suffix) => write!(f, "{}_{}", self.type_name(), suffix),
            None => f.write_str(&self.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recipe, Technique};

    #[test]
    fn test_type_strings() {
        let action: Action<Recipe> = Action::success(RequestKind::FetchList, Payload::List(vec![]));
        assert_eq!(action.to_string(), "recipe/FETCH_RECIPE_LIST_SUCCESS");

        let action: Action<Technique> = Action::request(RequestKind::Search);
        assert_eq!(action.to_string(), "technique/SEARCH_TECHNIQUES_REQUEST");

        let action: Action<Technique> = Action::failure(RequestKind::PartialUpdate, "boom");
        assert_eq!(
            action.to_string(),
            "technique/PARTIAL_UPDATE_TECHNIQUE_FAILURE"
        );

        assert_eq!(Action::<Recipe>::reset().to_string(), "recipe/RESET");
    }

    #[test]
    fn test_read_write_split() {
        let reads: Vec<_> = RequestKind::ALL.iter().filter(|k| k.is_read()).collect();
        assert_eq!(
            reads,
            vec![&RequestKind::Search, &RequestKind::FetchList, &RequestKind::FetchOne]
        );
    }
}
