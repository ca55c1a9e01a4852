//! Client-side routes: `/{entity}`, `/{entity}/new`, `/{entity}/:id`,
//! `/{entity}/:id/edit` and `/{entity}/:id/delete`.

use std::fmt;

use crate::models::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    List(EntityKind),
    New(EntityKind),
    Detail(EntityKind, i64),
    Edit(EntityKind, i64),
    Delete(EntityKind, i64),
}

impl Route {
    pub fn kind(&self) -> EntityKind {
        match *self {
            Route::List(kind)
            | Route::New(kind)
            | Route::Detail(kind, _)
            | Route::Edit(kind, _)
            | Route::Delete(kind, _) => kind,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match *self {
            Route::List(_) | Route::New(_) => None,
            Route::Detail(_, id) | Route::Edit(_, id) | Route::Delete(_, id) => Some(id),
        }
    }

    /// Parse a path such as `/recipe/7/edit`. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let (first, rest) = segments.split_first()?;
        let kind = *EntityKind::ALL.iter().find(|k| k.as_str() == *first)?;

        match rest {
            [] => Some(Route::List(kind)),
            ["new"] => Some(Route::New(kind)),
            [id] => id.parse().ok().map(|id| Route::Detail(kind, id)),
            [id, "edit"] => id.parse().ok().map(|id| Route::Edit(kind, id)),
            [id, "delete"] => id.parse().ok().map(|id| Route::Delete(kind, id)),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List(kind) => write!(f, "/{}", kind),
            Route::New(kind) => write!(f, "/{}/new", kind),
            Route::Detail(kind, id) => write!(f, "/{}/{}", kind, id),
            Route::Edit(kind, id) => write!(f, "/{}/{}/edit", kind, id),
            Route::Delete(kind, id) => write!(f, "/{}/{}/delete", kind, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::parse("/recipe"), Some(Route::List(EntityKind::Recipe)));
        assert_eq!(Route::parse("/step/new"), Some(Route::New(EntityKind::Step)));
        assert_eq!(
            Route::parse("/technique/3"),
            Some(Route::Detail(EntityKind::Technique, 3))
        );
        assert_eq!(
            Route::parse("/recipe/7/edit"),
            Some(Route::Edit(EntityKind::Recipe, 7))
        );
        assert_eq!(
            Route::parse("ingredient/2/delete/"),
            Some(Route::Delete(EntityKind::Ingredient, 2))
        );
    }

    #[test]
    fn test_rejects_unknown_paths() {
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse("/recipes"), None);
        assert_eq!(Route::parse("/recipe/abc"), None);
        assert_eq!(Route::parse("/recipe/7/copy"), None);
    }

    #[test]
    fn test_display_matches_parse() {
        let route = Route::Edit(EntityKind::Step, 7);
        assert_eq!(route.to_string(), "/step/7/edit");
        assert_eq!(Route::parse(&route.to_string()), Some(route));
        assert_eq!(Route::List(EntityKind::Recipe).to_string(), "/recipe");
        assert_eq!(route.id(), Some(7));
        assert_eq!(route.kind(), EntityKind::Step);
    }
}
