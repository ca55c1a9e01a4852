//! Entities navigation menu.

use crate::models::EntityKind;
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub kind: EntityKind,
    pub label: &'static str,
    pub icon: &'static str,
}

impl MenuItem {
    pub fn route(&self) -> Route {
        Route::List(self.kind)
    }
}

pub const ENTITIES_MENU: [MenuItem; 4] = [
    MenuItem {
        kind: EntityKind::Ingredient,
        label: "Ingredient",
        icon: "asterisk",
    },
    MenuItem {
        kind: EntityKind::Recipe,
        label: "Recipe",
        icon: "asterisk",
    },
    MenuItem {
        kind: EntityKind::Step,
        label: "Step",
        icon: "asterisk",
    },
    MenuItem {
        kind: EntityKind::Technique,
        label: "Technique",
        icon: "asterisk",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_links_to_list_routes() {
        let paths: Vec<String> = ENTITIES_MENU.iter().map(|i| i.route().to_string()).collect();
        assert_eq!(paths, vec!["/ingredient", "/recipe", "/step", "/technique"]);
        assert!(ENTITIES_MENU.iter().all(|i| i.icon == "asterisk"));
    }
}
