//! Screen flows driven through the view-models against a live gateway.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use super::{serve, TestFixture};
use crate::actions::Store;
use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::{Cooking, EntityKind, Recipe, Step, Technique};
use crate::routes::Route;
use crate::views::{
    DeleteDialog, DetailView, DisplayValue, ListView, RecipeForm, StepForm, SubmitError,
    UpdateView, ViewPhase,
};

#[tokio::test]
async fn test_create_recipe_with_picture() {
    let fixture = TestFixture::new().await;
    let egg = fixture.create("/api/ingredients", json!({ "name": "Egg" })).await;
    let whisk = fixture.create("/api/steps", json!({ "action": "Whisk" })).await;
    let mut store = fixture.store();

    let mut view = UpdateView::<RecipeForm>::new(None);
    view.mount(&mut store).await.unwrap();
    assert!(view.is_new());
    assert_eq!(view.phase(&store), ViewPhase::Ready);
    // Relation selectors are filled on mount
    assert_eq!(store.slice::<crate::models::Ingredient>().entities.len(), 1);
    assert_eq!(store.slice::<Step>().entities.len(), 1);

    view.set("name", "Omelette").unwrap();
    view.set("cooking", "WITHOUT_COOKING").unwrap();
    view.set("cookingTime", "5").unwrap();
    view.set("ingredients", &egg["id"].to_string()).unwrap();
    view.set("steps", &whisk["id"].to_string()).unwrap();
    view.form_mut().stage_picture(&[1, 2, 3], "image/png");

    let saved = view.submit(&mut store).await.unwrap();
    let id = saved.id.unwrap();
    assert_eq!(view.poll_navigation(&store), Some(Route::List(EntityKind::Recipe)));
    assert_eq!(view.poll_navigation(&store).unwrap().to_string(), "/recipe");
    assert_eq!(view.phase(&store), ViewPhase::Success);

    // The follow-up refresh put the new recipe in the list
    let rows = &store.slice::<Recipe>().entities;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, Some(id));

    let (_, body) = fixture.get(&format!("/api/recipes/{}", id)).await;
    assert_eq!(body["name"], "Omelette");
    assert_eq!(body["cooking"], "WITHOUT_COOKING");
    assert_eq!(body["cookingTime"], 5);
    assert_eq!(body["picture"], "AQID");
    assert_eq!(body["pictureContentType"], "image/png");
    assert_eq!(body["ingredients"][0]["name"], "Egg");
    assert_eq!(body["steps"][0]["action"], "Whisk");
}

#[tokio::test]
async fn test_invalid_step_edit_is_blocked() {
    let fixture = TestFixture::new().await;
    let step = fixture.create("/api/steps", json!({ "action": "Whisk" })).await;
    let id = step["id"].as_i64().unwrap();
    let mut store = fixture.store();

    let mut view = UpdateView::<StepForm>::new(Some(id));
    view.mount(&mut store).await.unwrap();
    assert_eq!(view.form().action, "Whisk");

    view.set("action", "").unwrap();
    let before = store.state.clone();
    match view.submit(&mut store).await {
        Err(SubmitError::Invalid(errors)) => assert_eq!(errors[0].field, "action"),
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert_eq!(store.state, before);
    assert!(view.poll_navigation(&store).is_none());

    let (_, body) = fixture.get(&format!("/api/steps/{}", id)).await;
    assert_eq!(body["action"], "Whisk");
}

#[tokio::test]
async fn test_cooking_time_out_of_range_is_blocked() {
    let fixture = TestFixture::new().await;
    let mut store = fixture.store();

    let mut view = UpdateView::<RecipeForm>::new(None);
    view.mount(&mut store).await.unwrap();
    view.set("name", "Stew").unwrap();
    view.set("cookingTime", "70000").unwrap();

    let err = view.submit(&mut store).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "cookingTime: This field cannot be more than 65535."
    );
    assert!(view.poll_navigation(&store).is_none());
    assert_eq!(fixture.repo.count(EntityKind::Recipe).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_technique_refreshes_list() {
    let fixture = TestFixture::new().await;
    for description in ["Braising", "Poaching", "Searing"] {
        fixture
            .create("/api/techniques", json!({ "description": description }))
            .await;
    }
    let mut store = fixture.store();

    let mut list = ListView::<Technique>::new();
    list.mount(&mut store).await.unwrap();
    assert_eq!(list.rows(&store).len(), 3);
    let links = list.row_links(&list.rows(&store)[2]).unwrap();
    assert_eq!(links.delete, Route::Delete(EntityKind::Technique, 3));

    let mut dialog = DeleteDialog::<Technique>::new(3);
    dialog.mount(&mut store).await.unwrap();
    assert_eq!(dialog.entity(&store).description.as_deref(), Some("Searing"));

    dialog.confirm(&mut store).await.unwrap();
    assert_eq!(dialog.poll_navigation(&store), Some(Route::List(EntityKind::Technique)));
    assert_eq!(dialog.phase(&store), ViewPhase::Success);

    let ids: Vec<i64> = list.rows(&store).iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_list_search_and_clear() {
    let fixture = TestFixture::new().await;
    fixture
        .create("/api/steps", json!({ "action": "Chop the onion" }))
        .await;
    fixture
        .create("/api/steps", json!({ "action": "Boil water" }))
        .await;
    let mut store = fixture.store();

    let mut list = ListView::<Step>::new();
    list.mount(&mut store).await.unwrap();
    assert_eq!(list.rows(&store).len(), 2);

    // An empty search box leaves the list alone
    list.search(&mut store).await.unwrap();
    assert_eq!(list.rows(&store).len(), 2);

    list.set_search("onion");
    list.search(&mut store).await.unwrap();
    assert_eq!(list.rows(&store).len(), 1);
    assert_eq!(list.rows(&store)[0].action.as_deref(), Some("Chop the onion"));

    list.set_search("garlic");
    list.search(&mut store).await.unwrap();
    assert!(list.show_not_found(&store));

    list.clear(&mut store).await.unwrap();
    assert_eq!(list.search_text(), "");
    assert_eq!(list.rows(&store).len(), 2);
    assert!(!list.show_not_found(&store));
}

#[tokio::test]
async fn test_detail_view_fields() {
    let fixture = TestFixture::new().await;
    let egg = fixture.create("/api/ingredients", json!({ "name": "Egg" })).await;
    let recipe = fixture
        .create(
            "/api/recipes",
            json!({
                "name": "Omelette",
                "cookingTime": 5,
                "picture": "AQID",
                "pictureContentType": "image/png",
                "ingredients": [{ "id": egg["id"] }]
            }),
        )
        .await;
    let id = recipe["id"].as_i64().unwrap();
    let mut store = fixture.store();

    let mut view = DetailView::<Recipe>::new(id);
    view.mount(&mut store).await.unwrap();
    assert_eq!(view.phase(&store), ViewPhase::Ready);
    assert_eq!(view.entity(&store).cooking, Some(Cooking::WithCooking));

    let fields = view.fields(&store);
    let value = |label: &str| {
        fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.clone())
            .unwrap()
    };
    assert_eq!(value("Name"), DisplayValue::Text("Omelette".to_string()));
    assert_eq!(value("Cooking Time"), DisplayValue::Text("5".to_string()));
    assert_eq!(value("Picture").to_string(), "image/png, 3 bytes");
    assert_eq!(value("Ingredients"), DisplayValue::Text(egg["id"].to_string()));
    assert_eq!(value("Steps"), DisplayValue::Empty);
    assert_eq!(view.edit_route().to_string(), format!("/recipe/{}/edit", id));
}

#[tokio::test]
async fn test_detail_view_missing_entity() {
    let fixture = TestFixture::new().await;
    let mut store = fixture.store();

    let mut view = DetailView::<Recipe>::new(999);
    let failure = view.mount(&mut store).await.unwrap_err();
    assert_eq!(failure.status, Some(404));
    assert_eq!(view.phase(&store), ViewPhase::Error);
    assert_eq!(view.error_message(&store), Some(failure.message.as_str()));
}

#[tokio::test]
async fn test_edit_recipe_keeps_picture_and_relations() {
    let fixture = TestFixture::new().await;
    let egg = fixture.create("/api/ingredients", json!({ "name": "Egg" })).await;
    let recipe = fixture
        .create(
            "/api/recipes",
            json!({
                "name": "Omelette",
                "picture": "AQID",
                "pictureContentType": "image/png",
                "ingredients": [{ "id": egg["id"] }]
            }),
        )
        .await;
    let id = recipe["id"].as_i64().unwrap();
    let mut store = fixture.store();

    let mut view = UpdateView::<RecipeForm>::new(Some(id));
    view.mount(&mut store).await.unwrap();
    assert_eq!(view.form().name, "Omelette");
    assert_eq!(view.form().ingredients, egg["id"].to_string());

    view.set("name", "Fluffy omelette").unwrap();
    let saved = view.submit(&mut store).await.unwrap();
    assert_eq!(saved.name.as_deref(), Some("Fluffy omelette"));
    assert!(view.poll_navigation(&store).is_some());

    let (_, body) = fixture.get(&format!("/api/recipes/{}", id)).await;
    assert_eq!(body["name"], "Fluffy omelette");
    assert_eq!(body["picture"], "AQID");
    assert_eq!(body["ingredients"][0]["id"], egg["id"]);
}

#[tokio::test]
async fn test_rejected_create_keeps_error() {
    let fixture = TestFixture::new().await;
    fixture.create("/api/steps", json!({ "action": "Whisk" })).await;
    let mut store = fixture.store();
    store.get_entities::<Step>().await.unwrap();

    let failure = store.create_entity(&Step::default()).await.unwrap_err();
    assert_eq!(failure.status, Some(400));

    let slice = store.slice::<Step>();
    assert!(!slice.updating);
    assert!(!slice.update_success);
    assert_eq!(
        slice.error_message.as_deref(),
        Some("action: This field is required.")
    );
    assert_eq!(slice.entities.len(), 1);
}

#[tokio::test]
async fn test_rejected_recipe_submit_shows_error() {
    let fixture = TestFixture::new().await;
    let mut store = fixture.store();

    let mut view = UpdateView::<RecipeForm>::new(None);
    view.mount(&mut store).await.unwrap();
    view.set("name", "Ghost soup").unwrap();
    view.set("ingredients", "42").unwrap();

    match view.submit(&mut store).await {
        Err(SubmitError::Request(failure)) => assert_eq!(failure.status, Some(400)),
        other => panic!("expected a rejected request, got {:?}", other),
    }
    assert_eq!(view.phase(&store), ViewPhase::Error);
    assert!(view
        .error_message(&store)
        .unwrap()
        .starts_with("ingredients: Unknown ingredient ids"));
    assert!(view.poll_navigation(&store).is_none());
    assert_eq!(fixture.repo.count(EntityKind::Recipe).await.unwrap(), 0);
}

/// A gateway that serves technique 3 but fails every delete.
async fn gateway_failing_deletes() -> String {
    let app = Router::new()
        .route(
            "/api/techniques",
            get(|| async { Json(json!([{ "id": 3, "description": "Searing" }])) }),
        )
        .route(
            "/api/techniques/{id}",
            get(|| async { Json(json!({ "id": 3, "description": "Searing" })) }).delete(
                || async { AppError::Database("Database error: database is locked".to_string()) },
            ),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    serve(listener, app).await
}

#[tokio::test]
async fn test_failed_delete_keeps_dialog_open() {
    let base_url = gateway_failing_deletes().await;
    let mut store = Store::new(ApiClient::new(&base_url));

    let mut list = ListView::<Technique>::new();
    list.mount(&mut store).await.unwrap();

    let mut dialog = DeleteDialog::<Technique>::new(3);
    dialog.mount(&mut store).await.unwrap();

    let failure = dialog.confirm(&mut store).await.unwrap_err();
    assert_eq!(failure.status, Some(500));
    assert_eq!(dialog.phase(&store), ViewPhase::Error);
    assert_eq!(
        dialog.error_message(&store),
        Some("Database error: database is locked")
    );
    assert!(dialog.poll_navigation(&store).is_none());
    assert_eq!(list.rows(&store).len(), 1);
}

#[tokio::test]
async fn test_partial_update_through_store() {
    let fixture = TestFixture::new().await;
    let egg = fixture.create("/api/ingredients", json!({ "name": "Egg" })).await;
    let recipe = fixture
        .create(
            "/api/recipes",
            json!({
                "name": "Omelette",
                "cookingTime": 5,
                "ingredients": [{ "id": egg["id"] }]
            }),
        )
        .await;
    let id = recipe["id"].as_i64().unwrap();
    let mut store = fixture.store();

    let patch = Recipe {
        id: Some(id),
        cooking_time: Some(8),
        ..Recipe::default()
    };
    let saved = store.partial_update_entity(&patch).await.unwrap();
    assert_eq!(saved.cooking_time, Some(8));

    let slice = store.slice::<Recipe>();
    assert!(!slice.updating);
    assert!(slice.update_success);
    assert!(slice.error_message.is_none());
    assert_eq!(slice.entity, saved);
    assert_eq!(slice.entity.name.as_deref(), Some("Omelette"));
    assert_eq!(slice.entity.ingredient_ids(), vec![egg["id"].as_i64().unwrap()]);

    let (_, body) = fixture.get(&format!("/api/recipes/{}", id)).await;
    assert_eq!(body["cookingTime"], 8);
    assert_eq!(body["name"], "Omelette");
}
