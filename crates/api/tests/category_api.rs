//! HTTP-level integration tests for `/categories`.
//!
//! Covers the duplicate-name rule, required fields, public reads and the
//! 401/403 bodies of the access gate.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, delete_auth, get, post_json, post_json_auth, put_json_auth, seed_citizen,
    seed_manager,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_category_name_returns_422(pool: PgPool) {
    let manager = seed_manager(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/categories",
        &manager.token,
        json!({"name": "Musterland"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()["content-type"],
        "application/ld+json; charset=utf-8"
    );
    let json = body_json(response).await;
    assert_eq!(json["name"], "Musterland");
    assert_eq!(json["slug"], "musterland");
    assert_eq!(json["@type"], "Category");
    assert_eq!(json["@context"], "/contexts/Category");
    assert_eq!(json["@id"], format!("/categories/{}", json["id"]));

    let response = post_json_auth(
        common::build_test_app(pool),
        "/categories",
        &manager.token,
        json!({"name": "Musterland"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["@type"], "ConstraintViolationList");
    assert_eq!(json["hydra:title"], "An error occurred");
    assert_eq!(json["hydra:description"], "name: validate.category.duplicateName");
    assert_eq!(json["violations"][0]["propertyPath"], "name");
    assert_eq!(
        json["violations"][0]["message"],
        "validate.category.duplicateName"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_or_blank_name_returns_not_blank(pool: PgPool) {
    let manager = seed_manager(&pool).await;

    for body in [json!({}), json!({"name": null}), json!({"name": "   "})] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/categories",
            &manager.token,
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["hydra:description"], "name: validate.general.notBlank");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_returns_400(pool: PgPool) {
    let manager = seed_manager(&pool).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/categories")
        .header(CONTENT_TYPE, "application/ld+json")
        .header(AUTHORIZATION, format!("Bearer {}", manager.token))
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["@type"], "hydra:Error");
}

// ---------------------------------------------------------------------------
// Access gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_create_returns_401(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/categories",
        json!({"name": "Musterland"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json, json!({"code": 401, "message": "JWT Token not found"}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_returns_401(pool: PgPool) {
    let response = post_json_auth(
        common::build_test_app(pool),
        "/categories",
        "not-a-jwt",
        json!({"name": "Musterland"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid JWT Token");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plain_user_create_returns_403(pool: PgPool) {
    let citizen = seed_citizen(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/categories",
        &citizen.token,
        json!({"name": "Musterland"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["@context"], "/contexts/Error");
    assert_eq!(json["@type"], "hydra:Error");
    assert_eq!(json["hydra:title"], "An error occurred");
    assert_eq!(json["hydra:description"], "Access Denied.");
}

// ---------------------------------------------------------------------------
// Read / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categories_are_publicly_readable(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let created = common::create(&pool, "/categories", &manager.token, json!({"name": "Umwelt"})).await;

    let response = get(common::build_test_app(pool.clone()), "/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["@type"], "hydra:Collection");
    assert_eq!(json["hydra:totalItems"], 1);
    assert_eq!(json["hydra:member"][0]["name"], "Umwelt");
    assert!(json.get("hydra:view").is_none());

    let iri = created["@id"].as_str().unwrap();
    let response = get(common::build_test_app(pool), iri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Umwelt");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_regenerates_slug_and_allows_own_name(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let created =
        common::create(&pool, "/categories", &manager.token, json!({"name": "Verkehr"})).await;
    let iri = created["@id"].as_str().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        iri,
        &manager.token,
        json!({"name": "Verkehr"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        common::build_test_app(pool),
        iri,
        &manager.token,
        json!({"name": "Öffentlicher Raum"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Öffentlicher Raum");
    assert_eq!(json["slug"], "oeffentlicher-raum");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_to_taken_name_returns_422(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    common::create(&pool, "/categories", &manager.token, json!({"name": "Bildung"})).await;
    let other = common::create(&pool, "/categories", &manager.token, json!({"name": "Kultur"})).await;

    let response = put_json_auth(
        common::build_test_app(pool),
        other["@id"].as_str().unwrap(),
        &manager.token,
        json!({"name": "Bildung"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["hydra:description"],
        "name: validate.category.duplicateName"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_category_then_404(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let created = common::create(&pool, "/categories", &manager.token, json!({"name": "Sport"})).await;
    let iri = created["@id"].as_str().unwrap();

    let response = delete_auth(common::build_test_app(pool.clone()), iri, &manager.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), iri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(common::build_test_app(pool), iri, &manager.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Malformed path and query parameters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_id_returns_hydra_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/categories/abc").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers()["content-type"],
        "application/ld+json; charset=utf-8"
    );
    let json = body_json(response).await;
    assert_eq!(json["@type"], "hydra:Error");
    assert_eq!(json["hydra:description"], "Not Found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_page_returns_hydra_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/categories?page=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["@type"], "hydra:Error");
    assert!(json["hydra:description"]
        .as_str()
        .unwrap()
        .starts_with("Failed to deserialize query string"));
}
