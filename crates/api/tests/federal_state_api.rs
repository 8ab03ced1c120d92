//! HTTP-level integration tests for `/federal_states` and `/councils`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth, seed_manager};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_federal_states_paginate_fifteen_per_page(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    for n in 1..=16 {
        common::create(
            &pool,
            "/federal_states",
            &manager.token,
            json!({"name": format!("Land {n:02}")}),
        )
        .await;
    }

    let response = get(common::build_test_app(pool.clone()), "/federal_states").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["hydra:totalItems"], 16);
    assert_eq!(json["hydra:member"].as_array().unwrap().len(), 15);
    assert_eq!(json["hydra:member"][0]["name"], "Land 01");
    // Collection members carry no council list.
    assert!(json["hydra:member"][0].get("councils").is_none());
    assert_eq!(json["hydra:view"]["hydra:next"], "/federal_states?page=2");
    assert_eq!(json["hydra:view"]["hydra:last"], "/federal_states?page=2");

    let response = get(common::build_test_app(pool), "/federal_states?page=2").await;
    let json = body_json(response).await;
    assert_eq!(json["hydra:member"].as_array().unwrap().len(), 1);
    assert_eq!(json["hydra:member"][0]["name"], "Land 16");
    assert_eq!(json["hydra:view"]["hydra:previous"], "/federal_states?page=1");
    assert!(json["hydra:view"].get("hydra:next").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_federal_state_name_returns_422(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    common::create(&pool, "/federal_states", &manager.token, json!({"name": "Sachsen"})).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/federal_states",
        &manager.token,
        json!({"name": "Sachsen"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["hydra:description"],
        "name: validate.federalState.duplicateName"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_federal_state_keeps_councils_with_null_reference(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let state =
        common::create(&pool, "/federal_states", &manager.token, json!({"name": "Bayern"})).await;
    let state_iri = state["@id"].as_str().unwrap().to_string();

    let mut council_iris = Vec::new();
    for name in ["München", "Nürnberg"] {
        let council = common::create(
            &pool,
            "/councils",
            &manager.token,
            json!({"name": name, "federalState": state_iri}),
        )
        .await;
        assert_eq!(council["federalState"], state_iri.as_str());
        council_iris.push(council["@id"].as_str().unwrap().to_string());
    }

    let response = get(common::build_test_app(pool.clone()), &state_iri).await;
    let json = body_json(response).await;
    assert_eq!(json["councils"], json!(council_iris));

    let response = delete_auth(common::build_test_app(pool.clone()), &state_iri, &manager.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for iri in &council_iris {
        let response = get(common::build_test_app(pool.clone()), iri).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["federalState"].is_null());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_council_partial_update_and_explicit_null(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let state =
        common::create(&pool, "/federal_states", &manager.token, json!({"name": "Hessen"})).await;
    let council = common::create(
        &pool,
        "/councils",
        &manager.token,
        json!({"name": "Kassel", "federalState": state["@id"]}),
    )
    .await;
    let iri = council["@id"].as_str().unwrap();

    // Absent federalState leaves the reference alone.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        iri,
        &manager.token,
        json!({"name": "Stadt Kassel"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Stadt Kassel");
    assert_eq!(json["slug"], "stadt-kassel");
    assert_eq!(json["federalState"], state["@id"]);

    // Explicit null clears it.
    let response = put_json_auth(
        common::build_test_app(pool),
        iri,
        &manager.token,
        json!({"federalState": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Stadt Kassel");
    assert!(json["federalState"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_council_with_unknown_federal_state_reports_all_violations(pool: PgPool) {
    let manager = seed_manager(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/councils",
        &manager.token,
        json!({"name": "", "federalState": "/federal_states/4711"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["violations"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["hydra:description"],
        "name: validate.general.notBlank\nfederalState: validate.general.notFound"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_iri_returns_400(pool: PgPool) {
    let manager = seed_manager(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/councils",
        &manager.token,
        json!({"name": "Fulda", "federalState": "/categories/1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["@type"], "hydra:Error");
}
