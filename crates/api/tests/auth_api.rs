//! Bearer tokens are checked against the current `users` table.
//!
//! A signature alone is not enough: the subject must still exist and be
//! active, and its stored role decides what it may do.

mod common;

use agora_api::auth::jwt::generate_access_token;
use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, seed_citizen};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_of_deleted_user_returns_401(pool: PgPool) {
    let citizen = seed_citizen(&pool).await;
    let project =
        common::create(&pool, "/projects", &citizen.token, json!({"name": "Stadtpark"})).await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(citizen.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/problems",
        &citizen.token,
        json!({"description": "Zu dunkel", "project": project["@id"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({"code": 401, "message": "Invalid JWT Token"})
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM problems")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_of_deactivated_user_returns_401(pool: PgPool) {
    let citizen = seed_citizen(&pool).await;

    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(citizen.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json_auth(
        common::build_test_app(pool),
        "/projects",
        &citizen.token,
        json!({"name": "Stadtpark"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid JWT Token");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stored_role_overrides_token_role(pool: PgPool) {
    let citizen = seed_citizen(&pool).await;
    let forged = generate_access_token(citizen.id, "admin", &common::test_config().jwt).unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/categories",
        &forged,
        json!({"name": "Verkehr"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["hydra:description"], "Access Denied.");

    // Still a valid principal for operations open to every role.
    let response = get_auth(
        common::build_test_app(pool),
        &citizen.iri(),
        &citizen.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
