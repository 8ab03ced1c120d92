//! HTTP-level integration tests for `/used_problems`.
//!
//! Usages link a problem to a proposal once; creating or deleting one moves
//! the owning project's `updatedAt` forward.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth, seed_citizen,
    seed_manager, TestUser,
};
use serde_json::{json, Value};
use sqlx::PgPool;

struct Fixture {
    project: String,
    problem: String,
    proposal: String,
}

async fn fixture(pool: &PgPool, user: &TestUser) -> Fixture {
    let project = common::create(pool, "/projects", &user.token, json!({"name": "Dorfplatz"})).await;
    let project = project["@id"].as_str().unwrap().to_string();
    let problem = common::create(
        pool,
        "/problems",
        &user.token,
        json!({"description": "Kein Treffpunkt", "project": project}),
    )
    .await;
    let proposal = common::create(
        pool,
        "/proposals",
        &user.token,
        json!({"title": "Sitzgruppe aufstellen", "project": project}),
    )
    .await;

    Fixture {
        project,
        problem: problem["@id"].as_str().unwrap().to_string(),
        proposal: proposal["@id"].as_str().unwrap().to_string(),
    }
}

async fn project_updated_at(pool: &PgPool, iri: &str) -> DateTime<Utc> {
    let response = get(common::build_test_app(pool.clone()), iri).await;
    let json = body_json(response).await;
    json["updatedAt"].as_str().unwrap().parse().unwrap()
}

async fn fetch(pool: &PgPool, iri: &str, token: &str) -> Value {
    let response = get_auth(common::build_test_app(pool.clone()), iri, token).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {iri}");
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_usage_returns_422(pool: PgPool) {
    let citizen = seed_citizen(&pool).await;
    let f = fixture(&pool, &citizen).await;
    let body = json!({"problem": f.problem, "proposal": f.proposal});

    let used = common::create(&pool, "/used_problems", &citizen.token, body.clone()).await;
    assert_eq!(used["@type"], "UsedProblem");
    assert_eq!(used["problem"], f.problem.as_str());
    assert_eq!(used["proposal"], f.proposal.as_str());

    let response = post_json_auth(
        common::build_test_app(pool),
        "/used_problems",
        &citizen.token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        json["hydra:description"],
        "problem: validate.proposal.duplicateProblem"
    );
    assert_eq!(json["violations"][0]["propertyPath"], "problem");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_usage_writes_advance_project_updated_at(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let f = fixture(&pool, &manager).await;

    let before_create = project_updated_at(&pool, &f.project).await;
    let used = common::create(
        &pool,
        "/used_problems",
        &manager.token,
        json!({"problem": f.problem, "proposal": f.proposal}),
    )
    .await;
    let after_create = project_updated_at(&pool, &f.project).await;
    assert!(after_create > before_create);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        used["@id"].as_str().unwrap(),
        &manager.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let after_delete = project_updated_at(&pool, &f.project).await;
    assert!(after_delete > after_create);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_usage_appears_on_problem_and_proposal(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let f = fixture(&pool, &manager).await;

    let used = common::create(
        &pool,
        "/used_problems",
        &manager.token,
        json!({"problem": f.problem, "proposal": f.proposal}),
    )
    .await;
    let used_iri = used["@id"].as_str().unwrap();

    let problem = fetch(&pool, &f.problem, &manager.token).await;
    assert_eq!(problem["usages"][0]["@id"], used_iri);
    assert_eq!(problem["usages"][0]["@type"], "UsedProblem");
    assert_eq!(problem["usages"][0]["proposal"], f.proposal.as_str());

    let proposal = fetch(&pool, &f.proposal, &manager.token).await;
    assert_eq!(proposal["usedProblems"], json!([used_iri]));

    let response = delete_auth(common::build_test_app(pool.clone()), used_iri, &manager.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let problem = fetch(&pool, &f.problem, &manager.token).await;
    assert_eq!(problem["usages"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_usage_cannot_be_updated(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let f = fixture(&pool, &manager).await;
    let used = common::create(
        &pool,
        "/used_problems",
        &manager.token,
        json!({"problem": f.problem, "proposal": f.proposal}),
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool),
        used["@id"].as_str().unwrap(),
        &manager.token,
        json!({"problem": f.problem}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["@type"], "hydra:Error");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plain_user_cannot_delete_usage(pool: PgPool) {
    let citizen = seed_citizen(&pool).await;
    let f = fixture(&pool, &citizen).await;
    let used = common::create(
        &pool,
        "/used_problems",
        &citizen.token,
        json!({"problem": f.problem, "proposal": f.proposal}),
    )
    .await;

    let response = delete_auth(
        common::build_test_app(pool),
        used["@id"].as_str().unwrap(),
        &citizen.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_problem_removes_its_usages(pool: PgPool) {
    let manager = seed_manager(&pool).await;
    let f = fixture(&pool, &manager).await;
    let used = common::create(
        &pool,
        "/used_problems",
        &manager.token,
        json!({"problem": f.problem, "proposal": f.proposal}),
    )
    .await;

    let response = delete_auth(common::build_test_app(pool.clone()), &f.problem, &manager.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        used["@id"].as_str().unwrap(),
        &manager.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let proposal = fetch(&pool, &f.proposal, &manager.token).await;
    assert_eq!(proposal["usedProblems"], json!([]));
}
