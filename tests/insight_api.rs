//! /simulate-ai-insight/ over POST body and GET query.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, seed};
use serde_json::{json, Value};
use sqlx::PgPool;

fn assert_insight_shape(body: &Value) {
    for key in ["name", "entity_type", "insight", "confidence_score", "generated_at", "model_version"] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
    assert_eq!(body["model_version"], "v1.0");
}

#[sqlx::test(migrations = false)]
async fn known_person_gets_template_insight(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    seed(&app, "/people/", json!({"name": "Luke Skywalker", "height": "172"})).await;

    let resp = post_json(
        app,
        "/simulate-ai-insight/",
        json!({"name": "luke", "entity_type": "people"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_insight_shape(&body);
    assert_eq!(body["name"], "Luke Skywalker");
    assert_eq!(body["entity_type"], "people");
    let score = body["confidence_score"].as_f64().unwrap();
    assert!((0.75..=0.98).contains(&score), "{score}");
    assert!(body["insight"].as_str().unwrap().contains("Luke Skywalker"));
}

#[sqlx::test(migrations = false)]
async fn get_variant_accepts_case_insensitive_type(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    seed(&app, "/planets/", json!({"name": "Tatooine", "climate": "arid"})).await;

    let resp = get(app, "/simulate-ai-insight/?name=tatooine&entity_type=Planets").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_insight_shape(&body);
    assert_eq!(body["name"], "Tatooine");
    assert_eq!(body["entity_type"], "planets");
}

#[sqlx::test(migrations = false)]
async fn unknown_name_gets_low_confidence(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let resp = post_json(
        app,
        "/simulate-ai-insight/",
        json!({"name": "Jar Jar", "entity_type": "people"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_insight_shape(&body);
    assert_eq!(body["name"], "Jar Jar");
    assert_eq!(body["confidence_score"], 0.3);
}

#[sqlx::test(migrations = false)]
async fn unsupported_entity_type_is_400(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let resp = post_json(
        app,
        "/simulate-ai-insight/",
        json!({"name": "Millennium Falcon", "entity_type": "starships"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "bad_request");
}

#[sqlx::test(migrations = false)]
async fn missing_fields_are_422(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let resp = post_json(app.clone(), "/simulate-ai-insight/", json!({"name": "Luke"})).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = get(app, "/simulate-ai-insight/?entity_type=people").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
