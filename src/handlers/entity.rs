//! Resource CRUD handlers: list, create, read, update, delete.
//! The resource descriptor arrives as a request extension set by the router.

use crate::config::ResourceDef;
use crate::error::AppError;
use crate::query::ListQuery;
use crate::response::Page;
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("id must be an integer, got '{}'", id_str)))
}

pub(crate) fn body_to_map(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<HashMap<String, Value>, AppError> {
    let Json(value) = payload?;
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::Validation("body must be a JSON object".into())),
    }
}

fn not_found(resource: &ResourceDef, id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", resource.path_segment, id))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(resource): Extension<&'static ResourceDef>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<Value>>, AppError> {
    let query = ListQuery::from_params(resource, &params)?;
    let page = CrudService::search(&state.pool, resource, &query, state.metrics.as_ref()).await?;
    Ok(Json(page))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(resource): Extension<&'static ResourceDef>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(payload)?;
    RequestValidator::validate(resource, &body)?;
    let row = CrudService::create(&state.pool, resource, &body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(resource): Extension<&'static ResourceDef>,
    Path(id_str): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id_str)?;
    let row = CrudService::read(&state.pool, resource, id)
        .await?
        .ok_or_else(|| not_found(resource, id))?;
    Ok(Json(row))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(resource): Extension<&'static ResourceDef>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_to_map(payload)?;
    RequestValidator::validate_partial(resource, &body)?;
    let row = CrudService::update(&state.pool, resource, id, &body)
        .await?
        .ok_or_else(|| not_found(resource, id))?;
    Ok(Json(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(resource): Extension<&'static ResourceDef>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    if CrudService::delete(&state.pool, resource, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(resource, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_must_be_integer() {
        assert_eq!(parse_id("42").ok(), Some(42));
        assert!(matches!(parse_id("abc"), Err(AppError::Validation(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::Validation(_))));
    }

    #[test]
    fn body_must_be_object() {
        let map = body_to_map(Ok(Json(json!({"name": "Tatooine"})))).unwrap();
        assert_eq!(map.get("name"), Some(&json!("Tatooine")));
        assert!(matches!(body_to_map(Ok(Json(json!(["x"])))), Err(AppError::Validation(_))));
    }
}
