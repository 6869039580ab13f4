//! Simulated AI insight endpoint, reachable by POST body or GET query.

use crate::config::{resource_by_path, NAME_COLUMN};
use crate::error::AppError;
use crate::handlers::entity::body_to_map;
use crate::insight::{self, Insight};
use crate::query::ListQuery;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// A validated insight request.
#[derive(Debug, PartialEq)]
pub struct InsightRequest {
    pub name: String,
    pub entity_type: String,
}

impl InsightRequest {
    fn from_lookup<'a>(get: impl Fn(&str) -> Option<&'a str>) -> Result<Self, AppError> {
        let field = |key: &str| {
            get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation(format!("{} is required", key)))
        };
        Ok(InsightRequest {
            name: field("name")?,
            entity_type: field("entity_type")?,
        })
    }
}

async fn answer(state: &AppState, req: InsightRequest) -> Result<Json<Insight>, AppError> {
    let resource = resource_by_path(&req.entity_type.to_lowercase()).ok_or_else(|| {
        AppError::BadRequest(format!(
            "entity_type must be 'people' or 'planets', got '{}'",
            req.entity_type
        ))
    })?;

    let query = ListQuery {
        size: 1,
        filters: vec![(NAME_COLUMN.to_string(), req.name.clone())],
        ..ListQuery::default()
    };
    let page = CrudService::search(&state.pool, resource, &query, state.metrics.as_ref()).await?;

    let generated = match page.items.first() {
        Some(entity) => insight::generate(resource.kind, entity, &mut rand::thread_rng()),
        None => insight::generate_unknown(resource.kind, &req.name),
    };
    tracing::info!(
        name = %generated.name,
        entity_type = generated.entity_type,
        confidence = generated.confidence_score,
        "insight generated"
    );
    Ok(Json(generated))
}

pub async fn insight_from_body(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Insight>, AppError> {
    let body = body_to_map(payload)?;
    let req = InsightRequest::from_lookup(|k| body.get(k).and_then(Value::as_str))?;
    answer(&state, req).await
}

pub async fn insight_from_query(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Insight>, AppError> {
    let req = InsightRequest::from_lookup(|k| params.get(k).map(String::as_str))?;
    answer(&state, req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_required() {
        let full: HashMap<&str, &str> = [("name", "Luke"), ("entity_type", "PEOPLE")].into();
        let req = InsightRequest::from_lookup(|k| full.get(k).copied()).unwrap();
        assert_eq!(req.name, "Luke");
        assert_eq!(req.entity_type, "PEOPLE");

        let partial: HashMap<&str, &str> = [("name", "Luke"), ("entity_type", "  ")].into();
        let err = InsightRequest::from_lookup(|k| partial.get(k).copied()).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m.contains("entity_type")));
    }
}
