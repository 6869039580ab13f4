//! CRUD execution against PostgreSQL for any resource descriptor.

use crate::config::{ResourceDef, CREATED_AT_COLUMN, ID_COLUMN, UPDATED_AT_COLUMN};
use crate::error::AppError;
use crate::metrics::{MetricsCollector, SearchEvent, SortEvent};
use crate::query::ListQuery;
use crate::response::Page;
use crate::sql::{count, delete, insert, select_by_id, select_page, update, PgBindValue, QueryBuf};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};
use std::collections::HashMap;
use std::time::Instant;

pub struct CrudService;

impl CrudService {
    /// One page of filtered, ordered rows plus the filtered total. Reports a
    /// search event when filters were applied and a sort event when a
    /// recognized sort field was applied.
    pub async fn search(
        pool: &PgPool,
        resource: &ResourceDef,
        query: &ListQuery,
        metrics: &dyn MetricsCollector,
    ) -> Result<Page<Value>, AppError> {
        let started = Instant::now();

        let count_q = count(resource, &query.filters);
        tracing::debug!(sql = %count_q.sql, params = ?count_q.params, "query");
        let total: i64 = bind_all(sqlx::query(&count_q.sql), &count_q)
            .fetch_one(pool)
            .await?
            .try_get(0)?;

        let page_q = select_page(resource, query);
        let items = Self::query_many(pool, resource, &page_q).await?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let page = Page::new(items, total.max(0) as u64, query.page, query.size);

        if !query.filters.is_empty() {
            metrics.record_search(&SearchEvent {
                resource: resource.kind,
                filters: query.filters.clone(),
                results_count: page.items.len(),
                total_count: page.total,
                page: query.page,
                size: query.size,
                execution_time_ms: elapsed_ms,
            });
        }
        if let Some(field) = query.sort.filter(|f| resource.sort_column(*f).is_some()) {
            metrics.record_sort(&SortEvent {
                resource: resource.kind,
                field,
                order: query.order,
                results_count: page.items.len(),
                total_count: page.total,
                page: query.page,
                size: query.size,
                execution_time_ms: elapsed_ms,
            });
        }
        Ok(page)
    }

    /// Fetch one row by primary key.
    pub async fn read(pool: &PgPool, resource: &ResourceDef, id: i64) -> Result<Option<Value>, AppError> {
        let q = select_by_id(resource, id);
        Self::query_optional(pool, resource, &q).await
    }

    /// Insert one row; returns it with the generated id and timestamps.
    pub async fn create(
        pool: &PgPool,
        resource: &ResourceDef,
        body: &HashMap<String, Value>,
    ) -> Result<Value, AppError> {
        let q = insert(resource, body);
        Self::query_optional(pool, resource, &q)
            .await?
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Overwrite the supplied attributes of one row. None when the id does not exist.
    pub async fn update(
        pool: &PgPool,
        resource: &ResourceDef,
        id: i64,
        body: &HashMap<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = update(resource, id, body);
        Self::query_optional(pool, resource, &q).await
    }

    /// Delete one row. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, resource: &ResourceDef, id: i64) -> Result<bool, AppError> {
        let q = delete(resource, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q).fetch_optional(pool).await?;
        Ok(row.is_some())
    }

    async fn query_optional(
        pool: &PgPool,
        resource: &ResourceDef,
        q: &QueryBuf,
    ) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), q).fetch_optional(pool).await?;
        row.map(|r| row_to_json(resource, &r)).transpose()
    }

    async fn query_many(pool: &PgPool, resource: &ResourceDef, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), q).fetch_all(pool).await?;
        rows.iter().map(|r| row_to_json(resource, r)).collect()
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    q: &QueryBuf,
) -> Query<'q, Postgres, PgArguments> {
    for p in &q.params {
        query = query.bind(PgBindValue::from_json(p));
    }
    query
}

/// Decode a row into a flat JSON object: id as number, attributes as string or
/// null, timestamps as RFC 3339 strings.
fn row_to_json(resource: &ResourceDef, row: &PgRow) -> Result<Value, AppError> {
    let mut map = Map::new();
    let id: i64 = row.try_get(ID_COLUMN)?;
    map.insert(ID_COLUMN.to_string(), Value::from(id));
    for field in resource.fields {
        let v: Option<String> = row.try_get(*field)?;
        map.insert(field.to_string(), v.map(Value::String).unwrap_or(Value::Null));
    }
    for ts in [CREATED_AT_COLUMN, UPDATED_AT_COLUMN] {
        let v: Option<DateTime<Utc>> = row.try_get(ts)?;
        map.insert(
            ts.to_string(),
            v.map(|d| Value::String(d.to_rfc3339())).unwrap_or(Value::Null),
        );
    }
    Ok(Value::Object(map))
}
