//! Builds parameterized SELECT, COUNT, INSERT, UPDATE, DELETE from a resource descriptor.

use crate::config::{ResourceDef, ID_COLUMN, UPDATED_AT_COLUMN};
use crate::query::ListQuery;
use serde_json::Value;
use std::collections::HashMap;

/// Quote identifier for PostgreSQL (safe: only from descriptors).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn select_column_list(resource: &ResourceDef) -> String {
    resource
        .columns()
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `%value%` with LIKE metacharacters escaped, so the value matches as a literal substring.
pub fn like_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// WHERE clause OR-ing one case-insensitive substring match per filter. Empty when no filters.
fn filter_clause(resource: &ResourceDef, filters: &[(String, String)], q: &mut QueryBuf) -> String {
    let mut parts = Vec::new();
    for (col, val) in filters {
        if !resource.has_field(col) || val.is_empty() {
            continue;
        }
        let n = q.push_param(Value::String(like_pattern(val)));
        parts.push(format!("{} ILIKE ${}", quoted(col), n));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" OR "))
    }
}

fn order_clause(resource: &ResourceDef, query: &ListQuery) -> String {
    match query.sort.and_then(|f| resource.sort_column(f)) {
        Some(col) => format!(" ORDER BY {} {}", quoted(col), query.order.as_sql()),
        None => format!(" ORDER BY {} ASC", quoted(ID_COLUMN)),
    }
}

/// SELECT by primary key.
pub fn select_by_id(resource: &ResourceDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(resource),
        quoted(resource.table_name),
        quoted(ID_COLUMN),
        n
    );
    q
}

/// One page of rows: filters OR-ed, requested order (or id ascending), LIMIT/OFFSET.
pub fn select_page(resource: &ResourceDef, query: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = filter_clause(resource, &query.filters, &mut q);
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {} OFFSET {}",
        select_column_list(resource),
        quoted(resource.table_name),
        where_clause,
        order_clause(resource, query),
        query.size,
        query.offset()
    );
    q
}

/// COUNT of rows matching the same filters as `select_page`.
pub fn count(resource: &ResourceDef, filters: &[(String, String)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = filter_clause(resource, filters, &mut q);
    q.sql = format!(
        "SELECT COUNT(*) FROM {}{}",
        quoted(resource.table_name),
        where_clause
    );
    q
}

/// INSERT of the attributes present in body. id and timestamps come from the database.
pub fn insert(resource: &ResourceDef, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for field in resource.fields {
        let Some(val) = body.get(*field) else { continue };
        let n = q.push_param(val.clone());
        cols.push(quoted(field));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(resource.table_name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(resource)
    );
    q
}

/// UPDATE by id: SET only attributes present in body, and always refresh updated_at.
pub fn update(resource: &ResourceDef, id: i64, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for field in resource.fields {
        let Some(val) = body.get(*field) else { continue };
        let n = q.push_param(val.clone());
        sets.push(format!("{} = ${}", quoted(field), n));
    }
    sets.push(format!("{} = NOW()", quoted(UPDATED_AT_COLUMN)));
    let id_param = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(resource.table_name),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_param,
        select_column_list(resource)
    );
    q
}

/// DELETE by id, returning the id so a missing row is observable.
pub fn delete(resource: &ResourceDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::from(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        quoted(resource.table_name),
        quoted(ID_COLUMN),
        n,
        quoted(ID_COLUMN)
    );
    q
}
