//! List request parsing: paging, sort and search filters taken from the query string.

use crate::config::{ResourceDef, SortField, SortOrder};
use crate::error::AppError;
use std::collections::HashMap;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_SIZE: u32 = 10;
pub const MAX_SIZE: u32 = 100;

/// A validated list request for one resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    /// Only set when the field is sortable for the resource; anything else falls back to id order.
    pub sort: Option<SortField>,
    pub order: SortOrder,
    /// Honored (field, value) pairs, non-empty values only, sorted by field.
    pub filters: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
            sort: None,
            order: SortOrder::Asc,
            filters: Vec::new(),
        }
    }
}

impl ListQuery {
    /// Validate raw query parameters. Rejects bad `page`, `size` or `sort_order`;
    /// ignores unknown keys and unrecognized `sort_by` values.
    pub fn from_params(
        resource: &ResourceDef,
        params: &HashMap<String, String>,
    ) -> Result<Self, AppError> {
        let mut q = ListQuery::default();

        if let Some(v) = params.get("page") {
            q.page = v
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("page must be an integer, got '{}'", v)))?;
        }
        if let Some(v) = params.get("size") {
            q.size = v
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("size must be an integer, got '{}'", v)))?;
        }
        if q.page < 1 {
            return Err(AppError::Validation("page must be at least 1".into()));
        }
        if q.size < 1 || q.size > MAX_SIZE {
            return Err(AppError::Validation(format!(
                "size must be between 1 and {}",
                MAX_SIZE
            )));
        }
        if let Some(v) = params.get("sort_order") {
            q.order = v.parse().map_err(|_| {
                AppError::Validation(format!("sort_order must be 'asc' or 'desc', got '{}'", v))
            })?;
        }
        q.sort = params
            .get("sort_by")
            .and_then(|v| v.parse::<SortField>().ok())
            .filter(|f| resource.sort_column(*f).is_some());

        let mut filters: Vec<(String, String)> = params
            .iter()
            .filter(|(k, v)| resource.has_field(k) && !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        filters.sort();
        q.filters = filters;
        Ok(q)
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }
}
