//! Search and sort event collection behind an injectable collector.

use crate::config::{ResourceKind, SortField, SortOrder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A list request that carried at least one honored search filter.
#[derive(Clone, Debug)]
pub struct SearchEvent {
    pub resource: ResourceKind,
    pub filters: Vec<(String, String)>,
    pub results_count: usize,
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
    pub execution_time_ms: f64,
}

/// A list request ordered by a recognized sort field.
#[derive(Clone, Debug)]
pub struct SortEvent {
    pub resource: ResourceKind,
    pub field: SortField,
    pub order: SortOrder,
    pub results_count: usize,
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
    pub execution_time_ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceCounts {
    pub people: u64,
    pub planets: u64,
}

impl ResourceCounts {
    fn zero() -> Self {
        ResourceCounts { people: 0, planets: 0 }
    }

    fn bump(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::People => self.people += 1,
            ResourceKind::Planets => self.planets += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchMetrics {
    pub total_searches: u64,
    pub searches_by_resource: ResourceCounts,
    /// `"field:lowercased value"` → count.
    pub popular_search_terms: BTreeMap<String, u64>,
    pub average_execution_time: f64,
}

impl Default for SearchMetrics {
    fn default() -> Self {
        SearchMetrics {
            total_searches: 0,
            searches_by_resource: ResourceCounts::zero(),
            popular_search_terms: BTreeMap::new(),
            average_execution_time: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderCounts {
    pub asc: u64,
    pub desc: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SortMetrics {
    pub total_sorts: u64,
    pub sorts_by_resource: ResourceCounts,
    pub popular_sort_fields: BTreeMap<String, u64>,
    pub sort_order_distribution: OrderCounts,
    pub average_execution_time: f64,
}

impl Default for SortMetrics {
    fn default() -> Self {
        SortMetrics {
            total_sorts: 0,
            sorts_by_resource: ResourceCounts::zero(),
            popular_sort_fields: BTreeMap::new(),
            sort_order_distribution: OrderCounts { asc: 0, desc: 0 },
            average_execution_time: 0.0,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MetricsSnapshot {
    pub search_metrics: SearchMetrics,
    pub sort_metrics: SortMetrics,
    pub timestamp: DateTime<Utc>,
}

/// Receives list events from the CRUD service and reports aggregated counters.
pub trait MetricsCollector: Send + Sync {
    fn record_search(&self, event: &SearchEvent);
    fn record_sort(&self, event: &SortEvent);
    fn search_metrics(&self) -> SearchMetrics;
    fn sort_metrics(&self) -> SortMetrics;

    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            search_metrics: self.search_metrics(),
            sort_metrics: self.sort_metrics(),
            timestamp: Utc::now(),
        }
    }
}

/// Discards events; reports zeroed counters.
pub struct NoopMetrics;

impl MetricsCollector for NoopMetrics {
    fn record_search(&self, _event: &SearchEvent) {}
    fn record_sort(&self, _event: &SortEvent) {}

    fn search_metrics(&self) -> SearchMetrics {
        SearchMetrics::default()
    }

    fn sort_metrics(&self) -> SortMetrics {
        SortMetrics::default()
    }
}

/// Distinct search terms kept in `popular_search_terms`. Once full, only
/// already-tracked terms keep counting.
pub const MAX_TRACKED_TERMS: usize = 1000;

/// Process-local counters. Created by the binary and owned by `AppState`.
#[derive(Default)]
pub struct InMemoryMetrics {
    search: Mutex<SearchMetrics>,
    sort: Mutex<SortMetrics>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&self) {
        *lock(&self.search) = SearchMetrics::default();
        *lock(&self.sort) = SortMetrics::default();
    }
}

// Poisoning is ignored: counters are plain integers.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

fn running_average(current: f64, count: u64, sample: f64) -> f64 {
    (current * (count - 1) as f64 + sample) / count as f64
}

impl MetricsCollector for InMemoryMetrics {
    fn record_search(&self, event: &SearchEvent) {
        let mut m = lock(&self.search);
        m.total_searches += 1;
        m.searches_by_resource.bump(event.resource);
        let terms = &mut m.popular_search_terms;
        for (field, value) in &event.filters {
            let term = format!("{}:{}", field, value.to_lowercase());
            if let Some(count) = terms.get_mut(&term) {
                *count += 1;
            } else if terms.len() < MAX_TRACKED_TERMS {
                terms.insert(term, 1);
            }
        }
        m.average_execution_time =
            running_average(m.average_execution_time, m.total_searches, event.execution_time_ms);
        tracing::info!(
            resource = ?event.resource,
            filters = ?event.filters,
            results = event.results_count,
            total = event.total_count,
            page = event.page,
            size = event.size,
            elapsed_ms = event.execution_time_ms,
            "search event"
        );
    }

    fn record_sort(&self, event: &SortEvent) {
        let mut m = lock(&self.sort);
        m.total_sorts += 1;
        m.sorts_by_resource.bump(event.resource);
        *m
            .popular_sort_fields
            .entry(event.field.as_str().to_string())
            .or_insert(0) += 1;
        match event.order {
            SortOrder::Asc => m.sort_order_distribution.asc += 1,
            SortOrder::Desc => m.sort_order_distribution.desc += 1,
        }
        m.average_execution_time =
            running_average(m.average_execution_time, m.total_sorts, event.execution_time_ms);
        tracing::info!(
            resource = ?event.resource,
            field = %event.field,
            order = event.order.as_str(),
            results = event.results_count,
            total = event.total_count,
            page = event.page,
            size = event.size,
            elapsed_ms = event.execution_time_ms,
            "sort event"
        );
    }

    fn search_metrics(&self) -> SearchMetrics {
        lock(&self.search).clone()
    }

    fn sort_metrics(&self) -> SortMetrics {
        lock(&self.sort).clone()
    }
}
