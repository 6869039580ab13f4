//! HTTP handlers for resource CRUD, insights, monitoring and health.

pub mod common;
pub mod entity;
pub mod insight;
pub mod monitoring;
