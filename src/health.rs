//! Dependency health: database ping and upstream Star Wars API probe.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServiceStatus {
    /// `connected` or `error`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceStatus {
    pub fn connected() -> Self {
        ServiceStatus {
            status: "connected",
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServiceStatus {
            status: "error",
            message: Some(message.into()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == "connected"
    }
}

/// Reachability check for the upstream data source.
#[async_trait]
pub trait UpstreamProbe: Send + Sync {
    async fn check(&self) -> ServiceStatus;
}

/// Probes `<base_url>people/` over HTTP.
pub struct HttpUpstreamProbe {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstreamProbe {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpUpstreamProbe {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl UpstreamProbe for HttpUpstreamProbe {
    async fn check(&self) -> ServiceStatus {
        let url = format!("{}people/", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => ServiceStatus::connected(),
            Ok(resp) => ServiceStatus::error(format!("HTTP {}", resp.status().as_u16())),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "upstream probe failed");
                ServiceStatus::error(e.to_string())
            }
        }
    }
}

pub async fn check_database(pool: &PgPool) -> ServiceStatus {
    match sqlx::query("SELECT 1").fetch_optional(pool).await {
        Ok(_) => ServiceStatus::connected(),
        Err(e) => {
            tracing::warn!(error = %e, "database health check failed");
            ServiceStatus::error(e.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Services {
    pub postgresql: ServiceStatus,
    pub star_wars_api: ServiceStatus,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `healthy` when every service is connected, else `unhealthy`.
    pub status: &'static str,
    pub app_name: String,
    pub version: String,
    pub services: Services,
}

impl HealthReport {
    pub fn new(app_name: String, version: String, services: Services) -> Self {
        let healthy = services.postgresql.is_connected() && services.star_wars_api.is_connected();
        HealthReport {
            status: if healthy { "healthy" } else { "unhealthy" },
            app_name,
            version,
            services,
        }
    }
}
