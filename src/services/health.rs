//! Backend availability check

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{ApiClient, Sleeper, ThreadSleeper};

const HEALTH_PATH: &str = "/api/health";
pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

static THREAD_SLEEPER: ThreadSleeper = ThreadSleeper;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub response_time_ms: Option<u64>,
    /// Failed attempts before the final answer
    pub retry_count: u32,
    pub error: Option<String>,
}

pub struct HealthService<'a> {
    client: &'a ApiClient,
    attempts: u32,
    delay: Duration,
    sleeper: &'a dyn Sleeper,
}

impl<'a> HealthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            attempts: DEFAULT_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
            sleeper: &THREAD_SLEEPER,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Check `/api/health`, retrying any failure at a fixed interval
    pub fn check(&self) -> HealthStatus {
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            let started = Instant::now();
            match self.client.get::<serde_json::Value>(HEALTH_PATH, Vec::new()) {
                Ok(_) => {
                    let elapsed = started.elapsed().as_millis() as u64;
                    debug!(attempt, elapsed_ms = elapsed, "backend healthy");
                    return HealthStatus {
                        is_healthy: true,
                        response_time_ms: Some(elapsed),
                        retry_count: attempt - 1,
                        error: None,
                    };
                }
                Err(e) => {
                    warn!(attempt, error = %e, "health check failed");
                    last_error = Some(e.to_string());
                }
            }
            if attempt < self.attempts {
                self.sleeper.sleep(self.delay);
            }
        }

        HealthStatus {
            is_healthy: false,
            response_time_ms: None,
            retry_count: self.attempts,
            error: last_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::retry::testing::RecordingSleeper;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::TokenStore;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<ScriptedTransport>, ApiClient) {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::new(
            Box::new(transport.clone()),
            TokenStore::new(dir.path().join("token")),
        );
        (dir, transport, client)
    }

    #[test]
    fn test_healthy_after_one_retry() {
        let (_dir, transport, client) = setup();
        transport
            .push_network_error("connection refused")
            .push_json(200, json!({"status": "Healthy"}));
        let sleeper = RecordingSleeper::new();

        let status = HealthService::new(&client).with_sleeper(&sleeper).check();
        assert!(status.is_healthy);
        assert_eq!(status.retry_count, 1);
        assert!(status.response_time_ms.is_some());
        assert_eq!(sleeper.delays(), vec![Duration::from_secs(1)]);
        assert_eq!(transport.requests()[0].path, "/api/health");
    }

    #[test]
    fn test_unhealthy_after_all_attempts() {
        let (_dir, transport, client) = setup();
        transport
            .push_status(503, "")
            .push_status(404, "")
            .push_network_error("timed out");
        let sleeper = RecordingSleeper::new();

        let status = HealthService::new(&client).with_sleeper(&sleeper).check();
        assert!(!status.is_healthy);
        assert_eq!(status.retry_count, 3);
        assert_eq!(status.error.as_deref(), Some("Network error: timed out"));
        assert_eq!(sleeper.delays().len(), 2);
        assert_eq!(transport.request_count(), 3);
    }
}
