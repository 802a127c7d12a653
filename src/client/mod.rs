//! HTTP client shared by the provider adapters.
//!
//! This module provides a synchronous HTTP client built on `ureq`. Adapters
//! call it from async contexts via `tokio::task::spawn_blocking`. The client
//! handles authentication headers, error mapping and request metrics; the
//! payload shape stays with each adapter.

use crate::error::{AdapterError, AdapterResult};
use crate::metrics::{HttpTimer, Metrics};
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;

/// How a provider expects requests to be authenticated.
#[derive(Clone)]
pub enum ProviderAuth {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `Authorization: Basic base64(user:password)`
    Basic { username: String, password: String },
}

impl ProviderAuth {
    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            ProviderAuth::Bearer(token) => format!("Bearer {}", token),
            ProviderAuth::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
        }
    }
}

// Keep secrets out of debug output.
impl std::fmt::Debug for ProviderAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderAuth::Bearer(_) => f.write_str("Bearer(***)"),
            ProviderAuth::Basic { username, .. } => {
                write!(f, "Basic {{ username: {:?}, password: *** }}", username)
            }
        }
    }
}

/// Blocking HTTP client bound to one provider.
#[derive(Clone)]
pub struct ProviderClient {
    /// Base URL for the provider API
    base_url: String,

    auth: ProviderAuth,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

impl ProviderClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, auth: ProviderAuth, timeout: Duration, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url: base_url.to_string(),
            auth,
            agent: Arc::new(agent),
            metrics,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn request(&self, url: &str) -> ureq::Request {
        self.agent
            .post(url)
            .set("Authorization", &self.auth.header_value())
            .set("Accept", "application/json")
    }

    /// POST a JSON body.
    pub fn post_json(&self, path: &str, body: &serde_json::Value) -> AdapterResult<()> {
        let url = self.build_url(path);
        tracing::debug!("POST {} (json)", url);

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self
            .request(&url)
            .set("Content-Type", "application/json")
            .send_json(body);

        self.finish(&url, timer, result)
    }

    /// POST a form-encoded body.
    pub fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> AdapterResult<()> {
        let url = self.build_url(path);
        tracing::debug!("POST {} (form)", url);

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self.request(&url).send_form(fields);

        self.finish(&url, timer, result)
    }

    fn finish(
        &self,
        url: &str,
        timer: HttpTimer,
        result: Result<ureq::Response, ureq::Error>,
    ) -> AdapterResult<()> {
        match result {
            Ok(response) => {
                let duration = timer.complete();
                tracing::debug!(
                    status = response.status(),
                    duration_ms = duration.as_millis() as u64,
                    "POST {} - Success",
                    url
                );
                Ok(())
            }
            Err(e) => {
                let duration = timer.complete_with_error();
                let error = map_error(e);
                tracing::debug!(
                    duration_ms = duration.as_millis() as u64,
                    "POST {} - Error: {}",
                    url,
                    error
                );
                Err(error)
            }
        }
    }
}

/// Map a ureq error to an AdapterError.
fn map_error(error: ureq::Error) -> AdapterError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 | 403 => AdapterError::Auth { status: code },
                429 => AdapterError::RateLimited,
                _ => AdapterError::Provider {
                    status: code,
                    message: message.trim().to_string(),
                },
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                AdapterError::Transport("Connection failed".to_string())
            } else {
                AdapterError::Transport(transport.to_string())
            }
        }
    }
}
