//! Executing `HttpRequest`s.
//!
//! The core never opens sockets itself. A `Transport` turns an `HttpRequest`
//! into an `HttpResponse`, leaving status and body interpretation to
//! `NamecheapClient::parse`. With the default `ureq` feature, `UreqTransport`
//! provides a blocking implementation.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    /// Perform the round-trip. Only failures that prevent getting a response
    /// at all are errors; any HTTP status is returned as data.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use ureq::Agent;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq::Agent`.
    ///
    /// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
    /// responses come back as data and `NamecheapClient` decides what they
    /// mean.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::from_config(None)
        }

        /// Abort any request that takes longer than `timeout` end to end.
        pub fn with_timeout(timeout: Duration) -> Self {
            Self::from_config(Some(timeout))
        }

        fn from_config(timeout: Option<Duration>) -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl From<Agent> for UreqTransport {
        fn from(agent: Agent) -> Self {
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let result = match request.method {
                HttpMethod::Get => {
                    let mut builder = self.agent.get(&request.path);
                    for (key, value) in &request.headers {
                        builder = builder.header(key.as_str(), value.as_str());
                    }
                    builder.call()
                }
                HttpMethod::Post => {
                    let mut builder = self.agent.post(&request.path);
                    for (key, value) in &request.headers {
                        builder = builder.header(key.as_str(), value.as_str());
                    }
                    let body = request.body.unwrap_or_default();
                    builder.send(body.as_bytes())
                }
            };
            let mut response = result.map_err(|e| ApiError::Transport(Box::new(e)))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(Box::new(e)))?;

            tracing::debug!(status, bytes = body.len(), "received response");
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
