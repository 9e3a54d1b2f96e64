use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::auth::CopperAuth;
use crate::config::{Config, DEFAULT_COPPER_BASE_URL};
use crate::errors::{ActionError, Operation};
use crate::http::{HttpFailure, HttpInvoker, HttpMethod, HttpRequest, ReqwestInvoker};

/// Client for the Copper developer API.
///
/// Holds no per-call state: every action builds its own body, issues exactly
/// one request through the invoker and returns Copper's response body as is.
#[derive(Clone)]
pub struct CopperClient<I> {
    invoker: I,
    auth: CopperAuth,
    base_url: String,
}

impl CopperClient<ReqwestInvoker> {
    /// Creates a reqwest-backed client from the service configuration.
    pub fn from_config(config: &Config) -> Result<Self, HttpFailure> {
        let invoker = ReqwestInvoker::new(Duration::from_secs(config.copper_timeout_secs))?;
        Ok(Self::new(invoker, CopperAuth::from_config(config))
            .with_base_url(config.copper_base_url.clone()))
    }
}

impl<I: HttpInvoker> CopperClient<I> {
    /// Creates a client against the public Copper API.
    pub fn new(invoker: I, auth: CopperAuth) -> Self {
        Self {
            invoker,
            auth,
            base_url: DEFAULT_COPPER_BASE_URL.to_string(),
        }
    }

    /// Points the client at another API root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `<base_url>/<segments...>`, percent-encoding each segment.
    pub(crate) fn endpoint(
        &self,
        segments: &[&str],
        operation: Operation,
    ) -> Result<String, ActionError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ActionError::Failed {
            operation,
            message: format!("Invalid base URL '{}': {}", self.base_url, e),
        })?;

        url.path_segments_mut()
            .map_err(|_| ActionError::Failed {
                operation,
                message: format!("Base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url.into())
    }

    /// Sends one JSON request with the Copper auth headers.
    pub(crate) async fn send<B: Serialize>(
        &self,
        method: HttpMethod,
        url: String,
        body: &B,
    ) -> Result<Value, HttpFailure> {
        let body = serde_json::to_value(body).map_err(|e| {
            HttpFailure::transport(format!("Failed to encode request body: {}", e))
        })?;

        let request = HttpRequest {
            method,
            url,
            headers: self.auth.headers(),
            body,
        };

        let response = self.invoker.send(request).await?;
        Ok(response.body)
    }
}
