use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
        }
    }
}

/// A single outbound JSON request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

/// A failed request.
///
/// `response` is set when the remote answered with an error status and is
/// `None` when the request never produced a response (DNS, connect, timeout).
#[derive(Debug, Clone)]
pub struct HttpFailure {
    pub response: Option<HttpResponse>,
    pub message: String,
}

impl HttpFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            response: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HttpFailure {}

/// Sends one request and reports the parsed response.
///
/// Implementations must issue exactly one request per call and treat every
/// status >= 400 as an `HttpFailure` carrying that response.
pub trait HttpInvoker {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpFailure>> + Send;
}

/// `HttpInvoker` backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestInvoker {
    client: reqwest::Client,
}

impl ReqwestInvoker {
    /// Creates a new `ReqwestInvoker`.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Upper bound for a whole request, connect included.
    pub fn new(timeout: Duration) -> Result<Self, HttpFailure> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpFailure::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpInvoker for ReqwestInvoker {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpFailure> {
        let mut builder = match request.method {
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // Serialized up front so the Content-Type header above is the only one sent
        let payload = serde_json::to_vec(&request.body)
            .map_err(|e| HttpFailure::transport(format!("Failed to encode request body: {}", e)))?;

        let response = builder
            .body(payload)
            .send()
            .await
            .map_err(|e| HttpFailure::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| HttpFailure::transport(format!("Failed to read response body: {}", e)))?;
        let body = parse_body(&text);

        if status >= 400 {
            tracing::debug!("{} {} returned {}", request.method, request.url, status);
            return Err(HttpFailure {
                response: Some(HttpResponse { status, body }),
                message: format!("request failed with status code {}", status),
            });
        }

        Ok(HttpResponse { status, body })
    }
}

/// JSON when possible, the raw text otherwise, `null` for an empty body.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
