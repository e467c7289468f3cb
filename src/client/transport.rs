//! HTTP seam between the session client and the API.

use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use super::ClientError;

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `/auth/me`.
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ClientError>;
}

/// `reqwest`-backed transport rooted at the API base URL.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api/v1`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        // Url::join drops the last segment unless the base ends in '/'
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| ClientError::Transport(format!("invalid base URL {}: {}", base_url, e)))?;
        Ok(Self { client, base_url })
    }

    fn url_for(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Transport(format!("invalid path {}: {}", path, e)))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ClientError> {
        let url = self.url_for(&request.path)?;
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-process transports for client tests.

    use std::collections::VecDeque;

    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;

    type Handler = Box<dyn Fn(&TransportRequest) -> Result<TransportResponse, ClientError> + Send + Sync>;

    /// Answers each request with `handler`, recording what was sent.
    pub(crate) struct FakeTransport {
        handler: Handler,
        sent: Mutex<Vec<TransportRequest>>,
    }

    impl FakeTransport {
        pub(crate) fn new(
            handler: impl Fn(&TransportRequest) -> Result<TransportResponse, ClientError>
                + Send
                + Sync
                + 'static,
        ) -> Self {
            Self {
                handler: Box::new(handler),
                sent: Mutex::new(Vec::new()),
            }
        }

        /// Replay `script` in order; unscripted requests get a 500.
        pub(crate) fn scripted(
            script: Vec<Result<TransportResponse, ClientError>>,
        ) -> Self {
            let queue = Mutex::new(VecDeque::from(script));
            Self::new(move |_| {
                queue
                    .lock()
                    .pop_front()
                    .unwrap_or_else(|| Ok(respond(500, json!({ "detail": "unscripted request" }))))
            })
        }

        pub(crate) fn requests(&self) -> Vec<TransportRequest> {
            self.sent.lock().clone()
        }

        pub(crate) fn paths(&self) -> Vec<String> {
            self.sent.lock().iter().map(|r| r.path.clone()).collect()
        }
    }

    pub(crate) fn respond(status: u16, body: Value) -> TransportResponse {
        TransportResponse { status, body }
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ClientError> {
            self.sent.lock().push(request.clone());
            // Let concurrent callers interleave like real I/O would
            tokio::task::yield_now().await;
            (self.handler)(&request)
        }
    }
}
