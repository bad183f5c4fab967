//! Playground backend client implementation using reqwest.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{
    AppError, ClientRequest, ClientResponse, Connect, PlaygroundConfig, ServerStatus,
};
use crate::ports::PlaygroundBackend;

const CONNECT_PATH: &str = "conn";
const SERVER_STATUS_PATH: &str = "server-status";
const CLIENT_REQUEST_PATH: &str = "client-request";
const DEFAULT_STATUS_MESSAGE: &str = "Playground request failed";

/// HTTP transport for the playground backend.
///
/// One request per call; failed status polls are simply retried on the next
/// tick by the session.
#[derive(Debug, Clone)]
pub struct HttpPlaygroundBackend {
    base_url: Url,
    client: Client,
}

impl HttpPlaygroundBackend {
    pub fn new(config: &PlaygroundConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Backend {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self { base_url: config.endpoint.clone(), client })
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        self.base_url.join(path).map_err(|e| AppError::Backend {
            message: format!("Invalid playground URL for '{}': {}", path, e),
            status: None,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let url = self.url(path)?;
        tracing::debug!(method = method.as_str(), url = url.as_str(), "playground request");
        Ok(self.client.request(method, url))
    }

    /// Send `request` and return the body of a successful response.
    fn send(&self, request: RequestBuilder) -> Result<(u16, String), AppError> {
        let response = request.send().map_err(|e| AppError::Backend {
            message: format!("HTTP request failed: {}", e),
            status: None,
        })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return Ok((status.as_u16(), body_text));
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.trim().to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });
        tracing::warn!(status = status.as_u16(), %message, "playground request rejected");

        Err(AppError::Backend { message, status: Some(status.as_u16()) })
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let (status, body) = self.send(request)?;
        serde_json::from_str(&body).map_err(|e| AppError::Backend {
            message: format!("Failed to parse response: {}", e),
            status: Some(status),
        })
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed.get("Result").and_then(|message| message.as_str()) {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl PlaygroundBackend for HttpPlaygroundBackend {
    fn connect(&self) -> Result<Connect, AppError> {
        self.send_json(self.request(Method::GET, CONNECT_PATH)?)
    }

    fn disconnect(&self) -> Result<(), AppError> {
        self.send(self.request(Method::DELETE, CONNECT_PATH)?).map(|_| ())
    }

    fn server_status(&self) -> Result<ServerStatus, AppError> {
        self.send_json(self.request(Method::GET, SERVER_STATUS_PATH)?)
    }

    fn client_request(&self, request: &ClientRequest) -> Result<ClientResponse, AppError> {
        self.send_json(self.request(Method::POST, CLIENT_REQUEST_PATH)?.json(request))
    }
}
