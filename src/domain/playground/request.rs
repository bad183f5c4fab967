//! Client request/response shapes for `client-request`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Longest key/value prefix shown in a log line before truncation.
const DISPLAY_LIMIT: usize = 7;

/// Operation the backend performs against the playground cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientAction {
    #[default]
    Write,
    Stress,
    Get,
    Delete,
    StopNode,
    RestartNode,
}

impl ClientAction {
    pub const ALL: [ClientAction; 6] = [
        ClientAction::Write,
        ClientAction::Stress,
        ClientAction::Get,
        ClientAction::Delete,
        ClientAction::StopNode,
        ClientAction::RestartNode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientAction::Write => "write",
            ClientAction::Stress => "stress",
            ClientAction::Get => "get",
            ClientAction::Delete => "delete",
            ClientAction::StopNode => "stop-node",
            ClientAction::RestartNode => "restart-node",
        }
    }

    /// Whether the action needs a key.
    pub fn needs_key(&self) -> bool {
        matches!(self, ClientAction::Write | ClientAction::Get | ClientAction::Delete)
    }

    /// Whether the action accepts a range-prefix flag.
    pub fn supports_prefix(&self) -> bool {
        matches!(self, ClientAction::Get | ClientAction::Delete)
    }
}

impl fmt::Display for ClientAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ClientAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientAction::ALL.into_iter().find(|action| action.as_str() == s).ok_or_else(|| {
            AppError::config_error(format!(
                "Unknown action '{}': expected one of {}",
                s,
                ClientAction::ALL.map(|a| a.as_str()).join(", ")
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValue {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// `key: ..., value: ...` with both sides truncated for display.
    pub fn summary(&self) -> String {
        format!("key: {}, value: {}", truncate(&self.key), truncate(&self.value))
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > DISPLAY_LIMIT {
        format!("{}...", text.chars().take(DISPLAY_LIMIT).collect::<String>())
    } else {
        text.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientRequest {
    pub action: ClientAction,
    #[serde(default)]
    pub range_prefix: bool,
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub key_value: KeyValue,
}

impl ClientRequest {
    pub fn new(action: ClientAction) -> Self {
        Self { action, ..Self::default() }
    }

    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_value = KeyValue::new(key, value);
        self
    }

    pub fn with_prefix(mut self, range_prefix: bool) -> Self {
        self.range_prefix = range_prefix;
        self
    }

    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = String>) -> Self {
        self.endpoints = endpoints.into_iter().collect();
        self
    }

    /// Short description used when logging the request.
    pub fn describe(&self) -> String {
        let mut text = self.action.as_str().to_uppercase();
        if self.action.needs_key() {
            text.push_str(&format!(" ({})", self.key_value.summary()));
        }
        if self.range_prefix {
            text.push_str(" [prefix]");
        }
        if let Some(endpoint) = self.endpoints.first() {
            text.push_str(&format!(" via {}", endpoint));
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientResponse {
    #[serde(default)]
    pub client_request: ClientRequest,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub result_lines: Vec<String>,
    #[serde(default)]
    pub key_values: Vec<KeyValue>,
}

impl ClientResponse {
    /// Lines to log: `result_lines`, falling back to `result`.
    pub fn log_lines(&self) -> Vec<String> {
        if !self.result_lines.is_empty() {
            return self.result_lines.clone();
        }
        if self.result.is_empty() { Vec::new() } else { vec![self.result.clone()] }
    }
}
