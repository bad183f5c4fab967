use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, defaults};

/// Playground backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaygroundConfig {
    /// Base URL the `conn`, `server-status` and `client-request` paths are joined onto.
    #[serde(default = "defaults::playground_endpoint")]
    pub endpoint: Url,
    /// Request timeout in seconds.
    #[serde(default = "defaults::playground_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        defaults::playground()
    }
}

impl PlaygroundConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::invalid_profile("playground timeout_secs must be greater than 0"));
        }
        if self.endpoint.cannot_be_a_base() {
            return Err(AppError::invalid_profile(format!(
                "playground endpoint '{}' cannot be used as a base URL",
                self.endpoint
            )));
        }
        Ok(())
    }
}
