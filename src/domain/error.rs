use std::io;

use thiserror::Error;

/// Library-wide error type for etcdlabs operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Profile file does not exist.
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Profile file extension is not one of toml, yaml, yml.
    #[error("Unsupported profile format '{0}': expected .toml, .yaml or .yml")]
    UnsupportedProfileFormat(String),

    /// Profile values failed validation.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Node name not present in the cluster.
    #[error("Node '{name}' not found. Available: {available}")]
    NodeNotFound { name: String, available: String },

    /// Embedded template failed to load or render.
    #[error("Template '{name}' failed: {details}")]
    Template { name: String, details: String },

    /// Playground backend request failed.
    #[error("Playground backend error: {message}")]
    Backend { message: String, status: Option<u16> },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Interactive prompt failure.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn invalid_profile<S: Into<String>>(message: S) -> Self {
        AppError::InvalidProfile(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::UnsupportedProfileFormat(_)
            | AppError::InvalidProfile(_)
            | AppError::TomlParse(_)
            | AppError::YamlParse(_) => io::ErrorKind::InvalidInput,
            AppError::ProfileNotFound(_) | AppError::NodeNotFound { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::TomlSerialize(_) | AppError::Template { .. } => io::ErrorKind::InvalidData,
            AppError::Backend { .. } | AppError::Prompt(_) => io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_not_found_lists_available_names() {
        let err = AppError::NodeNotFound { name: "s9".into(), available: "s1, s2".into() };
        assert_eq!(err.to_string(), "Node 's9' not found. Available: s1, s2");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn io_errors_keep_their_kind() {
        let err = AppError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
