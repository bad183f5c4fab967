//! Profile loading from TOML or YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Profile};
use crate::ports::ProfileStore;

/// Profile read from a file, or the built-in defaults when no path is set.
#[derive(Debug, Clone, Default)]
pub struct FileProfileStore {
    path: Option<PathBuf>,
}

impl FileProfileStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Profile, AppError> {
        match &self.path {
            Some(path) => load_profile(path),
            None => {
                tracing::debug!("no profile given, using defaults");
                Ok(Profile::default())
            }
        }
    }
}

/// Parse the profile at `path`, choosing the format from its extension.
pub fn load_profile(path: &Path) -> Result<Profile, AppError> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    if !matches!(extension, "toml" | "yaml" | "yml") {
        return Err(AppError::UnsupportedProfileFormat(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::ProfileNotFound(path.display().to_string())
        } else {
            AppError::Io(err)
        }
    })?;

    tracing::info!(path = %path.display(), "loading profile");
    let profile = match extension {
        "toml" => Profile::parse_toml(&content)?,
        _ => Profile::parse_yaml(&content)?,
    };
    tracing::debug!(
        nodes = profile.cluster.nodes.len(),
        members = profile.cluster.member_count(),
        secure = profile.cluster.secure,
        "profile loaded"
    );
    Ok(profile)
}
