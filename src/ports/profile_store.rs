use crate::domain::{AppError, Profile};

/// Source of the profile an invocation renders from.
pub trait ProfileStore {
    fn load(&self) -> Result<Profile, AppError>;
}
