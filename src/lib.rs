//! etcdlabs: render etcd deployment scripts and drive the etcd playground.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{InstallSource, RenderTarget, load_profile, playground_session, render};
pub use app::{PlaygroundSession, PollStop};
pub use domain::{AppError, Profile};
