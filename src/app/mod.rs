pub mod api;
pub mod cli;
pub mod logging;
pub mod playground;

pub use playground::{POLL_INTERVAL, PlaygroundSession, PollStop};
