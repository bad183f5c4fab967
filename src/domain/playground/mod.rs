//! Playground session data: log, backend status and client requests.

mod config;
mod log;
mod request;
mod status;

pub use config::PlaygroundConfig;
pub use log::{LogBook, LogLevel, LogLine};
pub use request::{ClientAction, ClientRequest, ClientResponse, KeyValue};
pub use status::{Connect, NodeStatus, PLAYGROUND_NODES, ServerStatus};
