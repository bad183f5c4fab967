//! Playground backend port definition.

use crate::domain::{AppError, ClientRequest, ClientResponse, Connect, ServerStatus};

/// Port for the external service that runs the playground cluster.
pub trait PlaygroundBackend {
    /// Open (or resume) a session.
    fn connect(&self) -> Result<Connect, AppError>;

    /// Tear the session down.
    fn disconnect(&self) -> Result<(), AppError>;

    /// Current status of every playground member.
    fn server_status(&self) -> Result<ServerStatus, AppError>;

    /// Run a client action against the playground cluster.
    fn client_request(&self, request: &ClientRequest) -> Result<ClientResponse, AppError>;
}
