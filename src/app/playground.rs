//! Playground session: backend calls, session log and status polling.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::domain::{
    AppError, ClientAction, ClientRequest, ClientResponse, Connect, LogBook, LogLevel,
    ServerStatus,
};
use crate::ports::PlaygroundBackend;

/// Interval between status polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Why [`PlaygroundSession::poll`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStop {
    /// The cancel channel fired or was dropped.
    Cancelled,
    /// The backend reported the session inactive.
    Inactive,
}

/// State of one playground session.
///
/// Network failures never escape `refresh_status` or `submit`; they are
/// stored in [`last_error`](Self::last_error) and appended to the log.
pub struct PlaygroundSession<B: PlaygroundBackend> {
    backend: B,
    log: LogBook,
    status: ServerStatus,
    connection: Option<Connect>,
    last_error: Option<String>,
}

impl<B: PlaygroundBackend> PlaygroundSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            log: LogBook::new(),
            status: ServerStatus::default(),
            connection: None,
            last_error: None,
        }
    }

    pub fn log(&self) -> &LogBook {
        &self.log
    }

    pub fn status(&self) -> &ServerStatus {
        &self.status
    }

    pub fn connection(&self) -> Option<&Connect> {
        self.connection.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn connect(&mut self) -> Result<&Connect, AppError> {
        let connect = self.backend.connect().inspect_err(|err| {
            self.log.append(LogLevel::Error, format!("connect failed: {}", err));
        })?;

        if connect.deleted {
            self.log.append(LogLevel::Warn, "previous session was deleted; starting a new one");
        }
        self.log.append(LogLevel::Info, format!("connected as '{}'", connect.user));
        tracing::info!(user = %connect.user, web_port = connect.web_port, "playground connected");
        Ok(&*self.connection.insert(connect))
    }

    pub fn disconnect(&mut self) -> Result<(), AppError> {
        self.backend.disconnect().inspect_err(|err| {
            self.log.append(LogLevel::Error, format!("disconnect failed: {}", err));
        })?;
        self.connection = None;
        self.log.append(LogLevel::Info, "disconnected");
        tracing::info!("playground disconnected");
        Ok(())
    }

    /// Fetch and store the latest status.
    ///
    /// Returns whether the session is still active. A failed fetch keeps the
    /// previous status and counts as active.
    pub fn refresh_status(&mut self) -> bool {
        match self.backend.server_status() {
            Ok(status) => {
                let previous_leader = self.status.leader().map(|node| node.name.clone());
                let current_leader = status.leader().map(|node| node.name.clone());
                if current_leader.is_some() && current_leader != previous_leader {
                    self.log.append(
                        LogLevel::Info,
                        format!("{} is the leader", current_leader.unwrap_or_default()),
                    );
                }
                self.status = status;
                self.last_error = None;
                self.status.playground_active
            }
            Err(err) => {
                tracing::warn!(error = %err, "server status poll failed");
                self.record_error(format!("server status failed: {}", err));
                true
            }
        }
    }

    /// Send a client request, logging the request and every result line.
    ///
    /// An empty endpoint list is filled with the endpoints from the last
    /// status. Returns `None` when the request could not be delivered.
    pub fn submit(&mut self, mut request: ClientRequest) -> Option<ClientResponse> {
        if request.endpoints.is_empty() {
            request.endpoints = self.status.endpoints();
        }
        self.log.append(LogLevel::Info, format!("request: {}", request.describe()));

        match self.backend.client_request(&request) {
            Ok(response) => {
                let level = if response.success { LogLevel::Info } else { LogLevel::Error };
                for line in response.log_lines() {
                    self.log.append(level, line);
                }
                self.last_error = None;
                Some(response)
            }
            Err(err) => {
                self.record_error(format!("{} failed: {}", request.action, err));
                None
            }
        }
    }

    /// Convenience wrapper around [`submit`](Self::submit).
    pub fn submit_action(
        &mut self,
        action: ClientAction,
        key: &str,
        value: &str,
        range_prefix: bool,
        endpoints: Vec<String>,
    ) -> Option<ClientResponse> {
        let request = ClientRequest::new(action)
            .with_key_value(key, value)
            .with_prefix(range_prefix)
            .with_endpoints(endpoints);
        self.submit(request)
    }

    /// Refresh status, call `on_tick`, then wait `interval` for a cancel
    /// signal; repeat until cancelled or the session goes inactive.
    pub fn poll<F>(&mut self, interval: Duration, cancel: &Receiver<()>, mut on_tick: F) -> PollStop
    where
        F: FnMut(&Self),
    {
        loop {
            let active = self.refresh_status();
            on_tick(self);
            if !active {
                self.log.append(LogLevel::Warn, "playground session is no longer active");
                return PollStop::Inactive;
            }

            match cancel.recv_timeout(interval) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("status polling cancelled");
                    return PollStop::Cancelled;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
    }

    fn record_error(&mut self, message: String) {
        self.log.append(LogLevel::Error, message.clone());
        self.last_error = Some(message);
    }
}
