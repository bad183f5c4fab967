use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, ClientRequest, ClientResponse, Connect, ServerStatus};
use crate::ports::PlaygroundBackend;

/// Scripted playground backend.
///
/// Each `server_status` call pops the next scripted entry; `None` simulates a
/// network failure. Once the script is exhausted the last status is repeated.
#[derive(Clone, Default)]
pub struct FakePlaygroundBackend {
    pub statuses: Arc<Mutex<VecDeque<Option<ServerStatus>>>>,
    pub last_status: Arc<Mutex<Option<ServerStatus>>>,
    pub requests: Arc<Mutex<Vec<ClientRequest>>>,
    pub response: Arc<Mutex<Option<ClientResponse>>>,
    pub status_calls: Arc<Mutex<usize>>,
    pub disconnected: Arc<Mutex<bool>>,
}

impl FakePlaygroundBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_status(&self, status: ServerStatus) -> &Self {
        self.statuses.lock().unwrap().push_back(Some(status));
        self
    }

    pub fn push_failure(&self) -> &Self {
        self.statuses.lock().unwrap().push_back(None);
        self
    }

    pub fn respond_with(&self, response: Option<ClientResponse>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn recorded_requests(&self) -> Vec<ClientRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        *self.status_calls.lock().unwrap()
    }

    pub fn was_disconnected(&self) -> bool {
        *self.disconnected.lock().unwrap()
    }
}

fn network_error() -> AppError {
    AppError::Backend { message: "connection refused".to_string(), status: None }
}

impl PlaygroundBackend for FakePlaygroundBackend {
    fn connect(&self) -> Result<Connect, AppError> {
        Ok(Connect { web_port: 4200, user: "tester".to_string(), deleted: false })
    }

    fn disconnect(&self) -> Result<(), AppError> {
        *self.disconnected.lock().unwrap() = true;
        Ok(())
    }

    fn server_status(&self) -> Result<ServerStatus, AppError> {
        *self.status_calls.lock().unwrap() += 1;
        let next = self.statuses.lock().unwrap().pop_front();
        match next {
            Some(Some(status)) => {
                *self.last_status.lock().unwrap() = Some(status.clone());
                Ok(status)
            }
            Some(None) => Err(network_error()),
            None => self.last_status.lock().unwrap().clone().ok_or_else(network_error),
        }
    }

    fn client_request(&self, request: &ClientRequest) -> Result<ClientResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.lock().unwrap().clone().ok_or_else(network_error)
    }
}
