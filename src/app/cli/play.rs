//! Playground command implementation.

use std::io::{BufRead, ErrorKind};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::Subcommand;
use dialoguer::{Confirm, Error as DialoguerError, Input, Select};

use crate::adapters::HttpPlaygroundBackend;
use crate::app::api;
use crate::app::playground::{POLL_INTERVAL, PlaygroundSession, PollStop};
use crate::domain::{AppError, ClientAction, ClientRequest, ServerStatus};

type Session = PlaygroundSession<HttpPlaygroundBackend>;

#[derive(Subcommand, Clone)]
pub enum PlayCommand {
    /// Open a playground session
    #[clap(visible_alias = "c")]
    Connect,
    /// Close the playground session
    Disconnect,
    /// Print member status once
    #[clap(visible_alias = "s")]
    Status,
    /// Print member status every interval until Enter is pressed
    #[clap(visible_alias = "w")]
    Watch {
        /// Seconds between polls
        #[arg(long, default_value_t = POLL_INTERVAL.as_secs())]
        interval: u64,
    },
    /// Put a key
    Write { key: String, value: String },
    /// Get a key
    Get {
        key: String,
        /// Treat the key as a prefix
        #[arg(long)]
        prefix: bool,
    },
    /// Delete a key
    Delete {
        key: String,
        /// Treat the key as a prefix
        #[arg(long)]
        prefix: bool,
    },
    /// Write a batch of random keys
    Stress,
    /// Stop a member (name such as node2, or its endpoint)
    StopNode { node: String },
    /// Restart a stopped member
    RestartNode { node: String },
    /// Interactive session
    Shell,
}

pub fn run_play(profile: Option<&Path>, command: PlayCommand) -> Result<i32, AppError> {
    let profile = api::load_profile(profile)?;
    let mut session = api::playground_session(&profile)?;
    let mut printed = 0;

    let code = match command {
        PlayCommand::Connect => {
            session.connect()?;
            0
        }
        PlayCommand::Disconnect => {
            session.disconnect()?;
            0
        }
        PlayCommand::Status => {
            session.refresh_status();
            if let Some(message) = session.last_error() {
                return Err(AppError::Backend { message: message.to_string(), status: None });
            }
            print_status(session.status());
            0
        }
        PlayCommand::Watch { interval } => return run_watch(&mut session, interval),
        PlayCommand::Write { key, value } => {
            submit(&mut session, ClientRequest::new(ClientAction::Write).with_key_value(key, value))
        }
        PlayCommand::Get { key, prefix } => submit(
            &mut session,
            ClientRequest::new(ClientAction::Get).with_key_value(key, "").with_prefix(prefix),
        ),
        PlayCommand::Delete { key, prefix } => submit(
            &mut session,
            ClientRequest::new(ClientAction::Delete).with_key_value(key, "").with_prefix(prefix),
        ),
        PlayCommand::Stress => submit(&mut session, ClientRequest::new(ClientAction::Stress)),
        PlayCommand::StopNode { node } => node_action(&mut session, ClientAction::StopNode, &node),
        PlayCommand::RestartNode { node } => {
            node_action(&mut session, ClientAction::RestartNode, &node)
        }
        PlayCommand::Shell => return run_shell(&mut session),
    };

    print_new_lines(&session, &mut printed);
    Ok(code)
}

/// Refresh endpoints, then send `request`. Exit code 1 when it failed.
fn submit(session: &mut Session, request: ClientRequest) -> i32 {
    session.refresh_status();
    match session.submit(request) {
        Some(response) if response.success => 0,
        _ => 1,
    }
}

fn node_action(session: &mut Session, action: ClientAction, node: &str) -> i32 {
    session.refresh_status();
    let endpoint = session.status().endpoint_of(node);
    match session.submit(ClientRequest::new(action).with_endpoints(vec![endpoint])) {
        Some(response) if response.success => 0,
        _ => 1,
    }
}

fn print_new_lines(session: &Session, printed: &mut usize) {
    for line in session.log().since(*printed) {
        println!("{}", line);
    }
    *printed = session.log().len();
}

fn print_status(status: &ServerStatus) {
    println!("uptime: {}  users: {}", status.server_uptime, status.user_n);
    for node in &status.node_statuses {
        let leader = if node.is_leader { "*" } else { " " };
        println!(
            "{}{:<6} {:<10} {:<18} {:>8}  hash={}",
            leader, node.name, node.state, node.endpoint, node.db_size_txt, node.hash
        );
    }
}

fn run_watch(session: &mut Session, interval: u64) -> Result<i32, AppError> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
        let _ = tx.send(());
    });

    eprintln!("Press Enter to stop watching");
    let mut printed = 0;
    let stop = session.poll(Duration::from_secs(interval.max(1)), &rx, |s| {
        print_status(s.status());
        print_new_lines(s, &mut printed);
    });
    print_new_lines(session, &mut printed);

    if stop == PollStop::Inactive {
        println!("Playground session has expired; reconnect to continue");
    }
    Ok(0)
}

const SHELL_STATUS: &str = "status";
const SHELL_QUIT: &str = "quit";

fn run_shell(session: &mut Session) -> Result<i32, AppError> {
    session.connect()?;
    let mut printed = 0;
    print_new_lines(session, &mut printed);

    let mut items: Vec<&str> = vec![SHELL_STATUS];
    items.extend(ClientAction::ALL.iter().map(|action| action.as_str()));
    items.push(SHELL_QUIT);

    loop {
        session.refresh_status();
        let selection = Select::new()
            .with_prompt("Action")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|err| AppError::Prompt(format!("Failed to select action: {}", err)))?;

        let Some(index) = selection else { break };
        let choice = items[index];
        if choice == SHELL_QUIT {
            break;
        }
        if choice == SHELL_STATUS {
            print_status(session.status());
            print_new_lines(session, &mut printed);
            continue;
        }

        let action: ClientAction = choice.parse()?;
        let Some(request) = prompt_request(session.status(), action)? else { continue };
        session.submit(request);
        print_new_lines(session, &mut printed);
    }

    session.disconnect()?;
    print_new_lines(session, &mut printed);
    Ok(0)
}

fn prompt_request(
    status: &ServerStatus,
    action: ClientAction,
) -> Result<Option<ClientRequest>, AppError> {
    let mut request = ClientRequest::new(action);

    if matches!(action, ClientAction::StopNode | ClientAction::RestartNode) {
        let names: Vec<&str> = status.node_statuses.iter().map(|node| node.name.as_str()).collect();
        let selection = Select::new()
            .with_prompt("Member")
            .items(&names)
            .default(0)
            .interact_opt()
            .map_err(|err| AppError::Prompt(format!("Failed to select member: {}", err)))?;
        let Some(index) = selection else { return Ok(None) };
        return Ok(Some(request.with_endpoints(vec![status.endpoint_of(names[index])])));
    }

    if action.needs_key() {
        let Some(key) = prompt_text("Key", false)? else { return Ok(None) };
        let value = if action == ClientAction::Write {
            match prompt_text("Value", true)? {
                Some(value) => value,
                None => return Ok(None),
            }
        } else {
            String::new()
        };
        request = request.with_key_value(key, value);
    }

    if action.supports_prefix() {
        let prefix = Confirm::new()
            .with_prompt("Match by prefix?")
            .default(false)
            .interact_opt()
            .map_err(|err| AppError::Prompt(format!("Failed to read prefix choice: {}", err)))?;
        let Some(prefix) = prefix else { return Ok(None) };
        request = request.with_prefix(prefix);
    }

    Ok(Some(request))
}

fn prompt_text(prompt: &str, allow_empty: bool) -> Result<Option<String>, AppError> {
    match Input::<String>::new().with_prompt(prompt).allow_empty(allow_empty).interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Prompt(format!("Failed to read {}: {}", prompt, err))),
    }
}
