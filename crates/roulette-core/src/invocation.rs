//! One free-text argument in, one outcome out.
//!
//! The host passes whatever the user typed or picked: a project name, the
//! word `reset`, or a confirmation token produced by an earlier proposal.

use crate::allocator::{Allocator, Confirmation, PortCandidate, Resolution};
use crate::error::Result;
use crate::store::ConfigStore;
use crate::token::ConfirmationToken;
use serde::Serialize;

pub const RESET_COMMAND: &str = "reset";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Empty,
    Reset,
    Resolve(String),
    Confirm(ConfirmationToken),
}

impl Request {
    /// Classify raw input. Fails only for input that starts like a
    /// confirmation token but does not parse as one.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            Ok(Request::Empty)
        } else if input.eq_ignore_ascii_case(RESET_COMMAND) {
            Ok(Request::Reset)
        } else if ConfirmationToken::looks_like_token(input) {
            Ok(Request::Confirm(input.parse()?))
        } else {
            Ok(Request::Resolve(input.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Usage,
    Reset,
    Existing {
        project: String,
        port: u32,
    },
    Proposed {
        #[serde(flatten)]
        candidate: PortCandidate,
        token: String,
    },
    Confirmed {
        project: String,
        port: u32,
    },
    AlreadyAssigned {
        project: String,
        port: u32,
    },
    /// A token seen while previewing: shown, not saved.
    Pending {
        project: String,
        port: u32,
        token: String,
    },
}

impl Outcome {
    pub fn port(&self) -> Option<u32> {
        match self {
            Outcome::Usage | Outcome::Reset => None,
            Outcome::Existing { port, .. }
            | Outcome::Confirmed { port, .. }
            | Outcome::AlreadyAssigned { port, .. }
            | Outcome::Pending { port, .. } => Some(*port),
            Outcome::Proposed { candidate, .. } => Some(candidate.port),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run `request` against the registry behind `store`.
///
/// Only `Reset` and a successful `Confirm` write; proposals are never saved.
pub fn handle(request: Request, allocator: &Allocator<'_>, store: &ConfigStore) -> Result<Outcome> {
    match request {
        Request::Empty => Ok(Outcome::Usage),
        Request::Reset => {
            let mut registry = store.load();
            allocator.reset(&mut registry);
            store.save(&registry);
            tracing::info!(path = %store.path().display(), "registry reset");
            Ok(Outcome::Reset)
        }
        Request::Resolve(project) => {
            let registry = store.load();
            match allocator.resolve(&project, &registry)? {
                Resolution::Existing { project, port } => Ok(Outcome::Existing { project, port }),
                Resolution::Proposed(candidate) => {
                    let token = ConfirmationToken::new(candidate.project.as_str(), candidate.port)?;
                    Ok(Outcome::Proposed {
                        token: token.to_string(),
                        candidate,
                    })
                }
            }
        }
        Request::Confirm(ConfirmationToken { project, port }) => {
            let mut registry = store.load();
            match allocator.confirm(&project, port, &mut registry)? {
                Confirmation::Saved => {
                    store.save(&registry);
                    Ok(Outcome::Confirmed { project, port })
                }
                Confirmation::AlreadyAssigned(port) => Ok(Outcome::AlreadyAssigned { project, port }),
            }
        }
    }
}

/// Parse and run in one step.
pub fn invoke(input: &str, allocator: &Allocator<'_>, store: &ConfigStore) -> Result<Outcome> {
    handle(Request::parse(input)?, allocator, store)
}

/// Like [`handle`], but a confirmation token is only described, never
/// committed. The script filter runs on every keystroke, so it must not
/// consume ports.
pub fn preview(request: Request, allocator: &Allocator<'_>, store: &ConfigStore) -> Result<Outcome> {
    match request {
        Request::Confirm(token) => match store.load().port_for(&token.project) {
            Some(port) => Ok(Outcome::Existing {
                project: token.project,
                port,
            }),
            None => Ok(Outcome::Pending {
                token: token.to_string(),
                project: token.project,
                port: token.port,
            }),
        },
        other => handle(other, allocator, store),
    }
}

/// Parse and preview in one step.
pub fn invoke_preview(input: &str, allocator: &Allocator<'_>, store: &ConfigStore) -> Result<Outcome> {
    preview(Request::parse(input)?, allocator, store)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
