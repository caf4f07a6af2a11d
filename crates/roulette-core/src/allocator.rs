use crate::error::{Result, RouletteError};
use crate::registry::Registry;
use crate::reserved::ReservedPorts;
use serde::Serialize;
use std::fmt;

pub const MIN_PORT: u32 = 1024;
pub const MAX_PORT: u32 = 65535;

/// Conflicts tolerated before `find_available` gives up.
pub const SEARCH_BUDGET: usize = 100;

/// Offset applied to the base port when a perturbed candidate overflows.
const OVERFLOW_OFFSET: u32 = 1000;

// ---------------------------------------------------------------------------
// Base port hashing
// ---------------------------------------------------------------------------

/// Map a project name onto its starting search point.
///
/// Each letter contributes its offset from 'a' plus one (a=1 … z=26, and
/// beyond for non-ASCII letters such as é=137) as decimal digits; the
/// concatenation is read as one number and folded into `[MIN_PORT, MAX_PORT]`.
/// Returns 0 when the name has no letters.
pub fn name_to_base_port(name: &str) -> u32 {
    let digits: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .map(|c| (u32::from(c).saturating_sub(u32::from('a')) + 1).to_string())
        .collect();

    if digits.is_empty() {
        return 0;
    }

    let port = match digits.parse::<u64>() {
        Ok(n) if n <= u64::from(MAX_PORT) => n as u32,
        // Too large for a port, or too long for u64: fold digit by digit so
        // the result matches the exact big-integer remainder.
        _ => fold_into_range(&digits),
    };

    if port < MIN_PORT {
        port + MIN_PORT
    } else {
        port
    }
}

fn fold_into_range(digits: &str) -> u32 {
    let modulus = u64::from(MAX_PORT - MIN_PORT);
    let rem = digits
        .bytes()
        .fold(0u64, |acc, b| (acc * 10 + u64::from(b - b'0')) % modulus);
    rem as u32 + MIN_PORT
}

/// Next candidate after a conflict: the decimal form of `port` with its last
/// digit repeated (3000 → 30000, 1169 → 11699).
pub fn append_last_digit(port: u32) -> u32 {
    port.saturating_mul(10).saturating_add(port % 10)
}

pub fn is_valid_range(port: u32) -> bool {
    (MIN_PORT..=MAX_PORT).contains(&port)
}

// ---------------------------------------------------------------------------
// Conflicts and candidates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "port", rename_all = "snake_case")]
pub enum Conflict {
    Reserved(u32),
    Assigned(u32),
    OutOfRange(u32),
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Reserved(p) => write!(f, "Port {p} is a well-known port"),
            Conflict::Assigned(p) => write!(f, "Port {p} is already used"),
            Conflict::OutOfRange(p) => write!(f, "Port {p} is out of valid range"),
        }
    }
}

/// A proposed, not yet confirmed, port for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortCandidate {
    pub project: String,
    pub port: u32,
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The project already has a port on record.
    Existing { project: String, port: u32 },
    /// A fresh candidate. Nothing has been written.
    Proposed(PortCandidate),
}

impl Resolution {
    pub fn port(&self) -> u32 {
        match self {
            Resolution::Existing { port, .. } => *port,
            Resolution::Proposed(candidate) => candidate.port,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The assignment was recorded.
    Saved,
    /// The project already had this port; the registry is unchanged.
    AlreadyAssigned(u32),
}

// ---------------------------------------------------------------------------
// Allocator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Allocator<'a> {
    reserved: &'a ReservedPorts,
}

impl Allocator<'static> {
    /// Allocator over the built-in reserved table.
    pub fn standard() -> Self {
        Allocator::new(ReservedPorts::standard())
    }
}

impl<'a> Allocator<'a> {
    pub fn new(reserved: &'a ReservedPorts) -> Self {
        Self { reserved }
    }

    pub fn is_reserved(&self, port: u32) -> bool {
        self.reserved.contains(port)
    }

    pub fn is_assigned(&self, port: u32, registry: &Registry) -> bool {
        registry.is_assigned(port)
    }

    pub fn is_available(&self, port: u32, registry: &Registry) -> bool {
        self.conflict_for(port, registry).is_none()
    }

    fn conflict_for(&self, port: u32, registry: &Registry) -> Option<Conflict> {
        if self.is_reserved(port) {
            Some(Conflict::Reserved(port))
        } else if self.is_assigned(port, registry) {
            Some(Conflict::Assigned(port))
        } else if !is_valid_range(port) {
            Some(Conflict::OutOfRange(port))
        } else {
            None
        }
    }

    /// Walk from `base_port` until a free port turns up.
    ///
    /// Gives up after [`SEARCH_BUDGET`] conflicts and returns the last
    /// candidate computed, which the caller must re-check.
    pub fn find_available(&self, base_port: u32, registry: &Registry) -> (u32, Vec<Conflict>) {
        let mut port = base_port;
        let mut conflicts = Vec::new();

        while let Some(conflict) = self.conflict_for(port, registry) {
            tracing::debug!(%conflict, "port conflict");
            conflicts.push(conflict);

            port = append_last_digit(port);
            if port > MAX_PORT {
                port = base_port.saturating_add(OVERFLOW_OFFSET);
            }

            if conflicts.len() >= SEARCH_BUDGET {
                tracing::warn!(base_port, last = port, "port search budget exhausted");
                break;
            }
        }

        (port, conflicts)
    }

    /// Look up or propose a port for `project` without touching the registry.
    pub fn resolve(&self, project: &str, registry: &Registry) -> Result<Resolution> {
        if let Some(port) = registry.port_for(project) {
            return Ok(Resolution::Existing {
                project: project.to_string(),
                port,
            });
        }

        let base_port = name_to_base_port(project);
        if base_port == 0 {
            return Err(RouletteError::InvalidName(project.to_string()));
        }

        let (port, conflicts) = self.find_available(base_port, registry);
        if !self.is_available(port, registry) {
            return Err(RouletteError::AllocationFailed {
                project: project.to_string(),
                last_candidate: port,
            });
        }

        Ok(Resolution::Proposed(PortCandidate {
            project: project.to_string(),
            port,
            conflicts,
        }))
    }

    /// Commit `project -> port`. The first confirmed port for a project wins;
    /// later confirms are no-ops whatever port they carry.
    ///
    /// A port another project already holds may be confirmed again (two
    /// previews can land on the same candidate); reserved and out-of-range
    /// ports never are.
    pub fn confirm(&self, project: &str, port: u32, registry: &mut Registry) -> Result<Confirmation> {
        if let Some(existing) = registry.port_for(project) {
            return Ok(Confirmation::AlreadyAssigned(existing));
        }
        if self.is_reserved(port) || !is_valid_range(port) {
            tracing::warn!(project, port, "refusing reserved or out-of-range port");
            return Err(RouletteError::PortUnavailable {
                project: project.to_string(),
                port,
            });
        }
        registry.assign(project, port);
        tracing::info!(project, port, "port assigned");
        Ok(Confirmation::Saved)
    }

    pub fn reset(&self, registry: &mut Registry) {
        *registry = Registry::new();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
