use crate::output::{print_alfred, AlfredItem};
use roulette_core::{invocation, Allocator, ConfigStore, Outcome, RouletteError};

pub const USAGE: &str = "Usage: port <project-name> or port reset";

/// `port-roulette query`: the Alfred script filter.
///
/// Never commits a port: Alfred reruns this on every keystroke, so a pasted
/// token is only shown. Always prints exactly one item. Domain failures
/// become an "Error" row so Alfred has something to render.
pub fn run(store: &ConfigStore, input: &str) -> anyhow::Result<()> {
    let allocator = Allocator::standard();
    let item = match invocation::invoke_preview(input, &allocator, store) {
        Ok(outcome) => outcome_item(&outcome),
        Err(e) => {
            tracing::debug!(error = %e, input, "query failed");
            error_item(&e)
        }
    };
    print_alfred(item)
}

pub fn outcome_item(outcome: &Outcome) -> AlfredItem {
    match outcome {
        Outcome::Usage => AlfredItem::message("Port Roulette", USAGE),
        Outcome::Reset => AlfredItem::new(
            "Database Reset",
            "Port database has been reset to default state",
            "reset",
        ),
        Outcome::Existing { project, port } => AlfredItem::new(
            format!("Port {port}"),
            format!("Existing port for '{project}'"),
            port.to_string(),
        ),
        Outcome::Proposed { candidate, token } => {
            let mut subtitle = format!("New port for '{}'", candidate.project);
            if !candidate.conflicts.is_empty() {
                subtitle.push_str(&format!(" (conflicts: {})", candidate.conflicts.len()));
            }
            AlfredItem::new(format!("Port {}", candidate.port), subtitle, token.as_str())
        }
        Outcome::Confirmed { project, port } => AlfredItem::new(
            format!("Port {port}"),
            format!("Saved port for '{project}'"),
            port.to_string(),
        ),
        Outcome::AlreadyAssigned { project, port } => AlfredItem::new(
            format!("Port {port}"),
            format!("Existing port for '{project}'"),
            port.to_string(),
        ),
        Outcome::Pending {
            project,
            port,
            token,
        } => AlfredItem::new(
            format!("Port {port}"),
            format!("Select to save port for '{project}'"),
            token.as_str(),
        ),
    }
}

pub fn error_item(err: &RouletteError) -> AlfredItem {
    let subtitle = match err {
        RouletteError::InvalidName(_) => "Invalid project name - no letters found".to_string(),
        RouletteError::AllocationFailed { .. } => "Could not find a valid port".to_string(),
        other => other.to_string(),
    };
    AlfredItem::message("Error", subtitle)
}
