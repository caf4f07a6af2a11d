use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Persisted project→port assignments plus every port handed out so far.
///
/// Every value in `projects` is also in `used_ports`. Field names match the
/// JSON files the workflow has always written; `usedPorts` is accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub projects: BTreeMap<String, u32>,
    #[serde(default, alias = "usedPorts")]
    pub used_ports: BTreeSet<u32>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.used_ports.is_empty()
    }

    pub fn port_for(&self, project: &str) -> Option<u32> {
        self.projects.get(project).copied()
    }

    pub fn is_assigned(&self, port: u32) -> bool {
        self.used_ports.contains(&port)
    }

    /// Record `project -> port`. Returns false (and changes nothing) if the
    /// project already has a port.
    pub fn assign(&mut self, project: &str, port: u32) -> bool {
        if self.projects.contains_key(project) {
            return false;
        }
        self.projects.insert(project.to_string(), port);
        self.used_ports.insert(port);
        true
    }

    /// Assignments ordered by port.
    pub fn by_port(&self) -> Vec<(&str, u32)> {
        let mut rows: Vec<(&str, u32)> = self
            .projects
            .iter()
            .map(|(name, port)| (name.as_str(), *port))
            .collect();
        rows.sort_by_key(|(name, port)| (*port, *name));
        rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
