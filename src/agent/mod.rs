//! Agent discovery
//!
//! Agents are markdown descriptors shipped inside npm packages under
//! `.github/agents/<Name>.agent.md`. Discovery is a read-only scan:
//! descriptors are rebuilt on every invocation and never written back.

use serde::Serialize;
use std::path::PathBuf;

pub mod parser;
pub mod scanner;

/// Directory (relative to a package root) that holds agent descriptors
pub const AGENTS_DIR: [&str; 2] = [".github", "agents"];

/// Filename suffix that marks a file as an agent descriptor
pub const AGENT_SUFFIX: &str = ".agent.md";

/// Where a descriptor was discovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentOrigin {
    /// Bundled next to the running tool (extension bootstrap directory)
    Local,
    /// Found inside an installed dependency
    Package,
}

/// An agent descriptor found on disk
#[derive(Debug, Clone, Serialize)]
pub struct AgentDescriptor {
    /// Filename minus the `.agent.md` suffix
    pub name: String,
    /// Directory name of the package the descriptor was found under
    pub source_module: String,
    /// Absolute path to the descriptor file
    pub file_path: PathBuf,
    /// Full file contents
    #[serde(skip)]
    pub raw_content: String,
    /// Value of the `description: '...'` line, if any
    pub description: Option<String>,
    pub origin: AgentOrigin,
}

impl AgentDescriptor {
    /// Build a descriptor from a file name and its contents.
    ///
    /// Returns `None` when the file name does not carry the agent suffix.
    pub fn from_file(
        file_name: &str,
        file_path: PathBuf,
        raw_content: String,
        source_module: &str,
        origin: AgentOrigin,
    ) -> Option<Self> {
        let name = parser::agent_name(file_name)?;
        let description = parser::extract_description(&raw_content);

        Some(Self {
            name: name.to_string(),
            source_module: source_module.to_string(),
            file_path,
            raw_content,
            description,
            origin,
        })
    }

    /// Picker label, prefixed with an icon per origin
    pub fn label(&self) -> String {
        match self.origin {
            AgentOrigin::Local => format!("$(robot) {}", self.name),
            AgentOrigin::Package => format!("$(package) {}", self.name),
        }
    }

    /// Short provenance shown next to the label
    pub fn provenance(&self) -> String {
        match self.origin {
            AgentOrigin::Local => "Local Agent".to_string(),
            AgentOrigin::Package => format!("npm: {}", self.source_module),
        }
    }

    /// Longer provenance line shown under the label
    pub fn detail(&self) -> &'static str {
        match self.origin {
            AgentOrigin::Local => "From .github/agents/",
            AgentOrigin::Package => "From node_modules",
        }
    }
}
