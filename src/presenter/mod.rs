//! Editor-style front end over the scanner and responder
//!
//! The presenter owns no UI. Everything it shows goes through a [`Host`],
//! which the terminal front end implements with interactive prompts and tests
//! implement with scripted answers. It exposes three actions:
//!
//! - **select agent**: pick a discovered agent, then send it one request
//! - **chat panel**: a persistent two-pane conversation (see [`chat`])
//! - **run from palette**: one request, no picker

use eyre::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::agent::scanner::{agents_dir, scan, scan_local};
use crate::agent::{AGENT_SUFFIX, AgentDescriptor};
use crate::responder::Responder;

pub mod chat;
pub mod terminal;

use chat::ChatPanel;

/// An entry shown in the agent picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: String,
    pub detail: String,
}

impl From<&AgentDescriptor> for PickItem {
    fn from(agent: &AgentDescriptor) -> Self {
        Self {
            label: agent.label(),
            description: agent.provenance(),
            detail: agent.detail().to_string(),
        }
    }
}

/// UI surface the presenter drives
pub trait Host {
    /// Project folders currently open
    fn workspace_folders(&self) -> Vec<PathBuf>;

    /// Searchable list; `None` when dismissed
    fn show_quick_pick(&mut self, items: &[PickItem], placeholder: &str) -> Result<Option<usize>>;

    /// Free-text prompt; `None` when dismissed
    fn show_input_box(&mut self, prompt: &str, placeholder: &str) -> Result<Option<String>>;

    fn show_information(&mut self, message: &str);

    fn show_warning(&mut self, message: &str);
}

/// Named diagnostic log
#[derive(Debug, Default)]
pub struct OutputChannel {
    name: String,
    lines: Vec<String>,
}

impl OutputChannel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
        }
    }

    pub fn append_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::debug!("[{}] {}", self.name, line);
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

pub struct ExtensionPresenter {
    extension_root: PathBuf,
    package_name: String,
    responder: Responder,
    output: OutputChannel,
    chat_panel: Option<ChatPanel>,
    panels_opened: usize,
    runtime: Runtime,
}

impl ExtensionPresenter {
    /// Load the bootstrap agent and prepare the chat runtime.
    ///
    /// A missing bootstrap descriptor is logged; instructions fall back to empty.
    pub fn activate(extension_root: PathBuf, bootstrap_agent: &str, package_name: &str) -> Result<Self> {
        let mut output = OutputChannel::new("AgentPublishTest");

        let instructions = load_instructions(&extension_root, bootstrap_agent, &mut output);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("agent-chat")
            .build()
            .context("Failed to start chat runtime")?;

        Ok(Self {
            extension_root,
            package_name: package_name.to_string(),
            responder: Responder::new(instructions, bootstrap_agent),
            output,
            chat_panel: None,
            panels_opened: 0,
            runtime,
        })
    }

    #[cfg(test)]
    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    #[cfg(test)]
    pub fn output(&self) -> &OutputChannel {
        &self.output
    }

    /// Bundled agents plus every workspace folder's `node_modules`
    pub fn load_installed_agents(&self, host: &dyn Host) -> Vec<AgentDescriptor> {
        let mut agents = scan_local(&self.extension_root);

        let roots: Vec<PathBuf> = host
            .workspace_folders()
            .iter()
            .map(|folder| folder.join("node_modules"))
            .collect();
        agents.extend(scan(&roots));

        agents
    }

    /// Pick an agent, ask for a request, and show the reply
    pub fn select_agent(&mut self, host: &mut dyn Host) -> Result<()> {
        let agents = self.load_installed_agents(host);

        let labels: Vec<String> = agents.iter().map(AgentDescriptor::label).collect();
        self.output
            .append_line(format!("[DEBUG] Found {} agents: {}", agents.len(), labels.join(", ")));

        if agents.is_empty() {
            host.show_warning(&format!("No agents found! Install {} via npm.", self.package_name));
            self.output.append_line("[DEBUG] No agents found!");
            return Ok(());
        }

        let items: Vec<PickItem> = agents.iter().map(PickItem::from).collect();
        let Some(index) = host.show_quick_pick(&items, "Select an agent to run (local + npm installed)")? else {
            return Ok(());
        };
        let Some(selected) = items.get(index) else {
            return Ok(());
        };

        let prompt = format!("Type your message to {}", selected.label);
        let input = host.show_input_box(&prompt, "Enter your request...")?;

        if let Some(input) = input.filter(|i| !i.is_empty()) {
            let response = self.responder.respond(&input);
            host.show_information(&format!("[{}] {}", selected.label, response));
        }

        Ok(())
    }

    /// Single prompt straight to the responder
    pub fn run_from_palette(&mut self, host: &mut dyn Host) -> Result<()> {
        let input = host.show_input_box("Type your request (e.g., 'Hii')", "Enter command for agent...")?;

        if let Some(input) = input.filter(|i| !i.is_empty()) {
            host.show_information(&self.responder.respond(&input));
        }

        Ok(())
    }

    /// Reveal the chat panel, creating it if none is open
    pub fn open_chat_panel(&mut self) -> &mut ChatPanel {
        if self.chat_panel.is_some() {
            self.output.append_line("Revealing existing chat panel");
        } else {
            self.panels_opened += 1;
            self.output
                .append_line(format!("Opening chat panel #{}", self.panels_opened));
        }

        let handle = self.runtime.handle();
        let responder = &self.responder;
        let id = self.panels_opened;
        let panel = self
            .chat_panel
            .get_or_insert_with(|| ChatPanel::open(handle, responder.clone(), id));
        panel.reveal();
        panel
    }

    /// Dispose the open chat panel, if any; the next open creates a fresh one
    pub fn dispose_chat_panel(&mut self) {
        if let Some(panel) = self.chat_panel.take() {
            self.output.append_line(format!("Disposed chat panel #{}", panel.id()));
        }
    }

    #[cfg(test)]
    pub fn chat_panel(&self) -> Option<&ChatPanel> {
        self.chat_panel.as_ref()
    }

    pub fn deactivate(&mut self) {
        self.dispose_chat_panel();
    }
}

/// Raw text of the bootstrap agent bundled under `extension_root`
fn load_instructions(extension_root: &Path, bootstrap_agent: &str, output: &mut OutputChannel) -> String {
    let bootstrap = scan_local(extension_root)
        .into_iter()
        .find(|agent| agent.name == bootstrap_agent);

    match bootstrap {
        Some(agent) => {
            log::info!("Loaded agent instructions from {}", agent.file_path.display());
            output.append_line(format!("Loaded agent instructions from {}", agent.file_path.display()));
            agent.raw_content
        }
        None => {
            let path = agents_dir(extension_root).join(format!("{}{}", bootstrap_agent, AGENT_SUFFIX));
            log::warn!("Agent instruction file not found at {}", path.display());
            output.append_line(format!("Agent instruction file not found at: {}", path.display()));
            String::new()
        }
    }
}
