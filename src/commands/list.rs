//! List agents found in `./node_modules`

use colored::*;
use eyre::{Context, Result};

use crate::agent::AgentDescriptor;
use crate::agent::scanner::scan;
use crate::config::Config;

const RULE_WIDTH: usize = 60;

pub fn run(config: &Config) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let node_modules = cwd.join("node_modules");

    let agents = scan(&[node_modules]);
    log::info!("Listing {} agent(s) from {}", agents.len(), cwd.display());

    print!("{}", render(&agents, &config.package.name));
    Ok(())
}

/// Format the agent list as numbered blocks
pub fn render(agents: &[AgentDescriptor], package_name: &str) -> String {
    let mut lines = Vec::new();

    if agents.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", "⚠️  No agents found!".yellow()));
        lines.push(format!("{}", format!("Install agents using: npm install {}", package_name).cyan()));
        return lines.join("\n") + "\n";
    }

    let rule = "=".repeat(RULE_WIDTH);

    lines.push(String::new());
    lines.push(format!("{}", rule.cyan()));
    lines.push(format!("{}", "🤖 INSTALLED AGENTS".bold()));
    lines.push(format!("{}", rule.cyan()));

    for (index, agent) in agents.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}", format!("{}. {}", index + 1, agent.name).green()));
        lines.push(format!("   {}", format!("📦 Package: {}", agent.source_module).magenta()));
        lines.push(format!("   {}", format!("📁 Path: {}", agent.file_path.display()).magenta()));
        if let Some(ref description) = agent.description {
            lines.push(format!("   {}", format!("📝 {}", description).cyan()));
        }
    }

    lines.push(String::new());
    lines.push(format!("{}", rule.cyan()));
    lines.push(format!("{}", format!("Total: {} agent(s) found", agents.len()).bold()));
    lines.push(String::new());

    lines.join("\n") + "\n"
}
