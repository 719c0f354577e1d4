use eyre::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::presenter::terminal::TerminalHost;

pub fn run(folders: Vec<PathBuf>, config: &Config) -> Result<()> {
    let folders = if folders.is_empty() {
        vec![std::env::current_dir().context("Failed to determine current directory")?]
    } else {
        folders
    };

    let mut presenter = super::activate(config)?;
    let mut host = TerminalHost::new(folders);

    presenter.select_agent(&mut host)?;
    presenter.deactivate();
    Ok(())
}
