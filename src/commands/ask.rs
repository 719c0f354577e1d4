use eyre::{Context, Result};

use crate::config::Config;
use crate::presenter::terminal::TerminalHost;

pub fn run(config: &Config) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let mut presenter = super::activate(config)?;
    let mut host = TerminalHost::new(vec![cwd]);

    presenter.run_from_palette(&mut host)?;
    presenter.deactivate();
    Ok(())
}
