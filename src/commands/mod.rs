use eyre::Result;

use crate::config::Config;
use crate::presenter::ExtensionPresenter;

pub mod ask;
pub mod chat;
pub mod completions;
pub mod init;
pub mod list;
pub mod select;

/// Activate the agent front end the way the editor host would
fn activate(config: &Config) -> Result<ExtensionPresenter> {
    ExtensionPresenter::activate(
        config.extension_root(),
        &config.extension.bootstrap_agent,
        &config.package.name,
    )
}
