//! Terminal implementation of [`Host`]

use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input};
use eyre::{Context, Result};
use std::path::PathBuf;

use super::{Host, PickItem};

pub struct TerminalHost {
    folders: Vec<PathBuf>,
    theme: ColorfulTheme,
}

impl TerminalHost {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self {
            folders,
            theme: ColorfulTheme::default(),
        }
    }
}

impl Host for TerminalHost {
    fn workspace_folders(&self) -> Vec<PathBuf> {
        self.folders.clone()
    }

    fn show_quick_pick(&mut self, items: &[PickItem], placeholder: &str) -> Result<Option<usize>> {
        let rows: Vec<String> = items
            .iter()
            .map(|item| format!("{}  {}  ({})", item.label, item.description, item.detail))
            .collect();

        FuzzySelect::with_theme(&self.theme)
            .with_prompt(placeholder)
            .items(&rows)
            .default(0)
            .interact_opt()
            .context("Failed to read agent selection")
    }

    fn show_input_box(&mut self, prompt: &str, placeholder: &str) -> Result<Option<String>> {
        let input: String = Input::with_theme(&self.theme)
            .with_prompt(format!("{} ({})", prompt, placeholder))
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        Ok(submitted(input))
    }

    fn show_information(&mut self, message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    fn show_warning(&mut self, message: &str) {
        println!("{} {}", "⚠".yellow(), message.yellow());
    }
}

/// An empty submission counts as dismissing the prompt; whitespace is input
fn submitted(input: String) -> Option<String> {
    if input.is_empty() { None } else { Some(input) }
}
