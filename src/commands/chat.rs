//! Line-oriented chat panel on stdin/stdout

use colored::*;
use eyre::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::config::Config;
use crate::presenter::chat::{ChatLine, Speaker};

const EXIT_COMMAND: &str = "/exit";

pub fn run(config: &Config) -> Result<()> {
    let mut presenter = super::activate(config)?;
    let interactive = io::stdin().is_terminal();

    let panel = presenter.open_chat_panel();
    println!("{} {}", "🤖".bold(), panel.title().bold());
    if interactive {
        println!("{}", format!("Type 'Hii' or your message. {} or Ctrl-D to close.", EXIT_COMMAND).dimmed());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("{} ", format!("{}:", Speaker::User.prefix()).cyan().bold());
            io::stdout().flush().context("Failed to flush stdout")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        if line.trim() == EXIT_COMMAND {
            break;
        }

        if panel.exchange(&line).is_none() {
            continue;
        }
        if let Some(reply) = panel.transcript().last() {
            print_line(reply);
        }
    }

    log::info!("Chat closed after {} line(s)", panel.transcript().len());
    presenter.deactivate();
    Ok(())
}

fn print_line(line: &ChatLine) {
    let label = format!("{}:", line.speaker.prefix());
    let label = match line.speaker {
        Speaker::User => label.cyan().bold(),
        Speaker::Agent => label.green().bold(),
    };
    println!("{} {}", label, line.text);
}
