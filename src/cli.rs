use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agentpublish",
    about = "Agent Publisher CLI - list agents bundled in installed packages",
    version = env!("GIT_DESCRIBE"),
    disable_version_flag = true,
    after_help = "Logs are written to: ~/.local/share/agentpublish/logs/agentpublish.log"
)]
pub struct Cli {
    /// Show version
    #[allow(dead_code)]
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Parse error that sent us to the default command
    #[arg(skip)]
    fallback_reason: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all installed agents (default)
    List,

    /// Copy .github and Generator_Patterns to project root
    Init,

    /// Pick an agent and send it a request
    Select {
        /// Workspace folders to search (defaults to the current directory)
        folders: Vec<PathBuf>,
    },

    /// Open an interactive chat with the agent
    Chat,

    /// Send a single request to the agent
    Ask,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// Parse arguments; anything unrecognised falls back to `list`.
    ///
    /// Help and version requests are printed and reported as `None`.
    pub fn parse_lenient() -> Option<Self> {
        Self::parse_lenient_from(std::env::args_os())
    }

    pub fn parse_lenient_from<I, T>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Some(cli),
            Err(e) => match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    None
                }
                _ => Some(Self {
                    version: None,
                    command: None,
                    fallback_reason: Some(e.to_string().lines().next().unwrap_or_default().to_string()),
                }),
            },
        }
    }

    /// Why parsing fell back to `list`, if it did
    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Cli> {
        Cli::parse_lenient_from(std::iter::once("agentpublish").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_args_defaults_to_list() {
        let cli = parse(&[]).unwrap();
        assert!(cli.fallback_reason().is_none());
        assert!(matches!(cli.into_command(), Commands::List));
    }

    #[test]
    fn test_known_commands() {
        assert!(matches!(parse(&["list"]).unwrap().into_command(), Commands::List));
        assert!(matches!(parse(&["init"]).unwrap().into_command(), Commands::Init));
        assert!(matches!(parse(&["chat"]).unwrap().into_command(), Commands::Chat));
        assert!(matches!(parse(&["ask"]).unwrap().into_command(), Commands::Ask));
    }

    #[test]
    fn test_select_folders() {
        let cli = parse(&["select", "a", "b"]).unwrap();
        match cli.into_command() {
            Commands::Select { folders } => assert_eq!(folders, vec![PathBuf::from("a"), PathBuf::from("b")]),
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_unknown_command_falls_back_to_list() {
        let cli = parse(&["frobnicate"]).unwrap();
        assert!(cli.fallback_reason().unwrap().contains("frobnicate"));
        assert!(matches!(cli.into_command(), Commands::List));

        let cli = parse(&["--nope"]).unwrap();
        assert!(matches!(cli.into_command(), Commands::List));
    }

    #[test]
    fn test_help_and_version_short_circuit() {
        assert!(parse(&["--help"]).is_none());
        assert!(parse(&["-h"]).is_none());
        assert!(parse(&["--version"]).is_none());
        assert!(parse(&["-v"]).is_none());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
