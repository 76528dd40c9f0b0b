use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "noteboard",
    version,
    about = "Pinnable, searchable short notes kept on this machine"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Directory holding the stored notes (overrides the config)
    #[clap(long, value_parser)]
    pub data_dir: Option<PathBuf>,

    /// Print notes as JSON
    #[clap(long, global = true)]
    pub json: bool,

    /// Verbose output mode
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Subcommands for the noteboard application
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::NoteColor;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_create_and_edit() {
        let cli = Cli::parse_from([
            "noteboard", "create", "-T", "Groceries", "-b", "milk", "--color", "pink", "--pinned",
        ]);
        match cli.command {
            Commands::Create {
                title,
                body,
                color,
                pinned,
                edit,
            } => {
                assert_eq!(title.as_deref(), Some("Groceries"));
                assert_eq!(body.as_deref(), Some("milk"));
                assert_eq!(color, Some(NoteColor::Pink));
                assert!(pinned);
                assert!(!edit);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::parse_from(["noteboard", "edit", "42", "--pinned", "false", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Edit { id, pinned, .. } => {
                assert_eq!(id, 42);
                assert_eq!(pinned, Some(false));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["noteboard", "create", "-T", "x", "--color", "teal"]).is_err());
    }
}
