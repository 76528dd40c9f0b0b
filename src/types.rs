//! Shared aliases and the CLI command set.
use clap::Subcommand;

use crate::{NoteColor, NotesError};

/// A specialized Result type for noteboard operations.
pub type Result<T> = std::result::Result<T, NotesError>;

fn parse_color(value: &str) -> std::result::Result<NoteColor, String> {
    value.parse().map_err(|e: NotesError| e.to_string())
}

/// Available subcommands for the noteboard application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, pinned first and newest first
    List {
        /// Only show note IDs and titles
        #[clap(short, long)]
        brief: bool,
    },

    /// Show notes whose title or body contains the query (case-insensitive)
    Search {
        /// Search query text
        query: String,

        /// Only show note IDs and titles
        #[clap(short, long)]
        brief: bool,
    },

    /// Create a new note
    Create {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Body of the note
        #[clap(short, long)]
        body: Option<String>,

        /// Color label (blue, green, yellow, pink, purple, gray)
        #[clap(long, value_parser = parse_color)]
        color: Option<NoteColor>,

        /// Pin the note
        #[clap(short, long)]
        pinned: bool,

        /// Write the body in an editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// Edit an existing note; fields not given keep their current value
    Edit {
        /// ID of the note to edit
        id: i64,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New body for the note
        #[clap(short, long)]
        body: Option<String>,

        /// New color label
        #[clap(long, value_parser = parse_color)]
        color: Option<NoteColor>,

        /// Set or clear the pin
        #[clap(long)]
        pinned: Option<bool>,

        /// Open the current body in an editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: i64,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Pin or unpin a note
    Pin {
        /// ID of the note to pin or unpin
        id: i64,
    },

    /// Show or switch the light/dark theme
    Theme {
        /// Switch between light and dark
        #[clap(short, long)]
        toggle: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Write the current configuration to the config file
        #[clap(long)]
        init: bool,
    },
}
