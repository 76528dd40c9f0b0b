//! The rendering surface the controller drives.
//!
//! Anything that can show a note list, an edit form, a warning and a yes/no
//! question can host the app. The terminal implementation lives in `cli`.
use std::fmt;

use crate::{Note, NoteColor, Theme};

/// Whether the edit form is creating a new note or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Edit,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMode::New => f.write_str("New Note"),
            EditorMode::Edit => f.write_str("Edit Note"),
        }
    }
}

/// Contents of the edit form, exactly as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteForm {
    pub title: String,
    pub body: String,
    pub color: NoteColor,
    pub pinned: bool,
}

impl NoteForm {
    /// An empty form with the given default color.
    pub fn blank(color: NoteColor) -> Self {
        NoteForm {
            color,
            ..Default::default()
        }
    }
}

impl From<&Note> for NoteForm {
    fn from(note: &Note) -> Self {
        NoteForm {
            title: note.title.clone(),
            body: note.body.clone(),
            color: note.color,
            pinned: note.pinned,
        }
    }
}

/// A surface that displays notes and talks to the user.
pub trait Presentation {
    /// Replaces the displayed list with `notes`, already in display order.
    fn render(&mut self, notes: &[&Note]);

    fn show_editor(&mut self, mode: EditorMode, form: &NoteForm);

    fn hide_editor(&mut self);

    /// Shows a message the user has to notice, such as a rejected save.
    fn warn(&mut self, message: &str);

    /// Asks a yes/no question and blocks until the user answers.
    fn confirm(&mut self, question: &str) -> bool;

    fn apply_theme(&mut self, theme: Theme);
}
