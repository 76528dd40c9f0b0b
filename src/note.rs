//! Core data structures for the noteboard application.
//!
//! A [`Note`] is the unit the user creates and edits. Its fields mirror the
//! persisted JSON shape one to one.
use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::NotesError;

/// Display format for [`Note::timestamp`], e.g. `3/7/2026, 9:05:12 PM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Color label attached to a note. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Blue,
    Green,
    Yellow,
    Pink,
    Purple,
    Gray,
}

impl NoteColor {
    pub const ALL: [NoteColor; 6] = [
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Yellow,
        NoteColor::Pink,
        NoteColor::Purple,
        NoteColor::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteColor::Blue => "blue",
            NoteColor::Green => "green",
            NoteColor::Yellow => "yellow",
            NoteColor::Pink => "pink",
            NoteColor::Purple => "purple",
            NoteColor::Gray => "gray",
        }
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteColor {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        NoteColor::ALL
            .into_iter()
            .find(|color| color.as_str() == wanted)
            .ok_or_else(|| NotesError::InvalidColor {
                value: s.to_string(),
            })
    }
}

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Note {
    /// Unique identifier, derived from the creation time in milliseconds
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note body text
    pub body: String,
    /// Color label
    pub color: NoteColor,
    /// Pinned notes sort before unpinned ones
    pub pinned: bool,
    /// Human-readable time of the last save
    pub timestamp: String,
}

impl Note {
    /// Creates a note from a draft, stamped with the current local time.
    pub fn new(id: i64, draft: NoteDraft) -> Self {
        Note {
            id,
            title: draft.title,
            body: draft.body,
            color: draft.color,
            pinned: draft.pinned,
            timestamp: format_timestamp(&Local::now()),
        }
    }

    /// Replaces the user-editable fields and refreshes the timestamp.
    pub fn apply(&mut self, draft: NoteDraft) {
        self.title = draft.title;
        self.body = draft.body;
        self.color = draft.color;
        self.pinned = draft.pinned;
        self.timestamp = format_timestamp(&Local::now());
    }

    /// True when both title and body are blank.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }

    /// Whether `needle` (already lowercased) occurs in the title or body.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.body.to_lowercase().contains(needle)
    }
}

/// The user-editable part of a note, as submitted from the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
    pub color: NoteColor,
    pub pinned: bool,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        NoteDraft {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: NoteColor) -> Self {
        self.color = color;
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Trims title and body, rejecting the draft when both end up empty.
    pub fn validated(self) -> Result<Self, NotesError> {
        let title = self.title.trim().to_string();
        let body = self.body.trim().to_string();
        if title.is_empty() && body.is_empty() {
            return Err(NotesError::EmptyNote);
        }
        Ok(NoteDraft {
            title,
            body,
            ..self
        })
    }
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Milliseconds since the epoch, the raw material for note ids.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("Purple".parse::<NoteColor>().unwrap(), NoteColor::Purple);
        assert_eq!(" gray ".parse::<NoteColor>().unwrap(), NoteColor::Gray);
        assert!(matches!(
            "orange".parse::<NoteColor>(),
            Err(NotesError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_note_serializes_with_lowercase_color() {
        let note = Note {
            id: 1700000000000,
            title: "Groceries".to_string(),
            body: "milk, eggs".to_string(),
            color: NoteColor::Yellow,
            pinned: true,
            timestamp: "1/2/2026, 3:04:05 PM".to_string(),
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["color"], "yellow");
        assert_eq!(json["id"], 1700000000000_i64);
        assert_eq!(json["pinned"], true);
    }

    #[test]
    fn test_draft_validation_trims() {
        let draft = NoteDraft::new("  Title  ", "\n").validated().unwrap();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.body, "");

        assert!(matches!(
            NoteDraft::new("  ", "\t").validated(),
            Err(NotesError::EmptyNote)
        ));
    }

    #[test]
    fn test_timestamp_format() {
        let at = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(21, 5, 12)
            .unwrap()
            .and_utc();
        assert_eq!(format_timestamp(&at), "3/7/2026, 9:05:12 PM");
    }

    #[test]
    fn test_apply_replaces_fields() {
        let mut note = Note::new(7, NoteDraft::new("a", "b"));
        note.apply(NoteDraft::new("c", "d").color(NoteColor::Pink).pinned(true));
        assert_eq!(note.id, 7);
        assert_eq!(note.title, "c");
        assert_eq!(note.body, "d");
        assert_eq!(note.color, NoteColor::Pink);
        assert!(note.pinned);
    }

    #[test]
    fn test_matches_is_case_insensitive_on_note_side() {
        let note = Note::new(1, NoteDraft::new("Team MEETING", ""));
        assert!(note.matches("meet"));
        assert!(!note.matches("xyz"));
    }
}
