//! The in-memory note collection and its persistence contract.
//!
//! [`NoteStore`] is the single owner of the notes for a session. Every
//! mutation writes the whole collection back to the key-value store as one
//! snapshot before returning.
use std::collections::HashSet;

use log::{debug, error, info, warn};

use crate::{
    now_millis, KeyValueStore, Note, NoteDraft, NotesError, Result, NOTES_BACKUP_KEY, NOTES_KEY,
};

/// Owns the note collection and keeps it in sync with a [`KeyValueStore`].
pub struct NoteStore<S> {
    /// Where snapshots are written
    adapter: S,

    /// The collection; insertion order carries no meaning
    notes: Vec<Note>,

    /// Set when the last snapshot write failed
    dirty: bool,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Loads the collection from `adapter`.
    ///
    /// Never fails: an absent, unreadable or malformed blob yields an empty
    /// collection. A malformed blob is copied to [`NOTES_BACKUP_KEY`] first so
    /// the next snapshot does not destroy the only copy.
    pub fn load(adapter: S) -> Self {
        let notes = match adapter.get(NOTES_KEY) {
            Ok(None) => {
                debug!("No stored notes found, starting with an empty collection");
                Vec::new()
            }
            Ok(Some(raw)) => match parse_collection(&raw) {
                Ok(notes) => {
                    info!("Loaded {} notes", notes.len());
                    notes
                }
                Err(e) => {
                    error!("{}; starting with an empty collection", e);
                    if let Err(e) = adapter.set(NOTES_BACKUP_KEY, &raw) {
                        warn!("Failed to keep a copy of the malformed notes: {}", e);
                    } else {
                        info!("Kept a copy of the malformed notes under '{}'", NOTES_BACKUP_KEY);
                    }
                    Vec::new()
                }
            },
            Err(e) => {
                error!("Failed to read stored notes: {}", e);
                Vec::new()
            }
        };

        NoteStore {
            adapter,
            notes,
            dirty: false,
        }
    }

    /// All notes, in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Whether the in-memory collection has changes the store has not accepted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Creates a note with a fresh id and the current timestamp.
    pub fn create(&mut self, draft: NoteDraft) -> Result<Note> {
        let draft = draft.validated()?;
        let note = Note::new(self.next_id()?, draft);
        info!("Creating note: {}", note.id);

        self.notes.push(note.clone());
        self.persist()?;
        Ok(note)
    }

    /// Replaces the editable fields of an existing note and refreshes its
    /// timestamp.
    pub fn update(&mut self, id: i64, draft: NoteDraft) -> Result<Note> {
        let draft = draft.validated()?;
        let note = self.find_mut(id)?;
        note.apply(draft);
        let note = note.clone();
        info!("Updated note: {}", id);

        self.persist()?;
        Ok(note)
    }

    /// Removes the note with `id`. Deleting an unknown id is not an error.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() < before {
            info!("Deleted note: {}", id);
        } else {
            debug!("Delete of unknown note {} ignored", id);
        }

        self.persist()
    }

    /// Flips the pin flag. The timestamp is left alone.
    pub fn toggle_pin(&mut self, id: i64) -> Result<Note> {
        let note = self.find_mut(id)?;
        note.pinned = !note.pinned;
        let note = note.clone();
        info!(
            "Note {} is now {}",
            id,
            if note.pinned { "pinned" } else { "unpinned" }
        );

        self.persist()?;
        Ok(note)
    }

    /// Retries the snapshot write if an earlier one failed.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.persist()
        } else {
            Ok(())
        }
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| {
                warn!("Note {} is not in the collection", id);
                NotesError::NoteNotFound { id }
            })
    }

    /// Millisecond clock, bumped past the largest existing id on collision.
    /// When the top of the id range is taken, the highest free id below it
    /// is used instead.
    fn next_id(&self) -> Result<i64> {
        let now = now_millis();
        let max = match self.notes.iter().map(|note| note.id).max() {
            Some(max) if max >= now => max,
            _ => return Ok(now),
        };
        if let Some(id) = max.checked_add(1) {
            return Ok(id);
        }

        let mut ids: Vec<i64> = self.notes.iter().map(|note| note.id).collect();
        ids.sort_unstable();
        let below_gap = ids.windows(2).rev().find_map(|pair| {
            let candidate = pair[1] - 1;
            (candidate > pair[0]).then_some(candidate)
        });
        below_gap
            .or_else(|| ids.first().and_then(|min| min.checked_sub(1)))
            .ok_or(NotesError::IdsExhausted)
    }

    /// Writes the whole collection as one blob. On failure the in-memory
    /// collection is kept as is and marked dirty.
    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.notes)?;
        match self.adapter.set(NOTES_KEY, &json) {
            Ok(()) => {
                self.dirty = false;
                debug!("Persisted {} notes", self.notes.len());
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                warn!("Notes kept in memory but not saved: {}", e);
                Err(e)
            }
        }
    }
}

/// Parses and validates a stored `notes` blob.
///
/// Beyond the JSON shape, ids must be unique and no note may be blank.
pub fn parse_collection(raw: &str) -> Result<Vec<Note>> {
    let notes: Vec<Note> =
        serde_json::from_str(raw).map_err(|e| NotesError::malformed(NOTES_KEY, e))?;

    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.id) {
            return Err(NotesError::malformed(
                NOTES_KEY,
                format!("duplicate note id {}", note.id),
            ));
        }
        if note.is_blank() {
            return Err(NotesError::malformed(
                NOTES_KEY,
                format!("note {} has neither title nor body", note.id),
            ));
        }
    }

    Ok(notes)
}
