//! Turns user intents into store mutations and re-renders.
//!
//! The controller owns the session: the note store, the theme preference,
//! the surface, and the transient UI state (edit form, which note is being
//! edited, current search text). Surfaces never touch the store directly;
//! they send an [`Intent`] through [`PresentationController::dispatch`].
use log::{debug, info, warn};

use crate::{
    view, EditorMode, KeyValueStore, Note, NoteColor, NoteDraft, NoteForm, NoteStore, NotesError,
    Presentation, Result, Theme, ThemePreference,
};

const EMPTY_NOTE_WARNING: &str = "Cannot save an empty note.";
const DELETE_QUESTION: &str = "Delete this note?";

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open the editor with a blank form
    OpenForCreate,
    /// Open the editor pre-filled from an existing note
    OpenForEdit(i64),
    /// Close the editor without saving
    Close,
    /// The user changed the form contents
    FillForm(NoteForm),
    Save,
    Delete(i64),
    TogglePin(i64),
    Search(String),
    ToggleTheme,
}

pub struct PresentationController<S, P> {
    store: NoteStore<S>,
    theme: ThemePreference<S>,
    surface: P,

    /// Color a fresh form starts with
    default_color: NoteColor,

    form: NoteForm,
    editing_note_id: Option<i64>,
    editor_open: bool,
    search_text: String,
}

impl<S, P> PresentationController<S, P>
where
    S: KeyValueStore + Clone,
    P: Presentation,
{
    /// Loads the notes from `adapter` and binds the controller to `surface`.
    /// Call [`start`](Self::start) to apply the theme and draw the list.
    pub fn new(adapter: S, surface: P) -> Self {
        PresentationController {
            store: NoteStore::load(adapter.clone()),
            theme: ThemePreference::new(adapter),
            surface,
            default_color: NoteColor::default(),
            form: NoteForm::default(),
            editing_note_id: None,
            editor_open: false,
            search_text: String::new(),
        }
    }

    pub fn with_default_color(mut self, color: NoteColor) -> Self {
        self.default_color = color;
        self.form.color = color;
        self
    }

    pub fn start(&mut self) {
        self.theme.apply_saved(&mut self.surface);
        self.render();
    }

    /// Routes an intent to the matching operation. Returns the affected
    /// note for intents that produce one.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<Note>> {
        debug!("Dispatching {:?}", intent);
        match intent {
            Intent::OpenForCreate => self.open_for_create(),
            Intent::OpenForEdit(id) => self.open_for_edit(id)?,
            Intent::Close => self.close(),
            Intent::FillForm(form) => self.fill_form(form),
            Intent::Save => return self.save().map(Some),
            Intent::Delete(id) => {
                self.delete(id)?;
            }
            Intent::TogglePin(id) => return self.pin_toggle(id).map(Some),
            Intent::Search(text) => self.search(text),
            Intent::ToggleTheme => {
                self.toggle_theme()?;
            }
        }
        Ok(None)
    }

    pub fn open_for_create(&mut self) {
        self.form = NoteForm::blank(self.default_color);
        self.editing_note_id = None;
        self.editor_open = true;
        self.surface.show_editor(EditorMode::New, &self.form);
    }

    /// Opens the editor on an existing note. An unknown id leaves everything
    /// as it was.
    pub fn open_for_edit(&mut self, id: i64) -> Result<()> {
        let Some(note) = self.store.get(id) else {
            warn!("Edit requested for missing note {}", id);
            let err = NotesError::NoteNotFound { id };
            self.surface.warn(&err.to_string());
            return Err(err);
        };

        self.form = NoteForm::from(note);
        self.editing_note_id = Some(id);
        self.editor_open = true;
        self.surface.show_editor(EditorMode::Edit, &self.form);
        Ok(())
    }

    pub fn close(&mut self) {
        self.editor_open = false;
        self.editing_note_id = None;
        self.surface.hide_editor();
    }

    pub fn fill_form(&mut self, form: NoteForm) {
        self.form = form;
    }

    /// Saves the form as a new note, or over the note being edited.
    ///
    /// A blank form is refused with a warning and the editor stays open.
    /// Any other outcome closes the editor and redraws the list.
    pub fn save(&mut self) -> Result<Note> {
        let draft = NoteDraft {
            title: self.form.title.clone(),
            body: self.form.body.clone(),
            color: self.form.color,
            pinned: self.form.pinned,
        };

        let result = match self.editing_note_id {
            Some(id) => self.store.update(id, draft),
            None => self.store.create(draft),
        };

        match result {
            Ok(note) => {
                info!("Saved note {}", note.id);
                self.close();
                self.render();
                Ok(note)
            }
            Err(NotesError::EmptyNote) => {
                self.surface.warn(EMPTY_NOTE_WARNING);
                Err(NotesError::EmptyNote)
            }
            Err(e) => {
                self.report(&e);
                self.close();
                self.render();
                Err(e)
            }
        }
    }

    /// Deletes after the user confirms. Returns whether the user confirmed.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let confirmed = self.surface.confirm(DELETE_QUESTION);
        let result = if confirmed {
            self.store.delete(id)
        } else {
            debug!("Deletion of note {} cancelled", id);
            Ok(())
        };

        if let Err(e) = &result {
            self.report(e);
        }
        self.render();
        result.map(|_| confirmed)
    }

    pub fn pin_toggle(&mut self, id: i64) -> Result<Note> {
        let result = self.store.toggle_pin(id);
        if let Err(e) = &result {
            self.report(e);
        }
        self.render();
        result
    }

    pub fn search(&mut self, text: String) {
        self.search_text = text;
        self.render();
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let result = self.theme.toggle(&mut self.surface);
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    /// Rebuilds the displayed list from scratch.
    pub fn render(&mut self) {
        let visible = view(self.store.notes(), &self.search_text);
        self.surface.render(&visible);
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut P {
        &mut self.surface
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn editing_note_id(&self) -> Option<i64> {
        self.editing_note_id
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme.current()
    }

    fn report(&mut self, err: &NotesError) {
        let message = match err {
            NotesError::Persistence { .. } => {
                format!("Changes are kept for this session but could not be saved: {err}")
            }
            _ => err.to_string(),
        };
        warn!("{}", message);
        self.surface.warn(&message);
    }
}
