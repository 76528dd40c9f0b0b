//! CLI module for the noteboard application
//!
//! Each command is translated into controller intents, the same way a
//! graphical surface would send them.
use std::{
    fs::read_to_string,
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    Commands, Config, FileStore, Intent, NoteColor, NoteForm, NotesError, PresentationController,
    Result, TerminalSurface,
};

/// CLI Application handler - runs commands against a controller
pub struct App {
    controller: PresentationController<FileStore, TerminalSurface>,

    /// Application configuration
    config: Config,

    /// Where `config --init` writes
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config, config_path: Option<PathBuf>, surface: TerminalSurface) -> Self {
        info!("Using data directory {}", config.data_dir.display());
        let store = FileStore::new(&config.data_dir);
        let controller =
            PresentationController::new(store, surface).with_default_color(config.default_color);

        Self {
            controller,
            config,
            config_path,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        self.controller.start();

        match command {
            Commands::List { brief } => {
                self.controller.surface_mut().set_brief(brief);
                self.controller.surface().print_view()?;
            }

            Commands::Search { query, brief } => {
                self.controller.surface_mut().set_brief(brief);
                self.controller.dispatch(Intent::Search(query))?;
                self.controller.surface().print_view()?;
            }

            Commands::Create {
                title,
                body,
                color,
                pinned,
                edit,
            } => self.create_note(title, body, color, pinned, edit)?,

            Commands::Edit {
                id,
                title,
                body,
                color,
                pinned,
                edit,
            } => self.edit_note(id, title, body, color, pinned, edit)?,

            Commands::Delete { id, force } => self.handle_delete(id, force)?,

            Commands::Pin { id } => {
                let note = self
                    .controller
                    .dispatch(Intent::TogglePin(id))?
                    .ok_or(NotesError::NoteNotFound { id })?;
                println!(
                    "Note {} {}",
                    note.id,
                    if note.pinned { "pinned" } else { "unpinned" }
                );
            }

            Commands::Theme { toggle } => {
                if toggle {
                    self.controller.dispatch(Intent::ToggleTheme)?;
                }
                match self.controller.theme() {
                    Some(theme) => println!("Theme: {}", theme),
                    None => println!("Theme: default"),
                }
            }

            Commands::Config { show, init } => self.handle_config(show, init)?,
        }

        Ok(())
    }

    fn create_note(
        &mut self,
        title: Option<String>,
        body: Option<String>,
        color: Option<NoteColor>,
        pinned: bool,
        edit: bool,
    ) -> Result<()> {
        self.controller.dispatch(Intent::OpenForCreate)?;

        let mut form = self.controller.form().clone();
        form.title = title.unwrap_or_default();
        form.pinned = pinned;
        if let Some(color) = color {
            form.color = color;
        }
        form.body = body.unwrap_or_default();
        if edit || form.title.is_empty() && form.body.is_empty() {
            form.body = self.open_editor(&form.title, &form.body)?;
        }

        let id = self.save(form)?;
        println!("Note created with ID: {}", id);
        Ok(())
    }

    fn edit_note(
        &mut self,
        id: i64,
        title: Option<String>,
        body: Option<String>,
        color: Option<NoteColor>,
        pinned: Option<bool>,
        edit: bool,
    ) -> Result<()> {
        self.controller.dispatch(Intent::OpenForEdit(id))?;

        let mut form = self.controller.form().clone();
        if let Some(title) = title {
            form.title = title;
        }
        if let Some(body) = body {
            form.body = body;
        }
        if let Some(color) = color {
            form.color = color;
        }
        if let Some(pinned) = pinned {
            form.pinned = pinned;
        }
        if edit {
            form.body = self.open_editor(&form.title, &form.body)?;
        }

        let id = self.save(form)?;
        println!("Note {} updated successfully", id);
        Ok(())
    }

    /// Fills the open form and saves it, returning the saved note's id.
    fn save(&mut self, form: NoteForm) -> Result<i64> {
        self.controller.dispatch(Intent::FillForm(form))?;
        let note = self.controller.dispatch(Intent::Save)?;
        note.map(|note| note.id).ok_or(NotesError::EmptyNote)
    }

    fn handle_delete(&mut self, id: i64, force: bool) -> Result<()> {
        let Some(note) = self.controller.store().get(id).cloned() else {
            println!("No note with ID {}", id);
            return Ok(());
        };

        let skip_prompt = force || !self.config.confirm_delete;
        if !skip_prompt {
            println!("You are about to delete the following note:");
            println!("ID:     {}", note.id);
            println!("Title:  {}", note.title);
            println!("Saved:  {}", note.timestamp);
            if !note.body.is_empty() {
                let preview = note.body.lines().take(2).collect::<Vec<_>>().join("\n");
                println!("\n{}{}", preview, if note.body.lines().count() > 2 { "..." } else { "" });
            }
            println!();
        }
        self.controller.surface_mut().set_assume_yes(skip_prompt);

        if self.controller.delete(id)? {
            println!("Note '{}' ({}) has been deleted.", note.title, note.id);
        } else {
            println!("Deletion cancelled.");
        }
        Ok(())
    }

    fn handle_config(&self, show: bool, init: bool) -> Result<()> {
        if init {
            let path = self
                .config_path
                .clone()
                .or_else(Config::default_path)
                .ok_or_else(|| NotesError::ConfigError {
                    message: "No config location available; pass --config".to_string(),
                })?;
            self.config.save(&path)?;
            println!("Config written to {}", path.display());
        }

        if show || !init {
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }

    /// Opens the configured editor on `body` and returns the edited text.
    fn open_editor(&self, title: &str, body: &str) -> Result<String> {
        let mut temp_file = Builder::new().prefix("noteboard-").suffix(".txt").tempfile()?;
        temp_file.write_all(body.as_bytes())?;
        temp_file.flush()?;

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor for '{}'. Save and exit when done...", title);
        self.launch_editor(&editor_cmd, temp_file.path())?;

        let content = read_to_string(temp_file.path())?;
        Ok(content.trim_end().to_string())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let args = split(editor_cmd).map_err(|e| NotesError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        let Some((program, rest)) = args.split_first() else {
            return Err(NotesError::EditorError {
                message: "Empty editor command".to_string(),
            });
        };

        debug!("Launching editor: {} {:?}", program, rest);
        let status = Command::new(program)
            .args(rest)
            .arg(file_path)
            .status()
            .map_err(|e| NotesError::EditorError {
                message: format!("Failed to start editor '{}': {}", program, e),
            })?;

        if !status.success() {
            return Err(NotesError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }
}
