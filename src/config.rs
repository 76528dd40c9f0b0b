use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use which::which;

use crate::{NoteColor, NotesError, Result};

const CONFIG_FILE: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the stored notes and theme
    pub data_dir: PathBuf,

    /// Color a new note starts with
    pub default_color: NoteColor,

    /// Editor command used by `--edit`
    pub editor_command: Option<String>,

    /// Whether deleting asks for confirmation
    pub confirm_delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".noteboard"));

        Config {
            data_dir,
            default_color: NoteColor::default(),
            editor_command: None,
            confirm_delete: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "noteboard")
}

impl Config {
    /// Platform location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Loads the config from `path`, or from [`default_path`](Self::default_path)
    /// when none is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Config::default()),
            },
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(NotesError::Io(e)),
        };

        let config = serde_json::from_str(&raw).map_err(|e| NotesError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes the config as pretty JSON, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| NotesError::Io(e.error))?;

        info!("Config written to {}", path.display());
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
