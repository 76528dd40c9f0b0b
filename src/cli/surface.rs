//! Terminal implementation of the rendering surface.
use std::io::{stdin, stdout, Write};

use console::{style, Color, Style};
use log::debug;

use crate::{EditorMode, Note, NoteColor, NoteForm, Presentation, Result, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Prints to stdout/stderr and prompts on stdin.
///
/// `render` only rebuilds the buffered view; the caller decides when the
/// view is worth printing with [`print_view`](Self::print_view).
pub struct TerminalSurface {
    format: OutputFormat,
    brief: bool,
    assume_yes: bool,
    theme: Option<Theme>,
    view: Vec<Note>,
}

impl TerminalSurface {
    pub fn new(format: OutputFormat) -> Self {
        TerminalSurface {
            format,
            brief: false,
            assume_yes: false,
            theme: None,
            view: Vec::new(),
        }
    }

    /// Only show IDs and titles.
    pub fn set_brief(&mut self, brief: bool) {
        self.brief = brief;
    }

    /// Answer every confirmation with yes.
    pub fn set_assume_yes(&mut self, assume_yes: bool) {
        self.assume_yes = assume_yes;
    }

    pub fn view(&self) -> &[Note] {
        &self.view
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn print_view(&self) -> Result<()> {
        println!("{}", self.format_view()?);
        Ok(())
    }

    pub fn format_view(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&self.view)?),
            OutputFormat::Text => Ok(self.format_text()),
        }
    }

    fn format_text(&self) -> String {
        if self.view.is_empty() {
            return "No notes found.".to_string();
        }

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);
        let separator = "-".repeat(term_width.min(50));

        let mut lines = Vec::new();
        for (i, note) in self.view.iter().enumerate() {
            if self.brief {
                lines.push(format!(
                    "{}{} {}",
                    if note.pinned { "📌 " } else { "" },
                    style(note.id).dim(),
                    self.title_style().apply_to(&note.title)
                ));
                continue;
            }

            if i > 0 {
                lines.push(separator.clone());
            }
            let pin = if note.pinned { "📌 " } else { "" };
            lines.push(format!(
                "{}ID: {} | {} | {}",
                pin,
                note.id,
                color_style(note.color).apply_to(note.color),
                note.timestamp
            ));
            if !note.title.is_empty() {
                lines.push(self.title_style().apply_to(&note.title).to_string());
            }
            if !note.body.is_empty() {
                lines.push(String::new());
                lines.push(self.body_style().apply_to(&note.body).to_string());
            }
        }

        lines.push(format!(
            "\n{} note{}",
            self.view.len(),
            if self.view.len() == 1 { "" } else { "s" }
        ));
        lines.join("\n")
    }

    fn title_style(&self) -> Style {
        match self.theme {
            Some(Theme::Dark) => Style::new().bold().white(),
            Some(Theme::Light) => Style::new().bold().black(),
            None => Style::new().bold(),
        }
    }

    fn body_style(&self) -> Style {
        match self.theme {
            Some(Theme::Dark) => Style::new().white(),
            Some(Theme::Light) => Style::new().black(),
            None => Style::new(),
        }
    }
}

fn color_style(color: NoteColor) -> Style {
    let fg = match color {
        NoteColor::Blue => Color::Blue,
        NoteColor::Green => Color::Green,
        NoteColor::Yellow => Color::Yellow,
        NoteColor::Pink => Color::Magenta,
        NoteColor::Purple => Color::Color256(93),
        NoteColor::Gray => Color::Color256(245),
    };
    Style::new().fg(fg)
}

impl Presentation for TerminalSurface {
    fn render(&mut self, notes: &[&Note]) {
        self.view = notes.iter().map(|note| (*note).clone()).collect();
    }

    fn show_editor(&mut self, mode: EditorMode, form: &NoteForm) {
        debug!("{} form opened: {:?}", mode, form);
    }

    fn hide_editor(&mut self) {
        debug!("Note form closed");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), message);
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N]: ", question);
        if stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            return false;
        }
        let input = input.trim().to_lowercase();
        input == "y" || input == "yes"
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}
