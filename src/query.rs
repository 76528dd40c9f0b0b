//! Filter and sort for the displayed note list.
use std::cmp::Reverse;

use log::trace;

use crate::Note;

/// Returns the notes to display for `filter`, in display order.
///
/// An empty filter keeps every note; otherwise a note is kept when its title
/// or body contains the filter, ignoring case. Pinned notes come first, and
/// within each group newer ids come first.
pub fn view<'a>(notes: &'a [Note], filter: &str) -> Vec<&'a Note> {
    let mut visible: Vec<&Note> = if filter.is_empty() {
        notes.iter().collect()
    } else {
        let needle = filter.to_lowercase();
        notes.iter().filter(|note| note.matches(&needle)).collect()
    };

    visible.sort_by_key(|note| (Reverse(note.pinned), Reverse(note.id)));
    trace!(
        "View for filter '{}': {} of {} notes",
        filter,
        visible.len(),
        notes.len()
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoteColor, NoteDraft};

    fn note(id: i64, title: &str, body: &str, pinned: bool) -> Note {
        Note::new(
            id,
            NoteDraft::new(title, body)
                .color(NoteColor::Gray)
                .pinned(pinned),
        )
    }

    fn ids(notes: &[&Note]) -> Vec<i64> {
        notes.iter().map(|note| note.id).collect()
    }

    fn sample() -> Vec<Note> {
        vec![
            note(3, "Meeting", "standup at 10", false),
            note(1, "Groceries", "milk, eggs", true),
            note(5, "Ideas", "", false),
            note(2, "", "Team MEETING notes", true),
            note(4, "Books", "Dune", false),
        ]
    }

    #[test]
    fn test_pinned_first_then_newest() {
        let notes = sample();
        assert_eq!(ids(&view(&notes, "")), vec![2, 1, 5, 4, 3]);
    }

    #[test]
    fn test_filter_is_case_insensitive_over_title_and_body() {
        let notes = sample();
        assert_eq!(ids(&view(&notes, "meet")), vec![2, 3]);
        assert_eq!(ids(&view(&notes, "MILK")), vec![1]);
        assert!(view(&notes, "xyz").is_empty());
    }

    #[test]
    fn test_filter_is_not_trimmed() {
        let notes = sample();
        assert_eq!(ids(&view(&notes, "at 10")), vec![3]);
        assert!(view(&notes, " Dune").is_empty());
    }

    #[test]
    fn test_ordering_and_filter_properties_hold() {
        let notes = sample();
        for filter in ["", "e", "M", "o", "notes", "zzz"] {
            let visible = view(&notes, filter);

            let first_unpinned = visible
                .iter()
                .position(|note| !note.pinned)
                .unwrap_or(visible.len());
            assert!(visible[first_unpinned..].iter().all(|note| !note.pinned));
            for group in [&visible[..first_unpinned], &visible[first_unpinned..]] {
                assert!(group.windows(2).all(|pair| pair[0].id >= pair[1].id));
            }

            let needle = filter.to_lowercase();
            assert!(visible.iter().all(|note| note.matches(&needle)));
            let expected = notes.iter().filter(|note| note.matches(&needle)).count();
            assert_eq!(visible.len(), expected);
        }
    }

    #[test]
    fn test_view_is_deterministic() {
        let notes = sample();
        assert_eq!(ids(&view(&notes, "e")), ids(&view(&notes, "e")));
    }
}
