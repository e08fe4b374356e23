//! Client-side mirror of the note collection.
//!
//! [`NotesState`] is a plain value; [`reduce`] folds one [`Event`] into it and
//! returns the next state. Nothing here performs I/O.

use notes_types::Note;

/// Status shown after a successful create
pub const CREATED_STATUS: &str = "Created";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMode {
    Viewing,
    /// Holds whatever the user has typed so far
    Editing { title: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub note: Note,
    pub mode: CardMode,
    /// A save or delete for this card is in flight
    pub pending: bool,
}

impl Card {
    fn viewing(note: Note) -> Self {
        Self {
            note,
            mode: CardMode::Viewing,
            pending: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, CardMode::Editing { .. })
    }
}

/// The "new note" composer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    /// Lets a timer clear only the status it was started for
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesState {
    /// Render order; mirrors the server's most-recent-first order
    pub cards: Vec<Card>,
    pub draft: Draft,
    /// A create request is in flight
    pub creating: bool,
    pub status: Option<Status>,
    /// Last failure to report to the user
    pub error: Option<String>,
    next_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Loaded(Vec<Note>),
    LoadFailed(String),

    DraftTitleChanged(String),
    DraftContentChanged(String),
    DraftCleared,
    CreateStarted,
    Created(Note),
    CreateFailed(String),

    EditStarted(String),
    EditTitleChanged { id: String, title: String },
    EditContentChanged { id: String, content: String },
    EditCancelled(String),
    SaveStarted(String),
    Saved(Note),
    SaveFailed { id: String, message: String },

    DeleteStarted(String),
    Deleted(String),
    DeleteFailed { id: String, message: String },

    StatusExpired(u64),
    ErrorDismissed,
}

impl NotesState {
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.note.id == id)
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.note.id == id)
    }

    /// Notes in render order
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.cards.iter().map(|c| &c.note)
    }

    /// The card exists and has no request in flight
    pub fn is_idle(&self, id: &str) -> bool {
        self.card(id).is_some_and(|c| !c.pending)
    }

    fn idle_card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.note.id == id && !c.pending)
    }

    fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.note.id == id)
    }

    fn set_status(&mut self, message: &str) {
        self.next_generation += 1;
        self.status = Some(Status {
            message: message.to_string(),
            generation: self.next_generation,
        });
    }
}

/// Fold one event into the state.
///
/// Events that do not apply (unknown id, wrong mode, card busy) leave the
/// state unchanged.
pub fn reduce(mut state: NotesState, event: Event) -> NotesState {
    match event {
        Event::Loaded(notes) => {
            state.cards = notes.into_iter().map(Card::viewing).collect();
        }
        Event::LoadFailed(message) => {
            state.error = Some(message);
        }

        Event::DraftTitleChanged(title) => state.draft.title = title,
        Event::DraftContentChanged(content) => state.draft.content = content,
        Event::DraftCleared => {
            state.draft = Draft::default();
            state.status = None;
        }
        Event::CreateStarted => state.creating = true,
        Event::Created(note) => {
            state.creating = false;
            state.cards.insert(0, Card::viewing(note));
            state.draft = Draft::default();
            state.set_status(CREATED_STATUS);
        }
        Event::CreateFailed(message) => {
            state.creating = false;
            state.error = Some(message);
        }

        Event::EditStarted(id) => {
            if let Some(card) = state.idle_card_mut(&id) {
                if !card.is_editing() {
                    card.mode = CardMode::Editing {
                        title: card.note.title.clone(),
                        content: card.note.content.clone(),
                    };
                }
            }
        }
        Event::EditTitleChanged { id, title: new_title } => {
            if let Some(card) = state.idle_card_mut(&id) {
                if let CardMode::Editing { title, .. } = &mut card.mode {
                    *title = new_title;
                }
            }
        }
        Event::EditContentChanged { id, content: new_content } => {
            if let Some(card) = state.idle_card_mut(&id) {
                if let CardMode::Editing { content, .. } = &mut card.mode {
                    *content = new_content;
                }
            }
        }
        Event::EditCancelled(id) => {
            if let Some(card) = state.idle_card_mut(&id) {
                card.mode = CardMode::Viewing;
            }
        }
        Event::SaveStarted(id) => {
            if let Some(card) = state.idle_card_mut(&id) {
                if card.is_editing() {
                    card.pending = true;
                }
            }
        }
        Event::Saved(note) => {
            if let Some(idx) = state.index_of(&note.id) {
                state.cards[idx] = Card::viewing(note);
            }
        }
        Event::SaveFailed { id, message } => {
            if let Some(card) = state.card_mut(&id) {
                card.pending = false;
            }
            state.error = Some(message);
        }

        Event::DeleteStarted(id) => {
            if let Some(card) = state.idle_card_mut(&id) {
                card.pending = true;
            }
        }
        Event::Deleted(id) => {
            if let Some(idx) = state.index_of(&id) {
                state.cards.remove(idx);
            }
        }
        Event::DeleteFailed { id, message } => {
            if let Some(card) = state.card_mut(&id) {
                card.pending = false;
            }
            state.error = Some(message);
        }

        Event::StatusExpired(generation) => {
            if state.status.as_ref().is_some_and(|s| s.generation == generation) {
                state.status = None;
            }
        }
        Event::ErrorDismissed => state.error = None,
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str, title: &str, content: &str) -> Note {
        let now = Utc::now();
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn loaded() -> NotesState {
        reduce(
            NotesState::default(),
            Event::Loaded(vec![note("b", "B", "second"), note("a", "A", "first")]),
        )
    }

    fn ids(state: &NotesState) -> Vec<&str> {
        state.notes().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_load_renders_all_viewing() {
        let state = loaded();
        assert_eq!(ids(&state), vec!["b", "a"]);
        assert!(state.cards.iter().all(|c| c.mode == CardMode::Viewing && !c.pending));
    }

    #[test]
    fn test_edit_then_cancel_discards_changes() {
        let state = reduce(loaded(), Event::EditStarted("a".into()));
        assert_eq!(
            state.card("a").unwrap().mode,
            CardMode::Editing {
                title: "A".into(),
                content: "first".into()
            }
        );

        let state = reduce(
            state,
            Event::EditTitleChanged {
                id: "a".into(),
                title: "changed".into(),
            },
        );
        let state = reduce(state, Event::EditCancelled("a".into()));

        let card = state.card("a").unwrap();
        assert_eq!(card.mode, CardMode::Viewing);
        assert_eq!(card.note.title, "A");
    }

    #[test]
    fn test_save_success_replaces_in_place() {
        let mut state = reduce(loaded(), Event::EditStarted("a".into()));
        state = reduce(state, Event::SaveStarted("a".into()));
        assert!(state.card("a").unwrap().pending);

        let server_note = note("a", "A2", "first edited");
        state = reduce(state, Event::Saved(server_note.clone()));

        assert_eq!(ids(&state), vec!["b", "a"]);
        let card = state.card("a").unwrap();
        assert_eq!(card.note, server_note);
        assert_eq!(card.mode, CardMode::Viewing);
        assert!(!card.pending);
    }

    #[test]
    fn test_save_failure_keeps_typed_text() {
        let mut state = reduce(loaded(), Event::EditStarted("a".into()));
        state = reduce(
            state,
            Event::EditContentChanged {
                id: "a".into(),
                content: "draft text".into(),
            },
        );
        state = reduce(state, Event::SaveStarted("a".into()));
        state = reduce(
            state,
            Event::SaveFailed {
                id: "a".into(),
                message: "Note not found".into(),
            },
        );

        let card = state.card("a").unwrap();
        assert!(!card.pending);
        assert_eq!(
            card.mode,
            CardMode::Editing {
                title: "A".into(),
                content: "draft text".into()
            }
        );
        assert_eq!(card.note.content, "first");
        assert_eq!(state.error.as_deref(), Some("Note not found"));
    }

    #[test]
    fn test_pending_card_ignores_actions() {
        let mut state = reduce(loaded(), Event::EditStarted("a".into()));
        state = reduce(state, Event::SaveStarted("a".into()));
        let before = state.clone();

        for event in [
            Event::SaveStarted("a".into()),
            Event::DeleteStarted("a".into()),
            Event::EditCancelled("a".into()),
            Event::EditTitleChanged {
                id: "a".into(),
                title: "late".into(),
            },
        ] {
            state = reduce(state, event);
        }
        assert_eq!(state, before);
        assert!(!state.is_idle("a"));
        assert!(state.is_idle("b"));
    }

    #[test]
    fn test_save_requires_editing() {
        let state = reduce(loaded(), Event::SaveStarted("a".into()));
        assert!(!state.card("a").unwrap().pending);
    }

    #[test]
    fn test_delete_removes_at_index() {
        let mut state = reduce(loaded(), Event::DeleteStarted("b".into()));
        assert!(state.card("b").unwrap().pending);
        state = reduce(state, Event::Deleted("b".into()));
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_delete_failure_restores_card() {
        let mut state = reduce(loaded(), Event::EditStarted("b".into()));
        state = reduce(state, Event::DeleteStarted("b".into()));
        state = reduce(
            state,
            Event::DeleteFailed {
                id: "b".into(),
                message: "Failed to delete note".into(),
            },
        );

        let card = state.card("b").unwrap();
        assert!(!card.pending);
        assert!(card.is_editing());
        assert_eq!(ids(&state), vec!["b", "a"]);
        assert_eq!(state.error.as_deref(), Some("Failed to delete note"));
    }

    #[test]
    fn test_create_prepends_and_clears_draft() {
        let mut state = reduce(loaded(), Event::DraftTitleChanged("New".into()));
        state = reduce(state, Event::DraftContentChanged("body".into()));
        state = reduce(state, Event::CreateStarted);
        assert!(state.creating);

        state = reduce(state, Event::Created(note("c", "New", "body")));
        assert!(!state.creating);
        assert_eq!(ids(&state), vec!["c", "b", "a"]);
        assert_eq!(state.draft, Draft::default());
        assert_eq!(state.status.as_ref().unwrap().message, CREATED_STATUS);
    }

    #[test]
    fn test_create_failure_keeps_draft() {
        let mut state = reduce(loaded(), Event::DraftTitleChanged("  ".into()));
        state = reduce(state, Event::CreateStarted);
        state = reduce(state, Event::CreateFailed("Title or content required".into()));

        assert!(!state.creating);
        assert_eq!(state.draft.title, "  ");
        assert_eq!(ids(&state), vec!["b", "a"]);
        assert_eq!(state.error.as_deref(), Some("Title or content required"));
    }

    #[test]
    fn test_stale_status_timer_is_ignored() {
        let mut state = reduce(NotesState::default(), Event::Created(note("x", "X", "")));
        let first = state.status.as_ref().unwrap().generation;
        state = reduce(state, Event::Created(note("y", "Y", "")));
        let second = state.status.as_ref().unwrap().generation;
        assert_ne!(first, second);

        state = reduce(state, Event::StatusExpired(first));
        assert!(state.status.is_some());
        state = reduce(state, Event::StatusExpired(second));
        assert!(state.status.is_none());
    }

    #[test]
    fn test_draft_cleared_resets_status() {
        let mut state = reduce(NotesState::default(), Event::Created(note("x", "X", "")));
        state = reduce(state, Event::DraftTitleChanged("t".into()));
        state = reduce(state, Event::DraftCleared);
        assert_eq!(state.draft, Draft::default());
        assert!(state.status.is_none());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let state = loaded();
        let after = reduce(state.clone(), Event::EditStarted("zzz".into()));
        assert_eq!(after, state);
        let after = reduce(state.clone(), Event::Deleted("zzz".into()));
        assert_eq!(after, state);
    }
}
