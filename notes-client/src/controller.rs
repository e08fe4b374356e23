//! Drives a [`NotesState`] with real API calls.
//!
//! Each user action becomes a "started" event, one request, and a result
//! event. On failure the mirror is left as it was and the message is stored
//! in [`NotesState::error`].

use crate::api::NotesApi;
use crate::render::{render_card, CardView};
use crate::view_model::{reduce, CardMode, Event, NotesState};
use notes_types::NoteInput;
use std::time::Duration;

/// How long the "Created" status stays visible
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(1);

/// Wait [`STATUS_CLEAR_DELAY`], then hand `generation` back.
///
/// Run it apart from the controller (e.g. `tokio::spawn`) and feed the result
/// to [`NotesController::expire_status`]; other actions keep working meanwhile.
pub async fn status_timer(generation: u64) -> u64 {
    tokio::time::sleep(STATUS_CLEAR_DELAY).await;
    generation
}

pub struct NotesController<A: NotesApi> {
    api: A,
    state: NotesState,
}

impl<A: NotesApi> NotesController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: NotesState::default(),
        }
    }

    pub fn state(&self) -> &NotesState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }

    /// Every card, in render order
    pub fn render(&self) -> Vec<CardView> {
        self.state.cards.iter().map(render_card).collect()
    }

    /// Replace the mirror with the server's list
    pub async fn load(&mut self) {
        match self.api.list_notes().await {
            Ok(notes) => self.dispatch(Event::Loaded(notes)),
            Err(e) => {
                log::error!("Failed to load notes: {}", e);
                self.dispatch(Event::LoadFailed(e.to_string()));
            }
        }
    }

    // --- Composer ---

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.dispatch(Event::DraftTitleChanged(title.into()));
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.dispatch(Event::DraftContentChanged(content.into()));
    }

    pub fn clear_draft(&mut self) {
        self.dispatch(Event::DraftCleared);
    }

    /// Submit the composer.
    ///
    /// On success returns the generation of the "Created" status, to be passed
    /// through [`status_timer`] and then [`NotesController::expire_status`].
    /// Returns `None` if the create failed or one was already in flight.
    pub async fn create(&mut self) -> Option<u64> {
        if self.state.creating {
            return None;
        }
        self.dispatch(Event::CreateStarted);

        let input = NoteInput::full(self.state.draft.title.clone(), self.state.draft.content.clone());
        match self.api.create_note(&input).await {
            Ok(note) => {
                self.dispatch(Event::Created(note));
                self.state.status.as_ref().map(|s| s.generation)
            }
            Err(e) => {
                self.dispatch(Event::CreateFailed(e.to_string()));
                None
            }
        }
    }

    /// Clear the status if it is still the one from `generation`
    pub fn expire_status(&mut self, generation: u64) {
        self.dispatch(Event::StatusExpired(generation));
    }

    // --- Cards ---

    pub fn edit(&mut self, id: &str) {
        self.dispatch(Event::EditStarted(id.to_string()));
    }

    pub fn set_edit_title(&mut self, id: &str, title: impl Into<String>) {
        self.dispatch(Event::EditTitleChanged {
            id: id.to_string(),
            title: title.into(),
        });
    }

    pub fn set_edit_content(&mut self, id: &str, content: impl Into<String>) {
        self.dispatch(Event::EditContentChanged {
            id: id.to_string(),
            content: content.into(),
        });
    }

    pub fn cancel(&mut self, id: &str) {
        self.dispatch(Event::EditCancelled(id.to_string()));
    }

    /// Send the card's edit fields as an update. Returns false without a
    /// request if the card is unknown, busy, or not being edited.
    pub async fn save(&mut self, id: &str) -> bool {
        let input = match self.state.card(id) {
            Some(card) if !card.pending => match &card.mode {
                CardMode::Editing { title, content } => NoteInput::full(title.clone(), content.clone()),
                CardMode::Viewing => return false,
            },
            _ => return false,
        };
        self.dispatch(Event::SaveStarted(id.to_string()));

        match self.api.update_note(id, &input).await {
            Ok(note) => self.dispatch(Event::Saved(note)),
            Err(e) => self.dispatch(Event::SaveFailed {
                id: id.to_string(),
                message: e.to_string(),
            }),
        }
        true
    }

    /// Delete a card once the user has `confirmed`. Returns false without a
    /// request if unconfirmed, unknown, or busy.
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> bool {
        if !confirmed || !self.state.is_idle(id) {
            return false;
        }
        self.dispatch(Event::DeleteStarted(id.to_string()));

        match self.api.delete_note(id).await {
            Ok(()) => self.dispatch(Event::Deleted(id.to_string())),
            Err(e) => self.dispatch(Event::DeleteFailed {
                id: id.to_string(),
                message: e.to_string(),
            }),
        }
        true
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Event::ErrorDismissed);
    }
}
