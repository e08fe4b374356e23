//! Turns cards into display-ready views.

use crate::view_model::{Card, CardMode};
use chrono::{DateTime, Local, Utc};

/// Characters of content shown on a read-only card
pub const PREVIEW_LIMIT: usize = 280;
pub const ELLIPSIS: char = '…';
pub const UNTITLED: &str = "(Untitled)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
    Save,
    Cancel,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Edit => "Edit",
            CardAction::Delete => "Delete",
            CardAction::Save => "Save",
            CardAction::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: CardAction,
    /// False while a request for the card is in flight
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardView {
    Viewing {
        id: String,
        title: String,
        body: String,
        meta: String,
        actions: Vec<ActionButton>,
    },
    Editing {
        id: String,
        title_input: String,
        content_input: String,
        meta: String,
        actions: Vec<ActionButton>,
    },
}

impl CardView {
    pub fn id(&self) -> &str {
        match self {
            CardView::Viewing { id, .. } | CardView::Editing { id, .. } => id,
        }
    }

    pub fn actions(&self) -> &[ActionButton] {
        match self {
            CardView::Viewing { actions, .. } | CardView::Editing { actions, .. } => actions,
        }
    }
}

/// Content as shown on a read-only card: at most [`PREVIEW_LIMIT`] characters,
/// with an ellipsis when anything was cut
pub fn truncate_preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_LIMIT) {
        Some((cut, _)) => {
            let mut preview = content[..cut].to_string();
            preview.push(ELLIPSIS);
            preview
        }
        None => content.to_string(),
    }
}

pub fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        UNTITLED
    } else {
        title
    }
}

/// Timestamp in the viewer's local time zone
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn buttons(actions: [CardAction; 2], enabled: bool) -> Vec<ActionButton> {
    actions
        .into_iter()
        .map(|action| ActionButton { action, enabled })
        .collect()
}

pub fn render_card(card: &Card) -> CardView {
    let note = &card.note;
    let enabled = !card.pending;

    match &card.mode {
        CardMode::Viewing => CardView::Viewing {
            id: note.id.clone(),
            title: display_title(&note.title).to_string(),
            body: truncate_preview(&note.content),
            meta: format!("Updated: {}", format_timestamp(&note.updated_at)),
            actions: buttons([CardAction::Edit, CardAction::Delete], enabled),
        },
        CardMode::Editing { title, content } => CardView::Editing {
            id: note.id.clone(),
            title_input: title.clone(),
            content_input: content.clone(),
            meta: format!(
                "Editing • Last updated: {}",
                format_timestamp(&note.updated_at)
            ),
            actions: buttons([CardAction::Save, CardAction::Cancel], enabled),
        },
    }
}
