//! Client side of the notes app.
//!
//! - [`api`]: typed HTTP client for `/api/notes`
//! - [`view_model`]: the local note mirror as an explicit state + reducer
//! - [`render`]: read-only and editable card views
//! - [`controller`]: runs user actions against the API and folds the results in

pub mod api;
pub mod controller;
pub mod render;
pub mod view_model;

pub use api::{ApiError, NotesApi, NotesApiClient};
pub use controller::{status_timer, NotesController, STATUS_CLEAR_DELAY};
pub use render::{render_card, CardAction, CardView};
pub use view_model::{reduce, Card, CardMode, Event, NotesState};
