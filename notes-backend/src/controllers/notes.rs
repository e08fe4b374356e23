//! Notes REST API — list, read, create, update and delete.
//!
//! Handlers translate service results into status codes; every error body is
//! `{ "error": <message> }`. Storage failures are logged and reported with a
//! generic message.

use actix_web::{web, HttpResponse, Responder};
use notes_types::{ErrorBody, NoteInput};

use crate::notes::{service, NotesError};
use crate::AppState;

const NOT_FOUND: &str = "Note not found";

/// Map a failed operation to its HTTP response. `internal` is the generic
/// message shown when storage failed.
fn error_response(err: NotesError, internal: &str) -> HttpResponse {
    match err {
        NotesError::InvalidInput(msg) => HttpResponse::BadRequest().json(ErrorBody::new(msg)),
        NotesError::NotFound(_) => HttpResponse::NotFound().json(ErrorBody::new(NOT_FOUND)),
        NotesError::Store(e) => {
            log::error!("[NOTES] {}: {}", internal, e);
            HttpResponse::InternalServerError().json(ErrorBody::new(internal))
        }
    }
}

/// Decode a create/update body. A missing body means every field is absent;
/// anything else must be a JSON object. `Content-Type` is not checked.
fn parse_input(body: &[u8]) -> Result<NoteInput, HttpResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NoteInput::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        HttpResponse::BadRequest().json(ErrorBody::new(format!("Invalid JSON body: {}", e)))
    })
}

/// List all notes, most recently created first
async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    match service::list(&data.store) {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => error_response(e, "Failed to read notes"),
    }
}

async fn get_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match service::get(&data.store, &id) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response(e, "Failed to read note"),
    }
}

async fn create_note(data: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let input = match parse_input(&body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    match service::create(&data.store, input) {
        Ok(note) => {
            log::debug!("[NOTES] Created note {}", note.id);
            HttpResponse::Created().json(note)
        }
        Err(e) => error_response(e, "Failed to create note"),
    }
}

async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    let id = path.into_inner();
    let input = match parse_input(&body) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    match service::update(&data.store, &id, input) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response(e, "Failed to update note"),
    }
}

async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match service::delete(&data.store, &id) {
        Ok(()) => {
            log::debug!("[NOTES] Deleted note {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e, "Failed to delete note"),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::get().to(get_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
