//! Axum route handlers for the notes HTTP API.

use crate::error::NoteError;
use crate::store::NoteStore;
use crate::upload_form;
use axum::Router;
use axum::extract::{Form, FromRequest, Multipart, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use notes_store_types::*;
use std::sync::Arc;

pub struct AppState {
    pub store: NoteStore,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = tower_http::cors::CorsLayer::permissive();

    Router::new()
        .route("/", get(hello))
        .route("/UploadForm.html", get(upload_form::upload_form))
        .route("/notes", get(list_notes))
        .route(
            "/notes/:note_name",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/write", post(write_note))
        .with_state(state)
        .layer(cors)
}

// GET /
async fn hello() -> &'static str {
    "Hello"
}

// GET /notes
async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, NoteError> {
    state.store.list().await.map(Json)
}

// GET /notes/:note_name
async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(note_name): Path<String>,
) -> Result<String, NoteError> {
    state.store.get(&note_name).await
}

// PUT /notes/:note_name
async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(note_name): Path<String>,
    body: String,
) -> Result<&'static str, NoteError> {
    state.store.update(&note_name, &body).await?;
    Ok("Note updated")
}

// DELETE /notes/:note_name
async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(note_name): Path<String>,
) -> Result<&'static str, NoteError> {
    state.store.delete(&note_name).await?;
    Ok("Note deleted")
}

// POST /write
async fn write_note(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, &'static str), Response> {
    let form = read_write_form(request).await?;
    let note_name = form.note_name.ok_or(NoteError::MissingField("note_name"))?;
    state.store.create(&note_name, &form.note).await?;

    Ok((StatusCode::CREATED, "Note created"))
}

/// Decode the create form from either a urlencoded or a multipart body.
/// The upload page posts multipart; scripted clients usually send urlencoded.
async fn read_write_form(request: Request) -> Result<WriteNoteForm, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        let Form(form) = Form::<WriteNoteForm>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return Ok(form);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;

    let mut form = WriteNoteForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err((e.status(), e.body_text()).into_response()),
        };
        let field_name = field.name().map(str::to_owned);
        let value = field
            .text()
            .await
            .map_err(|e| (e.status(), e.body_text()).into_response())?;

        match field_name.as_deref() {
            Some("note_name") => form.note_name = Some(value),
            Some("note") => form.note = value,
            _ => {}
        }
    }

    Ok(form)
}
