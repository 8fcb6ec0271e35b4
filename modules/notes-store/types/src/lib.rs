//! Shared types for the notes store service and its HTTP clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /write`, sent as urlencoded or multipart form fields
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WriteNoteForm {
    /// Name of the note, without the `.txt` extension
    #[serde(default)]
    pub note_name: Option<String>,
    /// Note body; an omitted field creates an empty note
    #[serde(default)]
    pub note: String,
}

// =====================================================
// Domain Types
// =====================================================

/// A stored note, as returned by `GET /notes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub text: String,
}
