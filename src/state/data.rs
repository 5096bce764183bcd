/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the photo store and the UI layer. Photos are owned by the
/// backend; the client only reads them and submits new ones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned photo identifier
///
/// The backend may hand out numeric or textual ids, so both are accepted
/// and the value is only ever compared and displayed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum PhotoId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoId::Number(id) => write!(f, "{}", id),
            PhotoId::Text(id) => f.write_str(id),
        }
    }
}

/// A single photo as returned by `GET /api/photos`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Displayable image location
    pub image_url: String,
    /// Ordered, duplicates allowed
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Body of `POST /api/photos`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    pub tags: Vec<String>,
    pub featured: bool,
}
