/// Add-photo form buffer and its validation
///
/// The draft holds exactly what the user typed. It only becomes a
/// `NewPhoto` payload once the required fields are present.

use thiserror::Error;

use super::data::NewPhoto;

/// Client-side validation failures, raised before any network call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Image URL is required")]
    MissingImageUrl,
}

/// Unsaved form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Comma-separated tag input
    pub tags: String,
    pub featured: bool,
}

impl PhotoDraft {
    /// Validate the draft and build the request payload
    pub fn to_new_photo(&self) -> Result<NewPhoto, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let image_url = self.image_url.trim();
        if image_url.is_empty() {
            return Err(ValidationError::MissingImageUrl);
        }

        let description = self.description.trim();

        Ok(NewPhoto {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            image_url: image_url.to_string(),
            tags: parse_tags(&self.tags),
            featured: self.featured,
        })
    }

    /// Reset every field, as after a successful save
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Split comma-separated input into trimmed, non-empty tags.
/// Order is kept and duplicates are not removed.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
