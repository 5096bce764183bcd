/// Client-side derived views over the fetched photo list
///
/// Both functions are pure: they only look at the list and the current
/// filter selection, so the gallery can recompute them on every change
/// without touching the network.

use std::collections::HashSet;
use std::fmt;

use super::data::Photo;

/// Tag selection in the filter bar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TagFilter {
    /// Sentinel that matches every photo
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Whether a photo passes this tag selection
    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => photo.tags.iter().any(|t| t == tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => f.write_str("All"),
            TagFilter::Tag(tag) => f.write_str(tag),
        }
    }
}

/// `All` followed by each distinct tag, in first-seen order
pub fn tag_vocabulary(photos: &[Photo]) -> Vec<TagFilter> {
    let mut seen = HashSet::new();
    let mut vocabulary = vec![TagFilter::All];

    for tag in photos.iter().flat_map(|photo| photo.tags.iter()) {
        if seen.insert(tag.as_str()) {
            vocabulary.push(TagFilter::Tag(tag.clone()));
        }
    }

    vocabulary
}

/// Indices of the photos that pass both the tag and the text filter,
/// in list order
pub fn filter_photos(photos: &[Photo], tag: &TagFilter, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();

    photos
        .iter()
        .enumerate()
        .filter(|(_, photo)| tag.matches(photo) && matches_query(photo, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// `needle` must already be trimmed and lower-cased
fn matches_query(photo: &Photo, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    photo.title.to_lowercase().contains(needle)
        || photo
            .description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(needle)
}
