/// State management module
///
/// This module handles all client-side state, including:
/// - Wire data structures shared with the photo store (data.rs)
/// - The add-photo form buffer and validation (draft.rs)
/// - Tag vocabulary and list filtering (filter.rs)
/// - The gallery state machine tying it all together (gallery.rs)

pub mod data;
pub mod draft;
pub mod filter;
pub mod gallery;
