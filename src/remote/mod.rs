/// Photo store access
///
/// This module handles:
/// - Listing and creating photos over the REST API (client.rs)
/// - Downloading and downscaling photo thumbnails (thumbnail.rs)

pub mod client;
pub mod thumbnail;

pub use client::{FetchError, RemoteStore};
