/// Thumbnail loading for photo cards
///
/// Images are downloaded from their URL, decoded and downscaled in memory,
/// then handed to iced as raw RGBA. Nothing is cached on disk.
use iced::widget::image::Handle;
use image::imageops::FilterType;
use reqwest::Client;
use std::collections::HashMap;

/// Thumbnails fit inside a square of this size
const THUMBNAIL_SIZE: u32 = 256;

/// Decoded, downscaled RGBA pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Thumbnail {
    pub fn into_handle(self) -> Handle {
        Handle::from_rgba(self.width, self.height, self.pixels)
    }
}

/// Download an image and turn it into a thumbnail handle
pub async fn load_thumbnail(client: Client, url: String) -> Result<Handle, String> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to download {}: {}", url, e))?;

    if !response.status().is_success() {
        return Err(format!("Image server returned {} for {}", response.status(), url));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to read {}: {}", url, e))?;

    // Spawn blocking because decoding and resizing are CPU-intensive
    let thumbnail = tokio::task::spawn_blocking(move || decode_thumbnail(&bytes))
        .await
        .map_err(|e| format!("Task join error: {}", e))??;

    Ok(thumbnail.into_handle())
}

/// Decode any format the `image` crate understands and shrink it
pub fn decode_thumbnail(data: &[u8]) -> Result<Thumbnail, String> {
    let img = image::load_from_memory(data).map_err(|e| format!("Failed to decode image: {}", e))?;

    // Only ever shrink; small images keep their size
    let img = if img.width() > THUMBNAIL_SIZE || img.height() > THUMBNAIL_SIZE {
        img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Load state of a single image URL
#[derive(Debug, Clone)]
pub enum ThumbnailState {
    Loading,
    Ready(Handle),
    Failed,
}

/// In-memory thumbnails keyed by image URL
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    entries: HashMap<String, ThumbnailState>,
}

impl ThumbnailCache {
    pub fn get(&self, url: &str) -> Option<&ThumbnailState> {
        self.entries.get(url)
    }

    /// Mark the URLs that were never requested as loading and return them.
    /// Each URL is handed out at most once.
    pub fn claim<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut claimed = Vec::new();
        for url in urls {
            if !self.entries.contains_key(url) {
                self.entries.insert(url.to_string(), ThumbnailState::Loading);
                claimed.push(url.to_string());
            }
        }
        claimed
    }

    pub fn finish(&mut self, url: String, result: Result<Handle, String>) {
        let state = match result {
            Ok(handle) => ThumbnailState::Ready(handle),
            Err(e) => {
                log::warn!("⚠️  Thumbnail unavailable: {}", e);
                ThumbnailState::Failed
            }
        };
        self.entries.insert(url, state);
    }
}
