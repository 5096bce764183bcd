//! Photo store HTTP client
//!
//! Thin wrapper over the backend's REST contract:
//! - `GET  /api/photos[?featured=true]` returns a JSON array of photos
//! - `POST /api/photos` creates one, any 2xx counts as success
//!
//! No retries and no timeout beyond the transport defaults.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::Config;
use crate::state::data::{NewPhoto, Photo};

const PHOTOS_PATH: &str = "/api/photos";

/// Failure talking to the photo store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("cannot reach photo store: {0}")]
    Transport(String),
    #[error("photo store returned status {0}")]
    Status(u16),
    #[error("invalid response from photo store: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Only 2xx responses are accepted
pub fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status(status.as_u16()))
    }
}

/// Handle to the remote photo store.
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    /// Shared HTTP client, also used for fetching thumbnails
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn list_url(&self, featured_only: bool) -> String {
        if featured_only {
            format!("{}{}?featured=true", self.base_url, PHOTOS_PATH)
        } else {
            format!("{}{}", self.base_url, PHOTOS_PATH)
        }
    }

    fn create_url(&self) -> String {
        format!("{}{}", self.base_url, PHOTOS_PATH)
    }

    /// Fetch the whole collection, or only featured photos
    pub async fn list(&self, featured_only: bool) -> Result<Vec<Photo>, FetchError> {
        let url = self.list_url(featured_only);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        check_status(response.status())?;

        let photos: Vec<Photo> = response.json().await?;
        log::info!("📷 Loaded {} photos", photos.len());

        Ok(photos)
    }

    /// Create a photo. The response body is ignored.
    pub async fn create(&self, photo: &NewPhoto) -> Result<(), FetchError> {
        let url = self.create_url();
        log::debug!("POST {} ({:?})", url, photo.title);

        let response = self.client.post(&url).json(photo).send().await?;
        check_status(response.status())?;

        log::info!("✅ Saved photo {:?}", photo.title);
        Ok(())
    }
}
