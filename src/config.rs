/// Application configuration
///
/// The only setting is the base address of the photo store backend.
/// It is resolved once at startup, in this order:
/// 1. `PHOTO_GALLERY_API_URL` from the process environment
/// 2. `PHOTO_GALLERY_API_URL` captured when the binary was built
/// 3. the local development fallback
use reqwest::Url;

/// Environment variable holding the backend base URL
pub const API_URL_VAR: &str = "PHOTO_GALLERY_API_URL";

/// Used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without a trailing slash
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Read the configuration from the environment
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(API_URL_VAR).ok(), option_env!("PHOTO_GALLERY_API_URL"))
    }

    /// Pick the first usable candidate, falling back to the default
    fn resolve(runtime: Option<String>, build_time: Option<&str>) -> Self {
        let candidates = [runtime.as_deref(), build_time];

        for candidate in candidates.into_iter().flatten() {
            let trimmed = candidate.trim();
            if trimmed.is_empty() {
                continue;
            }

            match Url::parse(trimmed) {
                Ok(url) if url.has_host() => {
                    return Self {
                        api_base_url: trimmed.trim_end_matches('/').to_string(),
                    };
                }
                _ => {
                    log::warn!("⚠️  Ignoring invalid {}: {:?}", API_URL_VAR, trimmed);
                }
            }
        }

        Self::default()
    }
}
