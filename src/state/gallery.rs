/// Gallery view state
///
/// All ephemeral UI state lives in one `Gallery` value. Every user action
/// or finished request is an `Event`; `Gallery::update` applies it and
/// returns the `Effect` the application shell has to run. The transition
/// itself never performs I/O, which keeps the whole flow unit-testable.
use chrono::{DateTime, Utc};

use super::data::{NewPhoto, Photo};
use super::draft::PhotoDraft;
use super::filter::{filter_photos, tag_vocabulary, TagFilter};
use crate::remote::FetchError;

pub const LOAD_FAILED: &str = "Failed to load photos";
pub const SAVE_FAILED: &str = "Failed to save photo";

/// Parameters of one list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Monotonically increasing, used to drop stale responses
    pub seq: u64,
    pub featured_only: bool,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
    Create(NewPhoto),
}

/// Everything that can change the gallery
#[derive(Debug, Clone)]
pub enum Event {
    // Add-photo form
    TitleChanged(String),
    DescriptionChanged(String),
    ImageUrlChanged(String),
    TagsChanged(String),
    FeaturedChanged(bool),
    Submit,

    // Filters
    ShowFeaturedOnlyToggled(bool),
    TagSelected(TagFilter),
    QueryChanged(String),
    ClearFilters,
    Refresh,
    DismissError,

    // Request outcomes
    PhotosLoaded {
        seq: u64,
        received_at: DateTime<Utc>,
        result: Result<Vec<Photo>, FetchError>,
    },
    PhotoSaved(Result<(), FetchError>),
}

#[derive(Debug, Default)]
pub struct Gallery {
    /// Last accepted list, replaced wholesale on every fetch
    photos: Vec<Photo>,
    pub draft: PhotoDraft,
    selected_tag: TagFilter,
    show_featured_only: bool,
    query: String,
    loading: bool,
    saving: bool,
    error: Option<String>,
    last_loaded: Option<DateTime<Utc>>,
    /// Sequence number of the most recent list request
    latest_fetch: u64,

    // Derived, recomputed whenever their inputs change
    tags: Vec<TagFilter>,
    visible: Vec<usize>,
}

impl Gallery {
    /// Initial state plus the fetch issued on start
    pub fn new() -> (Self, Effect) {
        let mut gallery = Self::default();
        gallery.refresh_derived();
        let effect = gallery.start_fetch();
        (gallery, effect)
    }

    pub fn update(&mut self, event: Event) -> Effect {
        match event {
            Event::TitleChanged(value) => {
                self.draft.title = value;
                Effect::None
            }
            Event::DescriptionChanged(value) => {
                self.draft.description = value;
                Effect::None
            }
            Event::ImageUrlChanged(value) => {
                self.draft.image_url = value;
                Effect::None
            }
            Event::TagsChanged(value) => {
                self.draft.tags = value;
                Effect::None
            }
            Event::FeaturedChanged(value) => {
                self.draft.featured = value;
                Effect::None
            }
            Event::Submit => self.submit(),

            Event::ShowFeaturedOnlyToggled(value) => {
                self.show_featured_only = value;
                self.start_fetch()
            }
            Event::TagSelected(tag) => {
                self.selected_tag = tag;
                self.refresh_visible();
                Effect::None
            }
            Event::QueryChanged(query) => {
                self.query = query;
                self.refresh_visible();
                Effect::None
            }
            Event::ClearFilters => {
                self.selected_tag = TagFilter::All;
                self.query.clear();
                self.refresh_visible();
                Effect::None
            }
            Event::Refresh => self.start_fetch(),
            Event::DismissError => {
                self.error = None;
                Effect::None
            }

            Event::PhotosLoaded {
                seq,
                received_at,
                result,
            } => {
                self.photos_loaded(seq, received_at, result);
                Effect::None
            }
            Event::PhotoSaved(result) => self.photo_saved(result),
        }
    }

    fn start_fetch(&mut self) -> Effect {
        self.latest_fetch += 1;
        self.loading = true;
        self.error = None;

        log::debug!(
            "Fetch #{} (featured only: {})",
            self.latest_fetch,
            self.show_featured_only
        );

        Effect::Fetch(FetchRequest {
            seq: self.latest_fetch,
            featured_only: self.show_featured_only,
        })
    }

    fn submit(&mut self) -> Effect {
        if self.saving {
            log::debug!("Submit ignored, a save is already in flight");
            return Effect::None;
        }

        match self.draft.to_new_photo() {
            Ok(photo) => {
                self.saving = true;
                self.error = None;
                Effect::Create(photo)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Effect::None
            }
        }
    }

    fn photos_loaded(
        &mut self,
        seq: u64,
        received_at: DateTime<Utc>,
        result: Result<Vec<Photo>, FetchError>,
    ) {
        if seq < self.latest_fetch {
            log::debug!(
                "Discarding stale response #{} (latest is #{})",
                seq,
                self.latest_fetch
            );
            return;
        }

        self.loading = false;

        match result {
            Ok(photos) => {
                self.photos = photos;
                self.last_loaded = Some(received_at);
                self.refresh_derived();
            }
            Err(e) => {
                log::warn!("⚠️  Loading photos failed: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    fn photo_saved(&mut self, result: Result<(), FetchError>) -> Effect {
        self.saving = false;

        match result {
            Ok(()) => {
                self.draft.clear();
                self.start_fetch()
            }
            Err(e) => {
                log::warn!("⚠️  Saving photo failed: {}", e);
                self.error = Some(SAVE_FAILED.to_string());
                Effect::None
            }
        }
    }

    fn refresh_derived(&mut self) {
        self.tags = tag_vocabulary(&self.photos);

        // The selection must stay within the current vocabulary
        if !self.tags.contains(&self.selected_tag) {
            self.selected_tag = TagFilter::All;
        }

        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = filter_photos(&self.photos, &self.selected_tag, &self.query);
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Photos passing the current tag and text filters, in list order
    pub fn visible_photos(&self) -> impl Iterator<Item = &Photo> + '_ {
        self.visible.iter().map(|&index| &self.photos[index])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// `All` followed by the distinct tags of the current list
    pub fn tags(&self) -> &[TagFilter] {
        &self.tags
    }

    pub fn selected_tag(&self) -> &TagFilter {
        &self.selected_tag
    }

    pub fn show_featured_only(&self) -> bool {
        self.show_featured_only
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.last_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::PhotoId;

    fn photo(id: i64, title: &str, tags: &[&str], featured: bool) -> Photo {
        Photo {
            id: PhotoId::Number(id),
            title: title.to_string(),
            description: None,
            image_url: format!("https://img.example.com/{}.jpg", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured,
        }
    }

    fn sample() -> Vec<Photo> {
        vec![
            photo(1, "Sunset", &["beach", "travel"], true),
            photo(2, "Cabin", &["travel"], false),
        ]
    }

    fn fetch_seq(effect: &Effect) -> u64 {
        match effect {
            Effect::Fetch(request) => request.seq,
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    fn loaded(seq: u64, result: Result<Vec<Photo>, FetchError>) -> Event {
        Event::PhotosLoaded {
            seq,
            received_at: Utc::now(),
            result,
        }
    }

    /// Gallery that finished its initial load with `photos`
    fn mounted(photos: Vec<Photo>) -> Gallery {
        let (mut gallery, effect) = Gallery::new();
        let seq = fetch_seq(&effect);
        gallery.update(loaded(seq, Ok(photos)));
        gallery
    }

    fn titles(gallery: &Gallery) -> Vec<&str> {
        gallery.visible_photos().map(|p| p.title.as_str()).collect()
    }

    fn fill_draft(gallery: &mut Gallery) {
        gallery.update(Event::TitleChanged("Lake".to_string()));
        gallery.update(Event::ImageUrlChanged("https://img.example.com/lake.jpg".to_string()));
        gallery.update(Event::TagsChanged("travel, , family,  nature ,".to_string()));
        gallery.update(Event::DescriptionChanged("Calm morning".to_string()));
        gallery.update(Event::FeaturedChanged(true));
    }

    #[test]
    fn test_mount_fetches_everything() {
        let (gallery, effect) = Gallery::new();

        assert_eq!(
            effect,
            Effect::Fetch(FetchRequest {
                seq: 1,
                featured_only: false
            })
        );
        assert!(gallery.is_loading());
        assert_eq!(gallery.tags(), &[TagFilter::All]);
    }

    #[test]
    fn test_loaded_photos_populate_derived_views() {
        let gallery = mounted(sample());

        assert!(!gallery.is_loading());
        assert!(gallery.last_loaded().is_some());
        assert_eq!(titles(&gallery), vec!["Sunset", "Cabin"]);
        assert_eq!(
            gallery.tags(),
            &[
                TagFilter::All,
                TagFilter::Tag("beach".to_string()),
                TagFilter::Tag("travel".to_string())
            ]
        );
    }

    #[test]
    fn test_tag_and_query_filter_locally() {
        let mut gallery = mounted(sample());

        assert_eq!(
            gallery.update(Event::TagSelected(TagFilter::Tag("travel".to_string()))),
            Effect::None
        );
        assert_eq!(titles(&gallery), vec!["Sunset", "Cabin"]);

        gallery.update(Event::TagSelected(TagFilter::Tag("beach".to_string())));
        assert_eq!(titles(&gallery), vec!["Sunset"]);

        gallery.update(Event::TagSelected(TagFilter::All));
        assert_eq!(gallery.update(Event::QueryChanged("cab".to_string())), Effect::None);
        assert_eq!(titles(&gallery), vec!["Cabin"]);
    }

    #[test]
    fn test_clear_filters() {
        let mut gallery = mounted(sample());
        gallery.update(Event::TagSelected(TagFilter::Tag("beach".to_string())));
        gallery.update(Event::QueryChanged("zzz".to_string()));
        assert_eq!(gallery.visible_count(), 0);

        assert_eq!(gallery.update(Event::ClearFilters), Effect::None);
        assert_eq!(gallery.selected_tag(), &TagFilter::All);
        assert_eq!(gallery.query(), "");
        assert_eq!(gallery.visible_count(), 2);
    }

    #[test]
    fn test_featured_toggle_refetches_and_replaces() {
        let mut gallery = mounted(sample());

        let effect = gallery.update(Event::ShowFeaturedOnlyToggled(true));
        assert_eq!(
            effect,
            Effect::Fetch(FetchRequest {
                seq: 2,
                featured_only: true
            })
        );
        assert!(gallery.show_featured_only());

        let featured = vec![photo(1, "Sunset", &["beach", "travel"], true)];
        gallery.update(loaded(2, Ok(featured.clone())));
        assert_eq!(gallery.photos(), featured.as_slice());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (mut gallery, effect) = Gallery::new();
        let initial = fetch_seq(&effect);
        let toggled = fetch_seq(&gallery.update(Event::ShowFeaturedOnlyToggled(true)));

        let featured = vec![photo(1, "Sunset", &["beach"], true)];
        gallery.update(loaded(toggled, Ok(featured.clone())));
        // The slower initial request resolves last and must not win
        gallery.update(loaded(initial, Ok(sample())));

        assert_eq!(gallery.photos(), featured.as_slice());
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_stale_failure_does_not_set_error() {
        let (mut gallery, effect) = Gallery::new();
        let initial = fetch_seq(&effect);
        gallery.update(Event::Refresh);

        gallery.update(loaded(initial, Err(FetchError::Status(500))));
        assert_eq!(gallery.error(), None);
        assert!(gallery.is_loading());
    }

    #[test]
    fn test_load_failure_sets_generic_error() {
        let (mut gallery, effect) = Gallery::new();
        let seq = fetch_seq(&effect);
        gallery.update(loaded(seq, Err(FetchError::Transport("refused".to_string()))));

        assert_eq!(gallery.error(), Some(LOAD_FAILED));
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_refresh_retries_with_current_flag() {
        let mut gallery = mounted(sample());
        gallery.update(Event::ShowFeaturedOnlyToggled(true));
        gallery.update(loaded(2, Err(FetchError::Status(503))));
        assert_eq!(gallery.error(), Some(LOAD_FAILED));

        let effect = gallery.update(Event::Refresh);
        assert_eq!(
            effect,
            Effect::Fetch(FetchRequest {
                seq: 3,
                featured_only: true
            })
        );
        assert_eq!(gallery.error(), None);
    }

    #[test]
    fn test_submit_without_title_makes_no_request() {
        let mut gallery = mounted(sample());
        gallery.update(Event::ImageUrlChanged("https://img.example.com/x.jpg".to_string()));

        assert_eq!(gallery.update(Event::Submit), Effect::None);
        assert_eq!(gallery.error(), Some("Title is required"));
        assert!(!gallery.is_saving());
    }

    #[test]
    fn test_submit_without_image_url_makes_no_request() {
        let mut gallery = mounted(sample());
        gallery.update(Event::TitleChanged("Lake".to_string()));

        assert_eq!(gallery.update(Event::Submit), Effect::None);
        assert_eq!(gallery.error(), Some("Image URL is required"));
    }

    #[test]
    fn test_submit_sends_parsed_payload() {
        let mut gallery = mounted(sample());
        fill_draft(&mut gallery);

        let effect = gallery.update(Event::Submit);
        assert_eq!(
            effect,
            Effect::Create(NewPhoto {
                title: "Lake".to_string(),
                description: Some("Calm morning".to_string()),
                image_url: "https://img.example.com/lake.jpg".to_string(),
                tags: vec!["travel".to_string(), "family".to_string(), "nature".to_string()],
                featured: true,
            })
        );
        assert!(gallery.is_saving());
    }

    #[test]
    fn test_double_submit_is_ignored_while_saving() {
        let mut gallery = mounted(sample());
        fill_draft(&mut gallery);

        assert!(matches!(gallery.update(Event::Submit), Effect::Create(_)));
        assert_eq!(gallery.update(Event::Submit), Effect::None);
    }

    #[test]
    fn test_successful_save_clears_form_and_refetches_once() {
        let mut gallery = mounted(sample());
        gallery.update(Event::ShowFeaturedOnlyToggled(true));
        gallery.update(loaded(2, Ok(sample())));
        fill_draft(&mut gallery);
        gallery.update(Event::Submit);

        let effect = gallery.update(Event::PhotoSaved(Ok(())));
        assert_eq!(
            effect,
            Effect::Fetch(FetchRequest {
                seq: 3,
                featured_only: true
            })
        );
        assert_eq!(gallery.draft, PhotoDraft::default());
        assert!(!gallery.is_saving());
    }

    #[test]
    fn test_failed_save_keeps_form() {
        let mut gallery = mounted(sample());
        fill_draft(&mut gallery);
        gallery.update(Event::Submit);

        let effect = gallery.update(Event::PhotoSaved(Err(FetchError::Status(400))));
        assert_eq!(effect, Effect::None);
        assert_eq!(gallery.error(), Some(SAVE_FAILED));
        assert_eq!(gallery.draft.title, "Lake");
        assert!(!gallery.is_saving());
    }

    #[test]
    fn test_new_error_replaces_old_one() {
        let mut gallery = mounted(sample());
        gallery.update(Event::Submit);
        assert_eq!(gallery.error(), Some("Title is required"));

        gallery.update(Event::TitleChanged("Lake".to_string()));
        gallery.update(Event::Submit);
        assert_eq!(gallery.error(), Some("Image URL is required"));

        gallery.update(Event::DismissError);
        assert_eq!(gallery.error(), None);
    }

    #[test]
    fn test_selected_tag_resets_when_it_disappears() {
        let mut gallery = mounted(sample());
        gallery.update(Event::TagSelected(TagFilter::Tag("beach".to_string())));

        gallery.update(Event::Refresh);
        gallery.update(loaded(2, Ok(vec![photo(2, "Cabin", &["travel"], false)])));

        assert_eq!(gallery.selected_tag(), &TagFilter::All);
        assert_eq!(titles(&gallery), vec!["Cabin"]);
    }

    #[test]
    fn test_selected_tag_kept_when_still_present() {
        let mut gallery = mounted(sample());
        gallery.update(Event::TagSelected(TagFilter::Tag("travel".to_string())));

        gallery.update(Event::Refresh);
        gallery.update(loaded(2, Ok(sample())));

        assert_eq!(gallery.selected_tag(), &TagFilter::Tag("travel".to_string()));
    }
}
