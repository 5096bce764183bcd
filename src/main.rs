use chrono::Utc;
use iced::widget::image::Handle;
use iced::widget::{container, row, vertical_rule};
use iced::{Element, Length, Task, Theme};

mod config;
mod remote;
mod state;
mod ui;

use config::Config;
use remote::thumbnail::{self, ThumbnailCache};
use remote::RemoteStore;
use state::gallery::{Effect, Event, Gallery};

/// Main application state
struct PhotoGallery {
    /// View state: form, fetched photos, filters
    gallery: Gallery,
    /// Backend the photos come from
    store: RemoteStore,
    /// Downscaled images for the visible cards
    thumbnails: ThumbnailCache,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Anything the gallery state machine handles
    Gallery(Event),
    /// Background thumbnail download finished
    ThumbnailLoaded(String, Result<Handle, String>),
}

impl PhotoGallery {
    /// Create the application and issue the initial fetch
    fn new(config: Config) -> (Self, Task<Message>) {
        let (gallery, effect) = Gallery::new();

        let app = PhotoGallery {
            gallery,
            store: RemoteStore::new(&config),
            thumbnails: ThumbnailCache::default(),
        };
        let task = app.perform(effect);

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Gallery(event) => {
                let effect = self.gallery.update(event);
                Task::batch([self.perform(effect), self.load_thumbnails()])
            }
            Message::ThumbnailLoaded(url, result) => {
                self.thumbnails.finish(url, result);
                Task::none()
            }
        }
    }

    /// Turn a gallery effect into a background request
    fn perform(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::Fetch(request) => {
                let store = self.store.clone();
                Task::perform(
                    async move { store.list(request.featured_only).await },
                    move |result| {
                        Message::Gallery(Event::PhotosLoaded {
                            seq: request.seq,
                            received_at: Utc::now(),
                            result,
                        })
                    },
                )
            }
            Effect::Create(photo) => {
                let store = self.store.clone();
                Task::perform(
                    async move { store.create(&photo).await },
                    |result| Message::Gallery(Event::PhotoSaved(result)),
                )
            }
        }
    }

    /// Start downloads for visible photos that have no thumbnail yet
    fn load_thumbnails(&mut self) -> Task<Message> {
        let urls = self
            .thumbnails
            .claim(self.gallery.visible_photos().map(|photo| photo.image_url.as_str()));

        if urls.is_empty() {
            return Task::none();
        }

        log::debug!("Loading {} thumbnails", urls.len());

        Task::batch(urls.into_iter().map(|url| {
            let client = self.store.http().clone();
            Task::perform(
                async move {
                    let result = thumbnail::load_thumbnail(client, url.clone()).await;
                    (url, result)
                },
                |(url, result)| Message::ThumbnailLoaded(url, result),
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content = row![
            ui::form::view(&self.gallery).map(Message::Gallery),
            vertical_rule(1),
            ui::browse::view(&self.gallery, &self.thumbnails).map(Message::Gallery),
        ]
        .spacing(24)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    log::info!("🎨 Photo gallery using store at {}", config.api_base_url);

    iced::application("Photo Gallery", PhotoGallery::update, PhotoGallery::view)
        .theme(PhotoGallery::theme)
        .centered()
        .run_with(move || PhotoGallery::new(config))
}
