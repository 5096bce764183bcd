/// Browsing view: filter bar, status line and the photo grid
use chrono::Local;
use iced::widget::image::Image;
use iced::widget::{button, checkbox, column, container, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::remote::thumbnail::{ThumbnailCache, ThumbnailState};
use crate::state::data::Photo;
use crate::state::gallery::{Event, Gallery};

/// Width of the picture inside a card
const CARD_WIDTH: f32 = 220.0;
const PLACEHOLDER_HEIGHT: f32 = 146.0;

pub fn view<'a>(gallery: &'a Gallery, thumbnails: &'a ThumbnailCache) -> Element<'a, Event> {
    column![
        filter_bar(gallery),
        status_line(gallery),
        scrollable(grid(gallery, thumbnails)).height(Length::Fill),
    ]
    .spacing(16)
    .width(Length::Fill)
    .into()
}

fn filter_bar(gallery: &Gallery) -> Element<'_, Event> {
    row![
        checkbox("Featured only", gallery.show_featured_only())
            .on_toggle(Event::ShowFeaturedOnlyToggled),
        pick_list(gallery.tags(), Some(gallery.selected_tag()), Event::TagSelected)
            .width(Length::Fixed(160.0)),
        text_input("Search title or description", gallery.query())
            .on_input(Event::QueryChanged)
            .padding(8)
            .width(Length::Fill),
        button("Clear").on_press(Event::ClearFilters),
        button("Refresh").on_press_maybe((!gallery.is_loading()).then_some(Event::Refresh)),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

fn status_line(gallery: &Gallery) -> Element<'_, Event> {
    let summary = if gallery.is_loading() {
        "Loading photos...".to_string()
    } else {
        let mut summary = format!(
            "Showing {} of {} photos",
            gallery.visible_count(),
            gallery.photos().len()
        );
        if let Some(loaded) = gallery.last_loaded() {
            summary.push_str(&format!(
                " · updated {}",
                loaded.with_timezone(&Local).format("%H:%M:%S")
            ));
        }
        summary
    };

    let mut line = row![text(summary).size(14)]
        .spacing(12)
        .align_y(Alignment::Center);

    // Validation and request failures all end up here
    if let Some(error) = gallery.error() {
        line = line
            .push(text(error).size(14).style(text::danger))
            .push(button(text("Dismiss").size(12)).on_press(Event::DismissError));
    }

    line.into()
}

fn grid<'a>(gallery: &'a Gallery, thumbnails: &'a ThumbnailCache) -> Element<'a, Event> {
    if gallery.visible_count() == 0 {
        let message = if gallery.photos().is_empty() {
            "No photos yet."
        } else {
            "No photos match the current filters."
        };
        return text(message).into();
    }

    let cards = gallery
        .visible_photos()
        .map(|photo| card(photo, thumbnails))
        .collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

fn card<'a>(photo: &'a Photo, thumbnails: &'a ThumbnailCache) -> Element<'a, Event> {
    let picture: Element<'a, Event> = match thumbnails.get(&photo.image_url) {
        Some(ThumbnailState::Ready(handle)) => Image::new(handle.clone())
            .width(Length::Fixed(CARD_WIDTH))
            .into(),
        Some(ThumbnailState::Failed) => placeholder("Image unavailable"),
        Some(ThumbnailState::Loading) | None => placeholder("Loading..."),
    };

    let mut content = column![picture, text(&photo.title).size(18)].spacing(6);

    if photo.featured {
        content = content.push(text("★ Featured").size(12).style(text::primary));
    }

    if let Some(description) = photo.description.as_deref().filter(|d| !d.is_empty()) {
        content = content.push(text(description).size(14));
    }

    if !photo.tags.is_empty() {
        let tags = photo
            .tags
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ");
        content = content.push(text(tags).size(12).style(text::secondary));
    }

    container(content)
        .padding(10)
        .width(Length::Fixed(CARD_WIDTH + 20.0))
        .style(container::rounded_box)
        .into()
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Event> {
    container(text(label).size(12))
        .center_x(Length::Fixed(CARD_WIDTH))
        .center_y(Length::Fixed(PLACEHOLDER_HEIGHT))
        .style(container::bordered_box)
        .into()
}
