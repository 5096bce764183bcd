/// Add-photo form
use iced::widget::{button, checkbox, column, text, text_input};
use iced::{Element, Length};

use crate::state::gallery::{Event, Gallery};

const FORM_WIDTH: f32 = 320.0;

pub fn view(gallery: &Gallery) -> Element<'_, Event> {
    let draft = &gallery.draft;

    let submit_label = if gallery.is_saving() {
        "Saving..."
    } else {
        "Add Photo"
    };

    column![
        text("Add a photo").size(24),
        text_input("Title *", &draft.title)
            .on_input(Event::TitleChanged)
            .on_submit(Event::Submit)
            .padding(8),
        text_input("Image URL *", &draft.image_url)
            .on_input(Event::ImageUrlChanged)
            .on_submit(Event::Submit)
            .padding(8),
        text_input("Description", &draft.description)
            .on_input(Event::DescriptionChanged)
            .on_submit(Event::Submit)
            .padding(8),
        text_input("Tags, comma separated", &draft.tags)
            .on_input(Event::TagsChanged)
            .on_submit(Event::Submit)
            .padding(8),
        checkbox("Featured", draft.featured).on_toggle(Event::FeaturedChanged),
        button(text(submit_label))
            .on_press_maybe((!gallery.is_saving()).then_some(Event::Submit))
            .padding(10),
    ]
    .spacing(12)
    .width(Length::Fixed(FORM_WIDTH))
    .into()
}
