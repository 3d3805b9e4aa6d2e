use crate::{
    fl,
    message::{Message, PreviewMessage},
};
use cosmic::{
    Element,
    iced::{Alignment, Length},
    theme,
    widget::{
        button, column, container, horizontal_space, icon, mouse_area, row, text, tooltip,
        tooltip::Position,
    },
};
use gallery_image::ImageCache;
use gallery_nav::Gallery;
use gallery_types::Photo;
use gallery_widgets::{SlideImage, SlideLayer, carousel_surface};
use shared::screen_reader_labels::{indicator_label, photo_label, position_text, unavailable_label};

/// Fullscreen preview dialog, or `None` while the preview is closed.
pub fn preview_dialog<'a>(gallery: &'a Gallery, cache: &ImageCache) -> Option<Element<'a, Message>> {
    let carousel = gallery.overlay().carousel()?;
    let photo = gallery.current_photo()?;
    let spacing = theme::active().cosmic().spacing;

    let index = carousel.current_index();
    let total = carousel.len();

    let caption = if slide_image(cache, photo).is_none() && gallery.thumbnail_failed(photo.id()) {
        unavailable_label(index)
    } else {
        photo_label(index, total, photo.label())
    };

    let close_btn = tooltip(
        button::icon(icon::from_name("window-close-symbolic"))
            .on_press(Message::Preview(PreviewMessage::Close))
            .padding(spacing.space_xs)
            .class(theme::Button::Destructive),
        text(fl!("preview-close")),
        Position::Bottom,
    );

    let header = row()
        .push(text::body(caption))
        .push(horizontal_space())
        .push(text::caption(position_text(index, total)))
        .push(close_btn)
        .spacing(spacing.space_s)
        .align_y(Alignment::Center)
        .width(Length::Fill)
        .padding(spacing.space_xs);

    let prev_btn = container(tooltip(
        button::icon(icon::from_name("go-previous-symbolic"))
            .on_press_maybe((index > 0).then_some(Message::Preview(PreviewMessage::Previous))),
        text(fl!("preview-previous")),
        Position::Right,
    ))
    .width(Length::Shrink)
    .height(Length::Fill)
    .center_y(Length::Fill);

    let next_btn = container(tooltip(
        button::icon(icon::from_name("go-next-symbolic"))
            .on_press_maybe((index + 1 < total).then_some(Message::Preview(PreviewMessage::Next))),
        text(fl!("preview-next")),
        Position::Left,
    ))
    .width(Length::Shrink)
    .height(Length::Fill)
    .center_y(Length::Fill);

    let layers: Vec<SlideLayer> = gallery
        .visible_layers()
        .into_iter()
        .map(|(layer, photo)| SlideLayer {
            image: slide_image(cache, photo),
            translate_x: layer.translate_x,
        })
        .collect();

    let surface = carousel_surface(layers)
        .dragging(carousel.phase().is_dragging())
        .known_width(carousel.viewport_width())
        .on_pointer(|event| Message::Preview(PreviewMessage::Pointer(event)))
        .on_resize(|width| Message::Preview(PreviewMessage::Resized(width)));

    let content_row = row()
        .push(prev_btn)
        .push(surface)
        .push(next_btn)
        .width(Length::Fill)
        .height(Length::Fill);

    let indicators = gallery
        .overlay()
        .indicators()
        .into_iter()
        .fold(row().spacing(spacing.space_xxs), |dots, indicator| {
            let dot = if indicator.active {
                button::text("\u{25CF}").class(theme::Button::Suggested)
            } else {
                button::text("\u{25CB}")
                    .on_press(Message::Preview(PreviewMessage::JumpTo(indicator.index)))
            };
            dots.push(tooltip(dot, text(indicator_label(indicator.index)), Position::Top))
        });

    let footer = row()
        .push(horizontal_space())
        .push(indicators)
        .push(horizontal_space())
        .width(Length::Fill)
        .padding(spacing.space_xs);

    let dialog = container(
        mouse_area(
            container(
                column()
                    .push(header)
                    .push(content_row)
                    .push(footer)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .class(theme::Container::Dialog),
        )
        .on_press(Message::Preview(PreviewMessage::Ignore)),
    )
    .padding([60, 80])
    .width(Length::Fill)
    .height(Length::Fill);

    Some(dialog.into())
}

/// Full-size image if decoded, else the thumbnail.
fn slide_image(cache: &ImageCache, photo: &Photo) -> Option<SlideImage> {
    let id = photo.id();
    cache
        .get_full(id)
        .or_else(|| cache.get_thumbnail(id))
        .map(|cached| SlideImage {
            handle: cached.handle,
            width: cached.width,
            height: cached.height,
        })
}
