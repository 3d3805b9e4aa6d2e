use crate::{
    fl,
    message::{GridMessage, Message},
};
use cosmic::{
    Element,
    iced::{Alignment, Length},
    theme,
    widget::{column, container, icon, scrollable, text},
};
use gallery_image::ImageCache;
use gallery_nav::Gallery;
use gallery_widgets::{GridThumbnail, photo_grid};

/// Status line above the grid: load progress until ready, then the count.
pub fn status_text(gallery: &Gallery) -> String {
    let total = gallery.catalog().len();
    if total == 0 {
        return fl!("gallery-empty");
    }

    if gallery.is_ready() {
        fl!("gallery-count", count = total)
    } else {
        let (settled, total) = gallery.preload_progress();
        fl!("gallery-loading", settled = settled, total = total)
    }
}

pub fn grid_view<'a>(gallery: &'a Gallery, cache: &ImageCache) -> Element<'a, Message> {
    let spacing = theme::active().cosmic().spacing;

    if gallery.catalog().is_empty() {
        return container(
            column()
                .push(icon::from_name("folder-pictures-symbolic").size(64))
                .push(text(fl!("gallery-empty")).size(16))
                .spacing(spacing.space_m)
                .align_x(Alignment::Center),
        )
        .center(Length::Fill)
        .into();
    }

    let thumbnails: Vec<GridThumbnail> = gallery
        .cells()
        .iter()
        .map(|cell| {
            let id = cell.photo.id();
            match cache.get_thumbnail(id) {
                Some(cached) => GridThumbnail::Ready {
                    handle: cached.handle,
                    width: cached.width,
                    height: cached.height,
                },
                None if gallery.thumbnail_failed(id) => GridThumbnail::Unavailable,
                None => GridThumbnail::Pending,
            }
        })
        .collect();

    let grid = photo_grid(thumbnails, gallery.grid().layout().clone())
        .interactive(gallery.is_ready())
        .keyboard_navigation(!gallery.overlay().is_open())
        .on_activate(|index| Message::Grid(GridMessage::Activate(index)))
        .on_focus(|index| Message::Grid(GridMessage::Focus(index)));

    let status = container(text::caption(status_text(gallery)))
        .width(Length::Fill)
        .padding([spacing.space_xxs, spacing.space_s]);

    column()
        .push(status)
        .push(
            scrollable(container(grid).padding(spacing.space_s))
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
