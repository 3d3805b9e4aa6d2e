//! Image placement helpers shared by the grid and the carousel.

use cosmic::iced::{Point, Rectangle, Size};

/// Largest rectangle with the image's aspect ratio that fits in `bounds`,
/// centered. Unknown dimensions fill the whole area.
pub fn contain(bounds: Rectangle, image_width: f32, image_height: f32) -> Rectangle {
    if image_width <= 0.0 || image_height <= 0.0 || bounds.height <= 0.0 {
        return bounds;
    }

    let bounds_aspect = bounds.width / bounds.height;
    let image_aspect = image_width / image_height;

    let (width, height) = if image_aspect > bounds_aspect {
        (bounds.width, bounds.width / image_aspect)
    } else {
        (bounds.height * image_aspect, bounds.height)
    };

    Rectangle::new(
        Point::new(
            bounds.x + (bounds.width - width) / 2.0,
            bounds.y + (bounds.height - height) / 2.0,
        ),
        Size::new(width, height),
    )
}

/// Square of `side` centered in `bounds`.
pub fn centered_square(bounds: Rectangle, side: f32) -> Rectangle {
    Rectangle::new(
        Point::new(
            bounds.x + (bounds.width - side) / 2.0,
            bounds.y + (bounds.height - side) / 2.0,
        ),
        Size::new(side, side),
    )
}

/// `bounds` moved horizontally by `dx`.
pub fn shifted(bounds: Rectangle, dx: f32) -> Rectangle {
    Rectangle::new(Point::new(bounds.x + dx, bounds.y), bounds.size())
}
