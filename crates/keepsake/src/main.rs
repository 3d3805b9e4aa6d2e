pub mod app;
pub mod key_binds;
pub mod localize;
pub mod message;
pub mod page;
pub mod views;

use app::Keepsake;
use std::path::PathBuf;

fn main() -> cosmic::iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(480.0),
    );

    // Optional directory to resolve photo sources against
    let asset_root = std::env::args().nth(1).map(PathBuf::from);

    cosmic::app::run::<Keepsake>(settings, asset_root)
}
