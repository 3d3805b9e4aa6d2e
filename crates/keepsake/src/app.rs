//! Main app state

use crate::{
    fl,
    key_binds,
    message::{GridMessage, ImageMessage, Message, PreviewMessage},
    page::PageShell,
    views,
};
use cosmic::{
    Action, Application, ApplicationExt, Core, Element, Task,
    cosmic_config::{Config, CosmicConfigEntry},
    iced::{
        Length, Subscription,
        keyboard::{Key, Modifiers},
        window,
    },
    theme,
    widget::{
        Space, button, container, icon,
        menu::key_bind::{KeyBind, Modifier},
        mouse_area, text, tooltip,
        tooltip::Position,
    },
};
use gallery_config::GalleryConfig;
use gallery_image::{self as image, CachedImage, ImageCache, preload_window};
use gallery_nav::{CarouselEvent, Direction, Gallery, GestureSettings, TickOutcome};
use gallery_types::{PhotoCatalog, PhotoId};
use gallery_widgets::PointerEvent;
use shared::{GridCellConfiguration, LoadOutcome};
use std::{collections::VecDeque, path::PathBuf, time::Instant};

/// Thumbnail decodes allowed in flight at once.
const MAX_PENDING_THUMBNAILS: usize = 8;
/// Full-size photos kept decoded.
const FULL_IMAGE_CAPACITY: usize = 8;

pub struct Keepsake {
    core: Core,
    config: GalleryConfig,
    config_handler: Option<Config>,
    gallery: Gallery,
    cache: ImageCache,
    asset_root: PathBuf,
    thumbnail_queue: VecDeque<PhotoId>,
    page: PageShell,
}

impl Keepsake {
    pub const APP_ID: &'static str = "org.codeberg.keepsake.Keepsake";

    fn start_thumbnails(&mut self) -> Task<Action<Message>> {
        let plan = self.gallery.start_preload();
        if let Some(ready) = plan.ready {
            tracing::info!("Gallery ready, {} photos", ready.total);
        }

        self.thumbnail_queue = plan.requests.into();
        self.load_thumbnails()
    }

    // Keeps at most MAX_PENDING_THUMBNAILS decodes running
    fn load_thumbnails(&mut self) -> Task<Action<Message>> {
        let pending = self.cache.pending_thumbnail_count();
        if pending >= MAX_PENDING_THUMBNAILS {
            return Task::none();
        }

        let slots = MAX_PENDING_THUMBNAILS - pending;
        let thumbnail_size = self.config.thumbnail_size.pixels();
        let mut tasks = Vec::new();

        while tasks.len() < slots {
            let Some(id) = self.thumbnail_queue.pop_front() else {
                break;
            };
            let Some(photo) = self.gallery.catalog().by_id(id) else {
                self.record_thumbnail(id, LoadOutcome::Failed("unknown photo".to_string()));
                continue;
            };

            if !self.cache.begin_thumbnail(id) {
                // Already decoded; an in-flight load settles on its own
                if self.cache.get_thumbnail(id).is_some() {
                    self.record_thumbnail(id, LoadOutcome::Loaded);
                }
                continue;
            }

            let source = photo.thumbnail_source().to_string();
            let asset_root = self.asset_root.clone();

            tasks.push(cosmic::task::future(async move {
                let result = match image::resolve_source(&source, &asset_root) {
                    Ok(path) => image::load_thumbnail(path, thumbnail_size).await,
                    Err(e) => Err(e),
                };

                match result {
                    Ok(img) => Message::Image(ImageMessage::ThumbnailReady {
                        id,
                        handle: img.handle,
                        width: img.width,
                        height: img.height,
                    }),
                    Err(e) => {
                        tracing::warn!("Thumbnail {source} failed to load: {e}");
                        Message::Image(ImageMessage::ThumbnailFailed {
                            id,
                            error: e.to_string(),
                        })
                    }
                }
            }));
        }

        Task::batch(tasks)
    }

    // Current photo plus its neighbours, nearest first
    fn preload_images(&mut self) -> Task<Action<Message>> {
        let Some(current) = self.gallery.overlay().current_index() else {
            return Task::none();
        };

        let catalog = self.gallery.catalog();
        let mut tasks = Vec::new();

        for index in preload_window(current, catalog.len()) {
            let Some(photo) = catalog.get(index) else {
                continue;
            };

            let id = photo.id();
            if !self.cache.begin_full(id) {
                continue;
            }

            let source = photo.full_source().to_string();
            let asset_root = self.asset_root.clone();

            tasks.push(cosmic::task::future(async move {
                let result = match image::resolve_source(&source, &asset_root) {
                    Ok(path) => image::load_image(path).await,
                    Err(e) => Err(e),
                };

                match result {
                    Ok(img) => Message::Image(ImageMessage::FullReady {
                        id,
                        handle: img.handle,
                        width: img.width,
                        height: img.height,
                    }),
                    Err(e) => Message::Image(ImageMessage::FullFailed {
                        id,
                        error: e.to_string(),
                    }),
                }
            }));
        }

        Task::batch(tasks)
    }

    fn thumbnail_settled(&mut self, id: PhotoId, outcome: LoadOutcome) -> Task<Action<Message>> {
        self.record_thumbnail(id, outcome);
        self.load_thumbnails()
    }

    fn record_thumbnail(&mut self, id: PhotoId, outcome: LoadOutcome) {
        if let Some(ready) = self.gallery.thumbnail_settled(id, outcome) {
            tracing::info!(
                "Gallery ready: {} of {} thumbnails loaded, {} failed",
                ready.loaded,
                ready.total,
                ready.failed
            );
        }
    }

    fn handle_image(&mut self, message: ImageMessage) -> Task<Action<Message>> {
        match message {
            ImageMessage::ThumbnailReady {
                id,
                handle,
                width,
                height,
            } => {
                self.cache.insert_thumbnail(
                    id,
                    CachedImage {
                        handle,
                        width,
                        height,
                    },
                );
                self.thumbnail_settled(id, LoadOutcome::Loaded)
            }
            ImageMessage::ThumbnailFailed { id, error } => {
                self.cache.clear_pending_thumbnail(id);
                self.thumbnail_settled(id, LoadOutcome::Failed(error))
            }
            ImageMessage::FullReady {
                id,
                handle,
                width,
                height,
            } => {
                self.cache.insert_full(
                    id,
                    CachedImage {
                        handle,
                        width,
                        height,
                    },
                );
                Task::none()
            }
            ImageMessage::FullFailed { id, error } => {
                tracing::warn!("Photo {id} failed to load: {error}");
                self.cache.clear_pending(id);
                Task::none()
            }
        }
    }

    fn handle_grid(&mut self, message: GridMessage) -> Task<Action<Message>> {
        let total = self.gallery.catalog().len();

        match message {
            GridMessage::Activate(index) => {
                self.page.user_interacted();
                self.gallery.grid_mut().set_focus(Some(index), total);

                if self.gallery.select_index(index).is_some() {
                    return self.preload_images();
                }
            }
            GridMessage::Focus(index) => {
                self.gallery.grid_mut().set_focus(Some(index), total);
            }
        }

        Task::none()
    }

    fn handle_preview(&mut self, message: PreviewMessage) -> Task<Action<Message>> {
        let event = match message {
            PreviewMessage::Pointer(PointerEvent::Down { x, at }) => {
                self.page.user_interacted();
                self.gallery.pointer_down(x, at);
                None
            }
            PreviewMessage::Pointer(PointerEvent::Move { x }) => {
                self.gallery.pointer_move(x);
                None
            }
            PreviewMessage::Pointer(PointerEvent::Up { x, at }) => {
                self.gallery.pointer_up(x, at);
                None
            }
            PreviewMessage::Pointer(PointerEvent::Cancel) => {
                self.gallery.pointer_cancel();
                None
            }
            PreviewMessage::Resized(width) => {
                self.gallery.set_viewport_width(width);
                None
            }
            PreviewMessage::Previous => self.gallery.step(Direction::Backward, Instant::now()),
            PreviewMessage::Next => self.gallery.step(Direction::Forward, Instant::now()),
            PreviewMessage::First => self.gallery.jump_to(0),
            PreviewMessage::Last => {
                let last = self.gallery.catalog().len().saturating_sub(1);
                self.gallery.jump_to(last)
            }
            PreviewMessage::JumpTo(index) => self.gallery.jump_to(index),
            PreviewMessage::Close => {
                self.gallery.close_preview();
                None
            }
            PreviewMessage::Ignore => None,
        };

        match event {
            Some(event) => self.carousel_event(event),
            None => Task::none(),
        }
    }

    fn carousel_event(&mut self, event: CarouselEvent) -> Task<Action<Message>> {
        match event {
            CarouselEvent::IndexChanged { .. } => self.preload_images(),
            CarouselEvent::Settled => Task::none(),
        }
    }

    fn toggle_audio(&mut self) {
        self.config.audio_enabled = self.page.toggle_audio();

        if let Some(handler) = &self.config_handler
            && let Err(err) = self.config.write_entry(handler)
        {
            tracing::error!("Failed to save config: {}", err);
        }
    }
}

impl Application for Keepsake {
    type Executor = cosmic::executor::Default;
    type Flags = Option<PathBuf>;
    type Message = Message;

    const APP_ID: &'static str = Self::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        let mut tasks = vec![];

        let (config, config_handler) = match gallery_config::config() {
            Ok(handler) => {
                let config = match GalleryConfig::get_entry(&handler) {
                    Ok(c) => c,
                    Err((_, c)) => c,
                };
                (config, Some(handler))
            }
            Err(_) => (GalleryConfig::default(), None),
        };

        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                tracing::warn!("Invalid gallery config, using defaults: {}", err);
                GalleryConfig::default()
            }
        };

        let catalog = config.catalog().unwrap_or_else(|err| {
            tracing::warn!("Failed to build photo list: {}", err);
            PhotoCatalog::empty()
        });

        // A path on the command line wins over the configured asset root
        let asset_root = flags
            .or_else(|| config.asset_root.as_ref().map(PathBuf::from))
            .unwrap_or_else(image::default_asset_root);

        let cache = ImageCache::new(FULL_IMAGE_CAPACITY, catalog.len());
        let gallery = Gallery::new(
            catalog,
            GestureSettings::from_config(&config),
            GridCellConfiguration::new(f32::from(config.grid_spacing)),
        );

        let mut page = PageShell::logging(config.audio_enabled);
        page.mount();

        let mut app = Self {
            core,
            config,
            config_handler,
            gallery,
            cache,
            asset_root,
            thumbnail_queue: VecDeque::new(),
            page,
        };

        if let Some(id) = app.core.main_window_id() {
            tasks.push(app.set_window_title(fl!("app-title"), id));
        }
        tasks.push(app.start_thumbnails());

        (app, Task::batch(tasks))
    }

    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        let (icon_name, label) = if self.page.audio_wanted() {
            ("audio-volume-high-symbolic", fl!("audio-pause"))
        } else {
            ("audio-volume-muted-symbolic", fl!("audio-play"))
        };

        vec![
            tooltip(
                button::icon(icon::from_name(icon_name)).on_press(Message::ToggleAudio),
                text(label),
                Position::Bottom,
            )
            .into(),
        ]
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let gallery = views::grid_view(&self.gallery, &self.cache);

        let Some(dialog) = views::preview_dialog(&self.gallery, &self.cache) else {
            return gallery;
        };

        let backdrop = mouse_area(
            container(Space::new(Length::Fill, Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .class(theme::Container::Transparent),
        )
        .on_press(Message::Preview(PreviewMessage::Close));

        cosmic::iced_widget::stack![gallery, backdrop, dialog].into()
    }

    fn update(&mut self, message: Message) -> Task<Action<Self::Message>> {
        let mut tasks = vec![];

        match message {
            Message::Image(msg) => tasks.push(self.handle_image(msg)),
            Message::Grid(msg) => tasks.push(self.handle_grid(msg)),
            Message::Preview(msg) => tasks.push(self.handle_preview(msg)),
            Message::Frame(id, at) => {
                if let TickOutcome::Completed(event) = self.gallery.tick_animation(id, at) {
                    tasks.push(self.carousel_event(event));
                }
            }
            Message::ToggleAudio => self.toggle_audio(),
            Message::KeyBind(action) => {
                tasks.push(self.update(action.message()));
            }
            Message::Quit => {
                std::process::exit(0);
            }
        }

        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        // Frames only while an animation runs
        let frames = match self.gallery.animation_id() {
            Some(id) => window::frames()
                .with(id)
                .map(|(id, at)| Message::Frame(id, at)),
            None => Subscription::none(),
        };

        Subscription::batch([cosmic::iced::keyboard::on_key_press(key_press_handler), frames])
    }

    fn on_app_exit(&mut self) -> Option<Self::Message> {
        if let Some(ref handler) = self.config_handler {
            let _ = self.config.write_entry(handler);
        }

        None
    }
}

fn key_press_handler(key: Key, modifiers: Modifiers) -> Option<Message> {
    let mut mods = Vec::new();

    if modifiers.control() {
        mods.push(Modifier::Ctrl);
    }

    if modifiers.shift() {
        mods.push(Modifier::Shift);
    }

    if modifiers.alt() {
        mods.push(Modifier::Alt);
    }

    if modifiers.logo() {
        mods.push(Modifier::Super);
    }

    let key_bind = KeyBind {
        modifiers: mods,
        key: key.clone(),
    };

    let bindings = key_binds::init_key_binds();
    bindings
        .get(&key_bind)
        .map(|action| Message::KeyBind(*action))
}
