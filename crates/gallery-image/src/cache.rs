use cosmic::widget::image::Handle;
use gallery_types::PhotoId;
use lru::LruCache;
use std::{
    collections::HashSet,
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};

/// Full-size photos kept ahead of the current one.
pub const PRELOAD_AHEAD: usize = 2;
/// Full-size photos kept behind the current one.
pub const PRELOAD_BEHIND: usize = 2;

#[derive(Clone)]
pub struct CachedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for CachedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Decoded photos and thumbnails, shared between the UI and load tasks.
#[derive(Clone)]
pub struct ImageCache {
    full_images: Arc<Mutex<LruCache<PhotoId, CachedImage>>>,
    thumbnails: Arc<Mutex<LruCache<PhotoId, CachedImage>>>,
    pending: Arc<Mutex<HashSet<PhotoId>>>,
    pending_thumbnails: Arc<Mutex<HashSet<PhotoId>>>,
}

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}

impl ImageCache {
    pub fn new(full_capacity: usize, thumbnail_capacity: usize) -> Self {
        Self {
            full_images: Arc::new(Mutex::new(LruCache::new(capacity(full_capacity)))),
            thumbnails: Arc::new(Mutex::new(LruCache::new(capacity(thumbnail_capacity)))),
            pending: Arc::new(Mutex::new(HashSet::new())),
            pending_thumbnails: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(PRELOAD_AHEAD + PRELOAD_BEHIND + 4, 200)
    }

    pub fn get_full(&self, id: PhotoId) -> Option<CachedImage> {
        self.full_images.lock().ok()?.get(&id).cloned()
    }

    pub fn insert_full(&self, id: PhotoId, image: CachedImage) {
        if let Ok(mut cache) = self.full_images.lock() {
            cache.put(id, image);
        }
        self.clear_pending(id);
    }

    /// Marks a full-size load as in flight. Returns `false` when the photo is
    /// already cached or loading.
    pub fn begin_full(&self, id: PhotoId) -> bool {
        if self.get_full(id).is_some() {
            return false;
        }
        self.pending
            .lock()
            .map(|mut set| set.insert(id))
            .unwrap_or(false)
    }

    pub fn clear_pending(&self, id: PhotoId) {
        if let Ok(mut set) = self.pending.lock() {
            set.remove(&id);
        }
    }

    pub fn get_thumbnail(&self, id: PhotoId) -> Option<CachedImage> {
        self.thumbnails.lock().ok()?.get(&id).cloned()
    }

    pub fn insert_thumbnail(&self, id: PhotoId, image: CachedImage) {
        if let Ok(mut cache) = self.thumbnails.lock() {
            cache.put(id, image);
        }
        self.clear_pending_thumbnail(id);
    }

    /// Same contract as [`ImageCache::begin_full`].
    pub fn begin_thumbnail(&self, id: PhotoId) -> bool {
        if self.get_thumbnail(id).is_some() {
            return false;
        }
        self.pending_thumbnails
            .lock()
            .map(|mut set| set.insert(id))
            .unwrap_or(false)
    }

    pub fn clear_pending_thumbnail(&self, id: PhotoId) {
        if let Ok(mut set) = self.pending_thumbnails.lock() {
            set.remove(&id);
        }
    }

    pub fn pending_thumbnail_count(&self) -> usize {
        self.pending_thumbnails
            .lock()
            .map(|set| set.len())
            .unwrap_or(0)
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Indices worth having decoded while `current` is shown, nearest first.
pub fn preload_window(current: usize, len: usize) -> Vec<usize> {
    if current >= len {
        return Vec::new();
    }

    let mut indices = vec![current];
    for distance in 1..=PRELOAD_AHEAD.max(PRELOAD_BEHIND) {
        if distance <= PRELOAD_AHEAD && current + distance < len {
            indices.push(current + distance);
        }
        if distance <= PRELOAD_BEHIND && let Some(before) = current.checked_sub(distance) {
            indices.push(before);
        }
    }
    indices
}
