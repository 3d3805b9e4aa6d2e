use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, sync::Arc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhotoId(pub u32);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single catalog entry. Sources are URIs or asset-relative paths and are
/// resolved by the image loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    id: PhotoId,
    full_source: String,
    thumbnail_source: String,
    label: String,
}

impl Photo {
    pub fn new(
        id: PhotoId,
        full_source: impl Into<String>,
        thumbnail_source: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            full_source: full_source.into(),
            thumbnail_source: thumbnail_source.into(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> PhotoId {
        self.id
    }

    pub fn full_source(&self) -> &str {
        &self.full_source
    }

    pub fn thumbnail_source(&self) -> &str {
        &self.thumbnail_source
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate photo id: {0}")]
    DuplicateId(PhotoId),
    #[error("Photo {0} has an empty source")]
    EmptySource(PhotoId),
}

/// Ordered, immutable list of photos. Display order is insertion order and
/// defines what "previous" and "next" mean. Clones share the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCatalog {
    photos: Arc<[Photo]>,
}

impl PhotoCatalog {
    pub fn new(photos: Vec<Photo>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(photos.len());

        for photo in &photos {
            if !seen.insert(photo.id) {
                return Err(CatalogError::DuplicateId(photo.id));
            }
            if photo.full_source.trim().is_empty() || photo.thumbnail_source.trim().is_empty() {
                return Err(CatalogError::EmptySource(photo.id));
            }
        }

        Ok(Self {
            photos: photos.into(),
        })
    }

    /// Builds a catalog from `(full, thumbnail, label)` triples, numbering
    /// ids from 1 in order.
    pub fn from_sources<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let photos = entries
            .into_iter()
            .zip(1u32..)
            .map(|((full, thumbnail, label), id)| Photo::new(PhotoId(id), full, thumbnail, label))
            .collect();

        Self::new(photos)
    }

    pub fn empty() -> Self {
        Self {
            photos: Vec::new().into(),
        }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index)
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Photo> {
        self.photos.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PhotoId> + '_ {
        self.photos.iter().map(Photo::id)
    }

    pub fn index_of(&self, id: PhotoId) -> Option<usize> {
        self.photos.iter().position(|photo| photo.id == id)
    }

    pub fn by_id(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|photo| photo.id == id)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.photos.len()
    }
}

impl Default for PhotoCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a PhotoCatalog {
    type Item = &'a Photo;
    type IntoIter = std::slice::Iter<'a, Photo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
