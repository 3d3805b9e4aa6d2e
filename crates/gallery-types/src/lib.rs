pub mod catalog;

pub use catalog::{CatalogError, Photo, PhotoCatalog, PhotoId};
