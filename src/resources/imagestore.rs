//! Shared image cache.
//!
//! The store owns every loaded image entry and hands out cheap `Arc` clones
//! as [`ImageHandle`]s. The same normalized root-relative path always returns
//! the same cached handle, and an entry stays alive as long as any handle to
//! it exists, even if the store evicts it. Texture upload itself happens in
//! the renderer; the engine only tracks path and dimensions here.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Metadata for one cached image.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageEntry {
    /// Normalized root-relative path, `/` separated. Doubles as the store key.
    pub path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Shared-ownership reference to a cached image.
pub type ImageHandle = Arc<ImageEntry>;

/// Registry of loaded images keyed by normalized root-relative path.
#[derive(Resource, Debug, Default)]
pub struct ImageStore {
    map: FxHashMap<String, ImageHandle>,
}

impl ImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        ImageStore {
            map: FxHashMap::default(),
        }
    }

    /// Register an image under its path, returning the shared handle.
    /// Re-inserting a path replaces the entry for future lookups; handles
    /// already held elsewhere keep the old entry alive.
    pub fn insert(&mut self, path: impl Into<String>, width: u32, height: u32) -> ImageHandle {
        let path = path.into();
        let handle = Arc::new(ImageEntry {
            path: path.clone(),
            width,
            height,
        });
        self.map.insert(path, handle.clone());
        handle
    }

    /// Look up an image by its normalized root-relative path.
    pub fn get(&self, path: &str) -> Option<ImageHandle> {
        self.map.get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.map.contains_key(path)
    }

    /// Drop the store's reference to an entry. Outstanding handles remain
    /// valid; only future lookups miss.
    pub fn evict(&mut self, path: &str) -> bool {
        self.map.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_returns_the_same_handle() {
        let mut store = ImageStore::new();
        store.insert("enemy/furball_1.png", 64, 64);
        let a = store.get("enemy/furball_1.png").unwrap();
        let b = store.get("enemy/furball_1.png").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn eviction_does_not_dangle_outstanding_handles() {
        let mut store = ImageStore::new();
        let handle = store.insert("hud/heart.png", 16, 16);
        assert!(store.evict("hud/heart.png"));
        assert!(store.get("hud/heart.png").is_none());
        assert_eq!(handle.path, "hud/heart.png");
        assert_eq!((handle.width, handle.height), (16, 16));
    }
}
