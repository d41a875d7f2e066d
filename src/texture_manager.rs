use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::element::ElementId;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("Failed to generate texture")]
    GenerationFailed,
    #[error("Invalid texture dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),
}

/// Caches one GPU texture per image element, evicting the least recently
/// drawn ones when the cache grows past its limit
pub struct TextureManager {
    texture_cache: HashMap<ElementId, TextureHandle>,
    /// Frame in which each texture was last drawn
    last_used: HashMap<ElementId, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.texture_cache.len())
            .field("current_frame", &self.current_frame)
            .field("max_cache_size", &self.max_cache_size)
            .finish()
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets the texture for an element, uploading it with `generator` on a cache miss
    pub fn get_or_create_texture<F>(
        &mut self,
        element_id: ElementId,
        generator: F,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        if let Some(handle) = self.texture_cache.get(&element_id) {
            self.last_used.insert(element_id, self.current_frame);
            return Ok(handle.id());
        }

        self.prune_cache_if_needed();

        let image = generator()?;
        if image.size[0] == 0 || image.size[1] == 0 {
            return Err(TextureGenerationError::InvalidDimensions(image.size[0], image.size[1]));
        }

        let name = format!("element_{}", element_id);
        let handle = ctx.load_texture(name, image, TextureOptions::LINEAR);
        log::debug!("Uploaded texture for element {}", element_id);

        let id = handle.id();
        self.texture_cache.insert(element_id, handle);
        self.last_used.insert(element_id, self.current_frame);
        Ok(id)
    }

    /// Grow the cache so `visible` textures drawn in one frame never evict each other
    pub fn reserve(&mut self, visible: usize) {
        if visible > self.max_cache_size {
            log::debug!("Texture cache grows from {} to {}", self.max_cache_size, visible);
            self.max_cache_size = visible;
        }
    }

    pub fn max_cache_size(&self) -> usize {
        self.max_cache_size
    }

    /// Drops the texture of a specific element
    pub fn invalidate_element(&mut self, element_id: ElementId) {
        self.texture_cache.remove(&element_id);
        self.last_used.remove(&element_id);
    }

    /// Drops textures of every element for which `keep` returns false
    pub fn retain_elements(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        let stale: Vec<ElementId> = self.texture_cache.keys().copied().filter(|id| !keep(*id)).collect();
        for id in stale {
            self.invalidate_element(id);
        }
    }

    /// Prunes the cache if it has reached the maximum size
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(ElementId, u64)> = self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(_, frame)| *frame);

        // Leave room for the texture about to be inserted
        let to_remove = entries.len() + 1 - self.max_cache_size.max(1);
        for (id, _) in entries.iter().take(to_remove) {
            self.texture_cache.remove(id);
            self.last_used.remove(id);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    pub fn get_texture(&self, element_id: ElementId) -> Option<&TextureHandle> {
        self.texture_cache.get(&element_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_texture_generator() -> Result<ColorImage, TextureGenerationError> {
        Ok(ColorImage::new([10, 10], egui::Color32::WHITE))
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ElementId::new();

        let texture_id1 = manager.get_or_create_texture(id, mock_texture_generator, &ctx).unwrap();
        // Second call must not run the generator
        let texture_id2 = manager
            .get_or_create_texture(id, || Err(TextureGenerationError::GenerationFailed), &ctx)
            .unwrap();

        assert_eq!(texture_id1, texture_id2);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_invalidation() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ElementId::new();

        manager.get_or_create_texture(id, mock_texture_generator, &ctx).unwrap();
        assert_eq!(manager.cache_size(), 1);

        manager.invalidate_element(id);
        assert_eq!(manager.cache_size(), 0);
    }

    #[test]
    fn test_retain_elements() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let kept = ElementId::new();
        let dropped = ElementId::new();

        manager.get_or_create_texture(kept, mock_texture_generator, &ctx).unwrap();
        manager.get_or_create_texture(dropped, mock_texture_generator, &ctx).unwrap();
        manager.retain_elements(|id| id == kept);

        assert!(manager.get_texture(kept).is_some());
        assert!(manager.get_texture(dropped).is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let (a, b, c) = (ElementId::new(), ElementId::new(), ElementId::new());

        manager.get_or_create_texture(a, mock_texture_generator, &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture(b, mock_texture_generator, &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture(c, mock_texture_generator, &ctx).unwrap();

        assert_eq!(manager.cache_size(), 2);
        assert!(manager.get_texture(a).is_none());
        assert!(manager.get_texture(b).is_some());
        assert!(manager.get_texture(c).is_some());
    }

    #[test]
    fn test_reserve_keeps_every_visible_texture() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let ids: Vec<ElementId> = (0..5).map(|_| ElementId::new()).collect();
        manager.reserve(ids.len());
        manager.reserve(1);
        assert_eq!(manager.max_cache_size(), 5);

        manager.begin_frame();
        for id in &ids {
            manager.get_or_create_texture(*id, mock_texture_generator, &ctx).unwrap();
        }
        // Later frames must be served entirely from the cache
        for _ in 0..3 {
            manager.begin_frame();
            for id in &ids {
                manager
                    .get_or_create_texture(*id, || Err(TextureGenerationError::GenerationFailed), &ctx)
                    .unwrap();
            }
        }
        assert_eq!(manager.cache_size(), 5);
    }

    #[test]
    fn test_rejects_empty_image() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let result = manager.get_or_create_texture(ElementId::new(), || Ok(ColorImage::new([0, 4], egui::Color32::WHITE)), &ctx);
        assert!(matches!(result, Err(TextureGenerationError::InvalidDimensions(0, 4))));
    }
}
