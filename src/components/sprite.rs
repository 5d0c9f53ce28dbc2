use bevy_ecs::prelude::Component;

use crate::resources::imagestore::ImageHandle;

/// Renderable 2D sprite: the image the renderer draws this tick, plus flip
/// flags. `image == None` draws nothing (an entity whose clip failed to load
/// stays blank rather than crashing the renderer).
#[derive(Component, Clone, Debug, Default)]
pub struct Sprite {
    pub image: Option<ImageHandle>,
    pub flip_h: bool,
    pub flip_v: bool,
}
