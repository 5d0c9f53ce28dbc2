//! Sprite adapter component.

use bevy_ecs::prelude::Component;

use crate::imageset::set::AnimationSet;

/// Binds an [`AnimationSet`] to a renderable entity.
///
/// The [`animation`](crate::systems::animation::animation) system drives the
/// set once per tick and forwards its image-changed notifications into the
/// entity's [`Sprite`](crate::components::sprite::Sprite), so the draw call
/// always shows the active frame.
#[derive(Component, Debug)]
pub struct AnimSprite {
    pub set: AnimationSet,
}

impl AnimSprite {
    /// `identity` names the owning entity in warnings.
    pub fn new(identity: impl Into<String>) -> Self {
        AnimSprite {
            set: AnimationSet::new(identity),
        }
    }
}
