//! Animation system.
//!
//! Drives every [`AnimSprite`]'s animation set once per tick and forwards
//! "current image changed" notifications into the entity's [`Sprite`].
//!
//! # Animation Flow
//!
//! 1. Clips are loaded into each entity's [`AnimationSet`](crate::imageset::set::AnimationSet)
//!    via `add_clip`/`add_single_image` at setup time
//! 2. Game logic selects the active clip with `set_clip`
//! 3. This system builds a [`Tick`] from [`WorldTime`] and calls `update`
//! 4. Pending image changes are drained into [`Sprite::image`] for the renderer
//!
//! # Ordering
//!
//! Runs after the host loop has advanced [`WorldTime`]; the tick number in
//! the clock is the duplicate-update guard, so scheduling this system twice
//! in one tick leaves the sets untouched the second time.

use bevy_ecs::prelude::*;

use crate::components::animsprite::AnimSprite;
use crate::components::sprite::Sprite;
use crate::imageset::set::Tick;
use crate::resources::animrng::AnimRng;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite image.
///
/// Contract
/// - Reads [`WorldTime`] for the tick number, unscaled delta and time scale.
/// - Mutates each [`AnimSprite`]'s set and the paired [`Sprite`] image.
/// - Draws all randomness from the shared [`AnimRng`] resource.
pub fn animation(
    mut query: Query<(&mut AnimSprite, &mut Sprite)>,
    time: Res<WorldTime>,
    mut rng: ResMut<AnimRng>,
) {
    let tick = Tick {
        number: time.frame_count,
        delta_ms: time.delta_ms,
        speed: time.time_scale,
    };

    for (mut anim, mut sprite) in query.iter_mut() {
        anim.set.update(tick, &mut rng.0);
        if let Some(change) = anim.set.take_image_change() {
            if change.new_start {
                // a new base image drops any per-entity mirroring
                sprite.flip_h = false;
                sprite.flip_v = false;
            }
            sprite.image = change.image;
        }
    }
}
