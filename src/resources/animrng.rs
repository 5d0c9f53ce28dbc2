//! Shared random source for animation timing and branching.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// The single generator behind every [`AnimationSet`]'s randomized frame
/// durations and branch draws. Injected rather than ambient so tests can
/// seed it; callers must not rely on determinism or on independence between
/// sets.
///
/// [`AnimationSet`]: crate::imageset::set::AnimationSet
#[derive(Resource, Debug, Default)]
pub struct AnimRng(pub Rng);

impl AnimRng {
    /// Deterministic generator, for tests.
    pub fn with_seed(seed: u64) -> Self {
        AnimRng(Rng::with_seed(seed))
    }
}
