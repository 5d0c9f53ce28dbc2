//! Bracken Engine library.
//!
//! A 2D platform-game engine built around a data-driven sprite animation
//! subsystem: a small line-oriented descriptor format for multi-frame
//! animations, a tick-driven sequencer with randomized per-frame durations,
//! and weighted probabilistic branching between frames. Every visible entity
//! renders through it.
//!
//! - [`imageset`] – descriptor parser, frames, clips and the animation set
//! - [`components`] – ECS components (renderable sprite, animation adapter)
//! - [`resources`] – ECS resources (image cache, frame clock, rng, config)
//! - [`systems`] – ECS systems (animation update, time update)

pub mod components;
pub mod imageset;
pub mod resources;
pub mod systems;
