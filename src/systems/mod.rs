//! ECS systems.
//!
//! Submodules overview:
//! - [`animation`] – per-tick animation sequencing and sprite image sync
//! - [`time`] – advances the shared frame clock once per host-loop iteration

pub mod animation;
pub mod time;
