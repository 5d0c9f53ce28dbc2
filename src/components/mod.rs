//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animsprite`] – adapter binding an animation set to a renderable entity
//! - [`sprite`] – 2D sprite rendering component

pub mod animsprite;
pub mod sprite;
