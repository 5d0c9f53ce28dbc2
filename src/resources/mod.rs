//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animrng` – the shared random source behind frame durations and branches
//! - `engineconfig` – INI-loaded engine settings (pixmap root, defaults)
//! - `imagestore` – loaded images keyed by normalized root-relative path
//! - `worldtime` – tick counter, frame delta and time scale

pub mod animrng;
pub mod engineconfig;
pub mod imagestore;
pub mod worldtime;
