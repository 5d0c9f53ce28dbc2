//! Data-driven sprite animation (image set) subsystem.
//!
//! An *image set* describes a multi-frame animation in a small line-oriented
//! text format: one frame per line, with optional per-frame duration ranges
//! and weighted probabilistic branches to other frames. The runtime side is
//! [`set::AnimationSet`], a tick-driven sequencer that owns named clips and
//! walks a play cursor through the active one.
//!
//! Submodules overview:
//! - [`parser`] – reads a descriptor file into a list of [`parser::FrameDescriptor`]
//! - [`frame`] – one loaded frame with its `enter`/`leave` lifecycle hooks
//! - [`clip`] – a named, immutable-after-load sequence of frames
//! - [`set`] – the [`set::AnimationSet`] container and its update loop

pub mod clip;
pub mod frame;
pub mod parser;
pub mod set;
