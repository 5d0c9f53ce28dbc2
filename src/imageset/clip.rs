//! A named sequence of animation frames.

use crate::imageset::frame::Frame;

/// An ordered run of frames addressable by name from an
/// [`AnimationSet`](crate::imageset::set::AnimationSet).
///
/// Frames keep their load order and the sequence is never resized while a
/// clip is registered; branch targets inside the frames index this vector.
#[derive(Debug, Default, Clone)]
pub struct Clip {
    frames: Vec<Frame>,
}

impl Clip {
    pub fn new() -> Self {
        Clip { frames: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub(crate) fn frame_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.frames.iter_mut()
    }
}
