//! The [`AnimationSet`] container: named clips, play cursor, and the
//! tick-driven update loop.

use std::path::Path;

use fastrand::Rng;
use log::warn;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::imageset::clip::Clip;
use crate::imageset::frame::Frame;
use crate::imageset::parser::{self, FrameDescriptor};
use crate::resources::imagestore::{ImageHandle, ImageStore};

/// Display time applied to frames that specify none of their own.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 1000;

/// Per-tick message handed to [`AnimationSet::update`] by the owner's update
/// pass. `number` is the duplicate-call guard: two calls carrying the same
/// tick number leave the set untouched on the second call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub number: u64,
    /// Unscaled milliseconds since the previous tick.
    pub delta_ms: u32,
    /// Time-dilation factor; 1.0 is normal speed.
    pub speed: f32,
}

/// A pending "current image changed" notification for the sprite adapter.
#[derive(Debug, Clone)]
pub struct ImageChange {
    /// The new current image, or `None` for "show nothing".
    pub image: Option<ImageHandle>,
    /// True when the change establishes a new base image for the entity
    /// (per-image settings should be re-applied).
    pub new_start: bool,
}

/// Owns the named clips of one animated entity and sequences the active one.
///
/// The set is created by its owning entity and dropped with it; it has no
/// independent lifetime. All randomness comes through the injected
/// [`fastrand::Rng`], shared engine-wide via
/// [`AnimRng`](crate::resources::animrng::AnimRng).
#[derive(Debug, Default)]
pub struct AnimationSet {
    clips: FxHashMap<String, Clip>,
    /// Name of the selected clip, if any.
    active: Option<String>,
    /// Index of the current frame within the active clip; `None` means no
    /// current image.
    cursor: Option<usize>,
    /// Scaled-milliseconds accumulator carried across frame transitions.
    elapsed: f32,
    enabled: bool,
    default_duration: u32,
    last_tick: Option<u64>,
    current_image: Option<ImageHandle>,
    pending: Option<ImageChange>,
    /// Owning entity name, used in warnings.
    identity: String,
}

impl AnimationSet {
    pub fn new(identity: impl Into<String>) -> Self {
        AnimationSet {
            default_duration: DEFAULT_FRAME_DURATION_MS,
            identity: identity.into(),
            ..Default::default()
        }
    }

    /// Append one still frame to the clip registered under `name`, creating
    /// the clip if absent. A `duration` of 0 selects the set's default.
    pub fn add_single_image(&mut self, name: &str, image: ImageHandle, duration: u32) {
        let ms = if duration == 0 {
            self.default_duration
        } else {
            duration
        };
        let info = FrameDescriptor {
            image_path: image.path.clone(),
            duration_min: ms,
            duration_max: ms,
            branches: SmallVec::new(),
        };
        self.clips
            .entry(name.to_string())
            .or_default()
            .push(Frame::new(image, info));
    }

    /// Load a clip from `path` (root-relative) and register it under `name`.
    ///
    /// A `.png` path is treated as a single still image; anything else is
    /// parsed as a descriptor file. Frames whose image the store cannot
    /// resolve are skipped with a warning, so a partially resolvable
    /// descriptor still yields a (shorter) clip. Returns `false` and logs if
    /// the file is unreadable, empty, or no frame resolved at all.
    pub fn add_clip(
        &mut self,
        name: &str,
        store: &ImageStore,
        root: &Path,
        path: &Path,
        duration: u32,
    ) -> bool {
        let default_ms = if duration == 0 {
            self.default_duration
        } else {
            duration
        };

        let mut clip = Clip::new();
        if path.extension().is_some_and(|ext| ext == "png") {
            // a single still image, no descriptor file involved
            let key = parser::resolve_image_path(Path::new(""), &path.to_string_lossy());
            match key.as_deref().and_then(|k| store.get(k)) {
                Some(image) => {
                    let info = FrameDescriptor {
                        image_path: key.unwrap_or_default(),
                        duration_min: default_ms,
                        duration_max: default_ms,
                        branches: SmallVec::new(),
                    };
                    clip.push(Frame::new(image, info));
                }
                None => {
                    warn!(
                        "image {:?} not found in store: {}",
                        path,
                        self.identity
                    );
                }
            }
        } else {
            let descriptors = match parser::parse(root, path, default_ms) {
                Ok(descriptors) => descriptors,
                Err(err) => {
                    warn!(
                        "unable to read image set {:?}: {} ({})",
                        path,
                        err,
                        self.identity
                    );
                    return false;
                }
            };
            if descriptors.is_empty() {
                warn!("empty image set {:?}: {}", path, self.identity);
                return false;
            }

            for desc in descriptors {
                match store.get(&desc.image_path) {
                    Some(image) => clip.push(Frame::new(image, desc)),
                    None => {
                        warn!(
                            "image {:?} not found in store, frame skipped: {}",
                            desc.image_path, self.identity
                        );
                    }
                }
            }
        }

        if clip.is_empty() {
            warn!(
                "no frames added from image set {:?}: {}",
                path,
                self.identity
            );
            return false;
        }

        self.clips.insert(name.to_string(), clip);
        true
    }

    /// Make the clip registered under `name` the active one.
    ///
    /// An unknown name clears the current image, disables animation, warns
    /// and returns `false`. Otherwise the cursor moves to the clip's first
    /// frame, animation is enabled iff the clip has more than one frame, the
    /// elapsed accumulator resets and the first frame is entered so its
    /// randomized duration is established before the first `update`.
    ///
    /// `new_start` is forwarded on the image-change notification; the sprite
    /// adapter re-applies per-image defaults when it is set.
    pub fn set_clip(&mut self, name: &str, new_start: bool, rng: &mut Rng) -> bool {
        let Some(len) = self.clips.get(name).map(Clip::len) else {
            warn!(
                "named image set {:?} not found: {}",
                name, self.identity
            );
            self.set_frame_index(None, new_start);
            self.enabled = false;
            return false;
        };

        if self.active.as_deref() != Some(name) {
            self.active = Some(name.to_string());
            // frame 0 of the new clip is a different frame even if the old
            // cursor was already 0, so force the notification
            self.cursor = None;
        }
        self.set_frame_index(Some(0), new_start);
        self.enabled = len > 1;
        self.elapsed = 0.0;
        if let Some(frame) = self.current_frame_mut() {
            frame.enter(rng);
        }
        true
    }

    /// Move the cursor within the active clip and queue the image change.
    ///
    /// `None` shows no image. An in-range index notifies the adapter with
    /// the frame's image. An out-of-range index only warns; cursor and image
    /// stay as they were.
    pub fn set_frame_index(&mut self, index: Option<usize>, new_start: bool) {
        if index == self.cursor {
            return;
        }
        match index {
            None => {
                self.cursor = None;
                self.notify(None, new_start);
            }
            Some(i) => match self.active_clip().and_then(|clip| clip.frame(i)) {
                Some(frame) => {
                    let image = frame.image.clone();
                    self.cursor = Some(i);
                    self.notify(Some(image), new_start);
                }
                None => {
                    let len = self.active_clip().map_or(0, Clip::len);
                    warn!(
                        "frame index {} out of range (clip has {} frames): {}",
                        i, len, self.identity
                    );
                }
            },
        }
    }

    /// Advance the animation by one tick.
    ///
    /// No-op when disabled, when the active clip has at most one frame, or
    /// when `tick.number` was already processed. Otherwise accumulates
    /// `delta_ms * speed` and steps through as many frame transitions as the
    /// accumulated time covers, carrying any overshoot into the next frame.
    pub fn update(&mut self, tick: Tick, rng: &mut Rng) {
        if self.last_tick == Some(tick.number) {
            return;
        }
        self.last_tick = Some(tick.number);

        if !self.enabled {
            return;
        }
        let len = match self.active_clip() {
            Some(clip) if clip.len() > 1 => clip.len(),
            _ => return,
        };

        self.elapsed += tick.delta_ms as f32 * tick.speed.max(0.0);

        let mut cursor = match self.cursor {
            Some(i) if i < len => i,
            _ => {
                warn!(
                    "animation cursor {:?} out of range (clip has {} frames), forcing frame 0: {}",
                    self.cursor, len, self.identity
                );
                self.cursor = None;
                self.set_frame_index(Some(0), false);
                // same recovery as set_clip: fresh duration, fresh accumulator
                self.elapsed = 0.0;
                if let Some(frame) = self.current_frame_mut() {
                    frame.enter(rng);
                }
                return;
            }
        };

        let mut zero_run = 0;
        loop {
            let live = match self.current_frame() {
                Some(frame) => frame.live_duration,
                None => return,
            };
            if self.elapsed < live as f32 {
                break;
            }

            // a whole cycle of zero-duration frames can never consume the
            // accumulator, so drop it instead of spinning
            if live == 0 {
                zero_run += 1;
                if zero_run > len {
                    warn!(
                        "zero-duration frame cycle in clip {:?}, dropping {}ms: {}",
                        self.active, self.elapsed, self.identity
                    );
                    self.elapsed = 0.0;
                    break;
                }
            } else {
                zero_run = 0;
            }

            let target = self.current_frame().and_then(|frame| frame.leave(rng));
            let next = match target {
                Some(t) if t < len => t,
                _ if cursor + 1 >= len => 0,
                _ => cursor + 1,
            };

            // keep the overshoot so timing stays cumulative across frames
            self.elapsed -= live as f32;
            self.set_frame_index(Some(next), false);
            if let Some(frame) = self.current_frame_mut() {
                frame.enter(rng);
            }
            cursor = next;
        }
    }

    /// Drop every clip and the active selection. With `reset_image` the
    /// adapter is also told to show no image.
    pub fn clear_images(&mut self, reset_image: bool) {
        self.clips.clear();
        self.active = None;
        self.cursor = None;
        self.elapsed = 0.0;
        self.enabled = false;
        if reset_image {
            self.notify(None, false);
        }
    }

    /// Overwrite every frame's duration range with a fixed `ms`, removing
    /// jitter. With `set_as_default` future loads use `ms` too.
    pub fn set_uniform_duration(&mut self, ms: u32, set_as_default: bool) {
        for clip in self.clips.values_mut() {
            for frame in clip.frames_mut() {
                frame.set_fixed_duration(ms);
            }
        }
        if set_as_default {
            self.default_duration = ms;
        }
    }

    pub fn set_default_duration(&mut self, ms: u32) {
        self.default_duration = ms;
    }

    pub fn default_duration(&self) -> u32 {
        self.default_duration
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Index of the current frame within the active clip, if any.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Scaled milliseconds accumulated toward the current frame's expiry.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The image the renderer should draw right now.
    pub fn current_image(&self) -> Option<&ImageHandle> {
        self.current_image.as_ref()
    }

    pub fn active_clip_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn clip(&self, name: &str) -> Option<&Clip> {
        self.clips.get(name)
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        let i = self.cursor?;
        self.active_clip()?.frame(i)
    }

    /// Drain the pending image-changed notification for the sprite adapter.
    pub fn take_image_change(&mut self) -> Option<ImageChange> {
        self.pending.take()
    }

    fn active_clip(&self) -> Option<&Clip> {
        self.clips.get(self.active.as_deref()?)
    }

    fn current_frame_mut(&mut self) -> Option<&mut Frame> {
        let i = self.cursor?;
        let name = self.active.as_deref()?;
        self.clips.get_mut(name)?.frame_mut(i)
    }

    fn notify(&mut self, image: Option<ImageHandle>, new_start: bool) {
        self.current_image = image.clone();
        self.pending = Some(ImageChange { image, new_start });
    }
}

/// Load `path` as a throwaway clip and return the image at `index`.
///
/// For callers that need one still frame without retaining an animation
/// object. Returns `None` on any failure.
pub fn fetch_single_frame(
    store: &ImageStore,
    root: &Path,
    path: &Path,
    index: usize,
) -> Option<ImageHandle> {
    let mut set = AnimationSet::new("fetch_single_frame");
    if !set.add_clip("still", store, root, path, 0) {
        return None;
    }
    set.clip("still")?.frame(index).map(|frame| frame.image.clone())
}
