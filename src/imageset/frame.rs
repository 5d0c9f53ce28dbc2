//! A single animation frame and its lifecycle hooks.

use fastrand::Rng;

use crate::imageset::parser::FrameDescriptor;
use crate::resources::imagestore::ImageHandle;

/// One entry in an animation clip: a shared image handle, the descriptor it
/// was loaded from, and the live duration drawn for the current showing.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Shared handle into the image store. The store owns the pixel data;
    /// the frame only keeps it alive.
    pub image: ImageHandle,
    /// Milliseconds this showing of the frame remains current. Re-drawn by
    /// [`Frame::enter`] every time the frame becomes current.
    pub live_duration: u32,
    info: FrameDescriptor,
}

impl Frame {
    pub fn new(image: ImageHandle, info: FrameDescriptor) -> Self {
        Frame {
            image,
            live_duration: info.duration_min,
            info,
        }
    }

    /// Descriptor this frame was loaded from.
    pub fn info(&self) -> &FrameDescriptor {
        &self.info
    }

    /// Overwrite the duration range with a fixed value, removing jitter.
    pub(crate) fn set_fixed_duration(&mut self, ms: u32) {
        self.info.duration_min = ms;
        self.info.duration_max = ms;
        self.live_duration = ms;
    }

    /// Called when the frame becomes current: draw a fresh live duration
    /// uniformly from `[duration_min, duration_max]`.
    pub fn enter(&mut self, rng: &mut Rng) {
        self.live_duration = rng.u32(self.info.duration_min..=self.info.duration_max);
    }

    /// Called when the frame expires: pick a branch target, if any.
    ///
    /// Draws uniformly in `[1, 100]` and walks the branch table in order,
    /// subtracting each entry's percentage. The first entry whose percentage
    /// covers the remaining draw is taken. A draw beyond the sum of all
    /// percentages means no branch (sequential advance).
    pub fn leave(&self, rng: &mut Rng) -> Option<usize> {
        if self.info.branches.is_empty() {
            return None;
        }

        let mut draw = rng.u32(1..=100);
        for branch in &self.info.branches {
            if draw <= branch.percent {
                return Some(branch.target);
            }
            draw -= branch.percent;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imageset::parser::Branch;
    use crate::resources::imagestore::ImageEntry;
    use std::sync::Arc;

    fn test_frame(min: u32, max: u32, branches: &[(usize, u32)]) -> Frame {
        let image = Arc::new(ImageEntry {
            path: "test.png".to_string(),
            width: 32,
            height: 32,
        });
        let branches = branches
            .iter()
            .map(|&(target, percent)| Branch { target, percent })
            .collect();
        Frame::new(
            image,
            FrameDescriptor {
                image_path: "test.png".to_string(),
                duration_min: min,
                duration_max: max,
                branches,
            },
        )
    }

    #[test]
    fn enter_draws_within_the_duration_range() {
        let mut rng = Rng::with_seed(7);
        let mut frame = test_frame(40, 90, &[]);
        for _ in 0..1000 {
            frame.enter(&mut rng);
            assert!((40..=90).contains(&frame.live_duration));
        }
    }

    #[test]
    fn enter_with_fixed_range_always_yields_the_same_duration() {
        let mut rng = Rng::with_seed(7);
        let mut frame = test_frame(120, 120, &[]);
        for _ in 0..100 {
            frame.enter(&mut rng);
            assert_eq!(frame.live_duration, 120);
        }
    }

    #[test]
    fn leave_without_branches_is_sequential() {
        let mut rng = Rng::with_seed(7);
        let frame = test_frame(100, 100, &[]);
        for _ in 0..100 {
            assert_eq!(frame.leave(&mut rng), None);
        }
    }

    #[test]
    fn leave_with_certain_branch_always_takes_it() {
        let mut rng = Rng::with_seed(7);
        let frame = test_frame(100, 100, &[(0, 100)]);
        for _ in 0..100 {
            assert_eq!(frame.leave(&mut rng), Some(0));
        }
    }

    #[test]
    fn leave_distribution_matches_branch_weights() {
        let mut rng = Rng::with_seed(42);
        let frame = test_frame(100, 100, &[(2, 30), (4, 50)]);

        let mut to_2 = 0u32;
        let mut to_4 = 0u32;
        let mut fallthrough = 0u32;
        const SAMPLES: u32 = 10_000;
        for _ in 0..SAMPLES {
            match frame.leave(&mut rng) {
                Some(2) => to_2 += 1,
                Some(4) => to_4 += 1,
                None => fallthrough += 1,
                other => panic!("unexpected branch target: {:?}", other),
            }
        }

        let pct = |n: u32| n as f64 * 100.0 / SAMPLES as f64;
        assert!((pct(to_2) - 30.0).abs() < 5.0, "to_2 = {}%", pct(to_2));
        assert!((pct(to_4) - 50.0).abs() < 5.0, "to_4 = {}%", pct(to_4));
        assert!(
            (pct(fallthrough) - 20.0).abs() < 5.0,
            "fallthrough = {}%",
            pct(fallthrough)
        );
    }

    #[test]
    fn set_fixed_duration_collapses_the_range() {
        let mut rng = Rng::with_seed(7);
        let mut frame = test_frame(40, 90, &[]);
        frame.set_fixed_duration(55);
        assert_eq!(frame.live_duration, 55);
        for _ in 0..50 {
            frame.enter(&mut rng);
            assert_eq!(frame.live_duration, 55);
        }
    }

    #[test]
    fn leave_walks_branches_in_order() {
        // two branches covering the whole range: the draw always lands in
        // one of them, never in the fallthrough
        let mut rng = Rng::with_seed(3);
        let frame = test_frame(100, 100, &[(5, 60), (9, 40)]);
        for _ in 0..1000 {
            let target = frame.leave(&mut rng);
            assert!(target == Some(5) || target == Some(9), "got {:?}", target);
        }
    }
}
