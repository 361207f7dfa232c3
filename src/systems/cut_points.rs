use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::tracking::{AnkleSelector, PoseFrame};

use super::stability::{MotionStabilityTracker, SampleVelocities};

/// A position in the video where both ankles have settled
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CutPoint {
    pub timestamp: f64,
    pub frame_number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No usable pose (or ankles) in this frame; the tracker was not touched
    NoPose,
    /// The sample was rejected by the tracker (time did not move forward)
    Skipped,
    Tracked {
        velocities: SampleVelocities,
        cut_point: Option<CutPoint>,
    },
}

pub struct CutPointDetector {
    tracker: MotionStabilityTracker,
    selector: AnkleSelector,
    threshold: f64,
    cut_points: Vec<CutPoint>,
}

impl CutPointDetector {
    pub fn new(selector: AnkleSelector, threshold: f64) -> Self {
        check_threshold(threshold);
        CutPointDetector {
            tracker: MotionStabilityTracker::new(),
            selector,
            threshold,
            cut_points: Vec::new(),
        }
    }

    /// `frame_number` is the caller's frame index for this frame, used to label cut points
    pub fn process_frame(&mut self, frame: &PoseFrame, frame_number: u64) -> FrameOutcome {
        let Some(sample) = self.selector.extract(frame) else {
            debug!("No pose with ankles at {}s; nothing to track", frame.timestamp);
            return FrameOutcome::NoPose;
        };

        let velocities =
            match self
                .tracker
                .record_sample(sample.timestamp, sample.left_x, sample.right_x)
            {
                Ok(v) => v,
                Err(e) => {
                    warn!("Skipping frame: {}", e);
                    return FrameOutcome::Skipped;
                }
            };

        let cut_point = if self.tracker.is_stable(self.threshold) {
            let cut = CutPoint {
                timestamp: sample.timestamp,
                frame_number,
            };
            info!("cut at frame: {} ({}s)", cut.frame_number, cut.timestamp);
            self.cut_points.push(cut);
            Some(cut)
        } else {
            None
        };

        FrameOutcome::Tracked {
            velocities,
            cut_point,
        }
    }

    pub fn cut_points(&self) -> &[CutPoint] {
        &self.cut_points
    }

    pub fn tracker(&self) -> &MotionStabilityTracker {
        &self.tracker
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        check_threshold(threshold);
        self.threshold = threshold;
    }

    /// Start a new tracking session, e.g. for a newly loaded video
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.cut_points.clear();
    }
}

fn check_threshold(threshold: f64) {
    // NaN is rejected too
    if !(threshold >= 0.) {
        panic!("Stability threshold must be non-negative, got {}", threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{Keypoint, Pose};

    fn frame(timestamp: f64, left_x: f64, right_x: f64) -> PoseFrame {
        let mut keypoints: Vec<Keypoint> = (0..17)
            .map(|_| Keypoint {
                x: 0.,
                y: 0.,
                score: Some(1.),
                name: None,
            })
            .collect();
        keypoints[15].x = left_x;
        keypoints[16].x = right_x;
        PoseFrame {
            timestamp,
            poses: vec![Pose {
                keypoints,
                score: None,
            }],
        }
    }

    fn detector() -> CutPointDetector {
        CutPointDetector::new(AnkleSelector::default(), 200.)
    }

    #[test]
    fn test_still_ankles_emit_cut_points() {
        let mut d = detector();
        assert!(matches!(
            d.process_frame(&frame(0., 100., 200.), 0),
            FrameOutcome::Tracked { cut_point: None, .. }
        ));
        let outcome = d.process_frame(&frame(1. / 24., 101., 200.), 1);
        match outcome {
            FrameOutcome::Tracked {
                cut_point: Some(cut),
                ..
            } => {
                assert_eq!(cut.frame_number, 1);
                assert_eq!(cut.timestamp, 1. / 24.);
            }
            other => panic!("expected a cut point, got {:?}", other),
        }
        assert_eq!(d.cut_points().len(), 1);
    }

    #[test]
    fn test_fast_ankle_blocks_cut_points() {
        let mut d = detector();
        d.process_frame(&frame(0., 0., 0.), 0);
        // 50px in one frame at 24fps is 1200 px/s
        d.process_frame(&frame(1. / 24., 50., 0.), 1);
        d.process_frame(&frame(2. / 24., 50., 0.), 2);
        assert!(d.cut_points().is_empty());
    }

    #[test]
    fn test_empty_and_repeated_frames() {
        let mut d = detector();
        let empty = PoseFrame {
            timestamp: 0.,
            poses: Vec::new(),
        };
        assert_eq!(d.process_frame(&empty, 0), FrameOutcome::NoPose);
        d.process_frame(&frame(0.5, 0., 0.), 12);
        assert_eq!(d.process_frame(&frame(0.5, 0., 0.), 12), FrameOutcome::Skipped);
        assert!(d.tracker().last_velocities().is_none());
    }

    #[test]
    fn test_reset_clears_session() {
        let mut d = detector();
        d.process_frame(&frame(0., 0., 0.), 0);
        d.process_frame(&frame(1., 0., 0.), 24);
        assert_eq!(d.cut_points().len(), 1);
        d.reset();
        assert!(d.cut_points().is_empty());
        assert!(!d.tracker().is_stable(d.threshold()));
    }

    #[test]
    fn test_set_threshold_takes_effect() {
        let mut d = detector();
        d.process_frame(&frame(0., 0., 0.), 0);
        d.process_frame(&frame(1., 100., 0.), 24);
        assert_eq!(d.cut_points().len(), 1);
        d.set_threshold(0.);
        assert_eq!(d.threshold(), 0.);
        d.process_frame(&frame(2., 100., 0.), 48);
        // the 100 px/s sample is still retained, so no new cut
        assert_eq!(d.cut_points().len(), 1);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_new_rejects_negative_threshold() {
        CutPointDetector::new(AnkleSelector::default(), -1.);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_set_threshold_rejects_negative() {
        detector().set_threshold(-0.5);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_set_threshold_rejects_nan() {
        detector().set_threshold(f64::NAN);
    }
}
