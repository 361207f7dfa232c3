pub mod cut_points;
pub mod frame_stepping;
pub mod stability;
pub mod velocity_history;

use cut_points::{CutPointDetector, FrameOutcome};
use frame_stepping::FrameStepper;
use log::info;

use crate::{detector_config::DetectorConfig, tracking::PoseFrame};

/// Everything one tracking session owns; driven by a single frame loop
pub struct Systems {
    pub cut_point_detector: CutPointDetector,
    pub frame_stepper: FrameStepper,
}

impl Systems {
    pub fn new(config: &DetectorConfig) -> Systems {
        info!(
            "Stability threshold {} px/s at {} fps",
            config.stability_threshold, config.fps
        );
        Systems {
            cut_point_detector: CutPointDetector::new(
                config.ankle_selector(),
                config.stability_threshold,
            ),
            frame_stepper: FrameStepper::new(config.fps),
        }
    }

    /// Move the time cursor to the frame's position and feed it to the detector;
    /// cut points are labelled with the cursor's frame number
    pub fn handle_frame(&mut self, frame: &PoseFrame) -> FrameOutcome {
        self.frame_stepper.seek(frame.timestamp);
        let frame_number = self.frame_stepper.frame_number();
        self.cut_point_detector.process_frame(frame, frame_number)
    }

    /// New video loaded
    pub fn reset(&mut self) {
        info!("Resetting tracking session");
        self.cut_point_detector.reset();
        self.frame_stepper.reset();
    }
}
