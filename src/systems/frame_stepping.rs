use log::debug;

pub const DEFAULT_FPS: f64 = 24.;

/// Time cursor over a video played or stepped at a fixed frame rate.
/// Every move keeps the previous position in `last_time`.
#[derive(Debug, Clone)]
pub struct FrameStepper {
    fps: f64,
    current_time: f64,
    last_time: f64,
    playing: bool,
}

impl FrameStepper {
    pub fn new(fps: f64) -> Self {
        if fps <= 0. {
            panic!("Frame rate must be above 0");
        }
        FrameStepper {
            fps,
            current_time: 0.,
            last_time: 0.,
            playing: false,
        }
    }

    pub fn frame_duration(&self) -> f64 {
        1. / self.fps
    }

    pub fn next_frame(&mut self) -> f64 {
        self.last_time = self.current_time;
        self.current_time += self.frame_duration();
        debug!("Next frame -> {}s (frame {})", self.current_time, self.frame_number());
        self.current_time
    }

    /// Step back one frame, never before the start of the video
    pub fn previous_frame(&mut self) -> f64 {
        self.last_time = self.current_time;
        self.current_time = (self.current_time - self.frame_duration()).max(0.);
        debug!(
            "Previous frame -> {}s (frame {})",
            self.current_time,
            self.frame_number()
        );
        self.current_time
    }

    /// Jump to a time position reported by the player, e.g. while playing
    pub fn seek(&mut self, time: f64) -> f64 {
        self.last_time = self.current_time;
        self.current_time = time.max(0.);
        self.current_time
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn frame_number(&self) -> u64 {
        frame_number_at(self.current_time, self.fps)
    }

    /// Back to the start, e.g. when a new video is loaded
    pub fn reset(&mut self) {
        self.current_time = 0.;
        self.last_time = 0.;
        self.playing = false;
    }
}

impl Default for FrameStepper {
    fn default() -> Self {
        FrameStepper::new(DEFAULT_FPS)
    }
}

pub fn frame_number_at(time: f64, fps: f64) -> u64 {
    (time * fps).round().max(0.) as u64
}
