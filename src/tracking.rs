use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// COCO-17 keypoint order, as produced by MoveNet and PoseNet
pub const LEFT_ANKLE_INDEX: usize = 15;
pub const RIGHT_ANKLE_INDEX: usize = 16;

pub const LEFT_ANKLE_NAME: &str = "left_ankle";
pub const RIGHT_ANKLE_NAME: &str = "right_ankle";

/// A single keypoint in pixel space, as per the pose-detection output
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pose {
    pub keypoints: Vec<Keypoint>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// All poses estimated for one video frame, stamped with the frame's time position (seconds)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoseFrame {
    pub timestamp: f64,
    #[serde(default)]
    pub poses: Vec<Pose>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnkleSample {
    pub timestamp: f64,
    pub left_x: f64,
    pub right_x: f64,
}

/// Where to find the ankles in a pose, and how confident they must be
#[derive(Debug, Clone, Copy)]
pub struct AnkleSelector {
    pub left_index: usize,
    pub right_index: usize,
    pub min_score: Option<f64>,
}

impl Default for AnkleSelector {
    fn default() -> Self {
        AnkleSelector {
            left_index: LEFT_ANKLE_INDEX,
            right_index: RIGHT_ANKLE_INDEX,
            min_score: None,
        }
    }
}

impl Pose {
    /// Named keypoints win over positional ones; that way 33-point
    /// BlazePose output resolves the same as 17-point MoveNet output.
    pub fn keypoint(&self, name: &str, index: usize) -> Option<&Keypoint> {
        self.keypoints
            .iter()
            .find(|k| k.name.as_deref() == Some(name))
            .or_else(|| self.keypoints.get(index))
    }
}

impl AnkleSelector {
    fn accept<'a>(&self, keypoint: Option<&'a Keypoint>) -> Option<&'a Keypoint> {
        let keypoint = keypoint?;
        match (self.min_score, keypoint.score) {
            (Some(min), Some(score)) if score < min => None,
            _ => Some(keypoint),
        }
    }

    /// Ankle x-coordinates from the first pose in the frame, if there is one
    pub fn extract(&self, frame: &PoseFrame) -> Option<AnkleSample> {
        let pose = frame.poses.first()?;
        let left = self.accept(pose.keypoint(LEFT_ANKLE_NAME, self.left_index))?;
        let right = self.accept(pose.keypoint(RIGHT_ANKLE_NAME, self.right_index))?;
        Some(AnkleSample {
            timestamp: frame.timestamp,
            left_x: left.x,
            right_x: right.x,
        })
    }
}

/// Accepts both struct encodings: positional arrays (`rmp_serde::to_vec`)
/// and named maps (`rmp_serde::to_vec_named`). Optional fields are always
/// written, so positional frames stay aligned.
pub fn decode_msgpack_frames(bytes: &[u8]) -> Result<Vec<PoseFrame>> {
    rmp_serde::from_slice::<Vec<PoseFrame>>(bytes).context("failed to decode MessagePack pose frames")
}

pub fn decode_json_frames(bytes: &[u8]) -> Result<Vec<PoseFrame>> {
    serde_json::from_slice::<Vec<PoseFrame>>(bytes).context("failed to decode JSON pose frames")
}
