use serde::{Deserialize, Serialize};

/// Landmark in coordinates normalized to the source image
///
/// `x` and `y` are in [0, 1]. `z` is relative depth with the wrist as origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl NormalizedLandmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Classification label, used for handedness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_name: String,
    pub score: f32,
    #[serde(default)]
    pub index: i32,
}

/// Hand landmarks detected in a single frame
///
/// Each entry of `landmarks` is one hand, 21 points in anatomical order
/// starting at the wrist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandLandmarkerResult {
    pub landmarks: Vec<Vec<NormalizedLandmark>>,
    #[serde(default)]
    pub handedness: Vec<Vec<Category>>,
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl HandLandmarkerResult {
    pub fn new(landmarks: Vec<Vec<NormalizedLandmark>>) -> Self {
        Self {
            landmarks,
            ..Default::default()
        }
    }

    /// Number of detected hands
    pub fn hands(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}
