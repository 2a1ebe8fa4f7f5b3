mod json;
pub mod types;

pub use json::{JsonResultSource, ResultsError};
pub use types::{Category, HandLandmarkerResult, NormalizedLandmark};

use anyhow::Result;

/// Trait for hand-landmark result producers
/// Allows swapping between recorded results and a live inference backend
pub trait LandmarkSource {
    /// Get the next detection result
    ///
    /// # Returns
    /// * `None` once the source is exhausted
    fn next_result(&mut self) -> Result<Option<HandLandmarkerResult>>;

    /// Number of results left, if known
    fn remaining(&self) -> Option<usize> {
        None
    }
}
