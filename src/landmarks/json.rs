use super::types::HandLandmarkerResult;
use super::LandmarkSource;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to read results from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse results in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A results file holds one frame or a recorded sequence of frames
#[derive(Deserialize)]
#[serde(untagged)]
enum ResultsFile {
    Sequence(Vec<HandLandmarkerResult>),
    Single(HandLandmarkerResult),
}

/// Landmark source replaying results recorded as JSON
pub struct JsonResultSource {
    results: VecDeque<HandLandmarkerResult>,
}

impl JsonResultSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ResultsError> {
        let path = path.as_ref();
        tracing::info!("Loading detection results from {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::from_slice(&bytes).map_err(|source| ResultsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Loaded {} result frame(s)", source.results.len());
        Ok(source)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let results = match serde_json::from_slice::<ResultsFile>(bytes)? {
            ResultsFile::Sequence(frames) => frames.into(),
            ResultsFile::Single(frame) => VecDeque::from([frame]),
        };
        Ok(Self { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl LandmarkSource for JsonResultSource {
    fn next_result(&mut self) -> anyhow::Result<Option<HandLandmarkerResult>> {
        Ok(self.results.pop_front())
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.results.len())
    }
}
