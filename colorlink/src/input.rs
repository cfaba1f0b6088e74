// input.rs - Pointer samples forwarded from the platform input adapter
//
// Samples arrive in board-local pixels already tagged with their phase. Recorded
// sessions are stored one JSON sample per line, e.g.
// {"phase":"start","x":400.0,"y":400.0,"timestamp_ms":0}

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPhase {
    Start,
    Move,
    End,
    /// The gesture was cut short by the platform
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    pub phase: InputPhase,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl InputSample {
    pub fn new(phase: InputPhase, point: Point, timestamp_ms: u64) -> Self {
        Self {
            phase,
            x: point.x,
            y: point.y,
            timestamp_ms,
        }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Gesture through `points`: start on the first, move through the rest
    /// and release on the last. Timestamps advance by `interval_ms`.
    pub fn stroke(points: &[Point], interval_ms: u64) -> Vec<InputSample> {
        let Some((&first, rest)) = points.split_first() else {
            return Vec::new();
        };
        let mut samples = Vec::with_capacity(points.len() + 1);
        samples.push(InputSample::new(InputPhase::Start, first, 0));
        let mut timestamp = 0;
        for &point in rest {
            timestamp += interval_ms;
            samples.push(InputSample::new(InputPhase::Move, point, timestamp));
        }
        let last = rest.last().copied().unwrap_or(first);
        samples.push(InputSample::new(InputPhase::End, last, timestamp + interval_ms));
        samples
    }
}

/// Parse a recorded session: one JSON sample per line, blank lines and lines
/// starting with `#` skipped.
pub fn parse_samples(text: &str) -> Result<Vec<InputSample>> {
    let mut samples = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let sample = serde_json::from_str(trimmed).map_err(|source| EngineError::InvalidSample {
            line: index + 1,
            source,
        })?;
        samples.push(sample);
    }
    Ok(samples)
}
