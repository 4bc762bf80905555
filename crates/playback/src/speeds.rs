//! Cyclic table of selectable playback speeds

use crate::error::{SessionError, SessionResult};
use readalong_media_engine::Speed;

/// Speeds offered by the speed button, cycled in order
pub const DEFAULT_SPEEDS: [f32; 6] = [0.5, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Ordered, non-empty list of speeds with a designated default entry
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    speeds: Vec<Speed>,
    default_index: usize,
}

impl SpeedTable {
    /// Builds a table from raw multipliers; `default_speed` must be one of them
    pub fn new(values: &[f32], default_speed: f32) -> SessionResult<Self> {
        if values.is_empty() {
            return Err(SessionError::EmptySpeedTable);
        }
        let speeds = values
            .iter()
            .map(|value| Speed::new(*value))
            .collect::<Result<Vec<_>, _>>()?;
        let default_index = speeds
            .iter()
            .position(|speed| (speed.value() - default_speed).abs() < f32::EPSILON)
            .ok_or(SessionError::DefaultSpeedMissing(default_speed))?;

        Ok(Self {
            speeds,
            default_index,
        })
    }

    /// Index of the default speed, used after every chapter change
    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// Index following `index`, wrapping to the first entry
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.speeds.len()
    }

    /// Speed at `index`, falling back to the default for out-of-range input
    pub fn speed(&self, index: usize) -> Speed {
        self.speeds
            .get(index)
            .copied()
            .unwrap_or(self.speeds[self.default_index])
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Speed> + '_ {
        self.speeds.iter().copied()
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            speeds: DEFAULT_SPEEDS
                .iter()
                .map(|value| Speed::new(*value).unwrap_or_default())
                .collect(),
            default_index: 1,
        }
    }
}
