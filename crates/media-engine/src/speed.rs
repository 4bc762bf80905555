//! Playback rate values accepted by the engine

/// Represents a playback speed multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    value: f32,
}

impl Speed {
    pub const MIN: f32 = 0.25;
    pub const MAX: f32 = 4.0;
    pub const DEFAULT: f32 = 1.0;

    /// Creates a new speed value, rejecting non-finite or out-of-range input
    pub fn new(value: f32) -> Result<Self, crate::EngineError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(crate::EngineError::InvalidSpeed(value));
        }
        Ok(Self { value })
    }

    /// Returns the numeric value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Checks if this is normal speed
    pub fn is_normal(&self) -> bool {
        (self.value - Self::DEFAULT).abs() < f32::EPSILON
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            value: Self::DEFAULT,
        }
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}x", self.value)
    }
}

impl PartialOrd for Speed {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
