//! Media Engine - audio engine boundary for readalong

mod engine;
mod error;
mod simulated;
mod speed;

pub use engine::{AudioEngine, EngineCommand};
pub use error::{EngineError, EngineResult};
pub use simulated::SimulatedEngine;
pub use speed::Speed;

pub use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let _ = SimulatedEngine::new();
        let _ = Speed::default();
        assert!(EngineCommand::Start {
            url: Url::parse("https://example.com/a.mp3").unwrap(),
            rate: 1.0,
            resumed: false,
        }
        .is_start());
    }

    #[test]
    fn test_error_display() {
        let error = EngineError::InvalidSpeed(5.0);
        assert!(format!("{}", error).contains("5"));
    }
}
