//! The hand landmark detector interface.
//!
//! Landmark detection itself is not implemented by this crate; it is delegated to an external
//! detector that implements the [`Detector`] trait. The detector is treated as an oracle: given a
//! frame, it reports zero or more [`HandObservation`]s, and it may keep internal tracking state
//! between frames.

use std::collections::VecDeque;

use crate::hand::HandObservation;
use crate::image::ImageView;

/// Indicates whether the detector tracks hands across subsequent frames.
///
/// By default, [`TrackingMode::Streaming`] is used, which lets the detector reuse its tracking
/// state from previous frames instead of running a full detection pass every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrackingMode {
    /// Treat subsequent frames as a video stream and track hands across them.
    Streaming,
    /// Treat every frame as an unrelated still image.
    SingleShot,
}

impl Default for TrackingMode {
    #[inline]
    fn default() -> Self {
        Self::Streaming
    }
}

/// Detector configuration options.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
    max_hands: usize,
    mode: TrackingMode,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            max_hands: 2,
            mode: TrackingMode::default(),
        }
    }
}

impl DetectorConfig {
    /// Sets the confidence threshold below which a hand detection is discarded.
    #[inline]
    pub fn detection_confidence(mut self, confidence: f32) -> Self {
        self.min_detection_confidence = confidence;
        self
    }

    /// Sets the confidence threshold below which tracking is considered lost and the detector
    /// falls back to a full detection pass.
    #[inline]
    pub fn tracking_confidence(mut self, confidence: f32) -> Self {
        self.min_tracking_confidence = confidence;
        self
    }

    /// Sets the maximum number of hands reported per frame.
    #[inline]
    pub fn max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    /// Sets the [`TrackingMode`].
    #[inline]
    pub fn mode(mut self, mode: TrackingMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn min_detection_confidence(&self) -> f32 {
        self.min_detection_confidence
    }

    #[inline]
    pub fn min_tracking_confidence(&self) -> f32 {
        self.min_tracking_confidence
    }

    #[inline]
    pub fn max_hands_limit(&self) -> usize {
        self.max_hands
    }

    #[inline]
    pub fn tracking_mode(&self) -> TrackingMode {
        self.mode
    }
}

/// Trait implemented by hand landmark detectors.
///
/// A detector instance is owned by one viewing session for the session's whole lifetime (it may
/// carry tracking state between frames), so implementations only need `&mut self` access.
pub trait Detector: Send + 'static {
    /// Detects hands in `image`, returning one observation per detected hand.
    ///
    /// Landmark positions are reported in normalized image coordinates. An empty `Vec` means no
    /// hand was detected and is not an error.
    fn detect(&mut self, image: &ImageView<'_>) -> anyhow::Result<Vec<HandObservation>>;
}

/// A [`Detector`] that replays a prerecorded script of observations.
///
/// Useful for tests and offline runs; each call to [`Detector::detect`] pops the next scripted
/// frame, and an exhausted script reports no hands. The confidence thresholds of the
/// [`DetectorConfig`] are oracle-side knobs and have no effect here, but the hand limit is
/// honored.
pub struct ReplayDetector {
    frames: VecDeque<Vec<HandObservation>>,
    config: DetectorConfig,
}

impl ReplayDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            frames: VecDeque::new(),
            config,
        }
    }

    /// Appends the observations to report for the next unscripted frame.
    pub fn push_frame(&mut self, observations: Vec<HandObservation>) {
        self.frames.push_back(observations);
    }
}

impl Detector for ReplayDetector {
    fn detect(&mut self, _image: &ImageView<'_>) -> anyhow::Result<Vec<HandObservation>> {
        let mut observations = self.frames.pop_front().unwrap_or_default();
        observations.truncate(self.config.max_hands_limit());
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{Handedness, NUM_LANDMARKS};
    use crate::image::{AsImageView, Image};

    fn blank_observation() -> HandObservation {
        HandObservation::from_points(Handedness::Left, &[[0.0; 3]; NUM_LANDMARKS])
    }

    #[test]
    fn config_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.min_detection_confidence(), 0.5);
        assert_eq!(config.min_tracking_confidence(), 0.5);
        assert_eq!(config.max_hands_limit(), 2);
        assert_eq!(config.tracking_mode(), TrackingMode::Streaming);
    }

    #[test]
    fn replay_caps_reported_hands() {
        let image = Image::new(4, 4);
        let mut detector = ReplayDetector::new(DetectorConfig::default().max_hands(1));
        detector.push_frame(vec![blank_observation(), blank_observation()]);

        let hands = detector.detect(&image.as_view()).unwrap();
        assert_eq!(hands.len(), 1);

        // The script is exhausted, further frames are empty.
        assert!(detector.detect(&image.as_view()).unwrap().is_empty());
    }
}
