//! Viewing sessions tying the transport layer, the detector, and the annotator together.
//!
//! A [`Session`] is created once per viewer and exclusively owns its detector for the whole
//! session, since the detector may carry tracking state between frames. The (external) streaming
//! transport calls [`Session::process_frame`] synchronously for every delivered frame and passes
//! the annotated frame back to the display.

use std::env;

use crate::hand::detector::Detector;
use crate::image::{AsImageView, Image};
use crate::timer::{FpsCounter, Timer};

/// The STUN server used when none is configured.
pub const DEFAULT_STUN_SERVER: &str = "stun:stun.l.google.com:19302";

const STUN_SERVER_VAR: &str = "MUDRA_STUN_SERVER";

/// Options handed to the streaming transport when a viewer connects.
///
/// None of these affect frame processing; they only configure the (external) transport layer.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    stun_server: String,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            stun_server: DEFAULT_STUN_SERVER.to_string(),
        }
    }
}

impl StreamOptions {
    /// Creates options from the environment, falling back to the defaults.
    ///
    /// Honors the `MUDRA_STUN_SERVER` environment variable.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(url) = env::var(STUN_SERVER_VAR) {
            options.stun_server = url;
        }
        options
    }

    /// Sets the STUN server URL used for ICE negotiation.
    #[inline]
    pub fn stun_server(mut self, url: impl Into<String>) -> Self {
        self.stun_server = url.into();
        self
    }

    /// Returns the ICE server URLs in the form the transport layer expects.
    pub fn ice_servers(&self) -> Vec<String> {
        vec![self.stun_server.clone()]
    }
}

/// A viewing session: one detector, processed frame by frame.
///
/// The session itself carries no state between frames; every frame is annotated independently.
pub struct Session {
    detector: Box<dyn Detector>,
    t_detect: Timer,
    t_annotate: Timer,
    fps: FpsCounter,
}

impl Session {
    /// Creates a session that takes exclusive ownership of `detector`.
    ///
    /// The detector is released when the session is dropped.
    pub fn new<D: Detector>(detector: D) -> Self {
        Self {
            detector: Box::new(detector),
            t_detect: Timer::new("detect"),
            t_annotate: Timer::new("annotate"),
            fps: FpsCounter::new("viewer"),
        }
    }

    /// Returns profiling timers for the per-frame processing stages.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_detect, &self.t_annotate].into_iter()
    }

    /// Runs detection on `frame` and annotates it in place.
    ///
    /// Every detected hand gets a skeleton overlay and a `"<Left|Right> hand: <N> up"` label. When
    /// no hand is detected the frame is returned untouched.
    pub fn process_frame(&mut self, frame: &mut Image) -> anyhow::Result<()> {
        let view = frame.as_view();
        let hands = self.t_detect.time(|| self.detector.detect(&view))?;

        if !hands.is_empty() {
            let _guard = self.t_annotate.start();
            for hand in &hands {
                log::trace!("{} hand: {} fingers raised", hand.handedness(), hand.raised_fingers());
                hand.draw(frame);
            }
        }

        self.fps.tick_with([&self.t_detect, &self.t_annotate]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::detector::{DetectorConfig, ReplayDetector};
    use crate::hand::{HandObservation, Handedness, LandmarkIdx, NUM_LANDMARKS};
    use crate::image::{AsImageView, Resolution};

    fn test_frame() -> Image {
        let res = Resolution::new(64, 48);
        let data = (0..res.num_pixels() * 3)
            .map(|i| (i % 251) as u8)
            .collect::<Vec<_>>();
        Image::from_rgb8(res, &data)
    }

    fn open_hand(handedness: Handedness) -> HandObservation {
        let mut points = [[0.5, 0.5, 0.0]; NUM_LANDMARKS];
        points[LandmarkIdx::Wrist as usize] = [0.5, 0.9, 0.0];
        points[LandmarkIdx::ThumbIp as usize] = [0.4, 0.6, 0.0];
        points[LandmarkIdx::ThumbTip as usize] = [0.3, 0.55, 0.0];
        for (tip, pip) in [
            (LandmarkIdx::IndexFingerTip, LandmarkIdx::IndexFingerPip),
            (LandmarkIdx::MiddleFingerTip, LandmarkIdx::MiddleFingerPip),
            (LandmarkIdx::RingFingerTip, LandmarkIdx::RingFingerPip),
            (LandmarkIdx::PinkyTip, LandmarkIdx::PinkyPip),
        ] {
            points[pip as usize][1] = 0.4;
            points[tip as usize][1] = 0.2;
        }
        HandObservation::from_points(handedness, &points)
    }

    #[test]
    fn frame_without_hands_stays_untouched() {
        let mut session = Session::new(ReplayDetector::new(DetectorConfig::default()));

        let mut frame = test_frame();
        let before = frame.data().to_vec();
        session.process_frame(&mut frame).unwrap();
        assert_eq!(frame.data(), &before[..], "annotation of an empty frame must be a no-op");
    }

    #[test]
    fn detected_hand_is_annotated() {
        let mut detector = ReplayDetector::new(DetectorConfig::default());
        detector.push_frame(vec![open_hand(Handedness::Right)]);
        let mut session = Session::new(detector);

        let mut frame = test_frame();
        let before = frame.data().to_vec();
        session.process_frame(&mut frame).unwrap();
        assert_ne!(frame.data(), &before[..], "annotation did not modify the frame");
        assert_eq!(frame.resolution(), Resolution::new(64, 48));

        // The skeleton is drawn in green; at least the finger chains must show up.
        let view = frame.as_view();
        let green = (0..48u32)
            .flat_map(|y| (0..64u32).map(move |x| (x, y)))
            .filter(|&(x, y)| view.get(x, y) == crate::image::Color::GREEN)
            .count();
        assert!(green > 10, "expected a visible skeleton, found {green} green pixels");
    }

    #[test]
    fn frames_are_independent() {
        let mut detector = ReplayDetector::new(DetectorConfig::default());
        detector.push_frame(vec![open_hand(Handedness::Left)]);
        let mut session = Session::new(detector);

        let mut annotated = test_frame();
        session.process_frame(&mut annotated).unwrap();

        // The script is exhausted, so the next frame passes through unchanged.
        let mut frame = test_frame();
        let before = frame.data().to_vec();
        session.process_frame(&mut frame).unwrap();
        assert_eq!(frame.data(), &before[..]);
    }

    #[test]
    fn stream_options() {
        assert_eq!(StreamOptions::default().ice_servers(), [DEFAULT_STUN_SERVER]);

        let options = StreamOptions::default().stun_server("stun:example.org:3478");
        assert_eq!(options.ice_servers(), ["stun:example.org:3478"]);

        env::set_var(STUN_SERVER_VAR, "stun:env.example.org:3478");
        assert_eq!(StreamOptions::from_env().ice_servers(), ["stun:env.example.org:3478"]);
        env::remove_var(STUN_SERVER_VAR);
        assert_eq!(StreamOptions::from_env().ice_servers(), [DEFAULT_STUN_SERVER]);
    }
}
