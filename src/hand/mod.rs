//! Hand observations, finger counting, and skeleton annotation.

pub mod detector;

use std::fmt;

use crate::image::{draw, AsImageViewMut, Color, ImageViewMut};
use crate::landmark::{Landmark, Landmarks};

/// Number of landmarks that form one hand skeleton.
pub const NUM_LANDMARKS: usize = 21;

/// Classification of a detected hand, from the viewer's perspective in the (mirrored) image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parses a handedness classification label emitted by a detector.
    ///
    /// Labels starting with `right` (in any case) classify as [`Handedness::Right`]; every other
    /// label classifies as [`Handedness::Left`].
    pub fn from_label(label: &str) -> Self {
        if label.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("right")) {
            Handedness::Right
        } else {
            Handedness::Left
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left => f.write_str("Left"),
            Handedness::Right => f.write_str("Right"),
        }
    }
}

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// The fixed skeleton edges drawn between adjacent joints.
pub const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
        // Thumb:
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// Tip/PIP landmark pairs for the four fingers that extend upwards.
const FINGERS: [(LandmarkIdx, LandmarkIdx); 4] = [
    (LandmarkIdx::IndexFingerTip, LandmarkIdx::IndexFingerPip),
    (LandmarkIdx::MiddleFingerTip, LandmarkIdx::MiddleFingerPip),
    (LandmarkIdx::RingFingerTip, LandmarkIdx::RingFingerPip),
    (LandmarkIdx::PinkyTip, LandmarkIdx::PinkyPip),
];

/// One detected hand: 21 landmarks plus a handedness classification.
///
/// Observations are produced fresh for every frame and discarded after annotation; they carry no
/// cross-frame identity.
#[derive(Clone)]
pub struct HandObservation {
    landmarks: Landmarks,
    handedness: Handedness,
}

impl HandObservation {
    /// Creates an observation from a detector's landmark output.
    ///
    /// `landmarks` is expected to contain [`NUM_LANDMARKS`] entries following the indexing scheme
    /// of [`LandmarkIdx`]; this is not validated here, and the accessors will panic on an
    /// observation that is too short.
    pub fn new(handedness: Handedness, landmarks: Landmarks) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Creates an observation from raw normalized landmark positions.
    ///
    /// # Panics
    ///
    /// Panics if `points` does not contain exactly [`NUM_LANDMARKS`] entries.
    pub fn from_points(handedness: Handedness, points: &[[f32; 3]]) -> Self {
        let mut landmarks = Landmarks::new(NUM_LANDMARKS);
        landmarks.set_positions(points);
        Self::new(handedness, landmarks)
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    #[inline]
    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// Returns a landmark's normalized position.
    pub fn landmark_position(&self, index: LandmarkIdx) -> Landmark {
        self.landmarks.get(index as usize)
    }

    /// Counts the fingers this hand holds raised, as a value in `0..=5`.
    ///
    /// Every frame is evaluated independently; there is no smoothing or hysteresis, so the count
    /// may flicker between frames.
    ///
    /// This assumes a mirrored (selfie-style) camera feed. On a non-mirrored feed the thumb
    /// direction is inverted.
    pub fn raised_fingers(&self) -> u8 {
        let mut raised = 0;

        // The thumb extends sideways, so its X coordinates are compared. An extended right thumb
        // points towards the left image edge in a mirrored feed, and vice versa.
        let tip = self.landmark_position(LandmarkIdx::ThumbTip);
        let ip = self.landmark_position(LandmarkIdx::ThumbIp);
        let thumb_raised = match self.handedness {
            Handedness::Right => tip.x() < ip.x(),
            Handedness::Left => tip.x() > ip.x(),
        };
        if thumb_raised {
            raised += 1;
        }

        // The remaining fingers point upwards when extended: tip above the PIP joint, with Y
        // growing downward.
        for (tip, pip) in FINGERS {
            if self.landmark_position(tip).y() < self.landmark_position(pip).y() {
                raised += 1;
            }
        }

        raised
    }

    /// Draws the skeleton and the finger-count label onto `target`.
    pub fn draw<I: AsImageViewMut>(&self, target: &mut I) {
        self.draw_impl(&mut target.as_view_mut());
    }

    fn draw_impl(&self, target: &mut ImageViewMut<'_>) {
        const LABEL_OFFSET: (i32, i32) = (80, 30);
        const LABEL_MIN: (i32, i32) = (10, 30);

        let (w, h) = (target.width() as f32, target.height() as f32);
        let px = |lm: Landmark| ((lm.x() * w) as i32, (lm.y() * h) as i32);

        for (a, b) in CONNECTIVITY {
            let (ax, ay) = px(self.landmark_position(*a));
            let (bx, by) = px(self.landmark_position(*b));
            draw::line(target, ax, ay, bx, by).color(Color::GREEN);
        }
        for lm in self.landmarks.iter() {
            let (x, y) = px(lm);
            draw::marker(target, x, y);
        }

        let (wrist_x, wrist_y) = px(self.landmark_position(LandmarkIdx::Wrist));
        let x = (wrist_x - LABEL_OFFSET.0).max(LABEL_MIN.0);
        let y = (wrist_y - LABEL_OFFSET.1).max(LABEL_MIN.1);
        let label = format!("{} hand: {} up", self.handedness, self.raised_fingers());
        draw::text(target, x, y, &label)
            .align_left()
            .align_bottom()
            .color(Color::GREEN);
    }
}

impl fmt::Debug for HandObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hand ({} landmarks)", self.handedness, self.landmarks.len())
    }
}
