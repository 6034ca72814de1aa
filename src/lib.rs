//! Mudra hand gesture perception library.
//!
//! Mudra takes live video frames, hands them to an external hand-landmark
//! detector (the [`hand::detector::Detector`] trait), and produces annotated
//! frames: a skeleton overlay per detected hand plus a label stating how many
//! fingers that hand holds raised.
//!
//! # Landmark Coordinates
//!
//! Landmark positions use normalized image coordinates: X and Y lie in
//! `[0, 1]` relative to frame width and height, with Y growing *downward*
//! (image convention, not math convention). Z is a relative depth value
//! passed through from the detector and not used by this crate.
//!
//! # Environment Variables
//!
//! Some parts of Mudra can be overridden by setting environment variables:
//!
//! * `MUDRA_STUN_SERVER`: Overrides the STUN server URL that
//!   [`StreamOptions`] hands to the streaming transport. If unset, a public
//!   default server is used.
//!
//! [`StreamOptions`]: viewer::StreamOptions

use log::LevelFilter;

pub mod hand;
pub mod image;
pub mod landmark;
pub mod timer;
pub mod viewer;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and Mudra will log at *debug* level; everything else
/// stays at the `env_logger` default unless `RUST_LOG` says otherwise.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
