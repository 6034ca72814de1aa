//! Runs a viewing session against a scripted detector and synthetic frames, writing the last
//! annotated frame to `synthetic.png`.

use mudra::hand::detector::{DetectorConfig, ReplayDetector};
use mudra::hand::{HandObservation, Handedness, LandmarkIdx, NUM_LANDMARKS};
use mudra::image::{Color, Image};
use mudra::timer::FpsCounter;
use mudra::viewer::{Session, StreamOptions};

/// Builds an upright open hand centered at `cx`, with `folded` fingers curled down.
fn hand(handedness: Handedness, cx: f32, folded: usize) -> HandObservation {
    use LandmarkIdx::*;

    let mut points = [[0.0; 3]; NUM_LANDMARKS];
    points[Wrist as usize] = [cx, 0.85, 0.0];
    points[ThumbCmc as usize] = [cx - 0.08, 0.78, 0.0];
    points[ThumbMcp as usize] = [cx - 0.11, 0.72, 0.0];
    points[ThumbIp as usize] = [cx - 0.13, 0.67, 0.0];
    points[ThumbTip as usize] = [cx - 0.15, 0.63, 0.0];

    let chains = [
        (IndexFingerMcp, cx - 0.06),
        (MiddleFingerMcp, cx - 0.02),
        (RingFingerMcp, cx + 0.02),
        (PinkyMcp, cx + 0.06),
    ];
    for (i, (mcp, x)) in chains.into_iter().enumerate() {
        let base = mcp as usize;
        points[base] = [x, 0.6, 0.0];
        let tip_y = if i < folded { 0.65 } else { 0.3 };
        points[base + 1] = [x, 0.5, 0.0];
        points[base + 2] = [x, 0.5 + (tip_y - 0.5) * 0.5, 0.0];
        points[base + 3] = [x, tip_y, 0.0];
    }

    if handedness == Handedness::Left {
        for point in &mut points {
            point[0] = 1.0 - point[0];
        }
    }
    HandObservation::from_points(handedness, &points)
}

fn main() -> anyhow::Result<()> {
    mudra::init_logger!();

    let options = StreamOptions::from_env();
    log::info!("ice servers: {:?}", options.ice_servers());

    let mut detector = ReplayDetector::new(DetectorConfig::default());
    for folded in 0..=4 {
        detector.push_frame(vec![
            hand(Handedness::Right, 0.3, folded),
            hand(Handedness::Left, 0.3, 4 - folded),
        ]);
    }

    let mut session = Session::new(detector);
    let mut fps = FpsCounter::new("synthetic feed");

    let mut frame = Image::new(640, 480);
    for _ in 0..5 {
        frame.clear(Color::from_rgb8(24, 24, 24));
        session.process_frame(&mut frame)?;
        fps.tick_with(session.timers());
    }

    frame.save("synthetic.png")?;
    log::info!("wrote synthetic.png");
    Ok(())
}
