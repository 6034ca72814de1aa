use super::*;
use crate::image::draw;
use Color as C;

fn mkimage<const W: usize, const H: usize>(data: [[Color; W]; H]) -> Image {
    let data = data
        .into_iter()
        .flat_map(|row| row.into_iter())
        .flat_map(|col| col.0)
        .collect::<Vec<_>>();
    Image::from_rgb8(Resolution::new(W as u32, H as u32), &data)
}

#[test]
fn from_rgb8_roundtrip() {
    let image = mkimage([[C::YELLOW, C::WHITE], [C::RED, C::BLUE]]);
    assert_eq!(image.resolution(), Resolution::new(2, 2));
    assert_eq!(image.get(0, 0), C::YELLOW);
    assert_eq!(image.get(1, 0), C::WHITE);
    assert_eq!(image.get(0, 1), C::RED);
    assert_eq!(image.get(1, 1), C::BLUE);

    let view = image.as_view();
    assert_eq!(view.get(1, 1), C::BLUE);
    assert_eq!(image.data().len(), 2 * 2 * 3);
}

#[test]
fn clear_overwrites_every_pixel() {
    let mut image = mkimage([[C::YELLOW, C::WHITE], [C::RED, C::BLUE]]);
    image.clear(C::MAGENTA);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(image.get(x, y), C::MAGENTA);
        }
    }
}

#[test]
fn draw_line() {
    let mut image = Image::new(4, 3);
    draw::line(&mut image, 0, 1, 3, 1).color(C::GREEN);

    for x in 0..4 {
        assert_eq!(image.get(x, 1), C::GREEN, "missing line pixel at x={x}");
        assert_eq!(image.get(x, 0), C::BLACK);
        assert_eq!(image.get(x, 2), C::BLACK);
    }
}

#[test]
fn draw_clips_to_image_bounds() {
    let mut image = Image::new(2, 2);
    // None of these may panic; out-of-bounds pixels are discarded.
    draw::line(&mut image, -5, -5, 10, 10).color(C::WHITE);
    draw::marker(&mut image, -10, 0);
    draw::text(&mut image, 10, 10, "clipped").align_left();

    assert_eq!(image.get(0, 0), C::WHITE);
    assert_eq!(image.get(1, 1), C::WHITE);
}

#[test]
fn draw_marker() {
    let mut image = Image::new(5, 5);
    draw::marker(&mut image, 2, 2).size(3);

    // An X shape: center plus both diagonals.
    assert_eq!(image.get(2, 2), C::RED);
    assert_eq!(image.get(1, 1), C::RED);
    assert_eq!(image.get(3, 3), C::RED);
    assert_eq!(image.get(3, 1), C::RED);
    assert_eq!(image.get(1, 3), C::RED);
    assert_eq!(image.get(2, 1), C::BLACK);
}

#[test]
fn draw_text_emits_pixels() {
    let mut image = Image::new(64, 16);
    draw::text(&mut image, 2, 12, "hi").align_left().align_bottom();

    let drawn = (0..16)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .filter(|&(x, y)| image.get(x, y) == C::RED)
        .count();
    assert!(drawn > 0, "text drew no pixels");
}
