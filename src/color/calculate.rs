use image::Rgb;
use image::Rgba;


/// Per channel `round(c1 + (c2 - c1) * t)`, half away from zero.
pub fn lerp(c1: &Rgb<u8>, c2: &Rgb<u8>, t: f64) -> Rgb<u8> {
    let channel = |i: usize| {
        let a = c1[i] as f64;
        let b = c2[i] as f64;
        (a + (b - a) * t).round() as u8
    };
    Rgb::from([channel(0), channel(1), channel(2)])
}

/// Encode two co-located intensities into one pixel.
///
/// `front` comes from image1 placed on black, `back` from image2 placed on
/// white. Over `bc1` the result shows `front`, over `bc2` it shows `back`.
pub fn composite_pixel(front: u8, back: u8, bc1: &Rgb<u8>, bc2: &Rgb<u8>) -> Rgba<u8> {
    let b1 = front as f64 / 2.0;
    let b2 = back as f64 / 2.0 + 127.5;
    let a = 255.0 - b2 + b1;
    // a == 0 only for (0, 255)
    let t = if a <= 0.0 {
        0.0
    } else {
        b1 / a
    };
    let color = lerp(bc1, bc2, t);
    let alpha = a.round().max(0.0).min(255.0) as u8;
    Rgba::from([color[0], color[1], color[2], alpha])
}
