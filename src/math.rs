/// Angular speed of the center oscillation, in radians per frame
pub const OSCILLATION_RATE: f64 = 0.05;

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Tests whether `p` lies inside (or on the border of) triangle `abc`, for either winding
pub fn point_in_triangle(p: [f64; 2], a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> bool {
    let w0 = edge_function(&b, &c, &p);
    let w1 = edge_function(&c, &a, &p);
    let w2 = edge_function(&a, &b, &p);
    (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0) || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0)
}

/// Time factor in [-1, 1] shared by every cell of a frame
pub fn oscillation(frame: u64) -> f64 {
    (frame as f64 * OSCILLATION_RATE).sin()
}

/// Converts hue (degrees), saturation and brightness (0..=100) to 8-bit RGB
pub fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let v = (brightness / 100.0).clamp(0.0, 1.0);

    let chroma = v * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_u8 = |channel: f64| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_u8(r), to_u8(g), to_u8(b)]
}

/// Blends `src` over `dst` with coverage `alpha` in [0, 1]
pub fn blend_channel(dst: u8, src: u8, alpha: f64) -> u8 {
    let alpha = alpha.clamp(0.0, 1.0);
    (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
}
