//! Noise-driven fill colors.
//!
//! Every triangle color comes from three samples of one coherent noise field:
//! a slowly scrolling sample for hue, a static one for saturation and a
//! drifting one for brightness. Hue is bimodal: low samples land in a warm
//! band, everything else collapses onto a cool hue with a faint random
//! shimmer.

use crate::math::hsb_to_rgb;
use crate::point::Point;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin, Seedable};
use rand::Rng;

/// Samples below this threshold map into the warm hue band
pub const WARM_BAND_END: f64 = 0.3;
/// Degrees of hue per unit of noise in the warm band
pub const WARM_HUE_SPAN: f64 = 80.0;
/// Base hue of the cool band
pub const COOL_HUE: f64 = 180.0;
/// Noise value around which the cool band jitters
pub const COOL_PIVOT: f64 = 0.6;
/// Scale of the random jitter in the cool band
pub const COOL_JITTER: f64 = 0.01;
/// Pixels the hue sampling window scrolls per frame
pub const FRAME_SCROLL: f64 = 10.0;
/// Spatial frequency of the saturation and brightness samples
pub const DETAIL_FREQUENCY: f64 = 0.1;
/// Saturation gain applied before clamping to the color model
pub const SATURATION_GAIN: f64 = 140.0;
/// Brightness sampling drift per frame
pub const BRIGHTNESS_DRIFT: f64 = 0.01;
/// Vertical offset that decorrelates brightness from saturation
pub const BRIGHTNESS_OFFSET: f64 = 100.0;
/// Alpha of every triangle fill
pub const FILL_ALPHA: f64 = 90.0;

/// Largest value a noise sample may take
const MAX_SAMPLE: f64 = 1.0 - f64::EPSILON;

/// A coherent 2D noise field.
///
/// Implementations return values in `[0, 1)`, always the same value for the
/// same input, and vary continuously with both coordinates.
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<T: NoiseSource + ?Sized> NoiseSource for &T {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// Fractal Perlin noise remapped into `[0, 1)`
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    fbm: Fbm<Perlin>,
}

impl PerlinNoise {
    pub const OCTAVES: usize = 4;
    pub const PERSISTENCE: f64 = 0.5;

    pub fn new(seed: u32) -> Self {
        let fbm = Fbm::<Perlin>::default()
            .set_seed(seed)
            .set_frequency(1.0)
            .set_persistence(Self::PERSISTENCE)
            .set_octaves(Self::OCTAVES);
        PerlinNoise { fbm }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let raw = self.fbm.get([x, y]);
        ((raw + 1.0) * 0.5).clamp(0.0, MAX_SAMPLE)
    }
}

/// Scale applied to pixel coordinates before the hue sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseScale {
    pub x: f64,
    pub y: f64,
}

impl NoiseScale {
    pub fn from_cell_size(cell_size: f64) -> Self {
        NoiseScale {
            x: 0.1 / cell_size,
            y: 0.1 / cell_size,
        }
    }
}

/// A color in hue (degrees), saturation, brightness and alpha (0..=100)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsba {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub alpha: f64,
}

impl Hsba {
    pub const WHITE: Hsba = Hsba::opaque(0.0, 0.0, 100.0);
    pub const BLACK: Hsba = Hsba::opaque(0.0, 0.0, 0.0);

    pub const fn new(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        Hsba {
            hue,
            saturation,
            brightness,
            alpha,
        }
    }

    pub const fn opaque(hue: f64, saturation: f64, brightness: f64) -> Self {
        Hsba::new(hue, saturation, brightness, 100.0)
    }

    /// Converts to 8-bit RGBA, alpha scaled from 0..=100 to 0..=255
    pub fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b] = hsb_to_rgb(self.hue, self.saturation, self.brightness);
        let a = (self.alpha / 100.0 * 255.0).round().clamp(0.0, 255.0) as u8;
        [r, g, b, a]
    }
}

/// Maps the hue-driving sample `n` to a hue.
///
/// The cool band only consults `rng` when it is taken.
pub fn hue_for<R: Rng>(n: f64, rng: &mut R) -> f64 {
    if n < WARM_BAND_END {
        n * WARM_HUE_SPAN
    } else {
        COOL_HUE + (n - COOL_PIVOT) * rng.random::<f64>() * COOL_JITTER
    }
}

/// Fill color of the triangle sampled at `point` on `frame`
pub fn color_at<N, R>(noise: &N, point: Point, frame: u64, scale: NoiseScale, rng: &mut R) -> Hsba
where
    N: NoiseSource + ?Sized,
    R: Rng,
{
    let frame = frame as f64;
    let scroll = frame * FRAME_SCROLL;

    let n = noise.sample((point.x + scroll) * scale.x, (point.y + scroll) * scale.y);
    let saturation = noise.sample(point.x * DETAIL_FREQUENCY, point.y * DETAIL_FREQUENCY)
        * SATURATION_GAIN;
    let brightness = noise.sample(
        point.x * DETAIL_FREQUENCY + frame * BRIGHTNESS_DRIFT,
        point.y * DETAIL_FREQUENCY + BRIGHTNESS_OFFSET,
    ) * 100.0;

    Hsba {
        hue: hue_for(n, rng),
        saturation: saturation.clamp(0.0, 100.0),
        brightness,
        alpha: FILL_ALPHA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    struct Constant(f64);

    impl NoiseSource for Constant {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    /// Smooth, deterministic field standing in for real noise
    struct Waves;

    impl NoiseSource for Waves {
        fn sample(&self, x: f64, y: f64) -> f64 {
            ((x * 0.7).sin() * (y * 1.3).cos() * 0.5 + 0.5).min(MAX_SAMPLE)
        }
    }

    fn scale() -> NoiseScale {
        NoiseScale::from_cell_size(20.0)
    }

    #[test]
    fn noise_scale_tracks_cell_size() {
        let scale = NoiseScale::from_cell_size(20.0);
        assert!((scale.x - 0.005).abs() < 1e-12);
        assert_eq!(scale.x, scale.y);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.1, 8.0)]
    #[case(0.2999, 23.992)]
    fn warm_band_hue(#[case] n: f64, #[case] expected: f64) {
        let mut rng = StdRng::seed_from_u64(1);
        let hue = hue_for(n, &mut rng);
        assert!((hue - expected).abs() < 1e-9);
        assert!((0.0..24.0).contains(&hue));
    }

    #[test]
    fn threshold_belongs_to_cool_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let color = color_at(&Constant(WARM_BAND_END), Point::new(3.0, 4.0), 0, scale(), &mut rng);
        assert!((color.hue - COOL_HUE).abs() < 0.01, "hue {}", color.hue);
    }

    #[test]
    fn warm_band_does_not_consume_randomness() {
        let mut used = StdRng::seed_from_u64(3);
        let mut fresh = StdRng::seed_from_u64(3);
        hue_for(0.1, &mut used);
        assert_eq!(used.random::<u64>(), fresh.random::<u64>());
    }

    #[test]
    fn alpha_is_fixed() {
        let mut rng = StdRng::seed_from_u64(0);
        for n in [0.0, 0.29, 0.3, 0.75, MAX_SAMPLE] {
            let color = color_at(&Constant(n), Point::new(12.0, 40.0), 9, scale(), &mut rng);
            assert_eq!(color.alpha, 90.0);
        }
    }

    #[test]
    fn saturation_is_clamped_to_color_model() {
        let mut rng = StdRng::seed_from_u64(0);
        let color = color_at(&Constant(0.9), Point::default(), 0, scale(), &mut rng);
        assert_eq!(color.saturation, 100.0);

        let color = color_at(&Constant(0.5), Point::default(), 0, scale(), &mut rng);
        assert!((color.saturation - 70.0).abs() < 1e-9);
        assert!((color.brightness - 50.0).abs() < 1e-9);
    }

    #[test]
    fn same_inputs_give_same_color() {
        let point = Point::new(33.0, 71.5);
        let a = color_at(&Waves, point, 42, scale(), &mut StdRng::seed_from_u64(5));
        let b = color_at(&Waves, point, 42, scale(), &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn advancing_frame_changes_color() {
        let point = Point::new(33.0, 71.5);
        let a = color_at(&Waves, point, 0, scale(), &mut StdRng::seed_from_u64(5));
        let b = color_at(&Waves, point, 60, scale(), &mut StdRng::seed_from_u64(5));
        assert_ne!(a, b);
        assert_eq!(a.saturation, b.saturation);
    }

    #[test]
    fn perlin_noise_animates() {
        let noise = PerlinNoise::new(0);
        let point = Point::new(13.7, 21.3);
        let a = color_at(&noise, point, 0, scale(), &mut StdRng::seed_from_u64(5));
        let b = color_at(&noise, point, 30, scale(), &mut StdRng::seed_from_u64(5));
        assert_ne!(a.brightness, b.brightness);
    }

    #[test]
    fn perlin_noise_is_deterministic_per_seed() {
        let a = PerlinNoise::new(11);
        let b = PerlinNoise::new(11);
        for i in 0..50 {
            let (x, y) = (i as f64 * 0.37, i as f64 * 0.11 + 5.0);
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn perlin_noise_is_continuous() {
        let noise = PerlinNoise::new(2);
        for i in 0..200 {
            let (x, y) = (i as f64 * 0.173, i as f64 * 0.091);
            let delta = (noise.sample(x, y) - noise.sample(x + 1e-5, y + 1e-5)).abs();
            assert!(delta < 1e-2, "jump of {delta} at ({x}, {y})");
        }
    }

    #[test]
    fn white_converts_to_opaque_white() {
        assert_eq!(Hsba::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Hsba::new(0.0, 0.0, 100.0, 90.0).to_rgba8()[3], 230);
    }

    proptest! {
        #[test]
        fn perlin_noise_stays_in_unit_range(x in -1_000.0f64..1_000.0, y in -1_000.0f64..1_000.0) {
            let value = PerlinNoise::new(0).sample(x, y);
            prop_assert!((0.0..1.0).contains(&value));
        }

        #[test]
        fn cool_band_stays_near_base_hue(n in WARM_BAND_END..MAX_SAMPLE, seed in any::<u64>()) {
            let hue = hue_for(n, &mut StdRng::seed_from_u64(seed));
            prop_assert!(hue > COOL_HUE - 0.003 - 1e-12);
            prop_assert!(hue < COOL_HUE + 0.004);
        }

        #[test]
        fn colors_stay_in_model_range(
            x in 0.0f64..4_000.0,
            y in 0.0f64..4_000.0,
            frame in 0u64..100_000,
        ) {
            let mut rng = StdRng::seed_from_u64(frame);
            let color = color_at(&PerlinNoise::new(0), Point::new(x, y), frame, scale(), &mut rng);
            prop_assert!((0.0..=100.0).contains(&color.saturation));
            prop_assert!((0.0..100.0).contains(&color.brightness));
            prop_assert!((0.0..360.0).contains(&color.hue));
            prop_assert_eq!(color.alpha, FILL_ALPHA);
        }
    }
}
