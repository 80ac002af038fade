//! Procedural starfield: random points on a thick spherical shell with
//! pale blue colors that drift a little every frame.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_STAR_COUNT: u32 = 1000;
/// Inner radius of the star shell.
pub const SHELL_INNER_RADIUS: f32 = 25.0;
/// Shell thickness; radii fall in `[inner, inner + thickness]`.
pub const SHELL_THICKNESS: f32 = 25.0;
pub const STAR_HUE: f32 = 0.6;
pub const STAR_SATURATION: f32 = 0.2;
/// Per-frame flicker factor range `[min, min + span)`.
const FLICKER_MIN: f32 = 0.95;
const FLICKER_SPAN: f32 = 0.1;

/// One backdrop star.
#[derive(Clone, Debug, PartialEq)]
pub struct StarPoint {
    /// World-space position on the shell.
    pub position: glam::Vec3,
    /// RGB; drifts with every flicker.
    pub color: [f32; 3],
}

/// Places stars on the shell. Seeded generation is deterministic.
pub struct StarfieldGenerator {
    seed: Option<u64>,
    star_count: u32,
}

impl StarfieldGenerator {
    pub fn new(seed: Option<u64>, star_count: u32) -> Self {
        Self { seed, star_count }
    }

    pub fn generate(&self) -> Starfield {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut stars = Vec::with_capacity(self.star_count as usize);

        for _ in 0..self.star_count {
            let radius = SHELL_INNER_RADIUS + SHELL_THICKNESS * rng.random::<f32>();
            let theta = std::f32::consts::TAU * rng.random::<f32>();
            let phi = (2.0 * rng.random::<f32>() - 1.0).acos();

            let position = glam::Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            );
            let color = hsl_to_rgb(STAR_HUE, STAR_SATURATION, rng.random());
            stars.push(StarPoint { position, color });
        }

        log::debug!("Generated {} stars (seed {seed})", stars.len());
        Starfield { stars, rng }
    }
}

/// Live starfield state. Owns the generator stream so flicker continues
/// the same sequence.
pub struct Starfield {
    stars: Vec<StarPoint>,
    rng: ChaCha8Rng,
}

impl Starfield {
    pub fn stars(&self) -> &[StarPoint] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Scale each star's color by its own factor in `[0.95, 1.05)`.
    ///
    /// Factors compound across frames; colors are never renormalized.
    pub fn flicker(&mut self) {
        for star in &mut self.stars {
            let factor = FLICKER_MIN + FLICKER_SPAN * self.rng.random::<f32>();
            for channel in &mut star.color {
                *channel *= factor;
            }
        }
    }
}

/// HSL (all components in `[0, 1]`) to RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    if saturation <= 0.0 {
        return [lightness; 3];
    }
    let q = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    [
        hue_to_channel(p, q, hue + 1.0 / 3.0),
        hue_to_channel(p, q, hue),
        hue_to_channel(p, q, hue - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hue of an RGB color in `[0, 1)`, `None` for near-greys.
    fn hue_of(rgb: [f32; 3]) -> Option<f32> {
        let [r, g, b] = rgb;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta < 1e-3 {
            return None;
        }
        let h = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        Some(h / 6.0)
    }

    #[test]
    fn test_generates_exact_star_count() {
        assert_eq!(StarfieldGenerator::new(Some(7), 1000).generate().len(), 1000);
        assert_eq!(StarfieldGenerator::new(Some(7), 500).generate().len(), 500);
        assert!(StarfieldGenerator::new(Some(7), 0).generate().is_empty());
    }

    #[test]
    fn test_stars_lie_on_shell() {
        let field = StarfieldGenerator::new(Some(42), 1000).generate();
        for (i, star) in field.stars().iter().enumerate() {
            let r = star.position.length();
            assert!(
                (SHELL_INNER_RADIUS - 1e-3..=SHELL_INNER_RADIUS + SHELL_THICKNESS + 1e-3).contains(&r),
                "Star {i} at radius {r} is off the shell"
            );
        }
    }

    #[test]
    fn test_star_hue_is_pale_blue() {
        let field = StarfieldGenerator::new(Some(42), 1000).generate();
        let mut colored = 0;
        for star in field.stars() {
            if let Some(hue) = hue_of(star.color) {
                assert!((hue - STAR_HUE).abs() < 1e-3, "hue {hue}");
                colored += 1;
            }
        }
        assert!(colored > 900);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = StarfieldGenerator::new(Some(123), 200).generate();
        let b = StarfieldGenerator::new(Some(123), 200).generate();
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn test_flicker_factor_bounds() {
        let mut field = StarfieldGenerator::new(Some(9), 500).generate();
        let before: Vec<[f32; 3]> = field.stars().iter().map(|s| s.color).collect();
        field.flicker();
        for (old, star) in before.iter().zip(field.stars()) {
            if old[2] > 1e-4 {
                let factor = star.color[2] / old[2];
                assert!((0.95 - 1e-4..1.05 + 1e-4).contains(&factor), "factor {factor}");
                // One factor per star across channels.
                assert!((star.color[0] - old[0] * factor).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_flicker_compounds() {
        let mut field = StarfieldGenerator::new(Some(3), 50).generate();
        let start: Vec<[f32; 3]> = field.stars().iter().map(|s| s.color).collect();
        for _ in 0..200 {
            field.flicker();
        }
        let drifted = start
            .iter()
            .zip(field.stars())
            .filter(|(a, s)| (a[2] - s.color[2]).abs() > 1e-3)
            .count();
        assert!(drifted > 25);

        let fresh = StarfieldGenerator::new(Some(3), 50).generate();
        assert_eq!(field.stars()[0].position, fresh.stars()[0].position);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
        assert_eq!(hsl_to_rgb(0.6, 0.0, 0.3), [0.3; 3]);
        let blue = hsl_to_rgb(2.0 / 3.0, 1.0, 0.5);
        assert!(blue[2] > 0.99 && blue[0] < 1e-5);
    }
}
