//! Deterministic synthetic heightmaps for demos and tests.
//!
//! One island per map: a dome that falls below sea level before the border,
//! a handful of seeded peaks and a single ridge direction. All randomness
//! comes from the seed, so a seed always produces the same image.

use std::f64::consts::TAU;

use image::{GrayImage, Luma};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Dome height at the centre, in normalized elevation.
const DOME_HEIGHT: f64 = 0.4;

/// Subtracted everywhere; what ends below zero is sea.
const SEA_OFFSET: f64 = 0.1;

const RIDGE_HEIGHT: f64 = 0.08;

/// Land noise, in 8-bit levels either side of the sampled value.
const JITTER_LEVELS: f64 = 1.5;

/// Gaussian hill, in normalized map coordinates.
#[derive(Debug, Clone, Copy)]
struct Peak {
    x: f64,
    y: f64,
    radius: f64,
    height: f64,
}

impl Peak {
    fn random(rng: &mut ChaCha8Rng) -> Self {
        Self {
            x: rng.gen_range(0.2..0.8),
            y: rng.gen_range(0.2..0.8),
            radius: rng.gen_range(0.08..0.25),
            height: rng.gen_range(0.2..0.5),
        }
    }

    fn height_at(&self, nx: f64, ny: f64) -> f64 {
        let d_sq = (nx - self.x).powi(2) + (ny - self.y).powi(2);
        self.height * (-d_sq / (2.0 * self.radius * self.radius)).exp()
    }
}

/// Seeded terrain model sampled once per pixel.
#[derive(Debug, Clone)]
struct Island {
    peaks: Vec<Peak>,
    /// Ridge wave vector.
    ridge: (f64, f64),
}

impl Island {
    fn random(rng: &mut ChaCha8Rng) -> Self {
        let count = rng.gen_range(3..7);
        let peaks = (0..count).map(|_| Peak::random(rng)).collect();
        let angle = rng.gen_range(0.0..TAU);
        let frequency = rng.gen_range(8.0..16.0);
        Self {
            peaks,
            ridge: (angle.cos() * frequency, angle.sin() * frequency),
        }
    }

    /// Normalized elevation at `(nx, ny)`; zero or below is sea.
    fn elevation(&self, nx: f64, ny: f64) -> f64 {
        // 0 at the centre, 1 at the middle of each edge, 2 in the corners.
        let d_sq = (2.0 * nx - 1.0).powi(2) + (2.0 * ny - 1.0).powi(2);
        let dome = DOME_HEIGHT * (1.0 - d_sq);
        let peak = self
            .peaks
            .iter()
            .map(|p| p.height_at(nx, ny))
            .fold(0.0, f64::max);
        let ridge = RIDGE_HEIGHT * (nx * self.ridge.0 + ny * self.ridge.1).sin().abs();
        dome + peak + ridge - SEA_OFFSET
    }
}

/// Generate a `size`×`size` grayscale heightmap.
pub fn generate(size: u32, seed: u64) -> GrayImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let island = Island::random(&mut rng);
    let span = size.max(2) as f64 - 1.0;

    GrayImage::from_fn(size, size, |x, y| {
        let elev = island.elevation(x as f64 / span, y as f64 / span);
        let level = if elev > 0.0 {
            elev * 255.0 + rng.gen_range(-JITTER_LEVELS..JITTER_LEVELS)
        } else {
            0.0
        };
        Luma([level.round().clamp(0.0, 255.0) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_image() {
        assert_eq!(generate(32, 7).into_raw(), generate(32, 7).into_raw());
    }

    #[test]
    fn test_seeds_give_different_islands() {
        assert_ne!(generate(32, 1).into_raw(), generate(32, 2).into_raw());
    }

    #[test]
    fn test_corners_are_sea_and_centre_is_land() {
        for seed in 0..8 {
            let img = generate(64, seed);
            for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
                assert_eq!(img.get_pixel(x, y)[0], 0, "seed {seed} corner ({x}, {y})");
            }
            assert!(img.get_pixel(32, 32)[0] > 50, "seed {seed}");
        }
    }

    #[test]
    fn test_peak_is_highest_at_its_centre() {
        let peak = Peak {
            x: 0.5,
            y: 0.5,
            radius: 0.1,
            height: 0.3,
        };
        assert_eq!(peak.height_at(0.5, 0.5), 0.3);
        assert!(peak.height_at(0.6, 0.5) < 0.3);
        assert!(peak.height_at(1.0, 1.0) < 1e-6);
    }
}
