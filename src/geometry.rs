//! Point-set generation.
//!
//! Every generator runs once at startup and produces a [`PointSet`] that is
//! uploaded to the GPU and never touched again. Only the starfield is random;
//! it takes the RNG as a parameter so a seeded run is reproducible.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::config::{RingConfig, SphereConfig, StarLayerConfig};

/// Horizontal rings are placed at heights in `[-RING_HEIGHT_LIMIT, RING_HEIGHT_LIMIT]`.
pub const RING_HEIGHT_LIMIT: f32 = 0.9;

/// Star brightness is drawn from `[STAR_MIN_INTENSITY, 1.0]`.
pub const STAR_MIN_INTENSITY: f32 = 0.7;

/// Extra blue added on top of the brightness, drawn from `[0, STAR_BLUE_BIAS]`.
pub const STAR_BLUE_BIAS: f32 = 0.2;

/// An immutable, ordered set of points with optional per-point colors.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    positions: Vec<Vec3>,
    colors: Option<Vec<Vec3>>,
}

impl PointSet {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            colors: None,
        }
    }

    /// Points with a color each. Both vectors must be the same length.
    pub fn with_colors(positions: Vec<Vec3>, colors: Vec<Vec3>) -> Self {
        assert_eq!(
            positions.len(),
            colors.len(),
            "every point needs exactly one color"
        );
        Self {
            positions,
            colors: Some(colors),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[Vec3]> {
        self.colors.as_deref()
    }
}

/// Vertices of a UV sphere, one point per vertex.
///
/// Rows run from the north pole (`y = radius`) to the south pole, and each row
/// repeats its first vertex at the seam, giving
/// `(width_segments + 1) * (height_segments + 1)` points.
pub fn sphere_shell(config: &SphereConfig) -> PointSet {
    let w = config.width_segments;
    let h = config.height_segments;
    let r = config.radius;

    let mut positions = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * PI;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            positions.push(Vec3::new(
                -r * phi.cos() * theta.sin(),
                r * theta.cos(),
                r * phi.sin() * theta.sin(),
            ));
        }
    }
    PointSet::new(positions)
}

/// Radius of the horizontal circle cut from a sphere of `radius` at height `y`.
pub fn latitude_radius(radius: f32, y: f32) -> f32 {
    radius * (y / radius).asin().cos()
}

/// Height of horizontal ring `ring` out of `count`, evenly spaced over
/// `[-RING_HEIGHT_LIMIT, RING_HEIGHT_LIMIT]` with both ends included.
pub fn ring_height(ring: u32, count: u32) -> f32 {
    debug_assert!(count >= 2);
    if ring + 1 == count {
        // Pin the last ring so floating-point steps cannot overshoot the top.
        return RING_HEIGHT_LIMIT;
    }
    -RING_HEIGHT_LIMIT + ring as f32 * (2.0 * RING_HEIGHT_LIMIT) / (count - 1) as f32
}

/// Stacked latitude circles hugging the sphere surface.
///
/// `config.count` must be at least 2.
pub fn horizontal_rings(config: &RingConfig) -> PointSet {
    let per_ring = config.points_per_ring;
    let mut positions = Vec::with_capacity((config.count * per_ring) as usize);

    for ring in 0..config.count {
        let y = ring_height(ring, config.count);
        let ring_radius = latitude_radius(config.radius, y);

        for point in 0..per_ring {
            let angle = point as f32 / per_ring as f32 * TAU;
            positions.push(Vec3::new(
                angle.cos() * ring_radius,
                y,
                angle.sin() * ring_radius,
            ));
        }
    }
    PointSet::new(positions)
}

/// Great circles through both poles, fanned out over half a turn of azimuth.
pub fn vertical_rings(config: &RingConfig) -> PointSet {
    let per_ring = config.points_per_ring;
    let r = config.radius;
    let mut positions = Vec::with_capacity((config.count * per_ring) as usize);

    for ring in 0..config.count {
        let azimuth = ring as f32 / config.count as f32 * PI;
        let (az_sin, az_cos) = azimuth.sin_cos();

        for point in 0..per_ring {
            let sweep = point as f32 / per_ring as f32 * TAU;
            let (sw_sin, sw_cos) = sweep.sin_cos();
            positions.push(Vec3::new(az_cos * sw_cos * r, sw_sin * r, az_sin * sw_cos * r));
        }
    }
    PointSet::new(positions)
}

/// Uniformly scattered stars in a cube of edge `spread`, each a near-white
/// color with a slight blue bias.
pub fn star_field<R: Rng>(config: &StarLayerConfig, rng: &mut R) -> PointSet {
    let count = config.count as usize;
    let half = config.spread * 0.5;
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for _ in 0..count {
        positions.push(Vec3::new(
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
        ));

        let intensity = rng.gen_range(STAR_MIN_INTENSITY..=1.0);
        let blue = intensity + rng.gen_range(0.0..=STAR_BLUE_BIAS);
        colors.push(Vec3::new(intensity, intensity, blue));
    }
    PointSet::with_colors(positions, colors)
}
