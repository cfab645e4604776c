//! Per-frame rotation update.
//!
//! [`SceneState`] is the only state that changes while the scene runs. Each
//! frame the sphere drifts around its Y axis, eases toward the rotation the
//! pointer asks for, and hands its rotation to both ring sets.
//!
//! The easing factor is applied once per frame and is not scaled by the frame
//! delta, so the approach is faster on high refresh-rate displays. That is the
//! intended look, and tests pin it.

use glam::{Mat4, Vec2};

/// Constant spin around the Y axis, in radians per second.
pub const DRIFT_SPEED: f32 = 0.1;

/// Fraction of the remaining distance to the target covered each frame.
pub const DAMPING: f32 = 0.05;

/// How far (in radians) the pointer can tilt the sphere from center to edge.
pub const POINTER_TILT: f32 = 0.5;

/// Rotation about the X and Y axes, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
}

impl Rotation {
    pub const ZERO: Rotation = Rotation { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Move each axis `factor` of the way toward `target`.
    pub fn approach(self, target: Rotation, factor: f32) -> Rotation {
        Rotation {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }

    /// Model matrix for this rotation, X applied after Y.
    pub fn to_matrix(self) -> Mat4 {
        Mat4::from_rotation_x(self.x) * Mat4::from_rotation_y(self.y)
    }
}

/// Target rotation for a pointer at `position` inside a `viewport`, both in
/// the same units (physical pixels from winit).
///
/// Moving the pointer vertically tilts about X, horizontally about Y. The
/// viewport center maps to no rotation.
pub fn pointer_target(position: Vec2, viewport: Vec2) -> Rotation {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Rotation::ZERO;
    }
    let normalized = position / viewport - Vec2::splat(0.5);
    Rotation {
        x: normalized.y * POINTER_TILT,
        y: normalized.x * POINTER_TILT,
    }
}

/// Rotation state of every animated object plus the pointer target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneState {
    pub sphere: Rotation,
    pub horizontal_rings: Rotation,
    pub vertical_rings: Rotation,
    /// Written by pointer handling, only read by [`SceneState::advance`].
    pub target: Rotation,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the sphere toward a new target. Takes effect on the next frame.
    pub fn set_target(&mut self, target: Rotation) {
        self.target = target;
    }

    /// The state one frame later, `delta_time` seconds after this one.
    pub fn advance(self, delta_time: f32) -> SceneState {
        let mut sphere = self.sphere;
        sphere.y += delta_time * DRIFT_SPEED;
        let sphere = sphere.approach(self.target, DAMPING);

        SceneState {
            sphere,
            horizontal_rings: sphere,
            vertical_rings: sphere,
            target: self.target,
        }
    }

    /// In-place form of [`SceneState::advance`].
    pub fn step(&mut self, delta_time: f32) {
        *self = self.advance(delta_time);
    }

    /// Whether both ring sets are in lockstep with the sphere.
    pub fn rings_follow_sphere(&self) -> bool {
        self.horizontal_rings == self.sphere && self.vertical_rings == self.sphere
    }
}
