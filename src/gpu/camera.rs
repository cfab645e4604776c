//! Camera for the 3D orbit view.
//!
//! The camera is split in three: a [`Viewport`] that knows the window size
//! and pixel density, a [`Projection`] that turns the viewport aspect into a
//! perspective matrix, and [`OrbitControls`] that place the eye on a sphere
//! around the origin and ease drag and zoom input in over several frames.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLE_EPSILON: f32 = 1e-6;

/// Deltas smaller than this are treated as settled.
const SETTLE_EPSILON: f32 = 1e-6;

/// Window size in logical pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
    pub max_pixel_ratio: f64,
}

/// The size the renderer should draw at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTarget {
    /// Logical width, unrounded.
    pub width: f64,
    /// Logical height, unrounded.
    pub height: f64,
    pub pixel_ratio: f64,
}

impl RenderTarget {
    /// Size of the drawing buffer in physical pixels, never zero.
    ///
    /// When the pixel ratio is not capped this is exactly the window's
    /// physical size.
    pub fn physical_size(&self) -> (u32, u32) {
        let scale = |v: f64| ((v * self.pixel_ratio).round().max(0.0) as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
            max_pixel_ratio,
        }
    }

    /// Build from the physical size and scale factor winit reports.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64, max_pixel_ratio: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new(width as f64 / scale, height as f64 / scale, scale, max_pixel_ratio)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// Device pixel ratio capped at `max_pixel_ratio`.
    pub fn pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.min(self.max_pixel_ratio)
    }

    /// Width over height, falling back to 1 while the window is minimized.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Window size in physical pixels, the space winit reports cursor
    /// positions in. Not affected by the pixel ratio cap.
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(
            (self.width * self.device_pixel_ratio) as f32,
            (self.height * self.device_pixel_ratio) as f32,
        )
    }

    pub fn render_target(&self) -> RenderTarget {
        RenderTarget {
            width: self.width.max(0.0),
            height: self.height.max(0.0),
            pixel_ratio: self.pixel_ratio(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

/// Perspective projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y: config.fov_y_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Projection matrix with wgpu's `[0, 1]` depth range.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// Orbit camera with damped rotation and clamped dolly zoom.
///
/// Panning is not supported; the camera always looks at `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Distance from the target.
    radius: f32,
    /// Azimuth around +Y, zero on the +Z axis.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    min_distance: f32,
    max_distance: f32,
    damping_factor: f32,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitControls {
    /// Start on the +Z axis at the configured distance.
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            radius: config.distance.clamp(config.min_distance, config.max_distance),
            theta: 0.0,
            phi: PI / 2.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    pub fn polar(&self) -> f32 {
        self.phi
    }

    /// Queue a rotation for a pointer drag of `delta` pixels. Dragging the full
    /// viewport height turns the camera by `TAU * rotate_speed`.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.pending_theta -= TAU * delta.x / viewport_height * self.rotate_speed;
        self.pending_phi -= TAU * delta.y / viewport_height * self.rotate_speed;
    }

    /// Queue a zoom of `steps` wheel notches. Positive moves closer.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_scale *= 0.95f32.powf(self.zoom_speed * steps);
    }

    /// Apply one frame of damping. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        let before = (self.theta, self.phi, self.radius);

        self.theta += self.pending_theta * self.damping_factor;
        self.phi = (self.phi + self.pending_phi * self.damping_factor)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        self.pending_theta *= 1.0 - self.damping_factor;
        self.pending_phi *= 1.0 - self.damping_factor;
        self.pending_scale = 1.0;

        if self.pending_theta.abs() < SETTLE_EPSILON {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < SETTLE_EPSILON {
            self.pending_phi = 0.0;
        }

        before != (self.theta, self.phi, self.radius)
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                self.radius * sin_phi * sin_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * cos_theta,
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}

/// Projection plus orbit controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub controls: OrbitControls,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            projection: Projection::new(config, aspect),
            controls: OrbitControls::new(config),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection.matrix() * self.controls.view_matrix()
    }
}
