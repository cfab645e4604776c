//! # starsphere
//!
//! A slowly rotating sphere drawn as a cloud of points, overlaid with
//! horizontal and vertical rings of points, in front of a layered starfield.
//! The sphere drifts around its vertical axis and eases toward a tilt that
//! follows the pointer; the camera orbits with the mouse and zooms with the
//! wheel.
//!
//! ## Quick Start
//!
//! ```ignore
//! use starsphere::{DeviceProfile, RunOptions, SceneConfig};
//!
//! fn main() -> Result<(), starsphere::RunError> {
//!     let config = SceneConfig::for_profile(DeviceProfile::detect(None));
//!     starsphere::run(config, RunOptions::default())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`geometry`] generates the point sets: a UV sphere shell, rings and
//!   random star layers.
//! - [`SceneState`] holds the rotations. [`SceneState::advance`] is a pure
//!   per-frame step, so the animation can be driven and tested without a
//!   window.
//! - [`SceneConfig`] carries every tunable, with a reduced profile for
//!   phones and tablets. It round-trips through JSON.
//! - [`run`] opens a window and renders with `wgpu`.

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod scene;
mod shader;
pub mod time;
pub mod visuals;
mod window;

pub use animation::{pointer_target, Rotation, SceneState};
pub use config::{
    CameraConfig, DeviceProfile, RingConfig, SceneConfig, SphereConfig, StarLayerConfig,
};
pub use error::{ConfigError, GpuError, RunError};
pub use geometry::PointSet;
pub use gpu::{Camera, OrbitControls, Projection, RenderTarget, Viewport};
pub use input::Pointer;
pub use scene::{ObjectKind, Scene, SceneObject};
pub use time::Clock;
pub use visuals::{Color, PointMaterial};
pub use window::{run, RunOptions};

pub use glam::{Mat4, Vec2, Vec3};
