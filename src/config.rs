//! Scene configuration.
//!
//! Every tunable of the scene lives in [`SceneConfig`]. The two built-in
//! profiles differ only in detail level: the reduced profile halves ring
//! counts, lowers sphere resolution, enlarges points slightly and turns off
//! antialiasing. A config can also be loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::visuals::Color;

/// Device capability class, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceProfile {
    /// Phones and tablets: reduced point counts, no antialiasing.
    Reduced,
    /// Full detail.
    #[default]
    Full,
}

const MOBILE_MARKERS: [&str; 4] = ["iphone", "ipad", "ipod", "android"];

impl DeviceProfile {
    /// Classify a user-agent string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if MOBILE_MARKERS.iter().any(|marker| ua.contains(marker)) {
            DeviceProfile::Reduced
        } else {
            DeviceProfile::Full
        }
    }

    /// Pick a profile from the user agent if one is known, otherwise from the
    /// build target.
    pub fn detect(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) => Self::from_user_agent(ua),
            None if cfg!(any(target_os = "android", target_os = "ios")) => DeviceProfile::Reduced,
            None => DeviceProfile::Full,
        }
    }

    pub fn is_reduced(self) -> bool {
        self == DeviceProfile::Reduced
    }
}

/// The filled sphere shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub point_size: f32,
    pub opacity: f32,
}

/// A family of rings (horizontal or vertical).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub radius: f32,
    pub count: u32,
    pub points_per_ring: u32,
    pub point_size: f32,
    pub opacity: f32,
}

/// One starfield layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarLayerConfig {
    pub count: u32,
    pub point_size: f32,
    /// Edge length of the cube the stars are scattered in.
    pub spread: f32,
    pub opacity: f32,
}

impl StarLayerConfig {
    const fn new(count: u32, point_size: f32, spread: f32) -> Self {
        Self {
            count,
            point_size,
            spread,
            opacity: 0.9,
        }
    }
}

/// Perspective camera and orbit-control settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance from the origin along +Z.
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            distance: 4.0,
            min_distance: 2.0,
            max_distance: 10.0,
            damping_factor: 0.05,
            rotate_speed: 0.5,
            zoom_speed: 1.0,
        }
    }
}

/// Everything needed to build and render the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub profile: DeviceProfile,
    pub sphere: SphereConfig,
    pub horizontal_rings: RingConfig,
    pub vertical_rings: RingConfig,
    pub stars: Vec<StarLayerConfig>,
    pub camera: CameraConfig,
    pub background: Color,
    pub fog_density: f32,
    pub antialias: bool,
    /// Upper bound on the device pixel ratio used for the render target.
    pub max_pixel_ratio: f64,
}

impl SceneConfig {
    /// Built-in settings for a device profile.
    pub fn for_profile(profile: DeviceProfile) -> Self {
        let reduced = profile.is_reduced();
        let pick = |low: f32, high: f32| if reduced { low } else { high };
        let pick_n = |low: u32, high: u32| if reduced { low } else { high };

        Self {
            profile,
            sphere: SphereConfig {
                radius: 1.0,
                width_segments: pick_n(24, 48),
                height_segments: pick_n(24, 48),
                point_size: pick(0.004, 0.003),
                opacity: 0.7,
            },
            horizontal_rings: RingConfig {
                radius: 1.01,
                count: pick_n(10, 20),
                points_per_ring: pick_n(80, 120),
                point_size: pick(0.003, 0.002),
                opacity: 0.7,
            },
            vertical_rings: RingConfig {
                radius: 1.02,
                count: pick_n(8, 16),
                points_per_ring: pick_n(80, 120),
                point_size: pick(0.003, 0.002),
                opacity: 0.6,
            },
            stars: vec![
                StarLayerConfig::new(700, 0.015, 12.0),
                StarLayerConfig::new(1200, 0.012, 20.0),
                StarLayerConfig::new(2000, 0.008, 35.0),
            ],
            camera: CameraConfig::default(),
            background: Color::from_hex(0x151414),
            fog_density: 0.15,
            antialias: !reduced,
            max_pixel_ratio: 2.0,
        }
    }

    /// Load a config from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the generators or renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sphere = &self.sphere;
        positive("sphere.radius", sphere.radius)?;
        if sphere.width_segments < 3 {
            return Err(ConfigError::invalid(
                "sphere.width_segments",
                format!("must be at least 3, got {}", sphere.width_segments),
            ));
        }
        if sphere.height_segments < 2 {
            return Err(ConfigError::invalid(
                "sphere.height_segments",
                format!("must be at least 2, got {}", sphere.height_segments),
            ));
        }
        positive("sphere.point_size", sphere.point_size)?;
        unit("sphere.opacity", sphere.opacity)?;

        validate_rings(&self.horizontal_rings, &HORIZONTAL_FIELDS)?;
        if self.horizontal_rings.radius < crate::geometry::RING_HEIGHT_LIMIT {
            return Err(ConfigError::invalid(
                "horizontal_rings.radius",
                format!(
                    "must be at least {} so every ring height lies on the sphere, got {}",
                    crate::geometry::RING_HEIGHT_LIMIT,
                    self.horizontal_rings.radius
                ),
            ));
        }
        validate_rings(&self.vertical_rings, &VERTICAL_FIELDS)?;

        for layer in &self.stars {
            if layer.count == 0 {
                return Err(ConfigError::invalid("stars.count", "must be positive"));
            }
            positive("stars.point_size", layer.point_size)?;
            positive("stars.spread", layer.spread)?;
            unit("stars.opacity", layer.opacity)?;
        }

        let camera = &self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(ConfigError::invalid(
                "camera.fov_y_degrees",
                format!("must be in (0, 180), got {}", camera.fov_y_degrees),
            ));
        }
        positive("camera.near", camera.near)?;
        if camera.far <= camera.near {
            return Err(ConfigError::invalid("camera.far", "must be greater than camera.near"));
        }
        positive("camera.min_distance", camera.min_distance)?;
        if camera.max_distance < camera.min_distance {
            return Err(ConfigError::invalid(
                "camera.max_distance",
                "must not be less than camera.min_distance",
            ));
        }
        unit("camera.damping_factor", camera.damping_factor)?;

        if self.fog_density < 0.0 {
            return Err(ConfigError::invalid("fog_density", "must not be negative"));
        }
        if !(self.max_pixel_ratio > 0.0) {
            return Err(ConfigError::invalid("max_pixel_ratio", "must be positive"));
        }
        Ok(())
    }

    /// Total number of points across every object in the scene.
    pub fn total_points(&self) -> usize {
        let sphere = (self.sphere.width_segments as usize + 1)
            * (self.sphere.height_segments as usize + 1);
        let rings = |r: &RingConfig| r.count as usize * r.points_per_ring as usize;
        let stars: usize = self.stars.iter().map(|l| l.count as usize).sum();
        sphere + rings(&self.horizontal_rings) + rings(&self.vertical_rings) + stars
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::for_profile(DeviceProfile::default())
    }
}

struct RingFields {
    count: &'static str,
    points_per_ring: &'static str,
    radius: &'static str,
    point_size: &'static str,
    opacity: &'static str,
}

const HORIZONTAL_FIELDS: RingFields = RingFields {
    count: "horizontal_rings.count",
    points_per_ring: "horizontal_rings.points_per_ring",
    radius: "horizontal_rings.radius",
    point_size: "horizontal_rings.point_size",
    opacity: "horizontal_rings.opacity",
};

const VERTICAL_FIELDS: RingFields = RingFields {
    count: "vertical_rings.count",
    points_per_ring: "vertical_rings.points_per_ring",
    radius: "vertical_rings.radius",
    point_size: "vertical_rings.point_size",
    opacity: "vertical_rings.opacity",
};

fn validate_rings(rings: &RingConfig, fields: &RingFields) -> Result<(), ConfigError> {
    if rings.count < 2 {
        return Err(ConfigError::invalid(
            fields.count,
            format!("must be at least 2, got {}", rings.count),
        ));
    }
    if rings.points_per_ring == 0 {
        return Err(ConfigError::invalid(fields.points_per_ring, "must be positive"));
    }
    positive(fields.radius, rings.radius)?;
    positive(fields.point_size, rings.point_size)?;
    unit(fields.opacity, rings.opacity)
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_user_agents() {
        let agents = [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
            "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X)",
            "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
            "something ANDROID something",
        ];
        for ua in agents {
            assert_eq!(DeviceProfile::from_user_agent(ua), DeviceProfile::Reduced, "{ua}");
        }
    }

    #[test]
    fn test_desktop_user_agents() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
        assert_eq!(DeviceProfile::from_user_agent(ua), DeviceProfile::Full);
        assert_eq!(DeviceProfile::detect(Some(ua)), DeviceProfile::Full);
    }

    #[test]
    fn test_profiles_differ_in_detail() {
        let full = SceneConfig::for_profile(DeviceProfile::Full);
        let reduced = SceneConfig::for_profile(DeviceProfile::Reduced);

        assert_eq!(full.sphere.width_segments, 48);
        assert_eq!(reduced.sphere.width_segments, 24);
        assert_eq!(full.horizontal_rings.count, 20);
        assert_eq!(reduced.horizontal_rings.count, 10);
        assert_eq!(full.vertical_rings.count, 16);
        assert_eq!(reduced.vertical_rings.count, 8);
        assert_eq!(full.horizontal_rings.points_per_ring, 120);
        assert_eq!(reduced.vertical_rings.points_per_ring, 80);
        assert!(full.antialias);
        assert!(!reduced.antialias);
        assert!(reduced.sphere.point_size > full.sphere.point_size);

        // The starfield does not depend on the profile.
        assert_eq!(full.stars, reduced.stars);
    }

    #[test]
    fn test_builtin_profiles_validate() {
        SceneConfig::for_profile(DeviceProfile::Full).validate().unwrap();
        SceneConfig::for_profile(DeviceProfile::Reduced).validate().unwrap();
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SceneConfig::for_profile(DeviceProfile::Reduced);
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"background\": \"#151414\""));
        let back = SceneConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_rejects_single_ring() {
        let mut config = SceneConfig::default();
        config.horizontal_rings.count = 1;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "horizontal_rings.count", .. }
        ));
    }

    #[test]
    fn test_rejects_ring_radius_below_height_limit() {
        let mut config = SceneConfig::default();
        config.horizontal_rings.radius = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_camera_bounds() {
        let mut config = SceneConfig::default();
        config.camera.min_distance = 12.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_opacity() {
        let mut config = SceneConfig::default();
        config.stars[1].opacity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_total_points() {
        let config = SceneConfig::for_profile(DeviceProfile::Full);
        let expected = 49 * 49 + 20 * 120 + 16 * 120 + 700 + 1200 + 2000;
        assert_eq!(config.total_points(), expected);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
