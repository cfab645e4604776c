//! The static part of the scene: every point set with its material.

use glam::Mat4;
use rand::Rng;

use crate::animation::SceneState;
use crate::config::SceneConfig;
use crate::geometry::{self, PointSet};
use crate::visuals::{Color, PointMaterial};

/// Which part of the scene an object is. Decides how it rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Sphere,
    HorizontalRings,
    VerticalRings,
    /// Starfield layer, by index. Stars never rotate.
    Stars(usize),
}

impl ObjectKind {
    pub fn label(&self) -> String {
        match self {
            ObjectKind::Sphere => "sphere".to_string(),
            ObjectKind::HorizontalRings => "horizontal rings".to_string(),
            ObjectKind::VerticalRings => "vertical rings".to_string(),
            ObjectKind::Stars(layer) => format!("stars {layer}"),
        }
    }
}

/// One drawable point cloud.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub points: PointSet,
    pub material: PointMaterial,
}

impl SceneObject {
    /// Model matrix for this object in the given animation state.
    pub fn model_matrix(&self, state: &SceneState) -> Mat4 {
        match self.kind {
            ObjectKind::Sphere => state.sphere.to_matrix(),
            ObjectKind::HorizontalRings => state.horizontal_rings.to_matrix(),
            ObjectKind::VerticalRings => state.vertical_rings.to_matrix(),
            ObjectKind::Stars(_) => Mat4::IDENTITY,
        }
    }
}

/// All objects in draw order, plus background and fog.
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub background: Color,
    pub fog_density: f32,
}

impl Scene {
    /// Generate every point set described by `config`.
    ///
    /// Objects are ordered sphere, horizontal rings, vertical rings, then the
    /// star layers nearest-first, which is also the draw order.
    pub fn build<R: Rng>(config: &SceneConfig, rng: &mut R) -> Self {
        let mut objects = vec![
            SceneObject {
                kind: ObjectKind::Sphere,
                points: geometry::sphere_shell(&config.sphere),
                material: PointMaterial::new(config.sphere.point_size, config.sphere.opacity),
            },
            SceneObject {
                kind: ObjectKind::HorizontalRings,
                points: geometry::horizontal_rings(&config.horizontal_rings),
                material: PointMaterial::new(
                    config.horizontal_rings.point_size,
                    config.horizontal_rings.opacity,
                ),
            },
            SceneObject {
                kind: ObjectKind::VerticalRings,
                points: geometry::vertical_rings(&config.vertical_rings),
                material: PointMaterial::new(
                    config.vertical_rings.point_size,
                    config.vertical_rings.opacity,
                ),
            },
        ];

        objects.extend(config.stars.iter().enumerate().map(|(layer, stars)| SceneObject {
            kind: ObjectKind::Stars(layer),
            points: geometry::star_field(stars, rng),
            material: PointMaterial::new(stars.point_size, stars.opacity).with_vertex_colors(),
        }));

        for object in &objects {
            tracing::debug!(
                "Generated {}: {} points (size {})",
                object.kind.label(),
                object.points.len(),
                object.material.size
            );
        }

        Self {
            objects,
            background: config.background,
            fog_density: config.fog_density,
        }
    }

    pub fn get(&self, kind: ObjectKind) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.kind == kind)
    }

    pub fn total_points(&self) -> usize {
        self.objects.iter().map(|o| o.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Rotation;
    use crate::config::DeviceProfile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_build_full_scene() {
        let config = SceneConfig::for_profile(DeviceProfile::Full);
        let scene = Scene::build(&config, &mut StdRng::seed_from_u64(1));

        assert_eq!(scene.objects.len(), 6);
        assert_eq!(scene.total_points(), config.total_points());
        assert_eq!(scene.get(ObjectKind::Sphere).unwrap().points.len(), 49 * 49);
        assert_eq!(
            scene.get(ObjectKind::HorizontalRings).unwrap().points.len(),
            20 * 120
        );
        assert_eq!(scene.get(ObjectKind::Stars(2)).unwrap().points.len(), 2000);
        assert!(scene.get(ObjectKind::Stars(3)).is_none());
    }

    #[test]
    fn test_materials() {
        let config = SceneConfig::for_profile(DeviceProfile::Reduced);
        let scene = Scene::build(&config, &mut StdRng::seed_from_u64(1));

        let sphere = scene.get(ObjectKind::Sphere).unwrap();
        assert_eq!(sphere.material.size, 0.004);
        assert_eq!(sphere.material.opacity, 0.7);
        assert!(!sphere.material.vertex_colors);

        let vertical = scene.get(ObjectKind::VerticalRings).unwrap();
        assert_eq!(vertical.material.opacity, 0.6);

        let stars = scene.get(ObjectKind::Stars(0)).unwrap();
        assert!(stars.material.vertex_colors);
        assert_eq!(stars.material.size, 0.015);
        assert_eq!(stars.material.opacity, 0.9);
    }

    #[test]
    fn test_stars_do_not_rotate() {
        let config = SceneConfig::default();
        let scene = Scene::build(&config, &mut StdRng::seed_from_u64(9));
        let mut state = SceneState::new();
        state.sphere = Rotation::new(0.3, 1.2);
        state.horizontal_rings = state.sphere;

        let stars = scene.get(ObjectKind::Stars(1)).unwrap();
        assert_eq!(stars.model_matrix(&state), Mat4::IDENTITY);

        let rings = scene.get(ObjectKind::HorizontalRings).unwrap();
        assert_eq!(rings.model_matrix(&state), state.sphere.to_matrix());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ObjectKind::Stars(2).label(), "stars 2");
        assert_eq!(ObjectKind::Sphere.label(), "sphere");
    }
}
