//! Scene builder

use crate::error::SceneError;
use crate::parser::{parse_blocks, Block};
use octray_accelerators::{LinearList, Octree};
use octray_core::camera::{ArcCamera, PinholeCamera};
use octray_core::color::Color;
use octray_core::environment::EnvironmentMap;
use octray_core::geometry::{Point3f, Vector3f};
use octray_core::light::ArcLight;
use octray_core::material::{ArcMaterial, Material};
use octray_core::primitive::ArcPrimitive;
use octray_core::scene::Scene;
use octray_lights::{DirectionalLight, PointLight, SpotLight};
use octray_shapes::{Cuboid, Plane, Sphere};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Which aggregate the bounded primitives go into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AggregateKind {
    /// Rope-linked octree.
    Octree,

    /// Linear scan; useful for tiny scenes and debugging.
    Linear,
}

/// Loads and builds a scene from a file. Relative paths inside the scene
/// (the environment map) resolve against the file's directory.
///
/// * `path`      - Path to the scene description.
/// * `aggregate` - Aggregate for the bounded primitives.
pub fn load_scene<P: AsRef<Path>>(path: P, aggregate: AggregateKind) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    build_scene(&text, path.parent(), aggregate)
}

/// Builds a scene from description text.
///
/// * `text`      - Scene description.
/// * `base`      - Directory relative paths resolve against.
/// * `aggregate` - Aggregate for the bounded primitives.
pub fn build_scene(
    text: &str,
    base: Option<&Path>,
    aggregate: AggregateKind,
) -> Result<Scene, SceneError> {
    let blocks = parse_blocks(text)?;

    let mut camera: Option<ArcCamera> = None;
    let mut materials: HashMap<String, ArcMaterial> = HashMap::new();
    let mut bounded: Vec<ArcPrimitive> = vec![];
    let mut unbounded: Vec<ArcPrimitive> = vec![];
    let mut lights: Vec<ArcLight> = vec![];
    let mut ambient = Color::black();
    let mut background = Color::black();
    let mut environment = None;

    for block in blocks.iter() {
        match block.name.as_str() {
            "camera" => {
                let eye = require_point(block, "eye")?;
                let look_at = block.props.find_point("look_at").unwrap_or_default();
                let up = block
                    .props
                    .find_vector("up")
                    .unwrap_or_else(|| Vector3f::new(0.0, 1.0, 0.0));
                let fov = block.props.find_one_float("fov", 45.0);
                camera = Some(Arc::new(PinholeCamera::new(eye, look_at, up, fov)));
            }
            "material" => {
                let name = block
                    .label
                    .clone()
                    .ok_or_else(|| missing(block, "name"))?;
                materials.insert(name, Arc::new(build_material(block)));
            }
            "sphere" => {
                let center = block.props.find_point("center").unwrap_or_default();
                let radius = block.props.find_one_float("radius", 1.0);
                let material = resolve_material(block, &materials)?;
                bounded.push(Arc::new(Sphere::new(center, radius, material)));
            }
            "cuboid" => {
                let p_min = require_point(block, "min")?;
                let p_max = require_point(block, "max")?;
                let material = resolve_material(block, &materials)?;
                bounded.push(Arc::new(Cuboid::new(p_min, p_max, material)));
            }
            "plane" => {
                let point = block.props.find_point("point").unwrap_or_default();
                let normal = block
                    .props
                    .find_vector("normal")
                    .unwrap_or_else(|| Vector3f::new(0.0, 1.0, 0.0));
                let material = resolve_material(block, &materials)?;
                unbounded.push(Arc::new(Plane::new(point, normal, material)));
            }
            "directional_light" => {
                let direction = require_vector(block, "direction")?;
                let color = block.props.find_color("color", Color::white());
                lights.push(Arc::new(DirectionalLight::new(direction, color)));
            }
            "point_light" => {
                let position = require_point(block, "position")?;
                let color = block.props.find_color("color", Color::white());
                lights.push(Arc::new(PointLight::new(
                    position,
                    color,
                    block.props.find_one_float("constant", 1.0),
                    block.props.find_one_float("linear", 0.0),
                    block.props.find_one_float("quadratic", 0.0),
                )));
            }
            "spot_light" => {
                let position = require_point(block, "position")?;
                let direction = require_vector(block, "direction")?;
                let color = block.props.find_color("color", Color::white());
                lights.push(Arc::new(SpotLight::new(
                    position,
                    direction,
                    color,
                    block.props.find_one_float("cutoff", 45.0),
                    block.props.find_one_float("exponent", 1.0),
                    block.props.find_one_float("constant", 1.0),
                    block.props.find_one_float("linear", 0.0),
                    block.props.find_one_float("quadratic", 0.0),
                )));
            }
            "ambient_light" => {
                ambient += block.props.find_color("color", Color::white());
            }
            "background" => {
                background = block.props.find_color("color", Color::black());
            }
            "environment" => {
                let file = block
                    .props
                    .find_one_string("file")
                    .ok_or_else(|| missing(block, "file"))?;
                let path = match base {
                    Some(base) => base.join(file),
                    None => Path::new(file).to_path_buf(),
                };
                environment = Some(EnvironmentMap::load(path)?);
            }
            other => return Err(SceneError::UnknownBlock(other.to_string())),
        }
    }

    let camera = camera.ok_or(SceneError::MissingCamera)?;

    info!(
        "scene: {} bounded, {} unbounded primitives, {} lights",
        bounded.len(),
        unbounded.len(),
        lights.len()
    );

    let aggregate: Box<dyn octray_core::primitive::Aggregate> = match aggregate {
        AggregateKind::Octree => Box::new(Octree::new(bounded)),
        AggregateKind::Linear => Box::new(LinearList::new(bounded)),
    };

    Ok(Scene {
        camera,
        aggregate,
        unbounded,
        lights,
        ambient,
        background,
        environment,
        distance_scale: 0.0,
    })
}

fn build_material(block: &Block) -> Material {
    let defaults = Material::default();
    Material {
        ke: block.props.find_color("ke", defaults.ke),
        ka: block.props.find_color("ka", defaults.ka),
        kd: block.props.find_color("kd", defaults.kd),
        ks: block.props.find_color("ks", defaults.ks),
        kr: block.props.find_color("kr", defaults.kr),
        kt: block.props.find_color("kt", defaults.kt),
        index: block.props.find_one_float("index", defaults.index),
        shininess: block.props.find_one_float("shininess", defaults.shininess),
    }
}

fn resolve_material(
    block: &Block,
    materials: &HashMap<String, ArcMaterial>,
) -> Result<ArcMaterial, SceneError> {
    match block.props.find_one_string("material") {
        Some(name) => materials
            .get(name)
            .cloned()
            .ok_or_else(|| SceneError::UnknownMaterial(name.to_string())),
        None => Ok(Arc::new(Material::default())),
    }
}

fn require_point(block: &Block, name: &str) -> Result<Point3f, SceneError> {
    block.props.find_point(name).ok_or_else(|| missing(block, name))
}

fn require_vector(block: &Block, name: &str) -> Result<Vector3f, SceneError> {
    block.props.find_vector(name).ok_or_else(|| missing(block, name))
}

fn missing(block: &Block, name: &str) -> SceneError {
    SceneError::MissingProperty(block.name.clone(), name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use octray_core::geometry::Ray;

    const CORNELL_ISH: &str = r#"
        camera {
            eye 0 1 5
            look_at 0 1 0
            fov 60
        }

        material "red" {
            kd 0.9 0.1 0.1
            ks 0.5 0.5 0.5
            shininess 64
        }

        material "glass" {
            kt 0.9 0.9 0.9
            index 1.5
        }

        sphere { center -1 1 0  radius 0.5  material "red" }
        sphere { center 1 1 0  radius 0.5  material "glass" }
        plane { point 0 0 0  normal 0 1 0 }

        point_light { position 0 4 0  quadratic 0.1 }
        ambient_light { color 0.1 0.1 0.1 }
        background { color 0.2 0.3 0.4 }
    "#;

    #[test]
    fn builds_complete_scene() {
        let scene = build_scene(CORNELL_ISH, None, AggregateKind::Octree).unwrap();

        assert_eq!(scene.unbounded.len(), 1);
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.ambient, Color::new(0.1, 0.1, 0.1));
        assert_eq!(scene.background, Color::new(0.2, 0.3, 0.4));

        // The glass sphere is reachable through the aggregate.
        let ray = Ray::new(Point3f::new(1.0, 1.0, 5.0), Vector3f::new(0.0, 0.0, -1.0));
        let hit = scene.intersect(&ray).unwrap();
        let material = hit.prim.unwrap().material();
        assert_eq!(material.index, 1.5);
    }

    #[test]
    fn unknown_material_is_an_error() {
        let text = r#"
            camera { eye 0 0 5 }
            sphere { material "nope" }
        "#;
        assert!(matches!(
            build_scene(text, None, AggregateKind::Linear),
            Err(SceneError::UnknownMaterial(name)) if name == "nope"
        ));
    }

    #[test]
    fn camera_is_required() {
        assert!(matches!(
            build_scene("sphere { radius 1 }", None, AggregateKind::Linear),
            Err(SceneError::MissingCamera)
        ));
    }

    #[test]
    fn unknown_block_is_an_error() {
        assert!(matches!(
            build_scene("torus { }", None, AggregateKind::Linear),
            Err(SceneError::UnknownBlock(name)) if name == "torus"
        ));
    }

    #[test]
    fn unnamed_material_is_an_error() {
        assert!(matches!(
            build_scene("material { kd 1 0 0 }", None, AggregateKind::Linear),
            Err(SceneError::MissingProperty(block, _)) if block == "material"
        ));
    }
}
