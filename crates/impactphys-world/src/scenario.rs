//! JSON scene descriptors. Everything is validated before a scene is touched.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use impactphys_core::{Quat, SceneConfig, Vec3};
use impactphys_dynamics::Body;
use impactphys_geom::Shape;

use crate::Scene;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere { radius: f32 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`; normalized on load.
    #[serde(default = "identity_xyzw")]
    pub orientation: [f32; 4],
    #[serde(default)]
    pub linear_velocity: [f32; 3],
    #[serde(default)]
    pub angular_velocity: [f32; 3],
    /// 0 means immovable.
    #[serde(default)]
    pub inv_mass: f32,
    #[serde(default)]
    pub elasticity: f32,
    #[serde(default)]
    pub friction: f32,
    pub shape: ShapeDesc,
}

fn identity_xyzw() -> [f32; 4] { [0.0, 0.0, 0.0, 1.0] }

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ScenarioDesc {
    #[serde(default)]
    pub config: SceneConfig,
    pub bodies: Vec<BodyDesc>,
}

fn finite3(v: &[f32; 3]) -> bool { v.iter().all(|c| c.is_finite()) }

impl BodyDesc {
    pub fn to_body(&self) -> Result<Body> {
        if !finite3(&self.position) { bail!("position must be finite"); }
        if !finite3(&self.linear_velocity) { bail!("linear_velocity must be finite"); }
        if !finite3(&self.angular_velocity) { bail!("angular_velocity must be finite"); }
        if !(self.inv_mass.is_finite() && self.inv_mass >= 0.0) {
            bail!("inv_mass must be finite and >= 0, got {}", self.inv_mass);
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            bail!("elasticity must be in [0, 1], got {}", self.elasticity);
        }
        if !(0.0..=1.0).contains(&self.friction) {
            bail!("friction must be in [0, 1], got {}", self.friction);
        }

        let q = Quat::from_array(self.orientation);
        if !q.is_finite() || q.length_squared() <= f32::EPSILON {
            return Err(anyhow!("orientation must be a finite non-zero quaternion"));
        }

        let shape = match self.shape {
            ShapeDesc::Sphere { radius } => {
                if !(radius.is_finite() && radius > 0.0) { bail!("sphere radius must be > 0, got {radius}"); }
                Shape::sphere(radius)
            }
        };

        Ok(Body::new(Vec3::from_array(self.position), shape)
            .with_orientation(q)
            .with_linear_velocity(Vec3::from_array(self.linear_velocity))
            .with_angular_velocity(Vec3::from_array(self.angular_velocity))
            .with_inv_mass(self.inv_mass)
            .with_elasticity(self.elasticity)
            .with_friction(self.friction))
    }
}

impl ScenarioDesc {
    /// Fast ball, resting ball, huge ground sphere; z-up.
    pub fn showcase() -> Self {
        let ball = |x: f32, vx: f32, inv_mass: f32| BodyDesc {
            position: [x, 0.0, 3.0],
            orientation: identity_xyzw(),
            linear_velocity: [vx, 0.0, 0.0],
            angular_velocity: [0.0; 3],
            inv_mass,
            elasticity: 0.0,
            friction: 0.5,
            shape: ShapeDesc::Sphere { radius: 0.5 },
        };
        let ground = BodyDesc {
            position: [0.0, 0.0, -1000.0],
            orientation: identity_xyzw(),
            linear_velocity: [0.0; 3],
            angular_velocity: [0.0; 3],
            inv_mass: 0.0,
            elasticity: 1.0,
            friction: 1.0,
            shape: ShapeDesc::Sphere { radius: 1000.0 },
        };
        Self {
            config: SceneConfig::default(),
            bodies: vec![ball(-3.0, 1000.0, 1.0), ball(0.0, 0.0, 0.0), ground],
        }
    }

    pub fn to_bodies(&self) -> Result<Vec<Body>> {
        if !finite3(&self.config.gravity) { bail!("gravity must be finite"); }
        self.bodies.iter().enumerate()
            .map(|(i, b)| b.to_body().with_context(|| format!("body {i}")))
            .collect()
    }
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioDesc> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing scenario {}", path.display()))
}

pub fn build_scene(desc: &ScenarioDesc) -> Result<Scene> {
    let bodies = desc.to_bodies()?;
    let mut scene = Scene::with_capacity(bodies.len(), desc.config);
    for b in bodies { scene.add_body(b); }
    Ok(scene)
}

impl Scene {
    /// Replace config and bodies. On error the scene is left untouched.
    pub fn load(&mut self, desc: &ScenarioDesc) -> Result<()> {
        let bodies = desc.to_bodies()?;
        self.reset();
        self.set_config(desc.config);
        for b in bodies { self.add_body(b); }
        Ok(())
    }
}
