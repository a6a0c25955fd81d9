use std::path::Path;

use serde::{Deserialize, Serialize};
use scenepick_base::ensure_positive;
use scenepick_geometry::{Point3, Quaternion, Vector3};

use crate::object::SceneObject;
use crate::scene::Scene;
use crate::{Placeable, Result};

/// JSON form of a scene used by the CLI and tests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    pub objects: Vec<ObjectDescription>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub name: String,
    pub origin: [f64; 3],
    /// Quaternion as `[x, y, z, w]`.
    #[serde(default = "identity")]
    pub orientation: [f64; 4],
    #[serde(default = "unit")]
    pub scale: f64,
    #[serde(default = "half_unit")]
    pub half_extents: [f64; 3],
}

fn identity() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit() -> f64 {
    1.0
}

fn half_unit() -> [f64; 3] {
    [0.5, 0.5, 0.5]
}

impl ObjectDescription {
    fn validate(&self) -> Result<()> {
        ensure_positive(&format!("{}.scale", self.name), self.scale)?;
        for (axis, value) in ["x", "y", "z"].iter().zip(self.half_extents) {
            ensure_positive(&format!("{}.half_extents.{axis}", self.name), value)?;
        }
        Ok(())
    }

    fn build(&self) -> SceneObject {
        let [x, y, z, w] = self.orientation;
        let [hx, hy, hz] = self.half_extents;
        SceneObject::new(self.name.clone(), Point3::from(self.origin))
            .with_orientation(Quaternion::new(w, x, y, z))
            .with_scale(self.scale)
            .with_half_extents(Vector3::new(hx, hy, hz))
    }
}

impl SceneDescription {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Current state of every live object, in arena order.
    pub fn capture(scene: &Scene) -> Self {
        let objects = scene
            .iter()
            .map(|(_, object)| {
                let q = object.orientation();
                let h = object.half_extents();
                ObjectDescription {
                    name: object.name.clone(),
                    origin: object.origin().into(),
                    orientation: [q.v.x, q.v.y, q.v.z, q.s],
                    scale: object.scale(),
                    half_extents: [h.x, h.y, h.z],
                }
            })
            .collect();
        Self { objects }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build(&self) -> Result<Scene> {
        let mut scene = Scene::new();
        for object in &self.objects {
            object.validate()?;
            scene.spawn(object.build());
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneError;

    #[test]
    fn defaults_fill_missing_fields() -> Result<()> {
        let desc = SceneDescription::from_json(
            r#"{ "objects": [ { "name": "crate", "origin": [1.0, 2.0, 3.0] } ] }"#,
        )?;
        let scene = desc.build()?;
        let id = scene.find_by_name("crate").expect("spawned");
        let object = scene.get(id).expect("live");
        assert_eq!(object.origin(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(object.scale(), 1.0);
        Ok(())
    }

    #[test]
    fn capture_reflects_edits() -> Result<()> {
        let mut scene = SceneDescription::from_json(
            r#"{ "objects": [ { "name": "a", "origin": [0, 0, 0], "scale": 2.0 } ] }"#,
        )?
        .build()?;
        let id = scene.find_by_name("a").expect("spawned");
        if let Some(object) = scene.get_mut(id) {
            object.set_origin(Point3::new(4.0, 0.0, 1.0));
        }
        let captured = SceneDescription::capture(&scene);
        assert_eq!(captured.objects[0].origin, [4.0, 0.0, 1.0]);
        assert_eq!(captured.objects[0].scale, 2.0);
        assert_eq!(captured.objects[0].orientation, [0.0, 0.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let desc = SceneDescription::from_json(
            r#"{ "objects": [ { "name": "bad", "origin": [0, 0, 0], "scale": 0.0 } ] }"#,
        )
        .expect("valid json");
        assert!(matches!(desc.build(), Err(SceneError::Invalid(_))));
    }
}
