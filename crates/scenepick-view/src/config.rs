use std::path::Path;

use serde::{Deserialize, Serialize};
use scenepick_base::ensure_positive;
use scenepick_geometry::{PerspectiveCamera, Point3, Vector3};
use scenepick_gizmo::GizmoConfig;

use crate::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub fov_y_deg: f64,
    pub eye: [f64; 3],
    pub target: [f64; 3],
    pub up: [f64; 3],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov_y_deg: 60.0,
            eye: [6.0, -10.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 0.0, 1.0],
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("viewport.width", f64::from(self.width))?;
        ensure_positive("viewport.height", f64::from(self.height))?;
        ensure_positive("viewport.fov_y_deg", self.fov_y_deg)?;
        if self.fov_y_deg >= 180.0 {
            return Err(scenepick_base::Error::InvalidParameter(
                "viewport.fov_y_deg must be < 180".to_string(),
            )
            .into());
        }
        Ok(())
    }

    pub fn camera(&self) -> PerspectiveCamera {
        let [ux, uy, uz] = self.up;
        PerspectiveCamera {
            fov_y_deg: self.fov_y_deg,
            ..PerspectiveCamera::look_at(
                Point3::from(self.eye),
                Point3::from(self.target),
                Vector3::new(ux, uy, uz),
            )
        }
        .with_viewport(self.width, self.height)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub viewport: ViewportConfig,
    pub gizmo: GizmoConfig,
}

impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;
        self.gizmo.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViewError;

    #[test]
    fn nested_sections_fall_back_to_defaults() -> Result<()> {
        let config = SessionConfig::from_json(
            r#"{ "viewport": { "width": 320, "height": 200 }, "gizmo": { "pick_padding": 6.0 } }"#,
        )?;
        assert_eq!(config.viewport.width, 320);
        assert_eq!(config.viewport.fov_y_deg, 60.0);
        assert_eq!(config.gizmo.pick_padding, 6.0);
        let camera = config.viewport.camera();
        assert_eq!((camera.width, camera.height), (320, 200));
        Ok(())
    }

    #[test]
    fn zero_sized_viewport_is_rejected() {
        let result = SessionConfig::from_json(r#"{ "viewport": { "width": 0 } }"#);
        assert!(matches!(result, Err(ViewError::Config(_))));
    }
}
