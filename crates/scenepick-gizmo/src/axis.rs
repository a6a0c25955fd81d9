use serde::{Deserialize, Serialize};
use scenepick_geometry::{Color32, Quaternion, Vector3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoAxis {
    #[default]
    None,
    X,
    Y,
    Z,
    /// Unconstrained drag from the center handle.
    All,
}

impl GizmoAxis {
    pub const HANDLES: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn unit(self) -> Option<Vector3> {
        match self {
            GizmoAxis::X => Some(Vector3::unit_x()),
            GizmoAxis::Y => Some(Vector3::unit_y()),
            GizmoAxis::Z => Some(Vector3::unit_z()),
            GizmoAxis::None | GizmoAxis::All => None,
        }
    }

    /// World direction of the axis for an object with `orientation`.
    pub fn direction(self, orientation: Quaternion) -> Option<Vector3> {
        self.unit().map(|unit| orientation * unit)
    }

    pub fn color(self) -> Color32 {
        match self {
            GizmoAxis::X => Color32::from_rgb(225, 64, 64),
            GizmoAxis::Y => Color32::from_rgb(84, 196, 84),
            GizmoAxis::Z => Color32::from_rgb(72, 112, 232),
            GizmoAxis::All => Color32::WHITE,
            GizmoAxis::None => Color32::from_gray(128),
        }
    }
}

pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 214, 48);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl std::fmt::Display for GizmoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GizmoMode::Translate => "translate",
            GizmoMode::Rotate => "rotate",
            GizmoMode::Scale => "scale",
        };
        f.write_str(label)
    }
}
