use thiserror::Error;

mod description;
mod object;
mod scene;

pub use description::{ObjectDescription, SceneDescription};
pub use object::{MIN_SCALE, SceneObject};
pub use scene::{Scene, SceneEvent};
pub use scenepick_base::{Guid, ObjectId};

use scenepick_geometry::{Aabb, Point3, Quaternion};

#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Invalid(#[from] scenepick_base::Error),
    #[error("scene description is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// The narrow capability a manipulated object exposes.
///
/// Setters sanitize their input: orientations are renormalized, scales are
/// clamped to a positive minimum and non-finite values are ignored.
pub trait Placeable {
    fn origin(&self) -> Point3;
    fn set_origin(&mut self, origin: Point3);
    fn orientation(&self) -> Quaternion;
    fn set_orientation(&mut self, orientation: Quaternion);
    fn scale(&self) -> f64;
    fn set_scale(&mut self, scale: f64);
    fn world_bounds(&self) -> Aabb;
}

/// Lookup of placeable objects by id, handed to the gizmo per call.
pub trait SceneAccess {
    fn placeable(&self, id: ObjectId) -> Option<&dyn Placeable>;
    fn placeable_mut(&mut self, id: ObjectId) -> Option<&mut dyn Placeable>;
}
