use scenepick_geometry::{
    Aabb, EuclideanSpace, One, Point3, Quaternion, Vector3, renormalize,
};

use crate::{Guid, Placeable};

/// Smallest uniform scale an object can be given.
pub const MIN_SCALE: f64 = 1.0e-3;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub guid: Guid,
    pub name: String,
    origin: Point3,
    orientation: Quaternion,
    scale: f64,
    half_extents: Vector3,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, origin: Point3) -> Self {
        Self {
            guid: Guid::new(),
            name: name.into(),
            origin,
            orientation: Quaternion::one(),
            scale: 1.0,
            half_extents: Vector3::new(0.5, 0.5, 0.5),
        }
    }

    pub fn with_guid(mut self, guid: Guid) -> Self {
        self.guid = guid;
        self
    }

    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.set_orientation(orientation);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_half_extents(mut self, half_extents: Vector3) -> Self {
        self.half_extents = Vector3::new(
            half_extents.x.abs(),
            half_extents.y.abs(),
            half_extents.z.abs(),
        );
        self
    }

    pub fn half_extents(&self) -> Vector3 {
        self.half_extents
    }

    /// Corners of the oriented, scaled box in world space.
    pub fn world_corners(&self) -> [Point3; 8] {
        let h = self.half_extents * self.scale;
        let local = Aabb::new(Point3::from_vec(-h), Point3::from_vec(h));
        local
            .corners()
            .map(|c| self.origin + self.orientation * c.to_vec())
    }
}

impl Placeable for SceneObject {
    fn origin(&self) -> Point3 {
        self.origin
    }

    fn set_origin(&mut self, origin: Point3) {
        if origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite() {
            self.origin = origin;
        }
    }

    fn orientation(&self) -> Quaternion {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quaternion) {
        self.orientation = renormalize(orientation);
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.max(MIN_SCALE);
        }
    }

    fn world_bounds(&self) -> Aabb {
        let corners = self.world_corners();
        corners[1..]
            .iter()
            .fold(Aabb::new(corners[0], corners[0]), |acc, c| acc.include(*c))
    }
}
