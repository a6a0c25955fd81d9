pub use cgmath::{Deg, EuclideanSpace, InnerSpace, One, Rad, Rotation3, SquareMatrix, Zero};

pub type Point3 = cgmath::Point3<f64>;
pub type Vector3 = cgmath::Vector3<f64>;
pub type Quaternion = cgmath::Quaternion<f64>;
pub type Matrix4 = cgmath::Matrix4<f64>;

pub mod arcball;
pub mod bounds;
pub mod camera;
pub mod math;
pub mod overlay;
pub mod ray;
pub mod ui;

pub use arcball::{ArcBall, arcball_point};
pub use bounds::Aabb;
pub use camera::{CameraBasis, PerspectiveCamera, ViewportCamera};
pub use math::{clamp_components, normalize_or, renormalize};
pub use overlay::{OverlayCollector, OverlayPainter, OverlayShape};
pub use ray::{LineClosest, Ray, closest_point_on_line_to_ray};
pub use ui::{Color32, Point2, Rect, Stroke, Vec2, pos2, vec2};
