//! Translate, rotate and uniform-scale manipulation of a selected object.
//!
//! The widget never hit-tests geometry itself: its handles are drawn into the
//! pick pass under their own proxies, and clicks are resolved through the
//! last completed readback.

mod axis;
mod config;
mod drag;
mod draw;
mod input;
mod widget;

pub use axis::{GizmoAxis, GizmoMode, HIGHLIGHT};
pub use config::GizmoConfig;
pub use drag::{
    DragStart, ManipulationSnapshot, axis_rotation, axis_translation, constant_depth_origin,
    snap, uniform_scale,
};
pub use draw::HandleShapes;
pub use input::{InputEvent, Key, Modifiers, MouseButton};
pub use widget::{GizmoState, ManipulationWidget};

use scenepick_scene::ObjectId;

/// What a pick-pass pixel can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitProxy {
    Object(ObjectId),
    Axis(GizmoAxis),
}
