use serde::{Deserialize, Serialize};
use scenepick_base::{Result, Tolerance, ensure_positive};

/// Handle sizes, drag sensitivities and clamps for the manipulation widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// On-screen length of the axis handles.
    pub axis_length_px: f32,
    pub center_radius_px: f32,
    /// Radius of the virtual arc-ball used for single-axis rotation.
    pub arc_radius_px: f32,
    pub stroke_width: f32,
    pub head_length_px: f32,
    pub handle_size_px: f32,
    /// Extra width added to strokes in the pick pass.
    pub pick_padding: f32,
    pub ring_segments: usize,
    /// Per-component limit on a single-axis translation delta.
    pub max_translate_delta: f64,
    pub scale_per_pixel: f64,
    pub min_scale: f64,
    pub translate_snap: f64,
    pub rotate_snap_deg: f64,
    pub tolerance: Tolerance,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            axis_length_px: 90.0,
            center_radius_px: 7.0,
            arc_radius_px: 120.0,
            stroke_width: 2.5,
            head_length_px: 14.0,
            handle_size_px: 10.0,
            pick_padding: 4.0,
            ring_segments: 48,
            max_translate_delta: 1.0e4,
            scale_per_pixel: 0.01,
            min_scale: 1.0e-3,
            translate_snap: 0.25,
            rotate_snap_deg: 15.0,
            tolerance: Tolerance::default(),
        }
    }
}

impl GizmoConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("gizmo.axis_length_px", f64::from(self.axis_length_px))?;
        ensure_positive("gizmo.center_radius_px", f64::from(self.center_radius_px))?;
        ensure_positive("gizmo.arc_radius_px", f64::from(self.arc_radius_px))?;
        ensure_positive("gizmo.stroke_width", f64::from(self.stroke_width))?;
        ensure_positive("gizmo.max_translate_delta", self.max_translate_delta)?;
        ensure_positive("gizmo.scale_per_pixel", self.scale_per_pixel)?;
        ensure_positive("gizmo.min_scale", self.min_scale)?;
        ensure_positive("gizmo.translate_snap", self.translate_snap)?;
        ensure_positive("gizmo.rotate_snap_deg", self.rotate_snap_deg)?;
        ensure_positive("gizmo.ring_segments", self.ring_segments as f64)?;
        Ok(())
    }
}
