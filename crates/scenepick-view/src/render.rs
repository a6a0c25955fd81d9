use scenepick_geometry::{Color32, OverlayPainter, Stroke, ViewportCamera};
use scenepick_scene::SceneObject;

// Corner indices into `SceneObject::world_corners`.
const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Draws the object's box as six projected quads. Objects with a corner
/// behind the near plane are skipped.
pub fn draw_object<C, P>(painter: &mut P, camera: &C, object: &SceneObject, fill: Color32)
where
    C: ViewportCamera + ?Sized,
    P: OverlayPainter + ?Sized,
{
    let mut screen = Vec::with_capacity(8);
    for corner in object.world_corners() {
        match camera.project(corner) {
            Some((pos, _)) => screen.push(pos),
            None => return,
        }
    }
    let outline = Stroke::new(1.0, Color32::from_gray(30));
    for face in FACES {
        let points = face.iter().map(|&i| screen[i]).collect();
        painter.polygon(points, fill, outline);
    }
}
