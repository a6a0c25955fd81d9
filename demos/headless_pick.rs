use anyhow::Result;
use scenepick_geometry::{Point3, ViewportCamera, pos2};
use scenepick_gizmo::HitProxy;
use scenepick_scene::{Scene, SceneObject};
use scenepick_view::{SessionConfig, ViewportSession};

// Prints a coarse character map of what the pick pass resolves each pixel to.
fn main() -> Result<()> {
    let mut scene = Scene::new();
    scene.spawn(SceneObject::new("left", Point3::new(-2.5, 0.0, 0.0)));
    scene.spawn(SceneObject::new("right", Point3::new(2.5, 1.0, 0.5)).with_scale(1.5));

    let mut session = ViewportSession::software(&SessionConfig::default())?;
    session.tick(&mut scene)?;

    let (width, height) = session.camera().size();
    for y in (0..height).step_by(16) {
        let row: String = (0..width)
            .step_by(8)
            .map(|x| match session.pick(pos2(x as f32, y as f32)) {
                Some(HitProxy::Object(id)) => char::from(b'0' + (id.index() % 10) as u8),
                Some(HitProxy::Axis(_)) => '+',
                None => '.',
            })
            .collect();
        println!("{row}");
    }
    Ok(())
}
