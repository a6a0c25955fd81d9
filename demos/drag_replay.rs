use anyhow::{Context, Result};
use scenepick_geometry::{EuclideanSpace, Point3, ViewportCamera, pos2};
use scenepick_gizmo::{InputEvent, Modifiers, MouseButton};
use scenepick_scene::{Placeable, Scene, SceneObject};
use scenepick_view::{SessionConfig, ViewportSession};

fn button(x: f32, y: f32, pressed: bool) -> InputEvent {
    InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed,
        pos: pos2(x, y),
        modifiers: Modifiers::default(),
    }
}

// Selects a box, then drags its X handle and prints the origin every frame.
fn main() -> Result<()> {
    let mut scene = Scene::new();
    let id = scene.spawn(SceneObject::new("crate", Point3::origin()));
    let mut session = ViewportSession::software(&SessionConfig::default())?;
    session.tick(&mut scene)?;

    let (center, _) = session
        .camera()
        .project(Point3::origin())
        .context("object is off screen")?;
    let (tip, _) = session
        .camera()
        .project(Point3::new(1.5, 0.0, 0.0))
        .context("x axis is off screen")?;
    let step = (tip - center) * 0.25;

    session.push_event(button(center.x, center.y, true));
    session.push_event(button(center.x, center.y, false));
    session.tick(&mut scene)?;

    let mut pos = tip;
    session.push_event(button(pos.x, pos.y, true));
    for _ in 0..8 {
        pos = pos + step;
        session.push_event(InputEvent::mouse_move(pos));
        session.tick(&mut scene)?;
        if let Some(object) = scene.get(id) {
            println!("frame {:>2}: origin {:?}", session.frame(), object.origin());
        }
    }
    session.push_event(button(pos.x, pos.y, false));
    session.tick(&mut scene)?;
    println!("state after release: {:?}", session.widget().state());
    Ok(())
}
