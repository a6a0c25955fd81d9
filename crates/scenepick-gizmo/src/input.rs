use serde::{Deserialize, Serialize};
use scenepick_geometry::Point2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    T,
    M,
    R,
    E,
    Escape,
}

/// Normalized input as delivered by the host window layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    MouseMove {
        pos: Point2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    MouseButton {
        button: MouseButton,
        pressed: bool,
        pos: Point2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Key {
        key: Key,
        pressed: bool,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Pointer motion with no modifier held.
    pub fn mouse_move(pos: Point2) -> Self {
        InputEvent::MouseMove {
            pos,
            modifiers: Modifiers::default(),
        }
    }

    pub fn position(&self) -> Option<Point2> {
        match self {
            InputEvent::MouseMove { pos, .. } | InputEvent::MouseButton { pos, .. } => Some(*pos),
            InputEvent::Key { .. } => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            InputEvent::MouseMove { modifiers, .. }
            | InputEvent::MouseButton { modifiers, .. }
            | InputEvent::Key { modifiers, .. } => *modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenepick_geometry::pos2;

    #[test]
    fn script_events_parse_from_tagged_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                { "type": "mouse_move", "pos": { "x": 3.0, "y": 4.0 } },
                { "type": "mouse_move", "pos": { "x": 5.0, "y": 4.0 },
                  "modifiers": { "shift": true } },
                { "type": "mouse_button", "button": "left", "pressed": true,
                  "pos": { "x": 3.0, "y": 4.0 }, "modifiers": { "shift": true } },
                { "type": "key", "key": "r", "pressed": true }
            ]"#,
        )
        .expect("parse");
        assert_eq!(events[0], InputEvent::mouse_move(pos2(3.0, 4.0)));
        assert!(events[1].modifiers().shift);
        assert!(events[2].modifiers().shift);
        assert_eq!(
            events[3],
            InputEvent::Key {
                key: Key::R,
                pressed: true,
                modifiers: Modifiers::default(),
            }
        );
    }
}
