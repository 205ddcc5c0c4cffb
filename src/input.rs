//! Translation of terminal events into viewer actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::carousel::Direction;
use crate::ui::Layout;

/// Camera orbit per dragged cell, radians
const ORBIT_PER_CELL: f64 = 0.05;
/// Distance multiplier per scroll notch
const ZOOM_STEP: f64 = 1.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Advance(Direction),
    Zoom(f64),
    Orbit { yaw: f64, pitch: f64 },
    /// Pointer moved to a terminal cell
    Pointer(u16, u16),
    TogglePause,
    ToggleDebug,
    ToggleWireframe,
    ResetCamera,
    Quit,
}

/// Stateful mapper, tracking mouse drags between events
#[derive(Debug, Default)]
pub struct InputMapper {
    drag_from: Option<(u16, u16)>,
}

impl InputMapper {
    pub fn map(&mut self, event: &Event, layout: &Layout) -> Option<Action> {
        match event {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse, layout),
            _ => None,
        }
    }

    fn map_mouse(&mut self, mouse: &MouseEvent, layout: &Layout) -> Option<Action> {
        let at = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(direction) = layout.button_at(at.0, at.1) {
                    return Some(Action::Advance(direction));
                }
                self.drag_from = Some(at);
                Some(Action::Pointer(at.0, at.1))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let from = self.drag_from.replace(at)?;
                // Terminal cells are about twice as tall as wide
                Some(Action::Orbit {
                    yaw: (at.0 as f64 - from.0 as f64) * ORBIT_PER_CELL,
                    pitch: (at.1 as f64 - from.1 as f64) * ORBIT_PER_CELL * 2.0,
                })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_from = None;
                Some(Action::Pointer(at.0, at.1))
            }
            MouseEventKind::Moved => Some(Action::Pointer(at.0, at.1)),
            MouseEventKind::ScrollUp => Some(Action::Zoom(1.0 / ZOOM_STEP)),
            MouseEventKind::ScrollDown => Some(Action::Zoom(ZOOM_STEP)),
            _ => None,
        }
    }
}

fn map_key(key: &KeyEvent) -> Option<Action> {
    // Key-down only; auto-repeat counts as further presses
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    let action = match key.code {
        KeyCode::Right => Action::Advance(Direction::Forward),
        KeyCode::Left => Action::Advance(Direction::Backward),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('d' | 'D') => Action::ToggleDebug,
        KeyCode::Char('p' | 'P') => Action::TogglePause,
        KeyCode::Char('w' | 'W') => Action::ToggleWireframe,
        KeyCode::Char('r' | 'R') => Action::ResetCamera,
        KeyCode::Char('+' | '=') => Action::Zoom(1.0 / ZOOM_STEP),
        KeyCode::Char('-') => Action::Zoom(ZOOM_STEP),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn arrow_keys_step_the_carousel_on_key_down() {
        let mut mapper = InputMapper::default();
        let layout = Layout::new(80, 24);
        assert_eq!(
            mapper.map(&key(KeyCode::Right, KeyEventKind::Press), &layout),
            Some(Action::Advance(Direction::Forward))
        );
        assert_eq!(
            mapper.map(&key(KeyCode::Left, KeyEventKind::Repeat), &layout),
            Some(Action::Advance(Direction::Backward))
        );
        assert_eq!(mapper.map(&key(KeyCode::Left, KeyEventKind::Release), &layout), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut mapper = InputMapper::default();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(mapper.map(&event, &Layout::new(80, 24)), Some(Action::Quit));
    }

    #[test]
    fn clicking_buttons_steps_the_carousel() {
        let mut mapper = InputMapper::default();
        let layout = Layout::new(80, 24);
        let left = layout.left_button;
        let right = layout.right_button;
        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(
            mapper.map(&mouse(down, left.x + 1, left.y + 1), &layout),
            Some(Action::Advance(Direction::Backward))
        );
        assert_eq!(
            mapper.map(&mouse(down, right.x + 1, right.y + 1), &layout),
            Some(Action::Advance(Direction::Forward))
        );
    }

    #[test]
    fn dragging_orbits_the_camera() {
        let mut mapper = InputMapper::default();
        let layout = Layout::new(80, 24);
        let drag = MouseEventKind::Drag(MouseButton::Left);
        // A drag without a preceding press is ignored
        assert_eq!(mapper.map(&mouse(drag, 41, 12), &layout), None);

        mapper.map(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12), &layout);
        match mapper.map(&mouse(drag, 42, 13), &layout) {
            Some(Action::Orbit { yaw, pitch }) => {
                assert!((yaw - 0.1).abs() < 1e-12);
                assert!((pitch - 0.1).abs() < 1e-12);
            }
            other => panic!("expected orbit, got {other:?}"),
        }
        mapper.map(&mouse(MouseEventKind::Up(MouseButton::Left), 42, 13), &layout);
        assert_eq!(mapper.map(&mouse(drag, 43, 13), &layout), None);
    }

    #[test]
    fn scrolling_zooms() {
        let mut mapper = InputMapper::default();
        let layout = Layout::new(80, 24);
        match mapper.map(&mouse(MouseEventKind::ScrollUp, 10, 10), &layout) {
            Some(Action::Zoom(factor)) => assert!(factor < 1.0),
            other => panic!("expected zoom, got {other:?}"),
        }
        match mapper.map(&mouse(MouseEventKind::ScrollDown, 10, 10), &layout) {
            Some(Action::Zoom(factor)) => assert!(factor > 1.0),
            other => panic!("expected zoom, got {other:?}"),
        }
    }
}
