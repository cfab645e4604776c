//! Pointer tracking.
//!
//! [`Pointer`] turns raw winit events into the three things the scene
//! consumes: the latest cursor position (drives the sphere's target rotation),
//! the drag distance accumulated since the last frame (drives the orbit
//! camera) and the accumulated wheel steps (drives zoom).

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pixels of trackpad scroll that count as one wheel step.
const PIXELS_PER_WHEEL_STEP: f32 = 100.0;

/// Cursor, drag and wheel state between frames.
#[derive(Debug, Default)]
pub struct Pointer {
    position: Option<Vec2>,
    dragging: bool,
    drag_delta: Vec2,
    scroll_steps: f32,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor move. Returns the new position.
    pub fn cursor_moved(&mut self, position: Vec2) -> Vec2 {
        if self.dragging {
            if let Some(last) = self.position {
                self.drag_delta += position - last;
            }
        }
        self.position = Some(position);
        position
    }

    /// Record the orbit (left) button going down or up.
    pub fn set_dragging(&mut self, pressed: bool) {
        self.dragging = pressed;
    }

    pub fn cursor_left(&mut self) {
        self.position = None;
        self.dragging = false;
    }

    /// Record wheel movement. Positive is scrolling up (zoom in).
    pub fn scrolled(&mut self, steps: f32) {
        self.scroll_steps += steps;
    }

    /// Drag distance in pixels since the last call.
    pub fn take_drag(&mut self) -> Vec2 {
        std::mem::take(&mut self.drag_delta)
    }

    /// Wheel steps since the last call.
    pub fn take_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_steps)
    }

    /// Process a winit window event.
    ///
    /// Returns the new cursor position when the event was a cursor move.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Vec2> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(Vec2::new(position.x as f32, position.y as f32)))
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_left();
                None
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.set_dragging(*state == ElementState::Pressed);
                None
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scrolled(match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_WHEEL_STEP,
                });
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_without_drag_do_not_orbit() {
        let mut pointer = Pointer::new();
        pointer.cursor_moved(Vec2::new(10.0, 10.0));
        pointer.cursor_moved(Vec2::new(50.0, 20.0));
        assert_eq!(pointer.position, Some(Vec2::new(50.0, 20.0)));
        assert_eq!(pointer.take_drag(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_accumulates_until_taken() {
        let mut pointer = Pointer::new();
        pointer.cursor_moved(Vec2::new(100.0, 100.0));
        pointer.set_dragging(true);
        pointer.cursor_moved(Vec2::new(110.0, 95.0));
        pointer.cursor_moved(Vec2::new(130.0, 90.0));

        assert_eq!(pointer.take_drag(), Vec2::new(30.0, -10.0));
        assert_eq!(pointer.take_drag(), Vec2::ZERO);

        pointer.set_dragging(false);
        pointer.cursor_moved(Vec2::new(200.0, 200.0));
        assert_eq!(pointer.take_drag(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_needs_a_previous_position() {
        let mut pointer = Pointer::new();
        pointer.set_dragging(true);
        pointer.cursor_moved(Vec2::new(40.0, 40.0));
        assert_eq!(pointer.take_drag(), Vec2::ZERO);
    }

    #[test]
    fn test_cursor_left_ends_drag() {
        let mut pointer = Pointer::new();
        pointer.cursor_moved(Vec2::new(1.0, 1.0));
        pointer.set_dragging(true);
        pointer.cursor_left();
        assert!(!pointer.dragging);
        assert_eq!(pointer.position, None);
    }

    #[test]
    fn test_scroll_accumulates() {
        let mut pointer = Pointer::new();
        pointer.scrolled(1.0);
        pointer.scrolled(0.5);
        assert_eq!(pointer.take_scroll(), 1.5);
        assert_eq!(pointer.take_scroll(), 0.0);
    }
}
