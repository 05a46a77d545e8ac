//! Mapping raw window events onto simulation controls.
//!
//! The animation only reacts to a handful of things: a mouse click starts
//! a new epoch, a resize rebuilds the grid for the new surface, and a close
//! request or Escape quits. Everything else is ignored.

use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::grid::Viewport;

/// What the host should do in response to a window event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    /// Throw away every chain drive and repopulate.
    Reset,
    /// Resize the surface and rebuild against the new viewport.
    Resize(Viewport),
    /// Draw the next frame.
    Redraw,
    /// Leave the event loop.
    Exit,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// Translate a winit window event.
pub fn translate(event: &WindowEvent) -> Option<Control> {
    match event {
        WindowEvent::CloseRequested => Some(Control::Exit),
        WindowEvent::Resized(size) => on_resize(*size),
        WindowEvent::MouseInput { state, button, .. } => on_mouse(*state, MouseButton::from(*button)),
        WindowEvent::KeyboardInput { event, .. } => on_key(event),
        WindowEvent::RedrawRequested => Some(Control::Redraw),
        _ => None,
    }
}

/// Primary-button presses reset; releases and other buttons do nothing.
pub fn on_mouse(state: ElementState, button: MouseButton) -> Option<Control> {
    (state == ElementState::Pressed && button == MouseButton::Left).then_some(Control::Reset)
}

/// Zero-sized surfaces (minimized windows) are skipped.
pub fn on_resize(size: PhysicalSize<u32>) -> Option<Control> {
    let viewport = Viewport::new(size.width as f32, size.height as f32);
    (!viewport.is_degenerate()).then_some(Control::Resize(viewport))
}

fn on_key(event: &KeyEvent) -> Option<Control> {
    on_key_code(event.physical_key, event.state)
}

pub fn on_key_code(key: PhysicalKey, state: ElementState) -> Option<Control> {
    match (key, state) {
        (PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed) => Some(Control::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_press_resets() {
        assert_eq!(on_mouse(ElementState::Pressed, MouseButton::Left), Some(Control::Reset));
        assert_eq!(on_mouse(ElementState::Released, MouseButton::Left), None);
        assert_eq!(on_mouse(ElementState::Pressed, MouseButton::Right), None);
    }

    #[test]
    fn test_resize_maps_to_viewport() {
        let event = WindowEvent::Resized(PhysicalSize::new(800, 600));
        assert_eq!(translate(&event), Some(Control::Resize(Viewport::new(800.0, 600.0))));
    }

    #[test]
    fn test_minimized_resize_is_ignored() {
        assert_eq!(on_resize(PhysicalSize::new(0, 600)), None);
        assert_eq!(on_resize(PhysicalSize::new(800, 0)), None);
    }

    #[test]
    fn test_close_and_escape_exit() {
        assert_eq!(translate(&WindowEvent::CloseRequested), Some(Control::Exit));
        assert_eq!(
            on_key_code(PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed),
            Some(Control::Exit)
        );
        assert_eq!(on_key_code(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed), None);
    }

    #[test]
    fn test_redraw() {
        assert_eq!(translate(&WindowEvent::RedrawRequested), Some(Control::Redraw));
    }

    #[test]
    fn test_mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
