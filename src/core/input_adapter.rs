use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, DragEvent};

/// Edge-triggered input produced by one window event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Button went from up to down; key repeat does not re-trigger
    Pressed(Button),
    Drag(DragEvent),
}

/// Tracks held buttons and the cursor, turning winit events into actions
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    pressed_keys: HashSet<Button>,
    mouse_position: Option<(f32, f32)>,
    dragging: bool,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state from a window event and report what it triggered
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(keycode) = event.physical_key else {
                    return None;
                };
                let button = Self::keycode_to_button(keycode)?;
                match event.state {
                    ElementState::Pressed => self.press(button),
                    ElementState::Released => self.release(button),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = Self::mouse_button_to_button(*button)?;
                match state {
                    ElementState::Pressed => self.press(button),
                    ElementState::Released => self.release(button),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                None
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => None,
        }
    }

    pub fn press(&mut self, button: Button) -> Option<InputAction> {
        if !self.pressed_keys.insert(button) {
            return None;
        }

        if button == Button::MouseLeft {
            let (x, y) = self.mouse_position?;
            self.dragging = true;
            return Some(InputAction::Drag(DragEvent::Begin { x, y }));
        }
        Some(InputAction::Pressed(button))
    }

    pub fn release(&mut self, button: Button) -> Option<InputAction> {
        if !self.pressed_keys.remove(&button) {
            return None;
        }

        if button == Button::MouseLeft && self.dragging {
            self.dragging = false;
            return Some(InputAction::Drag(DragEvent::End));
        }
        None
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<InputAction> {
        self.mouse_position = Some((x, y));
        self.dragging
            .then_some(InputAction::Drag(DragEvent::Move { x, y }))
    }

    /// Drop every held button, ending a drag in progress
    pub fn release_all(&mut self) -> Option<InputAction> {
        self.pressed_keys.clear();
        if self.dragging {
            self.dragging = false;
            Some(InputAction::Drag(DragEvent::End))
        } else {
            None
        }
    }

    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::Space => Some(Button::Space),
            KeyCode::Escape => Some(Button::Escape),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(Button::Digit1),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(Button::Digit2),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(Button::Digit3),
            KeyCode::Digit4 | KeyCode::Numpad4 => Some(Button::Digit4),
            KeyCode::Digit5 | KeyCode::Numpad5 => Some(Button::Digit5),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyV => Some(Button::KeyV),
            _ => None,
        }
    }

    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}
