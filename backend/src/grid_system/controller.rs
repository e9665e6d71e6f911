use crate::data::prelude::*;

use winit::event::*;

/// Held pointer buttons, laid out like the DOM `buttons` bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(2);
    pub const AUXILIARY: Self = Self(4);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn from_mouse_button(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::PRIMARY),
            MouseButton::Right => Some(Self::SECONDARY),
            MouseButton::Middle => Some(Self::AUXILIARY),
            MouseButton::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: ScreenPoint,
    pub buttons: Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: ScreenPoint,
    /// Pixels, positive when scrolling down (zoom out).
    pub delta_y: f32,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub pan_button: Buttons,
    pub wheel_sensitivity: f32,
    /// Pixels per wheel notch for line based scroll deltas.
    pub pixels_per_line: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            pan_button: Buttons::SECONDARY,
            wheel_sensitivity: 0.001,
            pixels_per_line: 100.0,
        }
    }
}

/// Turns pointer and wheel gestures into view transform changes.
///
/// Whether a drag is in progress is read from the buttons of each move event;
/// the only gesture state kept is the last pointer position.
pub struct Controller {
    pub config: ControllerConfig,
    start_point: ScreenPoint,

    // winit only reports these on change
    cursor: ScreenPoint,
    buttons: Buttons,
    modifiers: Modifiers,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            start_point: ScreenPoint::origin(),
            cursor: ScreenPoint::origin(),
            buttons: Buttons::NONE,
            modifiers: Modifiers::default(),
        }
    }

    pub fn start_point(&self) -> ScreenPoint {
        self.start_point
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        self.start_point = event.position;
    }

    /// Returns whether the view changed.
    pub fn pointer_move(&mut self, event: &PointerEvent, view: &mut DirtyFlag<ViewTransform>) -> bool {
        let buttons = event.buttons;

        if buttons == self.config.pan_button {
            let delta = event.position - self.start_point;
            view.write().translate(delta.x, delta.y);
            self.start_point = event.position;
            true
        } else {
            if buttons == Buttons::AUXILIARY {
                log::trace!("move with middle button held, reserved");
            } else if buttons == Buttons::PRIMARY {
                log::trace!("move with primary button held, reserved");
            }
            false
        }
    }

    /// Zooms about the cursor. Returns whether the view changed.
    pub fn wheel(&mut self, event: &WheelEvent, view: &mut DirtyFlag<ViewTransform>) -> bool {
        if event.modifiers.ctrl || event.modifiers.alt {
            log::trace!("wheel with modifiers {:?}, delta_y {}", event.modifiers, event.delta_y);
        }

        let factor = 1.0 - event.delta_y * self.config.wheel_sensitivity;
        let mut next = *view.read();
        match next.scale_about_focus(factor, factor, event.position) {
            Ok(()) => {
                *view.write() = next;
                true
            },
            Err(err) => {
                log::warn!("ignored wheel zoom by {}: {}", factor, err);
                false
            },
        }
    }

    /// Feeds a winit window event. Returns whether it was consumed.
    pub fn precess(&mut self, event: &WindowEvent, view: &mut DirtyFlag<ViewTransform>) -> bool {
        match event {
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    // winit reports up as positive
                    MouseScrollDelta::LineDelta(_, y) => -*y * self.config.pixels_per_line,
                    MouseScrollDelta::PixelDelta(position) => -position.y as f32,
                };
                self.wheel(&WheelEvent {
                    position: self.cursor,
                    delta_y,
                    modifiers: self.modifiers,
                }, view);
                true
            },
            WindowEvent::MouseInput {
                state,
                button,
                ..
            } => {
                let button = match Buttons::from_mouse_button(*button) {
                    Some(button) => button,
                    None => return false,
                };
                match state {
                    ElementState::Pressed => {
                        self.buttons.insert(button);
                        self.pointer_down(&PointerEvent { position: self.cursor, buttons: self.buttons });
                    },
                    ElementState::Released => self.buttons.remove(button),
                }
                true
            },
            WindowEvent::CursorMoved {
                position,
                ..
            } => {
                self.cursor = ScreenPoint::new(position.x as f32, position.y as f32);
                self.pointer_move(&PointerEvent { position: self.cursor, buttons: self.buttons }, view);
                false
            },
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = Modifiers {
                    ctrl: state.ctrl(),
                    alt: state.alt(),
                    shift: state.shift(),
                };
                false
            },
            WindowEvent::CursorLeft { .. } => {
                self.buttons = Buttons::NONE;
                false
            },
            _ => false
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
