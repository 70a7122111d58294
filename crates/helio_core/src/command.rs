//! Semantic input commands
//!
//! The engine-bound representation of classified input. Commands are
//! fire-and-forget: the producer never observes how the engine handles
//! them.

use smallvec::SmallVec;

use crate::event::{ButtonMask, Keycode, Pointer, PointerAction, RawPointerEvent, SourceClass};

/// A motion command: a pointer transition not yet split into the mouse
/// or touch path. The engine binding resolves it by `source`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionCommand {
    pub source: SourceClass,
    pub action: PointerAction,
    pub buttons: ButtonMask,
    pub x: f32,
    pub y: f32,
    /// Whether this down is the second tap of a double tap
    pub is_double_tap: bool,
}

impl MotionCommand {
    /// Forward a raw event unchanged as a motion command.
    pub fn from_event(event: &RawPointerEvent) -> Self {
        Self {
            source: event.source,
            action: event.action,
            buttons: event.buttons,
            x: event.x,
            y: event.y,
            is_double_tap: false,
        }
    }
}

/// A mouse command, absolute or relative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseCommand {
    pub action: PointerAction,
    pub buttons: ButtonMask,
    pub x: f32,
    pub y: f32,
    /// Horizontal scroll or relative-motion delta
    pub dx: f32,
    /// Vertical scroll or relative-motion delta
    pub dy: f32,
    pub is_double_click: bool,
    /// Whether coordinates are relative (pointer-capture mode)
    pub relative: bool,
}

/// A raw touch command carrying the full pointer set.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchCommand {
    pub action: PointerAction,
    /// Id of the pointer the action refers to
    pub action_pointer_id: i32,
    pub pointers: SmallVec<[Pointer; 2]>,
}

/// A semantic input command, consumed by the engine sink.
#[derive(Clone, Debug, PartialEq)]
pub enum InputCommand {
    Motion(MotionCommand),
    Mouse(MouseCommand),
    Touch(TouchCommand),
    /// Two-finger translate
    Pan { x: f32, y: f32, dx: f32, dy: f32 },
    /// Two-finger zoom around a focal point
    Magnify { x: f32, y: f32, factor: f32 },
    /// Key press or release
    Key {
        keycode: Keycode,
        scancode: u32,
        unicode: u32,
        pressed: bool,
    },
    /// Game controller button transition
    JoyButton {
        joy_id: i32,
        button: i32,
        pressed: bool,
    },
    /// Game controller axis sample
    JoyAxis { joy_id: i32, axis: usize, value: f32 },
    /// Game controller hat (dpad) position
    JoyHat { joy_id: i32, hat_x: i32, hat_y: i32 },
    /// Controller connected or disconnected
    JoyConnection {
        joy_id: i32,
        connected: bool,
        name: String,
    },
}
