//! Engine input sink
//!
//! The boundary trait between the input translation layer and the
//! engine bindings. Submission is synchronous and fire-and-forget; the
//! producer never inspects results.

use crate::command::{InputCommand, MotionCommand, MouseCommand, TouchCommand};
use crate::event::Keycode;

/// Consumer of semantic input commands.
///
/// Implementors only need `submit`; the per-command methods are
/// conveniences that wrap their arguments into an [`InputCommand`].
pub trait InputSink {
    fn submit(&mut self, command: InputCommand);

    fn submit_motion_event(&mut self, event: MotionCommand) {
        self.submit(InputCommand::Motion(event));
    }

    fn submit_mouse_event(&mut self, event: MouseCommand) {
        self.submit(InputCommand::Mouse(event));
    }

    fn submit_touch_event(&mut self, event: TouchCommand) {
        self.submit(InputCommand::Touch(event));
    }

    fn submit_pan(&mut self, x: f32, y: f32, dx: f32, dy: f32) {
        self.submit(InputCommand::Pan { x, y, dx, dy });
    }

    fn submit_magnify(&mut self, x: f32, y: f32, factor: f32) {
        self.submit(InputCommand::Magnify { x, y, factor });
    }

    fn submit_key(&mut self, keycode: Keycode, scancode: u32, unicode: u32, pressed: bool) {
        self.submit(InputCommand::Key {
            keycode,
            scancode,
            unicode,
            pressed,
        });
    }

    fn submit_joy_button(&mut self, joy_id: i32, button: i32, pressed: bool) {
        self.submit(InputCommand::JoyButton {
            joy_id,
            button,
            pressed,
        });
    }

    fn submit_joy_axis(&mut self, joy_id: i32, axis: usize, value: f32) {
        self.submit(InputCommand::JoyAxis {
            joy_id,
            axis,
            value,
        });
    }

    fn submit_joy_hat(&mut self, joy_id: i32, hat_x: i32, hat_y: i32) {
        self.submit(InputCommand::JoyHat {
            joy_id,
            hat_x,
            hat_y,
        });
    }

    fn submit_joy_connection_changed(&mut self, joy_id: i32, connected: bool, name: &str) {
        self.submit(InputCommand::JoyConnection {
            joy_id,
            connected,
            name: name.to_owned(),
        });
    }
}

/// Sink that records every command, in order.
///
/// Used by the translation-layer tests and by replay tooling.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<InputCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl InputSink for RecordingSink {
    fn submit(&mut self, command: InputCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ButtonMask, PointerAction, SourceClass};

    #[test]
    fn convenience_methods_wrap_into_submit() {
        let mut sink = RecordingSink::new();

        sink.submit_motion_event(MotionCommand {
            source: SourceClass::Touchscreen,
            action: PointerAction::Down,
            buttons: ButtonMask::NONE,
            x: 1.0,
            y: 2.0,
            is_double_tap: false,
        });
        sink.submit_magnify(5.0, 6.0, 1.1);
        sink.submit_joy_connection_changed(0, true, "pad");

        assert_eq!(sink.commands.len(), 3);
        assert!(matches!(sink.commands[0], InputCommand::Motion(_)));
        assert!(matches!(
            sink.commands[1],
            InputCommand::Magnify { factor, .. } if factor == 1.1
        ));
        assert!(matches!(
            &sink.commands[2],
            InputCommand::JoyConnection { joy_id: 0, connected: true, name } if name == "pad"
        ));
    }
}
