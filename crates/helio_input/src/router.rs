//! View-facing input routing
//!
//! The entry points a platform view adapter calls with decoded events.
//! Ordering mirrors the platform contract: the platform's gesture and
//! scale recognizers see every touch first (driving the classifier's
//! callbacks), then unclaimed events fall through the classifier's
//! motion handling, and only then the default mouse/touch dispatch.

use helio_core::{InputSink, Keycode, PointerAction, RawKeyEvent, RawPointerEvent};

use crate::dispatch;
use crate::gestures::GestureClassifier;
use crate::joystick::{DeviceInfo, JoystickMotion, JoystickRegistry};

/// Routes decoded platform events into the engine sink.
///
/// Owns the gesture classifier and the controller registry for one view
/// surface. Single-threaded; every method is synchronous.
#[derive(Debug, Default)]
pub struct InputRouter {
    classifier: GestureClassifier,
    joysticks: JoystickRegistry,
    long_press_enabled: bool,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classifier, for the platform recognizers to drive directly
    /// (down/tap/long-press/double-tap/scroll/scale callbacks).
    pub fn classifier(&mut self) -> &mut GestureClassifier {
        &mut self.classifier
    }

    pub fn joysticks(&mut self) -> &mut JoystickRegistry {
        &mut self.joysticks
    }

    /// Enable long-press recognition. Off by default. Advisory: the
    /// long-press recognizer itself belongs to the platform; the
    /// adapter reads this flag when arming it.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.long_press_enabled = enabled;
    }

    pub fn long_press_enabled(&self) -> bool {
        self.long_press_enabled
    }

    /// Enable multi-finger pan and scale gestures. Off by default.
    ///
    /// Note: this may interfere with multi-touch handling.
    pub fn set_pan_scale_enabled(&mut self, enabled: bool) {
        self.classifier.set_pan_scale_enabled(enabled);
    }

    /// A touch-stream event. `gesture_claimed` reports whether the
    /// platform recognizers consumed it already.
    pub fn on_touch_event<S: InputSink>(
        &mut self,
        event: &RawPointerEvent,
        gesture_claimed: bool,
        sink: &mut S,
    ) -> bool {
        if gesture_claimed {
            return true;
        }

        if self.classifier.on_motion_event(event, sink) {
            return true;
        }

        // Drag moves belong to the classifier; an unclaimed move has
        // nothing left to say.
        if event.action == PointerAction::Move {
            return true;
        }

        dispatch::submit_event(event, sink)
    }

    /// A generic (non-touch-stream) pointer event: hovers, scroll
    /// wheels, captured mouse motion. Joystick-sourced motion goes to
    /// [`InputRouter::on_joystick_motion`] instead.
    pub fn on_generic_motion_event<S: InputSink>(
        &mut self,
        event: &RawPointerEvent,
        gesture_claimed: bool,
        sink: &mut S,
    ) -> bool {
        if gesture_claimed {
            return true;
        }

        if event.source.is_mouse() {
            return dispatch::submit_event(event, sink);
        }

        tracing::debug!(action = ?event.action, "unhandled generic motion event");
        false
    }

    /// A polled joystick axis sample.
    pub fn on_joystick_motion<S: InputSink>(
        &mut self,
        motion: &JoystickMotion,
        sink: &mut S,
    ) -> bool {
        self.joysticks.axis_motion(motion, sink)
    }

    pub fn on_key_down<S: InputSink>(&mut self, event: &RawKeyEvent, sink: &mut S) -> bool {
        self.on_key(event, true, sink)
    }

    pub fn on_key_up<S: InputSink>(&mut self, event: &RawKeyEvent, sink: &mut S) -> bool {
        self.on_key(event, false, sink)
    }

    fn on_key<S: InputSink>(&mut self, event: &RawKeyEvent, pressed: bool, sink: &mut S) -> bool {
        // Back is consumed without dispatch; navigation stays with the
        // owning shell.
        if event.keycode == Keycode::BACK {
            return true;
        }

        // Volume keys keep their system behavior.
        if event.keycode == Keycode::VOLUME_UP || event.keycode == Keycode::VOLUME_DOWN {
            return false;
        }

        if event.source.is_game_device() {
            // Ignore key echo.
            if pressed && event.repeat {
                return true;
            }
            self.joysticks
                .key_button(event.device_id, event.keycode, pressed, sink);
        } else {
            sink.submit_key(event.keycode, event.scancode, event.unicode, pressed);
        }

        true
    }

    /// Pointer capture was taken or released by the view.
    pub fn on_pointer_capture_change<S: InputSink>(&mut self, has_capture: bool, sink: &mut S) {
        self.classifier.on_pointer_capture_change(has_capture, sink);
    }

    /// Device hotplug, forwarded from the platform's device listener.
    pub fn on_device_added<S: InputSink>(&mut self, info: &DeviceInfo, sink: &mut S) {
        self.joysticks.device_added(info, sink);
    }

    pub fn on_device_removed<S: InputSink>(&mut self, device_id: i32, sink: &mut S) {
        self.joysticks.device_removed(device_id, sink);
    }

    pub fn on_device_changed<S: InputSink>(&mut self, info: &DeviceInfo, sink: &mut S) {
        self.joysticks.device_changed(info, sink);
    }
}
