//! Game controller registry
//!
//! Tracks controller hotplug, maps platform device ids to the compact
//! engine joystick ids the sink expects, and turns polled axis samples
//! into change-only commands so the engine is not flooded with
//! repeated values.

use helio_core::{InputSink, Keycode};
use rustc_hash::FxHashMap;

/// Platform motion axis (platform-agnostic constants).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Axis(pub u32);

impl Axis {
    /// Hat (dpad) horizontal axis
    pub const HAT_X: Axis = Axis(15);
    /// Hat (dpad) vertical axis
    pub const HAT_Y: Axis = Axis(16);
}

/// One axis a device advertises, with the source classes it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct MotionRange {
    pub axis: Axis,
    pub joystick: bool,
    pub gamepad: bool,
}

impl MotionRange {
    pub fn joystick(axis: Axis) -> Self {
        Self {
            axis,
            joystick: true,
            gamepad: false,
        }
    }
}

/// Descriptor of an input device as reported by the platform.
#[derive(Clone, Debug)]
pub struct DeviceInfo {
    pub device_id: i32,
    pub name: String,
    /// Whether the device advertises joystick sources
    pub has_joystick_source: bool,
    /// Whether the device advertises gamepad sources
    pub has_gamepad_source: bool,
    pub motion_ranges: Vec<MotionRange>,
}

/// One polled axis value within a joystick motion sample.
#[derive(Clone, Copy, Debug)]
pub struct AxisValue {
    pub axis: Axis,
    pub value: f32,
}

/// A joystick motion sample: all axis values polled at one event.
/// Axes the sample omits read as `0.0`, matching platform polling.
#[derive(Clone, Debug)]
pub struct JoystickMotion {
    pub device_id: i32,
    pub axis_values: Vec<AxisValue>,
}

impl JoystickMotion {
    fn value_of(&self, axis: Axis) -> f32 {
        self.axis_values
            .iter()
            .find(|v| v.axis == axis)
            .map(|v| v.value)
            .unwrap_or(0.0)
    }
}

#[derive(Debug)]
struct Joystick {
    name: String,
    /// Advertised non-hat axes, sorted by platform axis code
    axes: Vec<Axis>,
    /// Last dispatched value per axis
    axis_values: FxHashMap<Axis, f32>,
    has_hat: bool,
    hat_x: i32,
    hat_y: i32,
}

/// Registry of connected game controllers.
///
/// Engine ids are assigned smallest-free-first and reused after a
/// disconnect, so the engine sees a stable, compact id space.
#[derive(Debug, Default)]
pub struct JoystickRegistry {
    ids: FxHashMap<i32, i32>,
    devices: FxHashMap<i32, Joystick>,
}

impl JoystickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine id for a platform device, if registered.
    pub fn engine_id(&self, device_id: i32) -> Option<i32> {
        self.ids.get(&device_id).copied()
    }

    /// A device appeared. Non-game devices and duplicate adds are
    /// ignored; otherwise the device's axes are collected and a
    /// connection command is emitted.
    pub fn device_added<S: InputSink>(&mut self, info: &DeviceInfo, sink: &mut S) {
        if self.ids.contains_key(&info.device_id) {
            return;
        }
        if !info.has_joystick_source && !info.has_gamepad_source {
            return;
        }

        let joy_id = self.assign_id(info.device_id);

        // Helps with creating new controller mappings.
        tracing::info!(name = %info.name, joy_id, "new input device");

        let mut joystick = Joystick {
            name: info.name.clone(),
            axes: Vec::new(),
            axis_values: FxHashMap::default(),
            has_hat: false,
            hat_x: 0,
            hat_y: 0,
        };

        for range in &info.motion_ranges {
            if !range.joystick && !range.gamepad {
                continue;
            }
            if range.axis == Axis::HAT_X || range.axis == Axis::HAT_Y {
                joystick.has_hat = true;
            } else if joystick.axes.contains(&range.axis) {
                tracing::warn!(axis = range.axis.0, "duplicate axis in motion ranges");
            } else {
                joystick.axes.push(range.axis);
            }
        }
        joystick.axes.sort_unstable_by_key(|axis| axis.0);

        for (index, axis) in joystick.axes.iter().enumerate() {
            tracing::debug!(platform_axis = axis.0, engine_axis = index, "axis mapping");
        }

        self.devices.insert(info.device_id, joystick);
        sink.submit_joy_connection_changed(joy_id, true, &info.name);
    }

    /// A device disappeared. Unknown ids are ignored.
    pub fn device_removed<S: InputSink>(&mut self, device_id: i32, sink: &mut S) {
        let Some(joy_id) = self.ids.remove(&device_id) else {
            return;
        };
        self.devices.remove(&device_id);
        sink.submit_joy_connection_changed(joy_id, false, "");
    }

    /// A device changed its configuration: re-register it.
    pub fn device_changed<S: InputSink>(&mut self, info: &DeviceInfo, sink: &mut S) {
        self.device_removed(info.device_id, sink);
        self.device_added(info, sink);
    }

    /// A polled axis sample for a registered device.
    ///
    /// All advertised axes are polled on every sample, so a command is
    /// only emitted for values that actually changed. Returns false for
    /// devices the registry does not know.
    pub fn axis_motion<S: InputSink>(&mut self, motion: &JoystickMotion, sink: &mut S) -> bool {
        let Some(&joy_id) = self.ids.get(&motion.device_id) else {
            return false;
        };
        let Some(device) = self.devices.get_mut(&motion.device_id) else {
            return false;
        };

        for (index, &axis) in device.axes.iter().enumerate() {
            let value = motion.value_of(axis);
            if device.axis_values.get(&axis) != Some(&value) {
                device.axis_values.insert(axis, value);
                sink.submit_joy_axis(joy_id, index, value);
            }
        }

        if device.has_hat {
            let hat_x = motion.value_of(Axis::HAT_X).round() as i32;
            let hat_y = motion.value_of(Axis::HAT_Y).round() as i32;
            if device.hat_x != hat_x || device.hat_y != hat_y {
                device.hat_x = hat_x;
                device.hat_y = hat_y;
                sink.submit_joy_hat(joy_id, hat_x, hat_y);
            }
        }

        true
    }

    /// A game-controller key transition for a registered device.
    pub fn key_button<S: InputSink>(
        &mut self,
        device_id: i32,
        keycode: Keycode,
        pressed: bool,
        sink: &mut S,
    ) {
        if let Some(&joy_id) = self.ids.get(&device_id) {
            sink.submit_joy_button(joy_id, engine_button_for(keycode), pressed);
        }
    }

    // Assign the first available engine id; ids are reused.
    fn assign_id(&mut self, device_id: i32) -> i32 {
        let mut joy_id = 0;
        while self.ids.values().any(|&assigned| assigned == joy_id) {
            joy_id += 1;
        }
        self.ids.insert(device_id, joy_id);
        joy_id
    }
}

/// Map a platform key code to the engine's controller button index.
///
/// Platform A maps to the engine's B-position button and X to the
/// Y-position one (SNES layout); unmapped buttons index relative to
/// the first generic button code.
pub fn engine_button_for(keycode: Keycode) -> i32 {
    match keycode {
        Keycode::BUTTON_A => 0,
        Keycode::BUTTON_B => 1,
        Keycode::BUTTON_X => 2,
        Keycode::BUTTON_Y => 3,
        Keycode::BUTTON_SELECT => 4,
        Keycode::BUTTON_START => 6,
        Keycode::BUTTON_THUMBL => 7,
        Keycode::BUTTON_THUMBR => 8,
        Keycode::BUTTON_L1 => 9,
        Keycode::BUTTON_R1 => 10,
        Keycode::DPAD_UP => 11,
        Keycode::DPAD_DOWN => 12,
        Keycode::DPAD_LEFT => 13,
        Keycode::DPAD_RIGHT => 14,
        Keycode::BUTTON_L2 => 15,
        Keycode::BUTTON_R2 => 16,
        Keycode::BUTTON_C => 17,
        Keycode::BUTTON_Z => 18,
        other => other.0 as i32 - Keycode::BUTTON_1.0 as i32 + 20,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_core::{InputCommand, RecordingSink};

    fn pad(device_id: i32, name: &str) -> DeviceInfo {
        DeviceInfo {
            device_id,
            name: name.to_owned(),
            has_joystick_source: true,
            has_gamepad_source: true,
            motion_ranges: vec![
                MotionRange::joystick(Axis(0)),
                MotionRange::joystick(Axis(1)),
                MotionRange::joystick(Axis::HAT_X),
                MotionRange::joystick(Axis::HAT_Y),
            ],
        }
    }

    #[test]
    fn add_registers_and_emits_connection() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();

        registry.device_added(&pad(42, "pad"), &mut sink);

        assert_eq!(registry.engine_id(42), Some(0));
        assert!(matches!(
            &sink.commands[0],
            InputCommand::JoyConnection { joy_id: 0, connected: true, name } if name == "pad"
        ));
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();

        registry.device_added(&pad(42, "pad"), &mut sink);
        registry.device_added(&pad(42, "pad"), &mut sink);

        assert_eq!(sink.commands.len(), 1);
    }

    #[test]
    fn non_game_device_is_ignored() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();

        let keyboard = DeviceInfo {
            device_id: 7,
            name: "keyboard".to_owned(),
            has_joystick_source: false,
            has_gamepad_source: false,
            motion_ranges: Vec::new(),
        };
        registry.device_added(&keyboard, &mut sink);

        assert_eq!(registry.engine_id(7), None);
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn engine_ids_are_reused_after_disconnect() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();

        registry.device_added(&pad(10, "a"), &mut sink);
        registry.device_added(&pad(11, "b"), &mut sink);
        assert_eq!(registry.engine_id(10), Some(0));
        assert_eq!(registry.engine_id(11), Some(1));

        registry.device_removed(10, &mut sink);
        assert!(matches!(
            sink.commands.last(),
            Some(InputCommand::JoyConnection {
                joy_id: 0,
                connected: false,
                ..
            })
        ));

        registry.device_added(&pad(12, "c"), &mut sink);
        assert_eq!(registry.engine_id(12), Some(0));
    }

    #[test]
    fn remove_of_unknown_device_is_ignored() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();

        registry.device_removed(999, &mut sink);
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn duplicate_axes_are_collapsed_and_sorted() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();

        let info = DeviceInfo {
            device_id: 1,
            name: "odd".to_owned(),
            has_joystick_source: true,
            has_gamepad_source: false,
            motion_ranges: vec![
                MotionRange::joystick(Axis(11)),
                MotionRange::joystick(Axis(0)),
                MotionRange::joystick(Axis(11)),
                // Non-game ranges are skipped entirely.
                MotionRange {
                    axis: Axis(5),
                    joystick: false,
                    gamepad: false,
                },
            ],
        };
        registry.device_added(&info, &mut sink);

        let device = registry.devices.get(&1).unwrap();
        assert_eq!(device.axes, vec![Axis(0), Axis(11)]);
        assert!(!device.has_hat);
    }

    #[test]
    fn axis_motion_emits_only_changes() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();
        registry.device_added(&pad(1, "pad"), &mut sink);
        sink.clear();

        let motion = JoystickMotion {
            device_id: 1,
            axis_values: vec![
                AxisValue {
                    axis: Axis(0),
                    value: 0.5,
                },
                AxisValue {
                    axis: Axis(1),
                    value: 0.0,
                },
            ],
        };

        assert!(registry.axis_motion(&motion, &mut sink));
        // Axis 0 changed from unseen to 0.5, axis 1 from unseen to 0.0.
        assert_eq!(sink.commands.len(), 2);
        sink.clear();

        // Identical sample: nothing to report.
        assert!(registry.axis_motion(&motion, &mut sink));
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn hat_values_are_rounded_and_deduped() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();
        registry.device_added(&pad(1, "pad"), &mut sink);
        sink.clear();

        let motion = JoystickMotion {
            device_id: 1,
            axis_values: vec![
                AxisValue {
                    axis: Axis::HAT_X,
                    value: 0.9,
                },
                AxisValue {
                    axis: Axis::HAT_Y,
                    value: -1.0,
                },
            ],
        };

        registry.axis_motion(&motion, &mut sink);
        assert!(sink.commands.iter().any(|c| matches!(
            c,
            InputCommand::JoyHat {
                joy_id: 0,
                hat_x: 1,
                hat_y: -1,
            }
        )));
        sink.clear();

        registry.axis_motion(&motion, &mut sink);
        assert!(!sink
            .commands
            .iter()
            .any(|c| matches!(c, InputCommand::JoyHat { .. })));
    }

    #[test]
    fn motion_for_unregistered_device_is_declined() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();

        let motion = JoystickMotion {
            device_id: 5,
            axis_values: Vec::new(),
        };
        assert!(!registry.axis_motion(&motion, &mut sink));
    }

    #[test]
    fn device_changed_reregisters() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();
        registry.device_added(&pad(3, "pad"), &mut sink);
        sink.clear();

        registry.device_changed(&pad(3, "pad v2"), &mut sink);

        assert_eq!(sink.commands.len(), 2);
        assert!(matches!(
            sink.commands[0],
            InputCommand::JoyConnection {
                connected: false,
                ..
            }
        ));
        assert!(matches!(
            &sink.commands[1],
            InputCommand::JoyConnection { connected: true, name, .. } if name == "pad v2"
        ));
    }

    #[test]
    fn button_mapping_follows_engine_layout() {
        assert_eq!(engine_button_for(Keycode::BUTTON_A), 0);
        assert_eq!(engine_button_for(Keycode::BUTTON_Y), 3);
        assert_eq!(engine_button_for(Keycode::DPAD_LEFT), 13);
        assert_eq!(engine_button_for(Keycode::BUTTON_Z), 18);
        // Generic buttons index relative to the first generic code.
        assert_eq!(engine_button_for(Keycode(190)), 22);
    }

    #[test]
    fn key_button_resolves_through_engine_id() {
        let mut registry = JoystickRegistry::new();
        let mut sink = RecordingSink::new();
        registry.device_added(&pad(8, "pad"), &mut sink);
        sink.clear();

        registry.key_button(8, Keycode::BUTTON_START, true, &mut sink);
        assert_eq!(
            sink.commands,
            vec![InputCommand::JoyButton {
                joy_id: 0,
                button: 6,
                pressed: true,
            }]
        );

        // Unregistered devices are ignored.
        sink.clear();
        registry.key_button(99, Keycode::BUTTON_START, true, &mut sink);
        assert!(sink.commands.is_empty());
    }
}
