//! Raw input events
//!
//! Typed representations of the samples the platform delivers to the
//! view shell. Raw integer action/source codes are decoded once, at the
//! platform boundary, into exhaustive enums so that every dispatch site
//! downstream is a checked match rather than an integer switch.

use smallvec::{smallvec, SmallVec};

use crate::error::{EventError, Result};

/// Kind of a pointer sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Primary pointer went down
    Down,
    /// Primary pointer went up
    Up,
    /// One or more pointers moved
    Move,
    /// The gesture was aborted by the platform
    Cancel,
    /// A secondary pointer went down
    PointerDown,
    /// A secondary pointer went up
    PointerUp,
    /// Hovering pointer entered the view
    HoverEnter,
    /// Hovering pointer left the view
    HoverExit,
    /// Hovering pointer moved
    HoverMove,
    /// Scroll wheel / scroll axis motion
    Scroll,
    /// A mouse button was pressed (without pointer transition)
    ButtonPress,
    /// A mouse button was released (without pointer transition)
    ButtonRelease,
}

impl PointerAction {
    /// Decode a raw platform action code.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Down),
            1 => Ok(Self::Up),
            2 => Ok(Self::Move),
            3 => Ok(Self::Cancel),
            5 => Ok(Self::PointerDown),
            6 => Ok(Self::PointerUp),
            7 => Ok(Self::HoverMove),
            8 => Ok(Self::Scroll),
            9 => Ok(Self::HoverEnter),
            10 => Ok(Self::HoverExit),
            11 => Ok(Self::ButtonPress),
            12 => Ok(Self::ButtonRelease),
            other => Err(EventError::UnknownAction(other)),
        }
    }
}

/// Device class a pointer sample originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceClass {
    Touchscreen,
    Mouse,
    Stylus,
    /// Mouse in relative (pointer-capture) mode
    MouseRelative,
}

impl SourceClass {
    const BITS_TOUCHSCREEN: u32 = 0x1002;
    const BITS_MOUSE: u32 = 0x2002;
    const BITS_STYLUS: u32 = 0x4002;
    const BITS_MOUSE_RELATIVE: u32 = 0x0002_0004;

    /// Decode a raw platform source bitmask.
    pub fn from_bits(bits: u32) -> Result<Self> {
        if bits & Self::BITS_MOUSE_RELATIVE == Self::BITS_MOUSE_RELATIVE {
            Ok(Self::MouseRelative)
        } else if bits & Self::BITS_MOUSE == Self::BITS_MOUSE {
            Ok(Self::Mouse)
        } else if bits & Self::BITS_STYLUS == Self::BITS_STYLUS {
            Ok(Self::Stylus)
        } else if bits & Self::BITS_TOUCHSCREEN == Self::BITS_TOUCHSCREEN {
            Ok(Self::Touchscreen)
        } else {
            Err(EventError::UnknownSource(bits))
        }
    }

    /// Whether events from this source resolve through the mouse path.
    ///
    /// Relative-mode mouse events are included: during a pointer capture
    /// the platform reports the relative source, and those samples must
    /// still become mouse commands (with the `relative` flag set).
    pub fn is_mouse(self) -> bool {
        matches!(self, Self::Mouse | Self::Stylus | Self::MouseRelative)
    }

    /// Whether this source reports relative rather than absolute motion.
    pub fn is_mouse_relative(self) -> bool {
        self == Self::MouseRelative
    }
}

/// Mouse button state bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    pub const PRIMARY: ButtonMask = ButtonMask(1 << 0);
    pub const SECONDARY: ButtonMask = ButtonMask(1 << 1);
    pub const TERTIARY: ButtonMask = ButtonMask(1 << 2);
    pub const BACK: ButtonMask = ButtonMask(1 << 3);
    pub const FORWARD: ButtonMask = ButtonMask(1 << 4);
    pub const STYLUS_PRIMARY: ButtonMask = ButtonMask(1 << 5);
    pub const STYLUS_SECONDARY: ButtonMask = ButtonMask(1 << 6);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

/// A single active pointer within a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Platform pointer id, stable across the pointer's down..up span
    pub id: i32,
    /// X position in view coordinates
    pub x: f32,
    /// Y position in view coordinates
    pub y: f32,
}

/// One observed pointer sample.
///
/// Produced by the platform adapter, consumed once. Events arrive in
/// chronological order on the input-dispatch thread; that ordering is a
/// precondition of everything downstream.
#[derive(Clone, Debug)]
pub struct RawPointerEvent {
    pub action: PointerAction,
    pub source: SourceClass,
    pub buttons: ButtonMask,
    /// Primary pointer X
    pub x: f32,
    /// Primary pointer Y
    pub y: f32,
    /// Horizontal scroll axis delta, if any
    pub hscroll: f32,
    /// Vertical scroll axis delta, if any
    pub vscroll: f32,
    /// All active pointers, primary first
    pub pointers: SmallVec<[Pointer; 2]>,
    /// Index into `pointers` of the pointer this action refers to
    pub action_index: usize,
}

impl RawPointerEvent {
    /// Build a single-pointer touchscreen sample.
    pub fn touch(action: PointerAction, x: f32, y: f32) -> Self {
        Self {
            action,
            source: SourceClass::Touchscreen,
            buttons: ButtonMask::NONE,
            x,
            y,
            hscroll: 0.0,
            vscroll: 0.0,
            pointers: smallvec![Pointer { id: 0, x, y }],
            action_index: 0,
        }
    }

    /// Build a mouse sample.
    pub fn mouse(action: PointerAction, buttons: ButtonMask, x: f32, y: f32) -> Self {
        Self {
            source: SourceClass::Mouse,
            buttons,
            ..Self::touch(action, x, y)
        }
    }

    /// Replace the pointer list (primary coordinates stay as built).
    pub fn with_pointers(mut self, pointers: impl IntoIterator<Item = Pointer>) -> Self {
        self.pointers = pointers.into_iter().collect();
        self
    }

    /// Set the scroll axis deltas.
    pub fn with_scroll(mut self, hscroll: f32, vscroll: f32) -> Self {
        self.hscroll = hscroll;
        self.vscroll = vscroll;
        self
    }

    /// Override the source class.
    pub fn with_source(mut self, source: SourceClass) -> Self {
        self.source = source;
        self
    }

    /// Mark which pointer the action refers to.
    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = index;
        self
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Id of the pointer this action refers to.
    pub fn action_pointer_id(&self) -> i32 {
        self.pointers
            .get(self.action_index)
            .map(|p| p.id)
            .unwrap_or(0)
    }
}

/// Snapshot of the platform scale recognizer at one callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleGesture {
    /// Focal point X of the gesture
    pub focus_x: f32,
    /// Focal point Y of the gesture
    pub focus_y: f32,
    /// Span ratio relative to the previous callback
    pub factor: f32,
}

/// Platform key code (platform-agnostic constants).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Keycode(pub u32);

impl Keycode {
    // Navigation / system keys
    pub const BACK: Keycode = Keycode(4);
    pub const VOLUME_UP: Keycode = Keycode(24);
    pub const VOLUME_DOWN: Keycode = Keycode(25);

    // Directional pad
    pub const DPAD_UP: Keycode = Keycode(19);
    pub const DPAD_DOWN: Keycode = Keycode(20);
    pub const DPAD_LEFT: Keycode = Keycode(21);
    pub const DPAD_RIGHT: Keycode = Keycode(22);

    // Game controller buttons
    pub const BUTTON_A: Keycode = Keycode(96);
    pub const BUTTON_B: Keycode = Keycode(97);
    pub const BUTTON_C: Keycode = Keycode(98);
    pub const BUTTON_X: Keycode = Keycode(99);
    pub const BUTTON_Y: Keycode = Keycode(100);
    pub const BUTTON_Z: Keycode = Keycode(101);
    pub const BUTTON_L1: Keycode = Keycode(102);
    pub const BUTTON_R1: Keycode = Keycode(103);
    pub const BUTTON_L2: Keycode = Keycode(104);
    pub const BUTTON_R2: Keycode = Keycode(105);
    pub const BUTTON_THUMBL: Keycode = Keycode(106);
    pub const BUTTON_THUMBR: Keycode = Keycode(107);
    pub const BUTTON_START: Keycode = Keycode(108);
    pub const BUTTON_SELECT: Keycode = Keycode(109);
    /// First generic game button; unknown buttons map relative to it
    pub const BUTTON_1: Keycode = Keycode(188);
}

/// Source classes a key event or device can report, as independent
/// flags. Keyboards commonly report `keyboard | dpad` together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceFlags {
    pub keyboard: bool,
    pub dpad: bool,
    pub joystick: bool,
    pub gamepad: bool,
}

impl SourceFlags {
    const BITS_KEYBOARD: u32 = 0x101;
    const BITS_DPAD: u32 = 0x201;
    const BITS_GAMEPAD: u32 = 0x401;
    const BITS_JOYSTICK: u32 = 0x0100_0010;

    pub fn keyboard() -> Self {
        Self {
            keyboard: true,
            dpad: true,
            ..Self::default()
        }
    }

    pub fn gamepad() -> Self {
        Self {
            gamepad: true,
            ..Self::default()
        }
    }

    pub fn joystick() -> Self {
        Self {
            joystick: true,
            ..Self::default()
        }
    }

    /// Decode a raw platform source bitmask.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            keyboard: bits & Self::BITS_KEYBOARD == Self::BITS_KEYBOARD,
            dpad: bits & Self::BITS_DPAD == Self::BITS_DPAD,
            joystick: bits & Self::BITS_JOYSTICK == Self::BITS_JOYSTICK,
            gamepad: bits & Self::BITS_GAMEPAD == Self::BITS_GAMEPAD,
        }
    }

    /// Whether a key from this source belongs to a game controller.
    ///
    /// A plain keyboard reports the dpad flag too, so keyboard+dpad
    /// alone does not count as a game device. Only these four flags
    /// participate: any further source classes a keyboard reports
    /// (touchpads on keyboard combos, for instance) are dropped at
    /// decode and do not promote it to a game device.
    pub fn is_game_device(self) -> bool {
        if self.keyboard && self.dpad && !self.joystick && !self.gamepad {
            return false;
        }
        self.joystick || self.dpad || self.gamepad
    }
}

/// One observed key sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub keycode: Keycode,
    /// Hardware scan code
    pub scancode: u32,
    /// Unicode character for the key, 0 if none
    pub unicode: u32,
    pub source: SourceFlags,
    /// Platform device id the key came from
    pub device_id: i32,
    /// Whether this sample is a key-repeat echo
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Build a plain keyboard key sample.
    pub fn keyboard(keycode: Keycode, unicode: u32) -> Self {
        Self {
            keycode,
            scancode: 0,
            unicode,
            source: SourceFlags::keyboard(),
            device_id: 0,
            repeat: false,
        }
    }

    /// Build a game-controller button sample.
    pub fn game_button(keycode: Keycode, device_id: i32) -> Self {
        Self {
            keycode,
            scancode: 0,
            unicode: 0,
            source: SourceFlags::gamepad(),
            device_id,
            repeat: false,
        }
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }
}
