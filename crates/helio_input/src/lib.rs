//! Helio Input Translation
//!
//! Converts the ambiguous low-level pointer stream a view receives
//! (taps, long presses, drags, two-finger gestures, simulated mouse
//! input) into an unambiguous, ordered sequence of semantic commands
//! for the engine's input sink:
//!
//! - **Gesture classification**: resolves overlapping recognizer
//!   signals (long-press vs. scale vs. double-tap) into single
//!   dispatches, synthesizes context clicks and capture-end events
//! - **Dispatch**: the default mouse/touch split for events no gesture
//!   claimed
//! - **Routing**: the view-facing entry points preserving the platform's
//!   recognizer-first ordering contract, plus key routing
//! - **Joystick registry**: game controller hotplug, axis polling
//!   dedup, and button mapping
//!
//! Everything here runs on the platform's input-dispatch thread, in
//! event order, without blocking.

pub mod dispatch;
pub mod gestures;
pub mod joystick;
pub mod router;

pub use gestures::GestureClassifier;
pub use joystick::{Axis, AxisValue, DeviceInfo, JoystickMotion, JoystickRegistry, MotionRange};
pub use router::InputRouter;
