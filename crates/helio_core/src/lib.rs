//! Helio Input Model
//!
//! This crate provides the platform-agnostic input model shared by the
//! Helio view shell and the engine bindings:
//!
//! - **Raw events**: typed pointer, scale-gesture, and key samples as
//!   observed by the platform, decoded from raw integer codes at the
//!   platform boundary
//! - **Semantic commands**: the engine-bound representation of classified
//!   input (motion, mouse, touch, pan, magnify, key, joystick)
//! - **Input sink**: the fire-and-forget boundary trait the engine
//!   bindings implement
//!
//! # Example
//!
//! ```rust
//! use helio_core::{InputCommand, InputSink, PointerAction, RawPointerEvent, RecordingSink};
//!
//! let mut sink = RecordingSink::new();
//! sink.submit_pan(10.0, 20.0, 1.0, -1.0);
//!
//! assert!(matches!(
//!     sink.commands[0],
//!     InputCommand::Pan { x: 10.0, y: 20.0, .. }
//! ));
//!
//! // Raw events are built by the platform adapter.
//! let event = RawPointerEvent::touch(PointerAction::Down, 42.0, 7.0);
//! assert_eq!(event.pointer_count(), 1);
//! ```

pub mod command;
pub mod error;
pub mod event;
pub mod sink;

pub use command::{InputCommand, MotionCommand, MouseCommand, TouchCommand};
pub use error::{EventError, Result};
pub use event::{
    ButtonMask, Keycode, Pointer, PointerAction, RawKeyEvent, RawPointerEvent, ScaleGesture,
    SourceClass, SourceFlags,
};
pub use sink::{InputSink, RecordingSink};
