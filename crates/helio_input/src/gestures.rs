//! Gesture classification
//!
//! Turns the overlapping recognizer callbacks a view receives into a
//! consistent command stream: a long press becomes a context click, a
//! double tap flags the next down, two-finger scrolls become pans,
//! scale callbacks become magnifies, and pointer-capture transitions
//! synthesize their own terminating mouse event.
//!
//! All handlers run on the input-dispatch thread, in the order the
//! platform delivers events. The platform guarantees down precedes
//! move precedes up and that long-press/scale callbacks interleave but
//! never nest; that ordering is a precondition here, not something the
//! classifier re-derives.

use helio_core::{ButtonMask, InputSink, MotionCommand, PointerAction, RawPointerEvent, ScaleGesture};

use crate::dispatch;

/// Lower bound of the magnify emission band. Factors below this are
/// treated as recognizer jitter. Tunable, not structural.
pub const MAGNIFY_FACTOR_MIN: f32 = 0.8;
/// Upper bound of the magnify emission band.
pub const MAGNIFY_FACTOR_MAX: f32 = 1.2;
/// Scroll distances are damped by this factor before becoming pans.
pub const PAN_SCROLL_DAMPING: f32 = 5.0;

/// Session state owned by the classifier. Reset at construction,
/// mutated only by the classifier's own handlers.
#[derive(Clone, Copy, Debug, Default)]
struct ClassifierState {
    pan_scale_enabled: bool,
    next_down_is_double_tap: bool,
    drag_in_progress: bool,
    scale_in_progress: bool,
    context_click_in_progress: bool,
    pointer_capture_in_progress: bool,
}

/// Classifies raw pointer and gesture callbacks into semantic commands.
///
/// Created once per view surface and living as long as the surface is
/// attached. Handlers take the sink by exclusive reference and dispatch
/// synchronously; none of them block or fail.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    state: ClassifierState,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable multi-finger pan and scale gestures. Takes effect on the
    /// next classified event.
    pub fn set_pan_scale_enabled(&mut self, enabled: bool) {
        self.state.pan_scale_enabled = enabled;
    }

    pub fn pan_scale_enabled(&self) -> bool {
        self.state.pan_scale_enabled
    }

    /// A confirmed down. Always consumed: the down is dispatched
    /// immediately, flagged as a double tap when the recognizer
    /// announced one just before.
    pub fn on_down<S: InputSink>(&mut self, event: &RawPointerEvent, sink: &mut S) -> bool {
        sink.submit_motion_event(MotionCommand {
            source: event.source,
            action: PointerAction::Down,
            buttons: event.buttons,
            x: event.x,
            y: event.y,
            is_double_tap: self.state.next_down_is_double_tap,
        });
        self.state.next_down_is_double_tap = false;
        true
    }

    /// A confirmed single tap release; forwarded unchanged.
    pub fn on_single_tap_up<S: InputSink>(&mut self, event: &RawPointerEvent, sink: &mut S) -> bool {
        sink.submit_motion_event(MotionCommand::from_event(event));
        true
    }

    /// A long press: synthesize a context click.
    pub fn on_long_press<S: InputSink>(&mut self, event: &RawPointerEvent, sink: &mut S) {
        self.resolve_context_click(event, sink);
    }

    /// Turn a long press into a secondary-button click: cancel the down
    /// already dispatched, then press the secondary button at the same
    /// spot. Declined while a scale gesture is running or when the
    /// press is really the second touch of a double tap.
    fn resolve_context_click<S: InputSink>(&mut self, event: &RawPointerEvent, sink: &mut S) {
        if self.state.scale_in_progress || self.state.next_down_is_double_tap {
            return;
        }

        sink.submit_motion_event(MotionCommand {
            source: event.source,
            action: PointerAction::Cancel,
            buttons: event.buttons,
            x: event.x,
            y: event.y,
            is_double_tap: false,
        });
        dispatch::submit_mouse(
            PointerAction::Down,
            ButtonMask::SECONDARY,
            event.x,
            event.y,
            0.0,
            0.0,
            false,
            false,
            sink,
        );
        self.state.context_click_in_progress = true;
    }

    /// Pointer capture was taken or released by the view.
    ///
    /// On release, a relative mouse-up marks the end of the capture so
    /// the engine can close out any held button state.
    pub fn on_pointer_capture_change<S: InputSink>(&mut self, has_capture: bool, sink: &mut S) {
        if self.state.pointer_capture_in_progress == has_capture {
            return;
        }

        if !has_capture {
            dispatch::submit_mouse(
                PointerAction::Up,
                ButtonMask::NONE,
                0.0,
                0.0,
                0.0,
                0.0,
                false,
                true,
                sink,
            );
        }
        self.state.pointer_capture_in_progress = has_capture;
    }

    /// Raw motion the recognizers did not claim. Returns whether the
    /// classifier consumed it; when false, the caller's default
    /// dispatch should run.
    pub fn on_motion_event<S: InputSink>(&mut self, event: &RawPointerEvent, sink: &mut S) -> bool {
        use PointerAction::*;

        match event.action {
            Up | Cancel | ButtonRelease => self.resolve_up(event, sink),
            Move => self.resolve_move(event, sink),
            Down | PointerDown | PointerUp | HoverEnter | HoverExit | HoverMove | Scroll
            | ButtonPress => false,
        }
    }

    fn resolve_up<S: InputSink>(&mut self, event: &RawPointerEvent, sink: &mut S) -> bool {
        if event.action == PointerAction::Cancel && self.state.pointer_capture_in_progress {
            // Capture teardown produces a spurious cancel; swallow it.
            tracing::trace!("swallowing cancel during pointer capture");
            return true;
        }

        if !(self.state.pointer_capture_in_progress
            || self.state.drag_in_progress
            || self.state.context_click_in_progress)
        {
            return false;
        }

        if self.state.context_click_in_progress || event.source.is_mouse() {
            // A bare button release ends the gesture too; the engine
            // only understands a plain up.
            dispatch::submit_mouse(
                PointerAction::Up,
                event.buttons,
                event.x,
                event.y,
                0.0,
                0.0,
                false,
                event.source.is_mouse_relative(),
                sink,
            );
        } else {
            dispatch::submit_touch(event, sink);
        }

        self.state.pointer_capture_in_progress = false;
        self.state.drag_in_progress = false;
        self.state.context_click_in_progress = false;
        true
    }

    fn resolve_move<S: InputSink>(&mut self, event: &RawPointerEvent, sink: &mut S) -> bool {
        if !self.state.context_click_in_progress {
            return false;
        }

        dispatch::submit_mouse(
            PointerAction::Move,
            ButtonMask::SECONDARY,
            event.x,
            event.y,
            0.0,
            0.0,
            false,
            event.source.is_mouse_relative(),
            sink,
        );
        true
    }

    /// An event within a confirmed double-tap gesture. The release is
    /// forwarded and clears the pending double-tap flag; intermediate
    /// events are consumed silently.
    pub fn on_double_tap_event<S: InputSink>(
        &mut self,
        event: &RawPointerEvent,
        sink: &mut S,
    ) -> bool {
        if event.action == PointerAction::Up {
            self.state.next_down_is_double_tap = false;
            sink.submit_motion_event(MotionCommand::from_event(event));
        }
        true
    }

    /// A double tap was recognized. The actual dispatch is deferred to
    /// the next `on_down`, which carries the flag.
    pub fn on_double_tap(&mut self, _event: &RawPointerEvent) -> bool {
        self.state.next_down_is_double_tap = true;
        true
    }

    /// A scroll between two samples. Two-finger scrolls become pans
    /// when enabled; single-pointer scrolls start a drag and are
    /// forwarded unchanged.
    pub fn on_scroll<S: InputSink>(
        &mut self,
        origin: &RawPointerEvent,
        terminus: &RawPointerEvent,
        dx: f32,
        dy: f32,
        sink: &mut S,
    ) -> bool {
        if self.state.scale_in_progress && self.state.drag_in_progress {
            // The scroll is part of a scale gesture now; cancel the drag.
            sink.submit_motion_event(MotionCommand {
                source: origin.source,
                action: PointerAction::Cancel,
                buttons: origin.buttons,
                x: origin.x,
                y: origin.y,
                is_double_tap: false,
            });
            self.state.drag_in_progress = false;
        }

        if terminus.pointer_count() >= 2
            && self.state.pan_scale_enabled
            && !self.state.pointer_capture_in_progress
        {
            sink.submit_pan(
                terminus.x,
                terminus.y,
                dx / PAN_SCROLL_DAMPING,
                dy / PAN_SCROLL_DAMPING,
            );
        } else if !self.state.scale_in_progress {
            self.state.drag_in_progress = true;
            sink.submit_motion_event(MotionCommand::from_event(terminus));
        }

        true
    }

    /// A scale callback. Claimed whenever pan/scale is armed, but a
    /// magnify is only emitted inside the jitter band.
    pub fn on_scale<S: InputSink>(&mut self, gesture: &ScaleGesture, sink: &mut S) -> bool {
        if !self.state.pan_scale_enabled || self.state.pointer_capture_in_progress {
            return false;
        }

        if gesture.factor >= MAGNIFY_FACTOR_MIN
            && gesture.factor <= MAGNIFY_FACTOR_MAX
            && gesture.factor != 1.0
        {
            sink.submit_magnify(gesture.focus_x, gesture.focus_y, gesture.factor);
        }
        true
    }

    /// A scale gesture is starting.
    pub fn on_scale_begin(&mut self, _gesture: &ScaleGesture) -> bool {
        if !self.state.pan_scale_enabled || self.state.pointer_capture_in_progress {
            return false;
        }

        // Platform contract: scale gestures never nest.
        debug_assert!(
            !self.state.scale_in_progress,
            "scale gesture began while another is in progress"
        );
        self.state.scale_in_progress = true;
        true
    }

    /// The scale gesture ended (however it was claimed).
    pub fn on_scale_end(&mut self, _gesture: &ScaleGesture) {
        self.state.scale_in_progress = false;
    }
}
