//! Default dispatch into the engine sink
//!
//! The mouse/touch split applied to events that no gesture claimed, and
//! the normalization rules the engine expects: the button mask is
//! zeroed on up/cancel, and only pointer transitions the engine models
//! are dispatched at all.

use helio_core::{
    ButtonMask, InputSink, MouseCommand, PointerAction, RawPointerEvent, TouchCommand,
};

/// Dispatch a raw event along its default path: mouse-sourced events to
/// the mouse sink, everything else to the touch sink.
pub fn submit_event<S: InputSink>(event: &RawPointerEvent, sink: &mut S) -> bool {
    if event.source.is_mouse() {
        submit_mouse(
            event.action,
            event.buttons,
            event.x,
            event.y,
            event.hscroll,
            event.vscroll,
            false,
            event.source.is_mouse_relative(),
            sink,
        )
    } else {
        submit_touch(event, sink)
    }
}

/// Dispatch a mouse command.
///
/// On `Up`/`Cancel` the engine expects an empty button mask regardless
/// of what the platform reported. Actions outside the mouse vocabulary
/// (pointer transitions, bare button press/release) are declined.
#[allow(clippy::too_many_arguments)]
pub fn submit_mouse<S: InputSink>(
    action: PointerAction,
    buttons: ButtonMask,
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    double_click: bool,
    relative: bool,
    sink: &mut S,
) -> bool {
    use PointerAction::*;

    let buttons = match action {
        Up | Cancel => ButtonMask::NONE,
        Down | Move | Scroll | HoverEnter | HoverExit | HoverMove => buttons,
        PointerDown | PointerUp | ButtonPress | ButtonRelease => return false,
    };

    sink.submit_mouse_event(MouseCommand {
        action,
        buttons,
        x,
        y,
        dx,
        dy,
        is_double_click: double_click,
        relative,
    });
    true
}

/// Dispatch a raw touch command carrying the full pointer set.
///
/// An event with no active pointers is swallowed: there is nothing to
/// tell the engine, but the event is considered consumed.
pub fn submit_touch<S: InputSink>(event: &RawPointerEvent, sink: &mut S) -> bool {
    use PointerAction::*;

    if event.pointers.is_empty() {
        return true;
    }

    match event.action {
        Down | Up | Move | Cancel | PointerDown | PointerUp => {
            sink.submit_touch_event(TouchCommand {
                action: event.action,
                action_pointer_id: event.action_pointer_id(),
                pointers: event.pointers.clone(),
            });
            true
        }
        HoverEnter | HoverExit | HoverMove | Scroll | ButtonPress | ButtonRelease => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_core::{InputCommand, Pointer, RecordingSink, SourceClass};

    #[test]
    fn mouse_up_zeroes_button_mask() {
        let mut sink = RecordingSink::new();
        let handled = submit_mouse(
            PointerAction::Up,
            ButtonMask::PRIMARY | ButtonMask::SECONDARY,
            3.0,
            4.0,
            0.0,
            0.0,
            false,
            false,
            &mut sink,
        );

        assert!(handled);
        assert_eq!(
            sink.commands,
            vec![InputCommand::Mouse(MouseCommand {
                action: PointerAction::Up,
                buttons: ButtonMask::NONE,
                x: 3.0,
                y: 4.0,
                dx: 0.0,
                dy: 0.0,
                is_double_click: false,
                relative: false,
            })]
        );
    }

    #[test]
    fn mouse_down_keeps_button_mask() {
        let mut sink = RecordingSink::new();
        submit_mouse(
            PointerAction::Down,
            ButtonMask::SECONDARY,
            0.0,
            0.0,
            0.0,
            0.0,
            false,
            false,
            &mut sink,
        );

        assert!(matches!(
            sink.commands[0],
            InputCommand::Mouse(MouseCommand {
                buttons: ButtonMask::SECONDARY,
                ..
            })
        ));
    }

    #[test]
    fn bare_button_release_is_declined() {
        let mut sink = RecordingSink::new();
        let handled = submit_mouse(
            PointerAction::ButtonRelease,
            ButtonMask::PRIMARY,
            0.0,
            0.0,
            0.0,
            0.0,
            false,
            false,
            &mut sink,
        );

        assert!(!handled);
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn touch_with_no_pointers_is_swallowed() {
        let mut sink = RecordingSink::new();
        let event = RawPointerEvent::touch(PointerAction::Up, 0.0, 0.0).with_pointers([]);

        assert!(submit_touch(&event, &mut sink));
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn touch_carries_pointer_set_and_action_pointer() {
        let mut sink = RecordingSink::new();
        let event = RawPointerEvent::touch(PointerAction::PointerUp, 1.0, 1.0)
            .with_pointers([
                Pointer {
                    id: 0,
                    x: 1.0,
                    y: 1.0,
                },
                Pointer {
                    id: 1,
                    x: 9.0,
                    y: 9.0,
                },
            ])
            .with_action_index(1);

        assert!(submit_touch(&event, &mut sink));
        match &sink.commands[0] {
            InputCommand::Touch(touch) => {
                assert_eq!(touch.action, PointerAction::PointerUp);
                assert_eq!(touch.action_pointer_id, 1);
                assert_eq!(touch.pointers.len(), 2);
            }
            other => panic!("expected touch command, got {other:?}"),
        }
    }

    #[test]
    fn default_path_splits_by_source() {
        let mut sink = RecordingSink::new();
        submit_event(
            &RawPointerEvent::mouse(PointerAction::Move, ButtonMask::PRIMARY, 1.0, 2.0),
            &mut sink,
        );
        submit_event(&RawPointerEvent::touch(PointerAction::Down, 3.0, 4.0), &mut sink);

        assert!(matches!(sink.commands[0], InputCommand::Mouse(_)));
        assert!(matches!(sink.commands[1], InputCommand::Touch(_)));
    }

    #[test]
    fn scroll_axis_deltas_flow_into_mouse_command() {
        let mut sink = RecordingSink::new();
        let event = RawPointerEvent::mouse(PointerAction::Scroll, ButtonMask::NONE, 5.0, 5.0)
            .with_scroll(0.0, -1.0);

        assert!(submit_event(&event, &mut sink));
        assert!(matches!(
            sink.commands[0],
            InputCommand::Mouse(MouseCommand {
                action: PointerAction::Scroll,
                dy: -1.0,
                ..
            })
        ));
    }

    #[test]
    fn relative_source_marks_command_relative() {
        let mut sink = RecordingSink::new();
        let event = RawPointerEvent::mouse(PointerAction::Move, ButtonMask::NONE, 0.0, 0.0)
            .with_source(SourceClass::MouseRelative);

        assert!(submit_event(&event, &mut sink));
        assert!(matches!(
            sink.commands[0],
            InputCommand::Mouse(MouseCommand { relative: true, .. })
        ));
    }
}
