//! Canonical events and the application callback surface.
//!
//! Backends translate native messages/protocol packets into [`Event`] values
//! which are consumed immediately by [`dispatch`] — events are transient and
//! never persisted. Applications receive them through [`EventHandler`], a
//! trait whose fourteen callbacks all have default no-op bodies: a handler
//! implements only the ones it cares about. Because `poll_events` is generic
//! over the handler type, the dispatch match is monomorphized and an
//! unimplemented callback inlines to nothing — no virtual call, no branch,
//! no per-frame cost for unused event kinds.

use crate::input::{KeyCode, MouseButton};

/// A backend-independent input or window occurrence.
///
/// Produced transiently per native event during `poll_events` and consumed
/// by the dispatch layer before the call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed (auto-repeats are filtered out by the backends).
    KeyDown(KeyCode),
    /// A key was released.
    KeyUp(KeyCode),
    /// A translated text character was produced.
    Char(char),
    /// A mouse button was pressed at the given client-area position.
    MouseButtonDown {
        /// Button that was pressed
        button: MouseButton,
        /// Client-area x coordinate
        x: i32,
        /// Client-area y coordinate
        y: i32,
    },
    /// A mouse button was released at the given client-area position.
    MouseButtonUp {
        /// Button that was released
        button: MouseButton,
        /// Client-area x coordinate
        x: i32,
        /// Client-area y coordinate
        y: i32,
    },
    /// Vertical scroll by the given number of notches (positive is up).
    MouseScrollV(i32),
    /// Horizontal scroll by the given number of notches.
    MouseScrollH(i32),
    /// Cumulative logical cursor position changed.
    MouseMovePos {
        /// Logical x position (may be negative under cursor lock)
        x: i32,
        /// Logical y position (may be negative under cursor lock)
        y: i32,
    },
    /// Relative cursor motion since the previous sample.
    MouseMoveDelta {
        /// Horizontal delta
        dx: i32,
        /// Vertical delta
        dy: i32,
    },
    /// The client area was resized.
    Resize {
        /// New client-area width
        width: u32,
        /// New client-area height
        height: u32,
    },
    /// The window was moved to the given screen position.
    Move {
        /// New x position
        x: i32,
        /// New y position
        y: i32,
    },
    /// The window was asked to close. Fired exactly once.
    Close,
    /// The window gained input focus.
    FocusIn,
    /// The window lost input focus. Never fired after `Close`.
    FocusOut,
}

/// Application callbacks, one per canonical event kind.
///
/// Every method has a default empty body, so implementors only write the
/// callbacks they actually use — a type implementing nothing but
/// [`on_close`](Self::on_close) compiles without stubs and never pays for
/// the other thirteen.
pub trait EventHandler {
    /// A key was pressed. Backends filter native auto-repeat, so this fires
    /// once per physical press.
    fn on_key_down(&mut self, key: KeyCode) {
        let _ = key;
    }

    /// A key was released.
    fn on_key_up(&mut self, key: KeyCode) {
        let _ = key;
    }

    /// A translated character was produced. Only the Win32 backend emits
    /// this; the XCB backend does not perform keysym-to-text translation.
    fn on_char(&mut self, ch: char) {
        let _ = ch;
    }

    /// A mouse button was pressed at `(x, y)` in client-area coordinates.
    fn on_mouse_button_down(&mut self, button: MouseButton, x: i32, y: i32) {
        let _ = (button, x, y);
    }

    /// A mouse button was released at `(x, y)` in client-area coordinates.
    fn on_mouse_button_up(&mut self, button: MouseButton, x: i32, y: i32) {
        let _ = (button, x, y);
    }

    /// Vertical scroll; `delta` is in wheel notches, positive away from
    /// the user.
    fn on_mouse_scroll_v(&mut self, delta: i32) {
        let _ = delta;
    }

    /// Horizontal scroll in wheel notches.
    fn on_mouse_scroll_h(&mut self, delta: i32) {
        let _ = delta;
    }

    /// The logical cursor position changed. Under cursor lock this keeps
    /// accumulating (and may go negative) even though the native cursor is
    /// pinned to the client area.
    fn on_mouse_move_pos(&mut self, x: i32, y: i32) {
        let _ = (x, y);
    }

    /// Relative cursor motion since the previous sample.
    fn on_mouse_move_delta(&mut self, dx: i32, dy: i32) {
        let _ = (dx, dy);
    }

    /// The client area was resized.
    fn on_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// The window moved on screen.
    fn on_move(&mut self, x: i32, y: i32) {
        let _ = (x, y);
    }

    /// The window was asked to close. Fired exactly once per window.
    fn on_close(&mut self) {}

    /// The window gained input focus.
    fn on_focus_in(&mut self) {}

    /// The window lost input focus.
    fn on_focus_out(&mut self) {}
}

/// Route one canonical event to the matching handler callback.
pub(crate) fn dispatch<H: EventHandler>(handler: &mut H, event: Event) {
    match event {
        Event::KeyDown(key) => handler.on_key_down(key),
        Event::KeyUp(key) => handler.on_key_up(key),
        Event::Char(ch) => handler.on_char(ch),
        Event::MouseButtonDown { button, x, y } => handler.on_mouse_button_down(button, x, y),
        Event::MouseButtonUp { button, x, y } => handler.on_mouse_button_up(button, x, y),
        Event::MouseScrollV(delta) => handler.on_mouse_scroll_v(delta),
        Event::MouseScrollH(delta) => handler.on_mouse_scroll_h(delta),
        Event::MouseMovePos { x, y } => handler.on_mouse_move_pos(x, y),
        Event::MouseMoveDelta { dx, dy } => handler.on_mouse_move_delta(dx, dy),
        Event::Resize { width, height } => handler.on_resize(width, height),
        Event::Move { x, y } => handler.on_move(x, y),
        Event::Close => handler.on_close(),
        Event::FocusIn => handler.on_focus_in(),
        Event::FocusOut => handler.on_focus_out(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Implements only `on_close`; everything else stays the default no-op.
    #[derive(Default)]
    struct CloseOnly {
        closes: u32,
    }

    impl EventHandler for CloseOnly {
        fn on_close(&mut self) {
            self.closes += 1;
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl EventHandler for Recorder {
        fn on_key_down(&mut self, key: KeyCode) {
            self.events.push(Event::KeyDown(key));
        }
        fn on_key_up(&mut self, key: KeyCode) {
            self.events.push(Event::KeyUp(key));
        }
        fn on_mouse_move_delta(&mut self, dx: i32, dy: i32) {
            self.events.push(Event::MouseMoveDelta { dx, dy });
        }
        fn on_resize(&mut self, width: u32, height: u32) {
            self.events.push(Event::Resize { width, height });
        }
        fn on_close(&mut self) {
            self.events.push(Event::Close);
        }
    }

    #[test]
    fn close_only_handler_needs_no_stubs() {
        let mut handler = CloseOnly::default();

        // Every other event kind lands in a default no-op.
        dispatch(&mut handler, Event::KeyDown(KeyCode::A));
        dispatch(&mut handler, Event::Char('x'));
        dispatch(
            &mut handler,
            Event::MouseButtonDown {
                button: MouseButton::Left,
                x: 1,
                y: 2,
            },
        );
        dispatch(&mut handler, Event::MouseScrollV(1));
        dispatch(&mut handler, Event::MouseMovePos { x: 5, y: 5 });
        dispatch(
            &mut handler,
            Event::Resize {
                width: 10,
                height: 10,
            },
        );
        dispatch(&mut handler, Event::FocusIn);
        dispatch(&mut handler, Event::FocusOut);
        assert_eq!(handler.closes, 0);

        dispatch(&mut handler, Event::Close);
        assert_eq!(handler.closes, 1);
    }

    #[test]
    fn events_route_to_matching_callbacks() {
        let mut handler = Recorder::default();
        let fed = [
            Event::KeyDown(KeyCode::W),
            Event::MouseMoveDelta { dx: 3, dy: -4 },
            Event::Resize {
                width: 640,
                height: 480,
            },
            Event::KeyUp(KeyCode::W),
            Event::Close,
        ];
        for event in fed {
            dispatch(&mut handler, event);
        }
        assert_eq!(handler.events, fed);
    }
}
