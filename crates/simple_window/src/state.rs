//! The authoritative mutable window record shared by both backends.

use bitflags::bitflags;

bitflags! {
    /// Open / fullscreen / cursor-lock flags. Mutually independent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct WindowFlags: u8 {
        const OPEN = 0b001;
        const FULLSCREEN = 0b010;
        const CURSOR_LOCKED = 0b100;
    }
}

/// Geometry, lifecycle flags and mouse accumulation for one window.
///
/// `mouse_x`/`mouse_y` is the cumulative logical cursor position — it only
/// changes on motion samples or a cursor-lock recenter, and may go negative
/// while the cursor is locked. `last_cursor_x`/`last_cursor_y` is the most
/// recent native sample and exists only to compute deltas.
#[derive(Debug)]
pub(crate) struct WindowState {
    pub(crate) width: u32,
    pub(crate) height: u32,
    flags: WindowFlags,
    pub(crate) mouse_x: i32,
    pub(crate) mouse_y: i32,
    pub(crate) last_cursor_x: i32,
    pub(crate) last_cursor_y: i32,
    /// Client-area size before entering fullscreen, restored on exit.
    windowed_size: Option<(u32, u32)>,
}

impl WindowState {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            flags: WindowFlags::OPEN,
            mouse_x: 0,
            mouse_y: 0,
            last_cursor_x: 0,
            last_cursor_y: 0,
            windowed_size: None,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.flags.contains(WindowFlags::OPEN)
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.flags.contains(WindowFlags::FULLSCREEN)
    }

    pub(crate) fn is_cursor_locked(&self) -> bool {
        self.flags.contains(WindowFlags::CURSOR_LOCKED)
    }

    /// Transition to `Closed`. Returns `true` only on the first call, so the
    /// caller fires `on_close` exactly once.
    pub(crate) fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.flags.remove(WindowFlags::OPEN);
        was_open
    }

    pub(crate) fn set_cursor_locked(&mut self, locked: bool) {
        self.flags.set(WindowFlags::CURSOR_LOCKED, locked);
    }

    /// Record a native motion sample at client coordinates `(x, y)`.
    ///
    /// Accumulates the delta from the previous sample into `mouse_x/y`,
    /// updates `last_cursor_x/y`, and returns `(dx, dy)`.
    pub(crate) fn motion_sample(&mut self, x: i32, y: i32) -> (i32, i32) {
        let dx = x - self.last_cursor_x;
        let dy = y - self.last_cursor_y;
        self.mouse_x += dx;
        self.mouse_y += dy;
        self.last_cursor_x = x;
        self.last_cursor_y = y;
        (dx, dy)
    }

    /// Whether a motion sample at `(x, y)` is the echo of the backend's own
    /// recenter warp rather than user motion. Only true while locked.
    pub(crate) fn is_warp_echo(&self, x: i32, y: i32) -> bool {
        self.is_cursor_locked() && (x, y) == self.center()
    }

    /// Client-area center, the warp target used while the cursor is locked.
    pub(crate) fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Reset both the logical position and the last sample to the client
    /// center, so subsequent relative motion is zero-based from this instant.
    pub(crate) fn recenter(&mut self) {
        let (cx, cy) = self.center();
        self.mouse_x = cx;
        self.mouse_y = cy;
        self.last_cursor_x = cx;
        self.last_cursor_y = cy;
    }

    /// Snapshot the windowed size and set the fullscreen flag. Returns
    /// `false` (and changes nothing) if already fullscreen.
    pub(crate) fn enter_fullscreen(&mut self) -> bool {
        if self.is_fullscreen() {
            return false;
        }
        self.windowed_size = Some((self.width, self.height));
        self.flags.insert(WindowFlags::FULLSCREEN);
        true
    }

    /// Clear the fullscreen flag and return the snapshot size for the
    /// native restore call, or `None` if the window was not fullscreen.
    ///
    /// The recorded size is deliberately left untouched: the native resize
    /// notification for the restored geometry updates it through
    /// [`resized`](Self::resized), which then reports the change.
    pub(crate) fn exit_fullscreen(&mut self) -> Option<(u32, u32)> {
        if !self.is_fullscreen() {
            return None;
        }
        self.flags.remove(WindowFlags::FULLSCREEN);
        Some(self.windowed_size.take().unwrap_or((self.width, self.height)))
    }

    /// Apply a native resize notification. Returns `true` if the size
    /// actually changed (XCB re-reports the current size on map).
    pub(crate) fn resized(&mut self, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_transitions_exactly_once() {
        let mut state = WindowState::new(800, 600);
        assert!(state.is_open());
        assert!(state.close());
        assert!(!state.is_open());
        // A second close event after the terminal state is swallowed.
        assert!(!state.close());
    }

    #[test]
    fn flags_are_independent() {
        let mut state = WindowState::new(800, 600);
        state.enter_fullscreen();
        state.set_cursor_locked(true);
        assert!(state.is_open() && state.is_fullscreen() && state.is_cursor_locked());

        state.close();
        assert!(state.is_fullscreen() && state.is_cursor_locked());
    }

    #[test]
    fn fullscreen_round_trip_restores_size() {
        let mut state = WindowState::new(1024, 768);
        assert!(state.enter_fullscreen());
        assert!(state.resized(2560, 1440));

        assert_eq!(state.exit_fullscreen(), Some((1024, 768)));
        // The native notification for the restored geometry lands after the
        // restore call; it must update the size and report the change.
        assert!(state.resized(1024, 768));
        assert_eq!((state.width, state.height), (1024, 768));
    }

    #[test]
    fn exit_fullscreen_keeps_restore_resize_observable() {
        let mut state = WindowState::new(1024, 768);
        state.enter_fullscreen();
        assert!(state.resized(2560, 1440));

        // Exiting hands back the snapshot but leaves the recorded size at
        // the fullscreen value, so the post-exit notification is not
        // mistaken for a duplicate and the resize callback still fires.
        assert_eq!(state.exit_fullscreen(), Some((1024, 768)));
        assert_eq!((state.width, state.height), (2560, 1440));
        assert!(state.resized(1024, 768));
    }

    #[test]
    fn fullscreen_transitions_are_idempotent() {
        let mut state = WindowState::new(1024, 768);
        assert!(state.exit_fullscreen().is_none());
        assert!(state.enter_fullscreen());
        assert!(!state.enter_fullscreen());
    }

    #[test]
    fn recenter_zeroes_subsequent_deltas() {
        let mut state = WindowState::new(800, 600);
        state.motion_sample(17, 23);
        state.set_cursor_locked(true);
        state.recenter();
        assert_eq!((state.mouse_x, state.mouse_y), (400, 300));

        // The first sample at the warp target produces no motion.
        assert_eq!(state.motion_sample(400, 300), (0, 0));
    }

    #[test]
    fn locked_motion_accumulates_deltas() {
        let mut state = WindowState::new(800, 600);
        state.set_cursor_locked(true);
        state.recenter();

        // Synthetic samples: deltas sum to (+13, -9) regardless of where
        // the backend warps the native cursor in between.
        let deltas = [(5, -3), (-2, 1), (10, -7)];
        let (mut x, mut y) = (400, 300);
        let (mut sum_dx, mut sum_dy) = (0, 0);
        for (dx, dy) in deltas {
            x += dx;
            y += dy;
            let got = state.motion_sample(x, y);
            assert_eq!(got, (dx, dy));
            sum_dx += dx;
            sum_dy += dy;
        }
        assert_eq!((state.mouse_x, state.mouse_y), (400 + sum_dx, 300 + sum_dy));

        // A recenter warp (as after LeaveNotify) resets the origin without
        // disturbing accumulation semantics.
        state.last_cursor_x = 400;
        state.last_cursor_y = 300;
        assert_eq!(state.motion_sample(401, 300), (1, 0));
    }

    #[test]
    fn warp_echo_detected_only_under_lock() {
        let mut state = WindowState::new(800, 600);
        // Unlocked, the center is an ordinary position.
        assert!(!state.is_warp_echo(400, 300));

        state.set_cursor_locked(true);
        assert!(state.is_warp_echo(400, 300));
        // Anything off-center is genuine motion even while locked.
        assert!(!state.is_warp_echo(401, 300));
        assert!(!state.is_warp_echo(400, 299));
    }

    #[test]
    fn resize_deduplicates_unchanged_size() {
        let mut state = WindowState::new(640, 480);
        assert!(!state.resized(640, 480));
        assert!(state.resized(641, 480));
        assert_eq!((state.width, state.height), (641, 480));
    }
}
