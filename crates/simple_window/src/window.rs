//! The public window type, a thin facade over the compiled backend.

use raw_window_handle::{
    HasRawDisplayHandle, HasRawWindowHandle, RawDisplayHandle, RawWindowHandle,
};

use crate::error::WindowError;
use crate::event::EventHandler;
use crate::input::CursorIcon;
use crate::platform::PlatformWindow;

/// A native window with an event pump and cursor, geometry and clipboard
/// controls.
///
/// The backing platform object is heap-pinned: the Win32 window procedure
/// keeps a raw pointer to it, so it must not move even when the `Window`
/// value does.
pub struct Window {
    inner: Box<PlatformWindow>,
}

impl Window {
    /// Open a native window with the given title and client-area size.
    ///
    /// A width or height of `0` selects the primary display's full
    /// resolution for that axis.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Creation`] when the native window or the
    /// display connection cannot be created.
    pub fn new(name: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        Ok(Self {
            inner: PlatformWindow::create(name, width, height)?,
        })
    }

    /// Drain all pending native events, translating each into a callback on
    /// `handler`. Returns immediately when the queue is empty.
    pub fn poll_events<H: EventHandler>(&mut self, handler: &mut H) {
        self.inner.poll_events(handler);
    }

    /// `false` once the window has been asked to close.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Whether the window currently covers the whole display.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.inner.is_fullscreen()
    }

    /// Whether the cursor is locked to the client-area center.
    #[must_use]
    pub fn is_cursor_locked(&self) -> bool {
        self.inner.is_cursor_locked()
    }

    /// Current client-area width in pixels.
    #[must_use]
    pub fn get_width(&self) -> u32 {
        self.inner.width()
    }

    /// Current client-area height in pixels.
    #[must_use]
    pub fn get_height(&self) -> u32 {
        self.inner.height()
    }

    /// Cumulative logical cursor position. Under cursor lock this keeps
    /// integrating relative motion and may leave the client area.
    #[must_use]
    pub fn get_mouse_pos(&self) -> (i32, i32) {
        self.inner.mouse_pos()
    }

    /// Resize the client area. Ignored (with a log warning) while
    /// fullscreen.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.inner.set_size(width, height);
    }

    /// Enter or leave fullscreen. Leaving restores the client-area size the
    /// window had before entering. Redundant transitions are no-ops.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.inner.set_fullscreen(fullscreen);
    }

    /// Pin the cursor to the client-area center and reset the logical
    /// position to it. Relative motion keeps flowing while locked.
    pub fn lock_cursor(&mut self) {
        self.inner.lock_cursor();
    }

    /// Release a cursor lock.
    pub fn unlock_cursor(&mut self) {
        self.inner.unlock_cursor();
    }

    /// Make the cursor invisible over this window.
    pub fn hide_cursor(&mut self) {
        self.inner.hide_cursor();
    }

    /// Undo [`hide_cursor`](Self::hide_cursor).
    pub fn show_cursor(&mut self) {
        self.inner.show_cursor();
    }

    /// Switch the cursor to one of the system shapes.
    pub fn set_cursor_image(&mut self, icon: CursorIcon) {
        self.inner.set_cursor_image(icon);
    }

    /// Move the cursor to `(x, y)`, in screen coordinates when `screenspace`
    /// is set and client-area coordinates otherwise.
    pub fn set_cursor_pos(&mut self, x: i32, y: i32, screenspace: bool) {
        self.inner.set_cursor_pos(x, y, screenspace);
    }

    /// Read the system clipboard as text.
    ///
    /// # Errors
    ///
    /// [`WindowError::Unsupported`] on the XCB backend;
    /// [`WindowError::Platform`] when the native clipboard call fails.
    pub fn get_clipboard(&mut self) -> Result<String, WindowError> {
        self.inner.clipboard()
    }

    /// Replace the system clipboard with `text`.
    ///
    /// # Errors
    ///
    /// [`WindowError::Unsupported`] on the XCB backend;
    /// [`WindowError::Platform`] when the native clipboard call fails.
    pub fn set_clipboard(&mut self, text: &str) -> Result<(), WindowError> {
        self.inner.set_clipboard(text)
    }

    /// Current window title.
    ///
    /// # Errors
    ///
    /// [`WindowError::Platform`] when the title cannot be read back.
    pub fn get_name(&self) -> Result<String, WindowError> {
        self.inner.name()
    }

    /// Change the window title.
    ///
    /// # Errors
    ///
    /// [`WindowError::Platform`] when the native call fails.
    pub fn set_name(&mut self, name: &str) -> Result<(), WindowError> {
        self.inner.set_name(name)
    }
}

// The handles point at the heap-pinned platform object and stay valid for
// the lifetime of the Window.
unsafe impl HasRawWindowHandle for Window {
    fn raw_window_handle(&self) -> RawWindowHandle {
        self.inner.raw_window_handle()
    }
}

unsafe impl HasRawDisplayHandle for Window {
    fn raw_display_handle(&self) -> RawDisplayHandle {
        self.inner.raw_display_handle()
    }
}
