//! Native window creation and input handling with one canonical event model
//! across platforms.
//!
//! The build target selects exactly one backend: a Win32 message pump on
//! Windows, an XCB protocol client on X11 unixes. Both translate their
//! native event streams into the same fourteen event kinds, with platform
//! quirks (key auto-repeat, scroll encodings, focus notifications during
//! teardown) normalized away before the application sees them.
//!
//! Applications receive events by implementing [`EventHandler`]; every
//! callback has a default no-op body, so only the events you care about
//! cost you any code. [`Window::poll_events`] is non-blocking and meant to
//! be called once per frame.
//!
//! ```no_run
//! use simple_window::{EventHandler, KeyCode, Window, WindowError};
//!
//! struct App {
//!     running: bool,
//! }
//!
//! impl EventHandler for App {
//!     fn on_key_down(&mut self, key: KeyCode) {
//!         if key == KeyCode::Escape {
//!             self.running = false;
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), WindowError> {
//!     let mut window = Window::new("demo", 1280, 720)?;
//!     let mut app = App { running: true };
//!     while window.is_open() && app.running {
//!         window.poll_events(&mut app);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The window also exposes its native handles through the
//! [`raw_window_handle`] traits, so a GPU surface can be created directly
//! on top of it.

mod codes;
mod error;
mod event;
mod input;
mod platform;
mod state;
mod window;

pub use error::WindowError;
pub use event::{Event, EventHandler};
pub use input::{CursorIcon, KeyCode, MouseButton};
pub use window::Window;

pub use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};

/// Commonly used types, for a single glob import.
pub mod prelude {
    pub use crate::{
        CursorIcon, Event, EventHandler, KeyCode, MouseButton, Window, WindowError,
    };
}
