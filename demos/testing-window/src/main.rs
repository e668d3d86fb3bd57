//! Interactive exercise of the windowing surface: number keys cycle the
//! cursor shape, space locks the cursor, U unlocks it, and everything else
//! is logged as it happens.

use simple_window::{CursorIcon, EventHandler, KeyCode, MouseButton, Window};

#[derive(Default)]
struct Demo {
    /// Cursor shape picked this frame, applied after the poll returns.
    cursor_request: Option<CursorIcon>,
    /// `Some(true)` to lock, `Some(false)` to unlock.
    lock_request: Option<bool>,
}

impl EventHandler for Demo {
    fn on_key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::Num1 => self.cursor_request = Some(CursorIcon::Arrow),
            KeyCode::Num2 => self.cursor_request = Some(CursorIcon::Hand),
            KeyCode::Num3 => self.cursor_request = Some(CursorIcon::Text),
            KeyCode::Num4 => self.cursor_request = Some(CursorIcon::ResizeAll),
            KeyCode::Num5 => self.cursor_request = Some(CursorIcon::ResizeEw),
            KeyCode::Num6 => self.cursor_request = Some(CursorIcon::ResizeNs),
            KeyCode::Num7 => self.cursor_request = Some(CursorIcon::ResizeNesw),
            KeyCode::Num8 => self.cursor_request = Some(CursorIcon::ResizeNwse),
            KeyCode::Num9 => self.cursor_request = Some(CursorIcon::Loading),
            KeyCode::Space => self.lock_request = Some(true),
            KeyCode::U => self.lock_request = Some(false),
            other => log::debug!("key down: {other:?}"),
        }
    }

    fn on_mouse_button_down(&mut self, button: MouseButton, x: i32, y: i32) {
        if button == MouseButton::Left {
            log::info!("left click at {x}, {y}");
        }
    }

    fn on_mouse_scroll_v(&mut self, delta: i32) {
        log::info!("scroll: {delta}");
    }

    fn on_mouse_move_delta(&mut self, dx: i32, dy: i32) {
        log::trace!("mouse delta: {dx}, {dy}");
    }

    fn on_move(&mut self, x: i32, y: i32) {
        log::info!("window moved: {x}, {y}");
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        log::info!("window resized: {width}x{height}");
    }

    fn on_focus_in(&mut self) {
        log::info!("focus gained");
    }

    fn on_focus_out(&mut self) {
        log::info!("focus lost");
    }

    fn on_close(&mut self) {
        log::info!("close requested");
    }
}

fn main() -> Result<(), simple_window::WindowError> {
    env_logger::init();

    let mut window = Window::new("Testing window", 960, 540)?;
    let mut demo = Demo::default();

    while window.is_open() {
        window.poll_events(&mut demo);

        // Requests recorded by the handler are applied here, outside the
        // poll, because the window is mutably borrowed during dispatch.
        if let Some(icon) = demo.cursor_request.take() {
            window.set_cursor_image(icon);
        }
        match demo.lock_request.take() {
            Some(true) => window.lock_cursor(),
            Some(false) => window.unlock_cursor(),
            None => {}
        }
    }
    Ok(())
}
