//! XCB backend: an X server connection, one top-level window and a
//! non-blocking event drain.
//!
//! Key auto-repeat suppression needs one event of lookahead and one of
//! lookbehind, so the drain runs a prev/curr/next window over the stream
//! (see [`repeat`]). Events dispatch to the handler directly; nothing here
//! re-enters the way a Win32 window procedure does.

mod repeat;

use raw_window_handle::{
    RawDisplayHandle, RawWindowHandle, XcbDisplayHandle, XcbWindowHandle,
};
use x11rb::connection::Connection;
use x11rb::errors::{ConnectionError, ReplyError, ReplyOrIdError};
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ChangeWindowAttributesAux, ConfigureWindowAux, ConnectionExt,
    CreateWindowAux, EventMask, PropMode, Screen, WindowClass,
};
use x11rb::protocol::Event as XEvent;
// change_property8/32 live on the wrapper trait, not the protocol one.
use x11rb::wrapper::ConnectionExt as _;
use x11rb::xcb_ffi::XCBConnection;

use crate::codes::xcb::{button_to_mouse, cursor_theme_name, keycode_to_key};
use crate::error::WindowError;
use crate::event::{dispatch, Event, EventHandler};
use crate::input::CursorIcon;
use crate::state::WindowState;

impl From<ConnectionError> for WindowError {
    fn from(err: ConnectionError) -> Self {
        Self::Platform(err.to_string())
    }
}

impl From<ReplyError> for WindowError {
    fn from(err: ReplyError) -> Self {
        Self::Platform(err.to_string())
    }
}

impl From<ReplyOrIdError> for WindowError {
    fn from(err: ReplyOrIdError) -> Self {
        Self::Platform(err.to_string())
    }
}

/// One X window plus the connection and atoms its protocol traffic needs.
pub(crate) struct PlatformWindow {
    conn: XCBConnection,
    screen_num: usize,
    screen: Screen,
    window: u32,
    wm_delete_window: Atom,
    net_wm_state: Atom,
    state: WindowState,
    /// Last reported top-level position, for move detection.
    pos: (i16, i16),
}

impl PlatformWindow {
    pub(crate) fn create(name: &str, width: u32, height: u32) -> Result<Box<Self>, WindowError> {
        // Any protocol failure during setup means there is no usable window.
        Self::create_impl(name, width, height).map_err(|err| match err {
            WindowError::Platform(msg) => WindowError::Creation(msg),
            other => other,
        })
    }

    fn create_impl(name: &str, width: u32, height: u32) -> Result<Box<Self>, WindowError> {
        let (conn, screen_num) = XCBConnection::connect(None)
            .map_err(|err| WindowError::Creation(format!("x server connection failed: {err}")))?;
        let screen = conn.setup().roots[screen_num].clone();

        // Size 0 selects the full display resolution.
        let width = if width == 0 {
            u32::from(screen.width_in_pixels)
        } else {
            width
        };
        let height = if height == 0 {
            u32::from(screen.height_in_pixels)
        } else {
            height
        };

        let window = conn.generate_id()?;
        let aux = CreateWindowAux::new()
            .background_pixel(screen.white_pixel)
            .event_mask(
                EventMask::EXPOSURE
                    | EventMask::STRUCTURE_NOTIFY
                    | EventMask::ENTER_WINDOW
                    | EventMask::LEAVE_WINDOW
                    | EventMask::KEY_PRESS
                    | EventMask::KEY_RELEASE
                    | EventMask::BUTTON_PRESS
                    | EventMask::BUTTON_RELEASE
                    | EventMask::POINTER_MOTION
                    | EventMask::FOCUS_CHANGE,
            );
        conn.create_window(
            x11rb::COPY_FROM_PARENT as u8,
            window,
            screen.root,
            10,
            10,
            width as u16,
            height as u16,
            1,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &aux,
        )?;

        let wm_protocols = Self::intern(&conn, b"WM_PROTOCOLS")?;
        let wm_delete_window = Self::intern(&conn, b"WM_DELETE_WINDOW")?;
        let net_wm_state = Self::intern(&conn, b"_NET_WM_STATE")?;

        // Opt in to the window manager's close handshake.
        conn.change_property32(
            PropMode::REPLACE,
            window,
            wm_protocols,
            AtomEnum::ATOM,
            &[wm_delete_window],
        )?;
        conn.change_property8(
            PropMode::REPLACE,
            window,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            name.as_bytes(),
        )?;

        conn.map_window(window)?;
        conn.flush()?;

        log::info!("created xcb window {name:?} ({width}x{height})");
        Ok(Box::new(Self {
            conn,
            screen_num,
            screen,
            window,
            wm_delete_window,
            net_wm_state,
            state: WindowState::new(width, height),
            pos: (10, 10),
        }))
    }

    fn intern(conn: &XCBConnection, name: &[u8]) -> Result<Atom, WindowError> {
        Ok(conn.intern_atom(false, name)?.reply()?.atom)
    }

    pub(crate) fn poll_events<H: EventHandler>(&mut self, handler: &mut H) {
        let Some(mut curr) = self.poll_one(handler) else {
            return;
        };
        let mut prev: Option<XEvent> = None;
        loop {
            let next = self.poll_one(handler);
            self.process_event(prev.as_ref(), &curr, next.as_ref(), handler);
            match next {
                Some(event) => {
                    prev = Some(curr);
                    curr = event;
                }
                None => break,
            }
        }
    }

    fn poll_one<H: EventHandler>(&mut self, handler: &mut H) -> Option<XEvent> {
        match self.conn.poll_for_event() {
            Ok(event) => event,
            Err(err) => {
                // A broken connection never recovers; treat it as a close.
                log::error!("x connection lost: {err}");
                if self.state.close() {
                    dispatch(handler, Event::Close);
                }
                None
            }
        }
    }

    fn process_event<H: EventHandler>(
        &mut self,
        prev: Option<&XEvent>,
        curr: &XEvent,
        next: Option<&XEvent>,
        handler: &mut H,
    ) {
        match curr {
            XEvent::ClientMessage(msg) => {
                if msg.format == 32
                    && msg.data.as_data32()[0] == self.wm_delete_window
                    && self.state.close()
                {
                    dispatch(handler, Event::Close);
                }
            }
            XEvent::ConfigureNotify(cfg) => {
                if self.state.resized(u32::from(cfg.width), u32::from(cfg.height)) {
                    dispatch(
                        handler,
                        Event::Resize {
                            width: self.state.width,
                            height: self.state.height,
                        },
                    );
                }
                if (cfg.x, cfg.y) != self.pos {
                    self.pos = (cfg.x, cfg.y);
                    dispatch(
                        handler,
                        Event::Move {
                            x: i32::from(cfg.x),
                            y: i32::from(cfg.y),
                        },
                    );
                }
            }
            XEvent::FocusIn(_) => dispatch(handler, Event::FocusIn),
            XEvent::FocusOut(_) => {
                // Focus is also pulled during teardown; never after close.
                if self.state.is_open() {
                    dispatch(handler, Event::FocusOut);
                }
            }
            XEvent::KeyPress(key) => {
                if !repeat::press_is_repeat(key, prev) {
                    dispatch(handler, Event::KeyDown(keycode_to_key(key.detail)));
                }
            }
            XEvent::KeyRelease(key) => {
                if !repeat::release_is_repeat(key, next) {
                    dispatch(handler, Event::KeyUp(keycode_to_key(key.detail)));
                }
            }
            XEvent::ButtonPress(button) => match button.detail {
                4 => dispatch(handler, Event::MouseScrollV(1)),
                5 => dispatch(handler, Event::MouseScrollV(-1)),
                6 => dispatch(handler, Event::MouseScrollH(1)),
                7 => dispatch(handler, Event::MouseScrollH(-1)),
                detail => dispatch(
                    handler,
                    Event::MouseButtonDown {
                        button: button_to_mouse(detail),
                        x: i32::from(button.event_x),
                        y: i32::from(button.event_y),
                    },
                ),
            },
            XEvent::ButtonRelease(button) => {
                // Scroll notches already fired on the press half.
                if !(4..=7).contains(&button.detail) {
                    dispatch(
                        handler,
                        Event::MouseButtonUp {
                            button: button_to_mouse(button.detail),
                            x: i32::from(button.event_x),
                            y: i32::from(button.event_y),
                        },
                    );
                }
            }
            XEvent::LeaveNotify(_) => {
                // Locked cursor escaped the window: warp back without
                // emitting the jump as motion.
                if self.state.is_cursor_locked() {
                    let (cx, cy) = self.state.center();
                    self.state.last_cursor_x = cx;
                    self.state.last_cursor_y = cy;
                    self.warp_pointer_to(cx, cy);
                }
            }
            XEvent::MotionNotify(motion) => {
                let (dx, dy) = self
                    .state
                    .motion_sample(i32::from(motion.event_x), i32::from(motion.event_y));
                dispatch(
                    handler,
                    Event::MouseMovePos {
                        x: self.state.mouse_x,
                        y: self.state.mouse_y,
                    },
                );
                dispatch(handler, Event::MouseMoveDelta { dx, dy });
            }
            _ => {}
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.state.is_fullscreen()
    }

    pub(crate) fn is_cursor_locked(&self) -> bool {
        self.state.is_cursor_locked()
    }

    pub(crate) fn width(&self) -> u32 {
        self.state.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.state.height
    }

    pub(crate) fn mouse_pos(&self) -> (i32, i32) {
        (self.state.mouse_x, self.state.mouse_y)
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        if self.state.is_fullscreen() {
            log::warn!("ignoring set_size while fullscreen");
            return;
        }
        if let Err(err) = self.remap_with_size(width, height) {
            log::warn!("resize to {width}x{height} failed: {err}");
        }
    }

    /// Unmap, reconfigure and remap; the window manager applies the new
    /// geometry on the map.
    fn remap_with_size(&mut self, width: u32, height: u32) -> Result<(), WindowError> {
        self.conn.unmap_window(self.window)?;
        self.conn.configure_window(
            self.window,
            &ConfigureWindowAux::new().width(width).height(height),
        )?;
        self.conn.map_window(self.window)?;
        self.conn.flush()?;
        Ok(())
    }

    pub(crate) fn set_fullscreen(&mut self, fullscreen: bool) {
        let result = if fullscreen {
            if !self.state.enter_fullscreen() {
                return;
            }
            self.enter_fullscreen_impl()
        } else {
            match self.state.exit_fullscreen() {
                Some((width, height)) => self.exit_fullscreen_impl(width, height),
                None => return,
            }
        };
        if let Err(err) = result {
            log::warn!("fullscreen transition failed: {err}");
        }
    }

    fn enter_fullscreen_impl(&mut self) -> Result<(), WindowError> {
        let fullscreen_atom = Self::intern(&self.conn, b"_NET_WM_STATE_FULLSCREEN")?;
        self.conn.unmap_window(self.window)?;
        self.conn.change_property32(
            PropMode::REPLACE,
            self.window,
            self.net_wm_state,
            AtomEnum::ATOM,
            &[fullscreen_atom],
        )?;
        let width = u32::from(self.screen.width_in_pixels);
        let height = u32::from(self.screen.height_in_pixels);
        self.remap_with_size(width, height)
    }

    fn exit_fullscreen_impl(&mut self, width: u32, height: u32) -> Result<(), WindowError> {
        self.conn.unmap_window(self.window)?;
        self.conn.delete_property(self.window, self.net_wm_state)?;
        self.remap_with_size(width, height)
    }

    pub(crate) fn lock_cursor(&mut self) {
        self.state.set_cursor_locked(true);
        self.state.recenter();
        let (cx, cy) = self.state.center();
        self.warp_pointer_to(cx, cy);
    }

    pub(crate) fn unlock_cursor(&mut self) {
        self.state.set_cursor_locked(false);
    }

    pub(crate) fn hide_cursor(&mut self) {
        if let Err(err) = self.hide_cursor_impl() {
            log::warn!("hiding cursor failed: {err}");
        }
    }

    /// X has no hidden-cursor request; install a blank 1x1 cursor instead.
    fn hide_cursor_impl(&mut self) -> Result<(), WindowError> {
        let pixmap = self.conn.generate_id()?;
        let cursor = self.conn.generate_id()?;
        self.conn.create_pixmap(1, pixmap, self.window, 1, 1)?;
        self.conn
            .create_cursor(cursor, pixmap, pixmap, 0, 0, 0, 0, 0, 0, 0, 0)?;
        self.conn.change_window_attributes(
            self.window,
            &ChangeWindowAttributesAux::new().cursor(cursor),
        )?;
        self.conn.free_cursor(cursor)?;
        self.conn.free_pixmap(pixmap)?;
        self.conn.flush()?;
        Ok(())
    }

    pub(crate) fn show_cursor(&mut self) {
        self.set_cursor_image(CursorIcon::Arrow);
    }

    pub(crate) fn set_cursor_image(&mut self, icon: CursorIcon) {
        if let Err(err) = self.set_cursor_image_impl(icon) {
            log::warn!("loading cursor {icon:?} failed: {err}");
        }
    }

    fn set_cursor_image_impl(&mut self, icon: CursorIcon) -> Result<(), WindowError> {
        let database = x11rb::resource_manager::new_from_default(&self.conn)?;
        let handle = x11rb::cursor::Handle::new(&self.conn, self.screen_num, &database)?.reply()?;
        let cursor = handle.load_cursor(&self.conn, cursor_theme_name(icon))?;
        self.conn.change_window_attributes(
            self.window,
            &ChangeWindowAttributesAux::new().cursor(cursor),
        )?;
        self.conn.flush()?;
        Ok(())
    }

    pub(crate) fn set_cursor_pos(&mut self, x: i32, y: i32, screenspace: bool) {
        // Screen space targets the root window, client space this window.
        let dst = if screenspace {
            self.screen.root
        } else {
            self.window
        };
        self.warp_pointer_into(dst, x, y);
    }

    /// Warp the pointer to client coordinates `(x, y)`.
    fn warp_pointer_to(&self, x: i32, y: i32) {
        self.warp_pointer_into(self.window, x, y);
    }

    fn warp_pointer_into(&self, dst: u32, x: i32, y: i32) {
        let warped = self
            .conn
            .warp_pointer(
                x11rb::NONE,
                dst,
                0,
                0,
                self.screen.width_in_pixels,
                self.screen.height_in_pixels,
                x as i16,
                y as i16,
            )
            .and_then(|_| self.conn.flush());
        if let Err(err) = warped {
            log::warn!("pointer warp failed: {err}");
        }
    }

    pub(crate) fn clipboard(&mut self) -> Result<String, WindowError> {
        // X selection transfer needs an ICCCM ownership exchange this
        // backend does not implement.
        Err(WindowError::Unsupported("clipboard"))
    }

    pub(crate) fn set_clipboard(&mut self, _text: &str) -> Result<(), WindowError> {
        Err(WindowError::Unsupported("clipboard"))
    }

    pub(crate) fn name(&self) -> Result<String, WindowError> {
        let reply = self
            .conn
            .get_property(
                false,
                self.window,
                AtomEnum::WM_NAME,
                AtomEnum::STRING,
                0,
                1024,
            )?
            .reply()?;
        Ok(String::from_utf8_lossy(&reply.value).into_owned())
    }

    pub(crate) fn set_name(&mut self, name: &str) -> Result<(), WindowError> {
        self.conn.change_property8(
            PropMode::REPLACE,
            self.window,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            name.as_bytes(),
        )?;
        self.conn.flush()?;
        Ok(())
    }

    pub(crate) fn raw_window_handle(&self) -> RawWindowHandle {
        let mut handle = XcbWindowHandle::empty();
        handle.window = self.window;
        handle.visual_id = self.screen.root_visual;
        RawWindowHandle::Xcb(handle)
    }

    pub(crate) fn raw_display_handle(&self) -> RawDisplayHandle {
        let mut handle = XcbDisplayHandle::empty();
        handle.connection = self.conn.get_raw_xcb_connection();
        handle.screen = self.screen_num as i32;
        RawDisplayHandle::Xcb(handle)
    }
}

impl Drop for PlatformWindow {
    fn drop(&mut self) {
        let _ = self.conn.destroy_window(self.window);
        let _ = self.conn.flush();
    }
}
