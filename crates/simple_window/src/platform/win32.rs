//! Win32 backend: a registered window class, a message-pump drain and a
//! window procedure that translates messages into canonical events.
//!
//! The window procedure runs re-entrantly inside `DispatchMessageW`, so it
//! never touches the application handler directly. It pushes translated
//! events into `pending`, and `poll_events` dispatches the batch after the
//! drain loop finishes.

use std::iter::once;
use std::mem;
use std::ptr;
use std::sync::Once;

use raw_window_handle::{
    RawDisplayHandle, RawWindowHandle, Win32WindowHandle, WindowsDisplayHandle,
};
use winapi::shared::basetsd::LONG_PTR;
use winapi::shared::minwindef::{HIWORD, LOWORD, LPARAM, LRESULT, UINT, WPARAM};
use winapi::shared::windef::{HWND, POINT, RECT};
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::libloaderapi::GetModuleHandleW;
use winapi::um::winbase::{GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock, GMEM_MOVEABLE};
use winapi::um::winuser::{
    AdjustWindowRectEx, ClientToScreen, ClipCursor, CloseClipboard, CreateWindowExW,
    DefWindowProcW, DestroyWindow, DispatchMessageW, EmptyClipboard, GetClientRect,
    GetClipboardData, GetMonitorInfoW, GetSystemMetrics, GetWindowLongPtrW, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, LoadCursorW, MonitorFromWindow, OpenClipboard,
    PeekMessageW, RegisterClassExW, SetClipboardData, SetCursor, SetCursorPos,
    SetWindowLongPtrW, SetWindowPos, SetWindowTextW, ShowCursor, ShowWindow, TranslateMessage,
    CF_UNICODETEXT, CS_HREDRAW, CS_VREDRAW, GWLP_USERDATA, GWL_STYLE, MAKEINTRESOURCEW,
    MONITORINFO, MONITOR_DEFAULTTONEAREST, MSG, PM_REMOVE, SM_CXSCREEN, SM_CYSCREEN,
    SWP_FRAMECHANGED, SWP_NOMOVE, SWP_NOZORDER, SW_SHOW, WHEEL_DELTA, WM_CHAR, WM_CLOSE,
    WM_KEYDOWN, WM_KEYUP, WM_KILLFOCUS, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN,
    WM_MBUTTONUP, WM_MOUSEHWHEEL, WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_MOVE, WM_RBUTTONDOWN,
    WM_RBUTTONUP, WM_SETFOCUS, WM_SIZE, WM_SYSKEYDOWN, WM_SYSKEYUP, WM_XBUTTONDOWN,
    WM_XBUTTONUP, WNDCLASSEXW, WS_OVERLAPPEDWINDOW, WS_POPUP, WS_VISIBLE, XBUTTON1,
};

use crate::codes::win32::{cursor_ordinal, virtual_key_to_key};
use crate::error::WindowError;
use crate::event::{dispatch, Event, EventHandler};
use crate::input::{CursorIcon, MouseButton};
use crate::state::WindowState;

const CLASS_NAME: &str = "simple_window_class";

/// Native auto-repeat flag in the keystroke lparam (bit 30: the key was
/// already down before this message).
const PREVIOUS_KEY_STATE: LPARAM = 0x4000_0000;

static REGISTER_CLASS: Once = Once::new();

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(once(0)).collect()
}

fn x_lparam(lparam: LPARAM) -> i32 {
    i32::from(LOWORD(lparam as u32) as i16)
}

fn y_lparam(lparam: LPARAM) -> i32 {
    i32::from(HIWORD(lparam as u32) as i16)
}

fn last_error_string() -> String {
    let code = unsafe { GetLastError() };
    #[cfg(debug_assertions)]
    {
        use winapi::um::winbase::{
            FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
        };
        let mut buf = [0u16; 512];
        let len = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
                ptr::null(),
                code,
                0,
                buf.as_mut_ptr(),
                buf.len() as u32,
                ptr::null_mut(),
            )
        };
        if len > 0 {
            let text = String::from_utf16_lossy(&buf[..len as usize]);
            return format!("{} (code {code})", text.trim_end());
        }
    }
    format!("error code {code}")
}

/// One native window plus the state and event buffer its window procedure
/// works against.
///
/// The instance lives in a `Box` whose address is stored behind
/// `GWLP_USERDATA`; it must never move while the window exists.
pub(crate) struct PlatformWindow {
    hwnd: HWND,
    state: WindowState,
    pending: Vec<Event>,
    /// Outer window rectangle before entering fullscreen.
    saved_rect: RECT,
}

impl PlatformWindow {
    pub(crate) fn create(name: &str, width: u32, height: u32) -> Result<Box<Self>, WindowError> {
        let hinstance = unsafe { GetModuleHandleW(ptr::null()) };
        let class_name = wide(CLASS_NAME);

        REGISTER_CLASS.call_once(|| {
            let class = WNDCLASSEXW {
                cbSize: mem::size_of::<WNDCLASSEXW>() as UINT,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(wndproc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: hinstance,
                hIcon: ptr::null_mut(),
                hCursor: unsafe { LoadCursorW(ptr::null_mut(), MAKEINTRESOURCEW(32512)) },
                hbrBackground: ptr::null_mut(),
                lpszMenuName: ptr::null(),
                lpszClassName: class_name.as_ptr(),
                hIconSm: ptr::null_mut(),
            };
            // Failure surfaces as a null window handle below.
            unsafe { RegisterClassExW(&class) };
        });

        // Size 0 selects the primary display resolution.
        let width = if width == 0 {
            unsafe { GetSystemMetrics(SM_CXSCREEN) as u32 }
        } else {
            width
        };
        let height = if height == 0 {
            unsafe { GetSystemMetrics(SM_CYSCREEN) as u32 }
        } else {
            height
        };

        // The requested size is the client area; grow the outer rectangle
        // by the frame.
        let style = WS_OVERLAPPEDWINDOW;
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        unsafe { AdjustWindowRectEx(&mut rect, style, 0, 0) };

        let title = wide(name);
        let hwnd = unsafe {
            CreateWindowExW(
                0,
                class_name.as_ptr(),
                title.as_ptr(),
                style,
                100,
                100,
                rect.right - rect.left,
                rect.bottom - rect.top,
                ptr::null_mut(),
                ptr::null_mut(),
                hinstance,
                ptr::null_mut(),
            )
        };
        if hwnd.is_null() {
            return Err(WindowError::Creation(last_error_string()));
        }

        let mut window = Box::new(Self {
            hwnd,
            state: WindowState::new(width, height),
            pending: Vec::new(),
            saved_rect: RECT {
                left: 0,
                top: 0,
                right: 0,
                bottom: 0,
            },
        });

        // Messages arriving before this point fall through to
        // DefWindowProcW via the null check in wndproc.
        unsafe {
            SetWindowLongPtrW(
                hwnd,
                GWLP_USERDATA,
                ptr::addr_of_mut!(*window) as LONG_PTR,
            );
            ShowWindow(hwnd, SW_SHOW);
        }

        log::info!("created win32 window {name:?} ({width}x{height})");
        Ok(window)
    }

    pub(crate) fn poll_events<H: EventHandler>(&mut self, handler: &mut H) {
        let mut msg: MSG = unsafe { mem::zeroed() };
        // Drain everything queued for this window; each dispatch re-enters
        // wndproc, which appends to self.pending.
        while unsafe { PeekMessageW(&mut msg, self.hwnd, 0, 0, PM_REMOVE) } != 0 {
            unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        for event in mem::take(&mut self.pending) {
            dispatch(handler, event);
        }
    }

    /// Translate one message. `Some(result)` consumes it, `None` falls
    /// through to `DefWindowProcW`.
    fn handle_message(&mut self, msg: UINT, wparam: WPARAM, lparam: LPARAM) -> Option<LRESULT> {
        match msg {
            WM_CLOSE => {
                if self.state.close() {
                    self.pending.push(Event::Close);
                }
                Some(0)
            }
            WM_KEYDOWN | WM_SYSKEYDOWN => {
                if lparam & PREVIOUS_KEY_STATE == 0 {
                    self.pending
                        .push(Event::KeyDown(virtual_key_to_key(wparam as u32, lparam)));
                }
                Some(0)
            }
            WM_KEYUP | WM_SYSKEYUP => {
                self.pending
                    .push(Event::KeyUp(virtual_key_to_key(wparam as u32, lparam)));
                Some(0)
            }
            WM_CHAR => {
                if (1..0x1_0000).contains(&wparam) {
                    if let Some(ch) = char::from_u32(wparam as u32) {
                        self.pending.push(Event::Char(ch));
                    }
                }
                Some(0)
            }
            WM_LBUTTONDOWN => self.button(MouseButton::Left, lparam, true),
            WM_LBUTTONUP => self.button(MouseButton::Left, lparam, false),
            WM_RBUTTONDOWN => self.button(MouseButton::Right, lparam, true),
            WM_RBUTTONUP => self.button(MouseButton::Right, lparam, false),
            WM_MBUTTONDOWN => self.button(MouseButton::Middle, lparam, true),
            WM_MBUTTONUP => self.button(MouseButton::Middle, lparam, false),
            WM_XBUTTONDOWN | WM_XBUTTONUP => {
                let button = if HIWORD(wparam as u32) == XBUTTON1 {
                    MouseButton::X1
                } else {
                    MouseButton::X2
                };
                self.button(button, lparam, msg == WM_XBUTTONDOWN)
            }
            WM_MOUSEWHEEL => {
                let notches = i32::from(HIWORD(wparam as u32) as i16) / i32::from(WHEEL_DELTA);
                self.pending.push(Event::MouseScrollV(notches));
                Some(0)
            }
            WM_MOUSEHWHEEL => {
                let notches = i32::from(HIWORD(wparam as u32) as i16) / i32::from(WHEEL_DELTA);
                self.pending.push(Event::MouseScrollH(notches));
                Some(0)
            }
            WM_MOUSEMOVE => {
                let (x, y) = (x_lparam(lparam), y_lparam(lparam));
                // The recenter warp below echoes back as one more
                // WM_MOUSEMOVE at the center; swallow it instead of
                // emitting a zero-delta pair.
                if self.state.is_warp_echo(x, y) {
                    self.state.last_cursor_x = x;
                    self.state.last_cursor_y = y;
                    return Some(0);
                }
                let (dx, dy) = self.state.motion_sample(x, y);
                self.pending.push(Event::MouseMovePos {
                    x: self.state.mouse_x,
                    y: self.state.mouse_y,
                });
                self.pending.push(Event::MouseMoveDelta { dx, dy });
                if self.state.is_cursor_locked() {
                    // Pin the native cursor to the center; the logical
                    // position already absorbed the delta.
                    let (cx, cy) = self.state.center();
                    self.warp_cursor(cx, cy);
                    self.state.last_cursor_x = cx;
                    self.state.last_cursor_y = cy;
                }
                Some(0)
            }
            WM_SIZE => {
                let width = u32::from(LOWORD(lparam as u32));
                let height = u32::from(HIWORD(lparam as u32));
                if self.state.resized(width, height) {
                    self.pending.push(Event::Resize { width, height });
                }
                Some(0)
            }
            WM_MOVE => {
                self.pending.push(Event::Move {
                    x: x_lparam(lparam),
                    y: y_lparam(lparam),
                });
                Some(0)
            }
            WM_SETFOCUS => {
                self.pending.push(Event::FocusIn);
                Some(0)
            }
            WM_KILLFOCUS => {
                // Focus is also pulled during teardown; never after close.
                if self.state.is_open() {
                    self.pending.push(Event::FocusOut);
                }
                Some(0)
            }
            _ => None,
        }
    }

    fn button(&mut self, button: MouseButton, lparam: LPARAM, down: bool) -> Option<LRESULT> {
        let (x, y) = (x_lparam(lparam), y_lparam(lparam));
        self.pending.push(if down {
            Event::MouseButtonDown { button, x, y }
        } else {
            Event::MouseButtonUp { button, x, y }
        });
        Some(0)
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
        let style = unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) } as u32;
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        unsafe {
            AdjustWindowRectEx(&mut rect, style, 0, 0);
            // WM_SIZE updates the recorded size and fires the event.
            SetWindowPos(
                self.hwnd,
                ptr::null_mut(),
                0,
                0,
                rect.right - rect.left,
                rect.bottom - rect.top,
                SWP_NOMOVE | SWP_NOZORDER,
            );
        }
    }

    pub(crate) fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen {
            if !self.state.enter_fullscreen() {
                return;
            }
            let mut info: MONITORINFO = unsafe { mem::zeroed() };
            info.cbSize = mem::size_of::<MONITORINFO>() as u32;
            unsafe {
                GetWindowRect(self.hwnd, &mut self.saved_rect);
                GetMonitorInfoW(
                    MonitorFromWindow(self.hwnd, MONITOR_DEFAULTTONEAREST),
                    &mut info,
                );
                SetWindowLongPtrW(self.hwnd, GWL_STYLE, (WS_POPUP | WS_VISIBLE) as LONG_PTR);
                SetWindowPos(
                    self.hwnd,
                    ptr::null_mut(),
                    info.rcMonitor.left,
                    info.rcMonitor.top,
                    info.rcMonitor.right - info.rcMonitor.left,
                    info.rcMonitor.bottom - info.rcMonitor.top,
                    SWP_NOZORDER | SWP_FRAMECHANGED,
                );
            }
        } else if self.state.exit_fullscreen().is_some() {
            let rect = self.saved_rect;
            unsafe {
                SetWindowLongPtrW(
                    self.hwnd,
                    GWL_STYLE,
                    (WS_OVERLAPPEDWINDOW | WS_VISIBLE) as LONG_PTR,
                );
                SetWindowPos(
                    self.hwnd,
                    ptr::null_mut(),
                    rect.left,
                    rect.top,
                    rect.right - rect.left,
                    rect.bottom - rect.top,
                    SWP_NOZORDER | SWP_FRAMECHANGED,
                );
            }
        }
    }

    pub(crate) fn lock_cursor(&mut self) {
        self.state.set_cursor_locked(true);
        self.state.recenter();

        // Confine the native cursor to the client area in screen space.
        let mut client = RECT {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        };
        unsafe { GetClientRect(self.hwnd, &mut client) };
        let mut top_left = POINT {
            x: client.left,
            y: client.top,
        };
        let mut bottom_right = POINT {
            x: client.right,
            y: client.bottom,
        };
        unsafe {
            ClientToScreen(self.hwnd, &mut top_left);
            ClientToScreen(self.hwnd, &mut bottom_right);
        }
        let clip = RECT {
            left: top_left.x,
            top: top_left.y,
            right: bottom_right.x,
            bottom: bottom_right.y,
        };
        unsafe { ClipCursor(&clip) };

        let (cx, cy) = self.state.center();
        self.warp_cursor(cx, cy);
    }

    pub(crate) fn unlock_cursor(&mut self) {
        self.state.set_cursor_locked(false);
        unsafe { ClipCursor(ptr::null()) };
    }

    pub(crate) fn hide_cursor(&mut self) {
        unsafe { ShowCursor(0) };
    }

    pub(crate) fn show_cursor(&mut self) {
        unsafe { ShowCursor(1) };
    }

    pub(crate) fn set_cursor_image(&mut self, icon: CursorIcon) {
        unsafe {
            SetCursor(LoadCursorW(
                ptr::null_mut(),
                MAKEINTRESOURCEW(cursor_ordinal(icon)),
            ));
        }
    }

    pub(crate) fn set_cursor_pos(&mut self, x: i32, y: i32, screenspace: bool) {
        if screenspace {
            unsafe { SetCursorPos(x, y) };
        } else {
            self.warp_cursor(x, y);
        }
    }

    fn warp_cursor(&self, x: i32, y: i32) {
        let mut point = POINT { x, y };
        unsafe {
            ClientToScreen(self.hwnd, &mut point);
            SetCursorPos(point.x, point.y);
        }
    }

    pub(crate) fn clipboard(&mut self) -> Result<String, WindowError> {
        unsafe {
            if OpenClipboard(self.hwnd) == 0 {
                return Err(WindowError::Platform(last_error_string()));
            }
            let handle = GetClipboardData(CF_UNICODETEXT);
            if handle.is_null() {
                CloseClipboard();
                return Err(WindowError::Platform(last_error_string()));
            }
            let data = GlobalLock(handle.cast()).cast::<u16>();
            if data.is_null() {
                CloseClipboard();
                return Err(WindowError::Platform(last_error_string()));
            }
            let mut len = 0;
            while *data.add(len) != 0 {
                len += 1;
            }
            let text = String::from_utf16_lossy(std::slice::from_raw_parts(data, len));
            GlobalUnlock(handle.cast());
            CloseClipboard();
            Ok(text)
        }
    }

    pub(crate) fn set_clipboard(&mut self, text: &str) -> Result<(), WindowError> {
        let utf16 = wide(text);
        unsafe {
            if OpenClipboard(self.hwnd) == 0 {
                return Err(WindowError::Platform(last_error_string()));
            }
            EmptyClipboard();
            let bytes = utf16.len() * mem::size_of::<u16>();
            let handle = GlobalAlloc(GMEM_MOVEABLE, bytes);
            if handle.is_null() {
                CloseClipboard();
                return Err(WindowError::Platform(last_error_string()));
            }
            let dst = GlobalLock(handle).cast::<u16>();
            if dst.is_null() {
                let err = last_error_string();
                GlobalFree(handle);
                CloseClipboard();
                return Err(WindowError::Platform(err));
            }
            ptr::copy_nonoverlapping(utf16.as_ptr(), dst, utf16.len());
            GlobalUnlock(handle);
            // Ownership passes to the clipboard only on success; until then
            // the allocation is still ours to free.
            if SetClipboardData(CF_UNICODETEXT, handle.cast()).is_null() {
                let err = last_error_string();
                GlobalFree(handle);
                CloseClipboard();
                return Err(WindowError::Platform(err));
            }
            CloseClipboard();
            Ok(())
        }
    }

    pub(crate) fn name(&self) -> Result<String, WindowError> {
        unsafe {
            let len = GetWindowTextLengthW(self.hwnd);
            if len == 0 {
                return Ok(String::new());
            }
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(self.hwnd, buf.as_mut_ptr(), buf.len() as i32);
            if copied == 0 {
                return Err(WindowError::Platform(last_error_string()));
            }
            Ok(String::from_utf16_lossy(&buf[..copied as usize]))
        }
    }

    pub(crate) fn set_name(&mut self, name: &str) -> Result<(), WindowError> {
        let title = wide(name);
        if unsafe { SetWindowTextW(self.hwnd, title.as_ptr()) } == 0 {
            return Err(WindowError::Platform(last_error_string()));
        }
        Ok(())
    }

    pub(crate) fn raw_window_handle(&self) -> RawWindowHandle {
        let mut handle = Win32WindowHandle::empty();
        handle.hwnd = self.hwnd.cast();
        handle.hinstance = unsafe { GetModuleHandleW(ptr::null()) }.cast();
        RawWindowHandle::Win32(handle)
    }

    pub(crate) fn raw_display_handle(&self) -> RawDisplayHandle {
        RawDisplayHandle::Windows(WindowsDisplayHandle::empty())
    }
}

impl Drop for PlatformWindow {
    fn drop(&mut self) {
        unsafe {
            // Detach first so late messages stop reaching this instance.
            SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
            DestroyWindow(self.hwnd);
        }
    }
}

/// Trampoline from the Win32 callback ABI into the owning instance.
unsafe extern "system" fn wndproc(
    hwnd: HWND,
    msg: UINT,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut PlatformWindow;
    if ptr.is_null() {
        // Messages before the instance pointer is attached or after detach.
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }
    match (*ptr).handle_message(msg, wparam, lparam) {
        Some(result) => result,
        None => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
