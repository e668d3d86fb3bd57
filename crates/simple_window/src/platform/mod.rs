//! Backend selection. Exactly one platform implementation is compiled in,
//! chosen by the build target; both expose the same `PlatformWindow` shape.

#[cfg(target_os = "windows")]
#[path = "win32.rs"]
mod imp;

#[cfg(all(unix, not(target_os = "macos")))]
#[path = "xcb/mod.rs"]
mod imp;

#[cfg(not(any(target_os = "windows", all(unix, not(target_os = "macos")))))]
compile_error!("no windowing backend for this target: expected Windows or an X11 unix");

pub(crate) use imp::PlatformWindow;
