//! Pure, stateless translation tables from native numbering spaces to the
//! canonical enumerations.
//!
//! Both tables are plain integer matches with no platform dependencies, so
//! they compile and unit-test on any host even though only one backend is
//! ever built.

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub(crate) mod win32;

#[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
pub(crate) mod xcb;
