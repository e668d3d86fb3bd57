//! Win32 virtual-key and cursor-resource translation.
//!
//! The virtual-key code alone cannot distinguish left from right modifier
//! keys or the two enter keys; the keystroke flags carried in `lparam`
//! (extended-key bit 24, scan code in bits 16..=23) disambiguate them.

use crate::input::{CursorIcon, KeyCode};

/// Extended-key bit of the keystroke flags.
const EXTENDED: isize = 0x0100_0000;

/// Scan code of the right shift key.
const SC_RIGHT_SHIFT: isize = 0x36;

/// Translate a Win32 virtual-key code plus its keystroke flags into a
/// canonical key. Total: unmapped codes yield [`KeyCode::Unknown`].
pub(crate) fn virtual_key_to_key(vk: u32, lparam: isize) -> KeyCode {
    match vk {
        0x30 => KeyCode::Num0,
        0x31 => KeyCode::Num1,
        0x32 => KeyCode::Num2,
        0x33 => KeyCode::Num3,
        0x34 => KeyCode::Num4,
        0x35 => KeyCode::Num5,
        0x36 => KeyCode::Num6,
        0x37 => KeyCode::Num7,
        0x38 => KeyCode::Num8,
        0x39 => KeyCode::Num9,
        0x60 => KeyCode::Numpad0,
        0x61 => KeyCode::Numpad1,
        0x62 => KeyCode::Numpad2,
        0x63 => KeyCode::Numpad3,
        0x64 => KeyCode::Numpad4,
        0x65 => KeyCode::Numpad5,
        0x66 => KeyCode::Numpad6,
        0x67 => KeyCode::Numpad7,
        0x68 => KeyCode::Numpad8,
        0x69 => KeyCode::Numpad9,
        0x6E => KeyCode::NumpadDecimal,
        0x6B => KeyCode::NumpadAdd,
        0x6D => KeyCode::NumpadSubtract,
        0x6A => KeyCode::NumpadMultiply,
        0x6F => KeyCode::NumpadDivide,
        0x90 => KeyCode::NumpadLock,
        0x41 => KeyCode::A,
        0x42 => KeyCode::B,
        0x43 => KeyCode::C,
        0x44 => KeyCode::D,
        0x45 => KeyCode::E,
        0x46 => KeyCode::F,
        0x47 => KeyCode::G,
        0x48 => KeyCode::H,
        0x49 => KeyCode::I,
        0x4A => KeyCode::J,
        0x4B => KeyCode::K,
        0x4C => KeyCode::L,
        0x4D => KeyCode::M,
        0x4E => KeyCode::N,
        0x4F => KeyCode::O,
        0x50 => KeyCode::P,
        0x51 => KeyCode::Q,
        0x52 => KeyCode::R,
        0x53 => KeyCode::S,
        0x54 => KeyCode::T,
        0x55 => KeyCode::U,
        0x56 => KeyCode::V,
        0x57 => KeyCode::W,
        0x58 => KeyCode::X,
        0x59 => KeyCode::Y,
        0x5A => KeyCode::Z,
        0x26 => KeyCode::Up,
        0x28 => KeyCode::Down,
        0x27 => KeyCode::Right,
        0x25 => KeyCode::Left,
        0xBE => KeyCode::Period,
        0xBC => KeyCode::Comma,
        0x2D => KeyCode::Insert,
        0x2E => KeyCode::Delete,
        0x24 => KeyCode::Home,
        0x23 => KeyCode::End,
        0x21 => KeyCode::PageUp,
        0x22 => KeyCode::PageDown,
        0x2C => KeyCode::PrintScreen,
        0x91 => KeyCode::ScrollLock,
        0x13 => KeyCode::Pause,
        0x1B => KeyCode::Escape,
        0x09 => KeyCode::Tab,
        0x14 => KeyCode::CapsLock,
        0x5B => KeyCode::LeftSuper,
        0x5C => KeyCode::RightSuper,
        0x20 => KeyCode::Space,
        0x08 => KeyCode::Backspace,
        0x5D => KeyCode::Menu,
        0xBF => KeyCode::Slash,
        0xDC => KeyCode::Backslash,
        0xBD => KeyCode::Minus,
        0xBB => KeyCode::Equal,
        0xDE => KeyCode::Apostrophe,
        0xBA => KeyCode::Semicolon,
        0xDB => KeyCode::LeftBracket,
        0xDD => KeyCode::RightBracket,
        0xC0 => KeyCode::Tilde,
        0x70 => KeyCode::F1,
        0x71 => KeyCode::F2,
        0x72 => KeyCode::F3,
        0x73 => KeyCode::F4,
        0x74 => KeyCode::F5,
        0x75 => KeyCode::F6,
        0x76 => KeyCode::F7,
        0x77 => KeyCode::F8,
        0x78 => KeyCode::F9,
        0x79 => KeyCode::F10,
        0x7A => KeyCode::F11,
        0x7B => KeyCode::F12,
        0xE2 => KeyCode::Oem1,
        0xDF => KeyCode::Oem2,
        // VK_MENU / VK_CONTROL: the extended bit marks the right-hand key.
        0x12 => {
            if lparam & EXTENDED != 0 {
                KeyCode::RightAlt
            } else {
                KeyCode::LeftAlt
            }
        }
        0x11 => {
            if lparam & EXTENDED != 0 {
                KeyCode::RightCtrl
            } else {
                KeyCode::LeftCtrl
            }
        }
        // VK_SHIFT is never extended; the scan code tells the sides apart.
        0x10 => {
            if (lparam >> 16) & 0xFF == SC_RIGHT_SHIFT {
                KeyCode::RightShift
            } else {
                KeyCode::LeftShift
            }
        }
        // VK_RETURN: the extended bit marks the numpad enter.
        0x0D => {
            if lparam & EXTENDED != 0 {
                KeyCode::NumpadEnter
            } else {
                KeyCode::Enter
            }
        }
        _ => KeyCode::Unknown,
    }
}

/// System cursor resource ordinal (the integer behind `IDC_*`) for each
/// canonical icon. Exhaustive on purpose: a new icon without a Win32
/// mapping must fail the build, not fall back silently.
pub(crate) fn cursor_ordinal(icon: CursorIcon) -> u16 {
    match icon {
        CursorIcon::Arrow => 32512,      // IDC_ARROW
        CursorIcon::Text => 32513,       // IDC_IBEAM
        CursorIcon::Loading => 32514,    // IDC_WAIT
        CursorIcon::ResizeNwse => 32642, // IDC_SIZENWSE
        CursorIcon::ResizeNesw => 32643, // IDC_SIZENESW
        CursorIcon::ResizeEw => 32644,   // IDC_SIZEWE
        CursorIcon::ResizeNs => 32645,   // IDC_SIZENS
        CursorIcon::ResizeAll => 32646,  // IDC_SIZEALL
        CursorIcon::Hand => 32649,       // IDC_HAND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::collections::HashSet;

    #[test]
    fn translation_is_total() {
        for vk in 0..=0xFFu32 {
            // Must never panic, whatever the code.
            let _ = virtual_key_to_key(vk, 0);
            let _ = virtual_key_to_key(vk, EXTENDED);
        }
        assert_eq!(virtual_key_to_key(0xFF, 0), KeyCode::Unknown);
        assert_eq!(virtual_key_to_key(0x07, 0), KeyCode::Unknown);
    }

    #[test]
    fn mapped_codes_never_collide() {
        let mut seen: HashMap<KeyCode, u32> = HashMap::new();
        for vk in 0..=0xFFu32 {
            let key = virtual_key_to_key(vk, 0);
            if key == KeyCode::Unknown {
                continue;
            }
            if let Some(prev) = seen.insert(key, vk) {
                panic!("virtual keys {prev:#x} and {vk:#x} both map to {key:?}");
            }
        }
    }

    #[test]
    fn keystroke_flags_disambiguate_sides() {
        assert_eq!(virtual_key_to_key(0x12, 0), KeyCode::LeftAlt);
        assert_eq!(virtual_key_to_key(0x12, EXTENDED), KeyCode::RightAlt);
        assert_eq!(virtual_key_to_key(0x11, 0), KeyCode::LeftCtrl);
        assert_eq!(virtual_key_to_key(0x11, EXTENDED), KeyCode::RightCtrl);
        assert_eq!(virtual_key_to_key(0x10, 0x2A << 16), KeyCode::LeftShift);
        assert_eq!(virtual_key_to_key(0x10, SC_RIGHT_SHIFT << 16), KeyCode::RightShift);
        assert_eq!(virtual_key_to_key(0x0D, 0), KeyCode::Enter);
        assert_eq!(virtual_key_to_key(0x0D, EXTENDED), KeyCode::NumpadEnter);
    }

    #[test]
    fn sample_keys_translate() {
        assert_eq!(virtual_key_to_key(0x41, 0), KeyCode::A);
        assert_eq!(virtual_key_to_key(0x30, 0), KeyCode::Num0);
        assert_eq!(virtual_key_to_key(0x60, 0), KeyCode::Numpad0);
        assert_eq!(virtual_key_to_key(0x1B, 0), KeyCode::Escape);
        assert_eq!(virtual_key_to_key(0x7B, 0), KeyCode::F12);
    }

    #[test]
    fn cursor_ordinals_are_distinct() {
        let icons = [
            CursorIcon::Arrow,
            CursorIcon::Hand,
            CursorIcon::Text,
            CursorIcon::ResizeAll,
            CursorIcon::ResizeEw,
            CursorIcon::ResizeNs,
            CursorIcon::ResizeNesw,
            CursorIcon::ResizeNwse,
            CursorIcon::Loading,
        ];
        let ordinals: HashSet<u16> = icons.iter().map(|&i| cursor_ordinal(i)).collect();
        assert_eq!(ordinals.len(), icons.len());
    }
}
