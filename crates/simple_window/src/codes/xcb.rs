//! X keycode, button and cursor-theme translation.
//!
//! X keycodes are keysym-table indices offset by 8 from Linux evdev scan
//! codes; the table below targets the standard evdev layout. Buttons 4..=7
//! are scroll notches, handled by the backend before button translation.

use crate::input::{CursorIcon, KeyCode, MouseButton};

/// Translate an X keycode (the `detail` field of a key event) into a
/// canonical key. Total: unmapped keycodes yield [`KeyCode::Unknown`].
pub(crate) fn keycode_to_key(detail: u8) -> KeyCode {
    match detail {
        10 => KeyCode::Num1,
        11 => KeyCode::Num2,
        12 => KeyCode::Num3,
        13 => KeyCode::Num4,
        14 => KeyCode::Num5,
        15 => KeyCode::Num6,
        16 => KeyCode::Num7,
        17 => KeyCode::Num8,
        18 => KeyCode::Num9,
        19 => KeyCode::Num0,
        90 => KeyCode::Numpad0,
        87 => KeyCode::Numpad1,
        88 => KeyCode::Numpad2,
        89 => KeyCode::Numpad3,
        83 => KeyCode::Numpad4,
        84 => KeyCode::Numpad5,
        85 => KeyCode::Numpad6,
        79 => KeyCode::Numpad7,
        80 => KeyCode::Numpad8,
        81 => KeyCode::Numpad9,
        91 => KeyCode::NumpadDecimal,
        86 => KeyCode::NumpadAdd,
        82 => KeyCode::NumpadSubtract,
        63 => KeyCode::NumpadMultiply,
        106 => KeyCode::NumpadDivide,
        77 => KeyCode::NumpadLock,
        104 => KeyCode::NumpadEnter,
        38 => KeyCode::A,
        56 => KeyCode::B,
        54 => KeyCode::C,
        40 => KeyCode::D,
        26 => KeyCode::E,
        41 => KeyCode::F,
        42 => KeyCode::G,
        43 => KeyCode::H,
        31 => KeyCode::I,
        44 => KeyCode::J,
        45 => KeyCode::K,
        46 => KeyCode::L,
        58 => KeyCode::M,
        57 => KeyCode::N,
        32 => KeyCode::O,
        33 => KeyCode::P,
        24 => KeyCode::Q,
        27 => KeyCode::R,
        39 => KeyCode::S,
        28 => KeyCode::T,
        30 => KeyCode::U,
        55 => KeyCode::V,
        25 => KeyCode::W,
        53 => KeyCode::X,
        29 => KeyCode::Y,
        52 => KeyCode::Z,
        111 => KeyCode::Up,
        116 => KeyCode::Down,
        114 => KeyCode::Right,
        113 => KeyCode::Left,
        60 => KeyCode::Period,
        59 => KeyCode::Comma,
        50 => KeyCode::LeftShift,
        62 => KeyCode::RightShift,
        37 => KeyCode::LeftCtrl,
        105 => KeyCode::RightCtrl,
        64 => KeyCode::LeftAlt,
        108 => KeyCode::RightAlt,
        118 => KeyCode::Insert,
        119 => KeyCode::Delete,
        110 => KeyCode::Home,
        115 => KeyCode::End,
        112 => KeyCode::PageUp,
        117 => KeyCode::PageDown,
        107 => KeyCode::PrintScreen,
        78 => KeyCode::ScrollLock,
        127 => KeyCode::Pause,
        9 => KeyCode::Escape,
        23 => KeyCode::Tab,
        66 => KeyCode::CapsLock,
        // RightSuper has no stable evdev keycode across layouts; it stays
        // unmapped here and surfaces as Unknown.
        133 => KeyCode::LeftSuper,
        65 => KeyCode::Space,
        22 => KeyCode::Backspace,
        36 => KeyCode::Enter,
        135 => KeyCode::Menu,
        61 => KeyCode::Slash,
        51 => KeyCode::Backslash,
        20 => KeyCode::Minus,
        21 => KeyCode::Equal,
        48 => KeyCode::Apostrophe,
        47 => KeyCode::Semicolon,
        34 => KeyCode::LeftBracket,
        35 => KeyCode::RightBracket,
        49 => KeyCode::Tilde,
        67 => KeyCode::F1,
        68 => KeyCode::F2,
        69 => KeyCode::F3,
        70 => KeyCode::F4,
        71 => KeyCode::F5,
        72 => KeyCode::F6,
        73 => KeyCode::F7,
        74 => KeyCode::F8,
        75 => KeyCode::F9,
        76 => KeyCode::F10,
        95 => KeyCode::F11,
        96 => KeyCode::F12,
        94 => KeyCode::Oem1,
        _ => KeyCode::Unknown,
    }
}

/// Translate an X button `detail` into a canonical mouse button.
///
/// Callers must have already consumed buttons 4..=7 as scroll notches;
/// those details reaching this function translate to `Unknown`.
pub(crate) fn button_to_mouse(detail: u8) -> MouseButton {
    match detail {
        1 => MouseButton::Left,
        2 => MouseButton::Middle,
        3 => MouseButton::Right,
        8 => MouseButton::X1,
        9 => MouseButton::X2,
        _ => MouseButton::Unknown,
    }
}

/// Cursor-theme shape name for each canonical icon, resolved against the
/// user's active X cursor theme. Exhaustive so new icons cannot silently
/// miss a shape.
pub(crate) fn cursor_theme_name(icon: CursorIcon) -> &'static str {
    match icon {
        CursorIcon::Arrow => "arrow",
        CursorIcon::Hand => "hand1",
        CursorIcon::Text => "ibeam",
        CursorIcon::ResizeAll => "size_all",
        CursorIcon::ResizeEw => "size_hor",
        CursorIcon::ResizeNs => "size_ver",
        CursorIcon::ResizeNesw => "size_bdiag",
        CursorIcon::ResizeNwse => "size_fdiag",
        CursorIcon::Loading => "wait",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::collections::HashSet;

    #[test]
    fn translation_is_total() {
        for detail in 0..=u8::MAX {
            let _ = keycode_to_key(detail);
            let _ = button_to_mouse(detail);
        }
        assert_eq!(keycode_to_key(0), KeyCode::Unknown);
        assert_eq!(keycode_to_key(255), KeyCode::Unknown);
    }

    #[test]
    fn mapped_keycodes_never_collide() {
        let mut seen: HashMap<KeyCode, u8> = HashMap::new();
        for detail in 0..=u8::MAX {
            let key = keycode_to_key(detail);
            if key == KeyCode::Unknown {
                continue;
            }
            if let Some(prev) = seen.insert(key, detail) {
                panic!("keycodes {prev} and {detail} both map to {key:?}");
            }
        }
    }

    #[test]
    fn sample_keys_translate() {
        assert_eq!(keycode_to_key(38), KeyCode::A);
        assert_eq!(keycode_to_key(10), KeyCode::Num1);
        assert_eq!(keycode_to_key(19), KeyCode::Num0);
        assert_eq!(keycode_to_key(9), KeyCode::Escape);
        assert_eq!(keycode_to_key(36), KeyCode::Enter);
        assert_eq!(keycode_to_key(104), KeyCode::NumpadEnter);
        assert_eq!(keycode_to_key(133), KeyCode::LeftSuper);
    }

    #[test]
    fn buttons_translate() {
        assert_eq!(button_to_mouse(1), MouseButton::Left);
        assert_eq!(button_to_mouse(2), MouseButton::Middle);
        assert_eq!(button_to_mouse(3), MouseButton::Right);
        assert_eq!(button_to_mouse(8), MouseButton::X1);
        assert_eq!(button_to_mouse(9), MouseButton::X2);
        // Scroll details are the backend's problem, never a button.
        for scroll in 4..=7 {
            assert_eq!(button_to_mouse(scroll), MouseButton::Unknown);
        }
    }

    #[test]
    fn cursor_names_are_distinct() {
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
        let names: HashSet<&str> = icons.iter().map(|&i| cursor_theme_name(i)).collect();
        assert_eq!(names.len(), icons.len());
    }
}
