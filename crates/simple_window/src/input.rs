//! Canonical input enumerations shared by every platform backend.
//!
//! Backends translate their native numbering spaces (Win32 virtual keys,
//! X11 keycodes, button details) into these closed sets. Translation is
//! total: a native code with no mapping becomes [`KeyCode::Unknown`] or
//! [`MouseButton::Unknown`] rather than an error, so a single exotic key
//! can never interrupt event processing.

/// Canonical key identifiers.
///
/// Covers the common physical keyboard; left/right variants of the modifier
/// keys are distinct. Codes a backend cannot map arrive as [`Self::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Top-row 0 key
    Num0,
    /// Top-row 1 key
    Num1,
    /// Top-row 2 key
    Num2,
    /// Top-row 3 key
    Num3,
    /// Top-row 4 key
    Num4,
    /// Top-row 5 key
    Num5,
    /// Top-row 6 key
    Num6,
    /// Top-row 7 key
    Num7,
    /// Top-row 8 key
    Num8,
    /// Top-row 9 key
    Num9,
    /// Numpad 0
    Numpad0,
    /// Numpad 1
    Numpad1,
    /// Numpad 2
    Numpad2,
    /// Numpad 3
    Numpad3,
    /// Numpad 4
    Numpad4,
    /// Numpad 5
    Numpad5,
    /// Numpad 6
    Numpad6,
    /// Numpad 7
    Numpad7,
    /// Numpad 8
    Numpad8,
    /// Numpad 9
    Numpad9,
    /// Numpad decimal point
    NumpadDecimal,
    /// Numpad +
    NumpadAdd,
    /// Numpad -
    NumpadSubtract,
    /// Numpad *
    NumpadMultiply,
    /// Numpad /
    NumpadDivide,
    /// Num lock
    NumpadLock,
    /// Numpad enter
    NumpadEnter,
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Right arrow
    Right,
    /// Left arrow
    Left,
    /// Period
    Period,
    /// Comma
    Comma,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Left control
    LeftCtrl,
    /// Right control
    RightCtrl,
    /// Left alt
    LeftAlt,
    /// Right alt
    RightAlt,
    /// Insert
    Insert,
    /// Delete
    Delete,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Print screen
    PrintScreen,
    /// Scroll lock
    ScrollLock,
    /// Pause
    Pause,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Caps lock
    CapsLock,
    /// Left super (Windows/logo) key
    LeftSuper,
    /// Right super (Windows/logo) key
    RightSuper,
    /// Space bar
    Space,
    /// Backspace
    Backspace,
    /// Main enter key
    Enter,
    /// Menu (application) key
    Menu,
    /// Forward slash
    Slash,
    /// Backslash
    Backslash,
    /// Minus
    Minus,
    /// Equals
    Equal,
    /// Apostrophe
    Apostrophe,
    /// Semicolon
    Semicolon,
    /// Left bracket
    LeftBracket,
    /// Right bracket
    RightBracket,
    /// Tilde / backtick
    Tilde,
    /// F1
    F1,
    /// F2
    F2,
    /// F3
    F3,
    /// F4
    F4,
    /// F5
    F5,
    /// F6
    F6,
    /// F7
    F7,
    /// F8
    F8,
    /// F9
    F9,
    /// F10
    F10,
    /// F11
    F11,
    /// F12
    F12,
    /// OEM-specific key (e.g. the extra key on 102-key layouts)
    Oem1,
    /// OEM-specific key
    Oem2,
    /// Native code with no canonical mapping
    Unknown,
}

/// Canonical mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// First extra (side) button
    X1,
    /// Second extra (side) button
    X2,
    /// Native button with no canonical mapping
    Unknown,
}

/// Themed cursor images selectable via `set_cursor_image`.
///
/// The set is closed and every backend maps each variant exhaustively, so
/// adding a variant without a native mapping is a compile error rather than
/// a silent runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorIcon {
    /// Standard arrow pointer
    Arrow,
    /// Pointing hand (links, buttons)
    Hand,
    /// Text insertion I-beam
    Text,
    /// Four-way resize / move
    ResizeAll,
    /// Horizontal (east-west) resize
    ResizeEw,
    /// Vertical (north-south) resize
    ResizeNs,
    /// Diagonal resize, north-east to south-west
    ResizeNesw,
    /// Diagonal resize, north-west to south-east
    ResizeNwse,
    /// Busy / loading indicator
    Loading,
}
