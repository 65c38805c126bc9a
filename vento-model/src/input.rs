//! Host input forwarded to gallery plugins.
//!
//! The host translates its native pointer and keyboard events into these
//! values; nothing here depends on a windowing system.

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Strip a pointer gesture started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PointerTarget {
    #[default]
    Stage,
    Thumbs,
}

/// Button index of the primary pointer (left mouse, touch, pen tip).
pub const PRIMARY_BUTTON: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub button: u16,
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: PointerTarget,
    /// Host timestamp in milliseconds. Only differences are used.
    pub time_ms: f64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64, time_ms: f64) -> Self {
        Self {
            phase,
            button: PRIMARY_BUTTON,
            x,
            y,
            target: PointerTarget::Stage,
            time_ms,
        }
    }

    pub fn down(x: f64, y: f64, time_ms: f64) -> Self {
        Self::new(PointerPhase::Down, x, y, time_ms)
    }

    pub fn moved(x: f64, y: f64, time_ms: f64) -> Self {
        Self::new(PointerPhase::Move, x, y, time_ms)
    }

    pub fn up(x: f64, y: f64, time_ms: f64) -> Self {
        Self::new(PointerPhase::Up, x, y, time_ms)
    }

    pub fn cancel(x: f64, y: f64, time_ms: f64) -> Self {
        Self::new(PointerPhase::Cancel, x, y, time_ms)
    }

    pub fn with_button(mut self, button: u16) -> Self {
        self.button = button;
        self
    }

    pub fn with_target(mut self, target: PointerTarget) -> Self {
        self.target = target;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == PRIMARY_BUTTON
    }

    /// Ends the gesture, whether completed or interrupted.
    pub fn is_release(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}

/// Logical keys the gallery reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Home,
    End,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM-style `key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            " " | "Space" | "Spacebar" => Self::Space,
            "Home" => Self::Home,
            "End" => Self::End,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    /// Focus is inside a text field or editable element.
    pub editable_target: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            editable_target: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_editable(mut self) -> Self {
        self.editable_target = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyInput),
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

impl From<KeyInput> for InputEvent {
    fn from(input: KeyInput) -> Self {
        Self::Key(input)
    }
}
