//! Video slider events.
//!
//! Pointer coordinates are in scene space (the full, zoomed slider box).

use serde::{Deserialize, Serialize};

/// Keyboard modifiers held during an input event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, alt: false, ctrl: false };
    pub const SHIFT: Self = Self { shift: true, alt: false, ctrl: false };
    pub const ALT: Self = Self { shift: false, alt: true, ctrl: false };
    pub const CTRL: Self = Self { shift: false, alt: false, ctrl: true };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Raw key event forwarded to the host untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self { key: key.into(), modifiers }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueChangedEvent(pub i64);

/// Emitted on every finished selection, even when the range is unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChangedEvent {
    pub start: i64,
    pub end: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MousePressedEvent {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MouseMovedEvent {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MouseReleasedEvent {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPressEvent(pub KeyInput);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyReleaseEvent(pub KeyInput);

/// Slider layout height changed (track count or header toggled).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightUpdatedEvent;
