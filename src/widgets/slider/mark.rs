//! Slider marks: point and range annotations at frame positions.
//!
//! Every visual attribute (colour, padding, width, fill, height, z) is a pure
//! function of [`MarkKind`]; only track marks carry an explicit colour.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a mark inside one slider. Equal fields never imply equal ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkId(Uuid);

impl MarkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plain RGB colour, converted to the backend's colour type when painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const LIGHT_GRAY: Rgb = Rgb(211, 211, 211);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    /// Frame with any label
    Simple,
    /// Suggested frame with user labels
    Filled,
    /// Suggested frame without labels
    Open,
    /// Suggested frame with predicted labels only
    Predicted,
    /// Occupancy range of one track
    Track,
    /// Automatic reference tick
    Tick,
    /// Separator drawn where a new column of track rows starts
    TickColumn,
}

impl MarkKind {
    /// Fixed colour for every kind except `Track`.
    pub fn fixed_color(self) -> Option<Rgb> {
        match self {
            MarkKind::Simple => Some(Rgb::BLACK),
            MarkKind::Filled | MarkKind::Open => Some(Rgb::BLUE),
            MarkKind::Predicted => Some(Rgb::YELLOW),
            MarkKind::Tick => Some(Rgb::LIGHT_GRAY),
            MarkKind::TickColumn => Some(Rgb::GRAY),
            MarkKind::Track => None,
        }
    }

    pub fn top_pad(self) -> f32 {
        match self {
            MarkKind::TickColumn => 40.0,
            MarkKind::Tick => 0.0,
            _ => 2.0,
        }
    }

    pub fn bottom_pad(self) -> f32 {
        match self {
            MarkKind::TickColumn => 200.0,
            MarkKind::Tick => 0.0,
            _ => 2.0,
        }
    }

    /// Pixel width of point marks. Track width comes from its frame range.
    pub fn visual_width(self) -> f32 {
        match self {
            MarkKind::Open | MarkKind::Filled | MarkKind::Tick => 2.0,
            MarkKind::TickColumn => 1.0,
            MarkKind::Simple | MarkKind::Predicted | MarkKind::Track => 0.0,
        }
    }

    pub fn filled(self) -> bool {
        self != MarkKind::Open
    }

    /// Height inside a mark area of `container_height` pixels.
    pub fn height(self, container_height: f32) -> f32 {
        if self == MarkKind::Track {
            return 2.0;
        }
        (container_height - self.top_pad() - self.bottom_pad()).max(0.0)
    }

    /// Ticks paint behind everything else.
    pub fn z_order(self) -> u8 {
        match self {
            MarkKind::Tick => 0,
            _ => 1,
        }
    }

    /// Reference marks generated by the slider itself, not annotations.
    pub fn is_tick(self) -> bool {
        matches!(self, MarkKind::Tick | MarkKind::TickColumn)
    }
}

/// One mark on the slider. Immutable: change = remove + add.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub kind: MarkKind,
    pub start: i64,
    /// Exclusive end, track marks only
    pub end: Option<i64>,
    /// Lane index, track marks only
    pub row: Option<usize>,
    color: Rgb,
}

impl Mark {
    pub fn new(kind: MarkKind, start: i64) -> Self {
        Self { kind, start, end: None, row: None, color: Rgb::BLACK }
    }

    pub fn simple(start: i64) -> Self {
        Self::new(MarkKind::Simple, start)
    }

    pub fn tick(start: i64) -> Self {
        Self::new(MarkKind::Tick, start)
    }

    pub fn track(start: i64, end: i64, row: usize, color: Rgb) -> Self {
        Self {
            kind: MarkKind::Track,
            start,
            end: Some(end),
            row: Some(row),
            color,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn color(&self) -> Rgb {
        self.kind.fixed_color().unwrap_or(self.color)
    }

    /// Frame span of a track mark, zero for points.
    pub fn span(&self) -> i64 {
        match (self.kind, self.end) {
            (MarkKind::Track, Some(end)) => end - self.start,
            _ => 0,
        }
    }

    /// Does a track mark cover `val` in `[start, end)`.
    pub fn covers(&self, val: i64) -> bool {
        match (self.kind, self.end) {
            (MarkKind::Track, Some(end)) => self.start <= val && val < end,
            _ => false,
        }
    }
}

impl From<i64> for Mark {
    fn from(start: i64) -> Self {
        Mark::simple(start)
    }
}
