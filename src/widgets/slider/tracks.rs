//! Build slider marks from host track data.
//!
//! The host describes which frames each track occupies, which frames have no
//! track and which frames are suggested for labelling. `track_marks` turns
//! that into rows and marks the slider can display directly.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::layout::TrackLayout;
use super::mark::{Mark, MarkKind, Rgb};
use super::slider::VideoSlider;
use super::visuals::MarkBackend;

/// Frames occupied by one named track, as half-open `[start, end)` ranges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackOccupancy {
    pub name: String,
    pub ranges: Vec<(i64, i64)>,
}

impl TrackOccupancy {
    pub fn new(name: impl Into<String>, ranges: Vec<(i64, i64)>) -> Self {
        Self { name: name.into(), ranges }
    }

    /// No non-empty range.
    pub fn is_empty(&self) -> bool {
        self.ranges.iter().all(|&(s, e)| e <= s)
    }

    /// First occupied frame.
    pub fn start(&self) -> Option<i64> {
        self.ranges.iter().filter(|&&(s, e)| e > s).map(|&(s, _)| s).min()
    }
}

/// How far labelling of a suggested frame has got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionKind {
    /// At least one user instance
    UserLabeled,
    /// Only predicted instances
    Predicted,
    Unlabeled,
}

impl SuggestionKind {
    fn mark_kind(self) -> MarkKind {
        match self {
            Self::UserLabeled => MarkKind::Filled,
            Self::Predicted => MarkKind::Predicted,
            Self::Unlabeled => MarkKind::Open,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuggestedFrame {
    pub frame: i64,
    pub kind: SuggestionKind,
}

/// Colour source for track lanes.
pub trait TrackPalette {
    fn track_color(&self, track: &TrackOccupancy) -> Rgb;
}

/// Stable colour per track name: hashed hue, fixed saturation and value.
#[derive(Clone, Copy, Debug)]
pub struct HashPalette {
    pub saturation: f32,
    pub value: f32,
}

impl Default for HashPalette {
    fn default() -> Self {
        Self { saturation: 0.65, value: 0.75 }
    }
}

impl TrackPalette for HashPalette {
    fn track_color(&self, track: &TrackOccupancy) -> Rgb {
        let mut hasher = DefaultHasher::new();
        track.name.hash(&mut hasher);
        let hue = (hasher.finish() % 360) as f32;
        hsv_to_rgb(hue, self.saturation, self.value)
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb(((r + m) * 255.0) as u8, ((g + m) * 255.0) as u8, ((b + m) * 255.0) as u8)
}

/// Rows to show plus the marks to display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackMarks {
    pub rows: usize,
    pub marks: Vec<Mark>,
}

/// Lay out tracks one row each, in the given order.
///
/// Empty tracks take no row. A column marker is placed at the first frame of
/// every track that opens a new stacking column.
pub fn track_marks(
    layout: &TrackLayout,
    tracks: &[TrackOccupancy],
    untracked: &[(i64, i64)],
    suggestions: &[SuggestedFrame],
    palette: &dyn TrackPalette,
) -> TrackMarks {
    let mut marks = Vec::new();
    let mut row = 0;

    for track in tracks {
        let Some(first) = track.start() else {
            continue;
        };
        if row > 0 && layout.is_new_column_start(row) {
            marks.push(Mark::new(MarkKind::TickColumn, first));
        }
        let color = palette.track_color(track);
        marks.extend(
            track
                .ranges
                .iter()
                .filter(|&&(s, e)| e > s)
                .map(|&(s, e)| Mark::track(s, e, row, color)),
        );
        row += 1;
    }

    marks.extend(untracked.iter().flat_map(|&(s, e)| s..e).map(Mark::simple));
    marks.extend(suggestions.iter().map(|s| Mark::new(s.kind.mark_kind(), s.frame)));

    TrackMarks { rows: row, marks }
}

impl<B: MarkBackend> VideoSlider<B> {
    /// Replace rows and marks from host track data.
    pub fn set_tracks_from(
        &mut self,
        tracks: &[TrackOccupancy],
        untracked: &[(i64, i64)],
        suggestions: &[SuggestedFrame],
        palette: &dyn TrackPalette,
    ) {
        let built = track_marks(&self.layout, tracks, untracked, suggestions, palette);
        log::debug!("tracks: {} rows, {} marks", built.rows, built.marks.len());
        self.set_tracks(built.rows);
        self.set_marks(built.marks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::slider::slider::SliderConfig;

    struct Fixed;

    impl TrackPalette for Fixed {
        fn track_color(&self, _track: &TrackOccupancy) -> Rgb {
            Rgb(1, 2, 3)
        }
    }

    fn kinds(marks: &[Mark], kind: MarkKind) -> Vec<i64> {
        marks.iter().filter(|m| m.kind == kind).map(|m| m.start).collect()
    }

    #[test]
    fn test_rows_and_ranges() {
        let tracks = vec![
            TrackOccupancy::new("a", vec![(0, 10), (20, 25)]),
            TrackOccupancy::new("empty", vec![]),
            TrackOccupancy::new("b", vec![(5, 8)]),
        ];
        let built = track_marks(&TrackLayout::default(), &tracks, &[], &[], &Fixed);

        assert_eq!(built.rows, 2);
        let rows: Vec<Option<usize>> = built.marks.iter().map(|m| m.row).collect();
        assert_eq!(rows, vec![Some(0), Some(0), Some(1)]);
        assert!(built.marks.iter().all(|m| m.color() == Rgb(1, 2, 3)));
        assert!(kinds(&built.marks, MarkKind::TickColumn).is_empty());
    }

    /// Test: untracked ranges expand to one point per frame
    #[test]
    fn test_untracked_and_suggestions() {
        let suggestions = [
            SuggestedFrame { frame: 3, kind: SuggestionKind::UserLabeled },
            SuggestedFrame { frame: 4, kind: SuggestionKind::Predicted },
            SuggestedFrame { frame: 9, kind: SuggestionKind::Unlabeled },
        ];
        let built = track_marks(&TrackLayout::default(), &[], &[(10, 13)], &suggestions, &Fixed);

        assert_eq!(built.rows, 0);
        assert_eq!(kinds(&built.marks, MarkKind::Simple), vec![10, 11, 12]);
        assert_eq!(kinds(&built.marks, MarkKind::Filled), vec![3]);
        assert_eq!(kinds(&built.marks, MarkKind::Predicted), vec![4]);
        assert_eq!(kinds(&built.marks, MarkKind::Open), vec![9]);
    }

    /// Test: column marker at each track that wraps to a new column
    #[test]
    fn test_column_markers() {
        let layout = TrackLayout { track_height: 5.0, max_stacked: 4, skip_count: 1 };
        let tracks: Vec<TrackOccupancy> = (0..7)
            .map(|i| TrackOccupancy::new(format!("t{i}"), vec![(i * 10 + 2, i * 10 + 5)]))
            .collect();
        let built = track_marks(&layout, &tracks, &[], &[], &Fixed);

        let expected: Vec<i64> = (1..7)
            .filter(|&r| layout.is_new_column_start(r as usize))
            .map(|r| r * 10 + 2)
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(kinds(&built.marks, MarkKind::TickColumn), expected);
    }

    #[test]
    fn test_hash_palette_stable() {
        let palette = HashPalette::default();
        let a = TrackOccupancy::new("mouse_1", vec![]);
        let b = TrackOccupancy::new("mouse_1", vec![(0, 3)]);
        assert_eq!(palette.track_color(&a), palette.track_color(&b));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb(0, 0, 255));
    }

    #[test]
    fn test_set_tracks_from() {
        let mut s = VideoSlider::new(0, 100, 0, SliderConfig::default());
        let tracks = vec![
            TrackOccupancy::new("a", vec![(0, 40)]),
            TrackOccupancy::new("b", vec![(50, 60)]),
        ];
        s.set_tracks_from(&tracks, &[(70, 72)], &[], &HashPalette::default());

        assert_eq!(s.track_rows(), 2);
        assert_eq!(s.get_marks(Some(MarkKind::Track)).len(), 2);
        assert_eq!(s.get_marks(Some(MarkKind::Simple)).len(), 2);
    }
}
