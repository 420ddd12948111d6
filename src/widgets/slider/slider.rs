//! Video slider - value/viewport state, marks and layout.
//!
//! Scene space is the full slider box, `zoom_factor` times wider than the
//! widget; `scroll_x` is the left edge of the visible window into it. Values
//! are frame indices.
//!
//! Input handling (selection, snapping, drags) lives in `slider_input.rs`,
//! painting in `slider_ui.rs`.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::header::{HeaderGeometry, header_polyline};
use super::layout::TrackLayout;
use super::mark::{Mark, MarkId, MarkKind};
use super::selection::Selection;
use super::ticks::{tick_label, tick_positions, tick_step};
use super::visuals::{MarkBackend, MarkVisual, MarkVisuals, SceneRect};
use crate::core::event_bus::SliderEmitter;
use crate::core::slider_events::HeightUpdatedEvent;

/// Layout constants for the slider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub track_height: f32,
    pub max_tracks_stacked: usize,
    pub track_stack_skip_count: usize,
    pub header_label_height: f32, // room for tick labels
    pub header_graph_height: f32, // sparkline, only while a series is set
    pub handle_width: f32,
    pub initial_width: f32,
    pub max_visible_ticks: i64,
    pub min_visible_tracks: usize, // rows that fit before the widget scrolls
    pub label_font_px: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            track_height: 5.0,
            max_tracks_stacked: 120,
            track_stack_skip_count: 10,
            header_label_height: 20.0,
            header_graph_height: 30.0,
            handle_width: 6.0,
            initial_width: 200.0,
            max_visible_ticks: 24,
            min_visible_tracks: 20,
            label_font_px: 10.0,
        }
    }
}

impl SliderConfig {
    pub fn track_layout(&self) -> TrackLayout {
        TrackLayout {
            track_height: self.track_height,
            max_stacked: self.max_tracks_stacked,
            skip_count: self.track_stack_skip_count,
        }
    }
}

/// What a pointer drag does, fixed by the modifiers held at press time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// No modifier: move the handle
    Handle,
    /// Shift: select a range
    Select,
    /// Alt: drag out a range to zoom into
    Zoom,
    /// Other modifier combos: press/release are reported, nothing moves
    Passive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragMode),
}

/// Timeline slider with marks, track lanes, selection and zoom.
pub struct VideoSlider<B: MarkBackend = MarkVisuals> {
    pub(super) config: SliderConfig,
    pub(super) layout: TrackLayout,

    pub(super) val_min: i64,
    pub(super) val_max: i64,
    pub(super) val_main: i64,
    pub(super) enabled: bool,

    pub(super) zoom_factor: f64,
    pub(super) view_width: f32,
    pub(super) scroll_x: f32,
    pub(super) box_rect: SceneRect,
    pub(super) handle: SceneRect,

    pub(super) track_rows: usize,
    pub(super) header_height: f32,

    pub(super) marks: HashMap<MarkId, Mark>,
    tick_marks: Vec<MarkId>,
    pub(super) backend: B,

    pub(super) selection: Selection,
    pub(super) select_box: Option<SceneRect>,
    pub(super) zoom_box: Option<SceneRect>,
    pub(super) drag: DragState,
    pub(super) zoom_anchor: Option<i64>,

    header_series: BTreeMap<i64, f64>,
    header_path: Vec<[f32; 2]>,

    pub(super) emitter: SliderEmitter,
}

impl VideoSlider<MarkVisuals> {
    pub fn new(min: i64, max: i64, val: i64, config: SliderConfig) -> Self {
        Self::with_backend(min, max, val, config, MarkVisuals::default())
    }
}

impl Default for VideoSlider<MarkVisuals> {
    fn default() -> Self {
        Self::new(0, 100, 0, SliderConfig::default())
    }
}

impl<B: MarkBackend> VideoSlider<B> {
    pub fn with_backend(min: i64, max: i64, val: i64, config: SliderConfig, backend: B) -> Self {
        let header_height = config.header_label_height;
        let min_height = 19.0 + header_height;
        let handle_width = config.handle_width;
        let initial_width = config.initial_width;

        let mut slider = Self {
            layout: config.track_layout(),
            config,
            val_min: min,
            val_max: max,
            val_main: val,
            enabled: true,
            zoom_factor: 1.0,
            view_width: initial_width,
            scroll_x: 0.0,
            box_rect: SceneRect::new(0.0, 0.0, initial_width, min_height - 3.0),
            handle: SceneRect::new(0.0, 1.0 + header_height, handle_width, 0.0),
            track_rows: 0,
            header_height,
            marks: HashMap::new(),
            tick_marks: Vec::new(),
            backend,
            selection: Selection::default(),
            select_box: None,
            zoom_box: None,
            drag: DragState::Idle,
            zoom_anchor: None,
            header_series: BTreeMap::new(),
            header_path: Vec::new(),
            emitter: SliderEmitter::dummy(),
        };
        slider.set_value(val);
        slider.resize(initial_width);
        slider
    }

    pub fn with_emitter(mut self, emitter: SliderEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn set_emitter(&mut self, emitter: SliderEmitter) {
        self.emitter = emitter;
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn layout(&self) -> &TrackLayout {
        &self.layout
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ========== Value / range ==========

    pub fn value(&self) -> i64 {
        self.val_main
    }

    /// Set the current value, clamped to `[min, max]`, and scroll the handle
    /// into view. Emits nothing; only user moves report value changes.
    pub fn set_value(&mut self, val: i64) {
        let val = if self.val_min <= self.val_max {
            val.clamp(self.val_min, self.val_max)
        } else {
            val
        };
        self.val_main = val;
        self.handle.x = self.to_pos(val as f64, false);
        self.ensure_handle_visible();
    }

    pub fn minimum(&self) -> i64 {
        self.val_min
    }

    pub fn maximum(&self) -> i64 {
        self.val_max
    }

    pub fn set_minimum(&mut self, min: i64) {
        self.val_min = min;
    }

    pub fn set_maximum(&mut self, max: i64) {
        self.val_max = max;
    }

    /// Set both bounds and refresh ticks and positions.
    pub fn set_range(&mut self, min: i64, max: i64) {
        self.val_min = min;
        self.val_max = max;
        self.resize(self.view_width);
        self.set_value(self.val_main);
    }

    pub fn value_range(&self) -> i64 {
        self.val_max - self.val_min
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    // ========== Value <-> position ==========

    /// Width the handle can travel, keeping it fully inside the box.
    pub fn slider_width(&self) -> f32 {
        self.box_rect.w - self.handle.w
    }

    /// Scene x of a value. `center` offsets by half the handle so the result
    /// lines up with the handle's middle.
    pub fn to_pos(&self, val: f64, center: bool) -> f32 {
        let range = self.value_range().max(1) as f64;
        let mut x = (val - self.val_min as f64) / range * self.slider_width() as f64;
        if center {
            x += self.handle.w as f64 / 2.0;
        }
        x as f32
    }

    /// Inverse of [`Self::to_pos`], rounded to the nearest frame.
    pub fn to_val(&self, x: f32, center: bool) -> i64 {
        let mut x = x as f64;
        if center {
            x -= self.handle.w as f64 / 2.0;
        }
        let width = self.slider_width().max(1.0) as f64;
        let range = self.value_range().max(1) as f64;
        (x / width * range + self.val_min as f64).round() as i64
    }

    /// Frames visible in the widget at the current size and zoom.
    pub fn visible_value_range(&self) -> i64 {
        self.to_val(self.view_width - 1.0, false) - self.val_min
    }

    // ========== Geometry ==========

    pub fn box_rect(&self) -> SceneRect {
        self.box_rect
    }

    pub fn handle_rect(&self) -> SceneRect {
        self.handle
    }

    pub fn selection_box(&self) -> Option<SceneRect> {
        self.select_box
    }

    pub fn zoom_box(&self) -> Option<SceneRect> {
        self.zoom_box
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn header_path(&self) -> &[[f32; 2]] {
        &self.header_path
    }

    pub fn view_width(&self) -> f32 {
        self.view_width
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// `(min, max)` widget heights for the current track count and header.
    pub fn min_max_heights(&self) -> (f32, f32) {
        let min_height = self.min_height();
        let tracks = self.track_rows;
        if tracks == 0 {
            return (min_height, min_height);
        }
        let extra = 8.0 + self.header_height;
        let th = self.layout.track_height;
        let min_h = extra + th * tracks.min(self.config.min_visible_tracks) as f32;
        let max_h = extra + th * tracks.min(self.layout.max_stacked) as f32;
        (min_h.max(min_height), max_h.max(min_height))
    }

    /// Floor for both heights; keeps a 16px mark area under any header.
    fn min_height(&self) -> f32 {
        19.0 + self.header_height
    }

    fn mark_area_height(&self) -> f32 {
        let (_, max_height) = self.min_max_heights();
        max_height - 3.0 - self.header_height
    }

    /// Recompute box, handle, ticks, mark positions and header for a new
    /// widget width.
    pub fn resize(&mut self, view_width: f32) {
        self.view_width = view_width;

        let mark_area = self.mark_area_height();
        self.box_rect.h = mark_area + self.header_height;
        self.box_rect.w = (view_width - 1.0).max(0.0) * self.zoom_factor as f32;

        self.handle.y = 1.0 + self.header_height;
        self.handle.h = mark_area;

        self.update_selection_boxes();
        self.set_tick_marks();
        self.update_pos();
        self.draw_header();
        self.clamp_scroll();
    }

    /// Update the x position of the handle and every mark visual.
    pub fn update_pos(&mut self) {
        self.handle.x = self.to_pos(self.val_main as f64, false);
        for (id, mark) in &self.marks {
            let visual = self.mark_visual(mark);
            self.backend.reposition(*id, &visual);
        }
    }

    pub(super) fn mark_visual(&self, mark: &Mark) -> MarkVisual {
        let kind = mark.kind;
        let container = self.box_rect.h - self.header_height;

        let mut y = self.header_height + 1.0 + kind.top_pad();
        if kind == MarkKind::Track {
            y += self.layout.row_vertical_offset(mark.row.unwrap_or(0));
        }

        let x = self.to_pos(mark.start as f64, true);
        let (rect_x, width) = if kind == MarkKind::Track {
            let range = self.value_range().max(1) as f32;
            let w = mark.span() as f32 / range * self.slider_width();
            (x, w.max(2.0))
        } else {
            let w = kind.visual_width();
            (x - (w / 2.0).floor(), w)
        };

        MarkVisual {
            rect: SceneRect::new(rect_x, y, width, kind.height(container)),
            color: mark.color(),
            filled: kind.filled(),
            z: kind.z_order(),
            label: (kind == MarkKind::Tick).then(|| tick_label(mark.start)),
            label_x: x.max(0.0),
        }
    }

    // ========== Tracks / height ==========

    pub fn track_rows(&self) -> usize {
        self.track_rows
    }

    /// Set the number of track rows to show.
    pub fn set_tracks(&mut self, rows: usize) {
        self.track_rows = rows;
        self.update_height();
    }

    /// Re-lay-out everything after a height change and notify the host.
    pub fn update_height(&mut self) {
        self.resize(self.view_width);
        self.emitter.emit(HeightUpdatedEvent);
    }

    // ========== Marks ==========

    /// Replace every mark. Ticks are regenerated first so they sit behind.
    /// Marks outside `[min, max]` are dropped.
    pub fn set_marks<I, M>(&mut self, marks: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<Mark>,
    {
        self.clear_marks();
        self.add_tick_marks();

        let mut rejected = 0usize;
        for mark in marks {
            if self.add_mark(mark.into()).is_none() {
                rejected += 1;
            }
        }
        if rejected > 0 {
            debug!("set_marks: dropped {} marks outside [{}, {}]", rejected, self.val_min, self.val_max);
        }
        self.update_pos();
    }

    /// Insert one mark; `None` when its start lies outside `[min, max]`.
    pub fn add_mark(&mut self, mark: Mark) -> Option<MarkId> {
        if mark.start > self.val_max || mark.start < self.val_min {
            return None;
        }
        let id = MarkId::new();
        let visual = self.mark_visual(&mark);
        self.backend.create(id, &visual);
        self.marks.insert(id, mark);
        Some(id)
    }

    pub fn remove_mark(&mut self, id: MarkId) -> Option<Mark> {
        let mark = self.marks.remove(&id)?;
        self.backend.destroy(id);
        Some(mark)
    }

    pub fn clear_marks(&mut self) {
        for id in self.marks.keys() {
            self.backend.destroy(*id);
        }
        self.marks.clear();
        self.tick_marks.clear();
    }

    /// All marks, optionally of one kind. Order is unspecified.
    pub fn get_marks(&self, kind: Option<MarkKind>) -> Vec<(MarkId, Mark)> {
        self.marks
            .iter()
            .filter(|(_, m)| kind.is_none_or(|k| m.kind == k))
            .map(|(id, m)| (*id, m.clone()))
            .collect()
    }

    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Regenerate ticks for the current visible range.
    pub fn set_tick_marks(&mut self) {
        for id in std::mem::take(&mut self.tick_marks) {
            self.remove_mark(id);
        }
        self.add_tick_marks();
    }

    fn add_tick_marks(&mut self) {
        let step = tick_step(self.visible_value_range(), self.config.max_visible_ticks);
        let positions = tick_positions(self.val_min, self.val_max, step);
        trace!("ticks: step {} -> {} marks", step, positions.len());

        let ids: Vec<MarkId> = positions
            .into_iter()
            .filter_map(|pos| self.add_mark(Mark::tick(pos)))
            .collect();
        self.tick_marks = ids;
    }

    // ========== Header ==========

    /// Show the header sparkline for `{frame: value}`.
    pub fn set_header_series(&mut self, series: BTreeMap<i64, f64>) {
        self.header_series = series;
        self.header_height = self.config.header_label_height + self.config.header_graph_height;
        self.draw_header();
        self.update_height();
    }

    pub fn clear_header(&mut self) {
        self.header_series.clear();
        self.header_height = self.config.header_label_height;
        self.update_height();
    }

    pub fn header_series(&self) -> &BTreeMap<i64, f64> {
        &self.header_series
    }

    fn draw_header(&mut self) {
        let geom = HeaderGeometry {
            slider_width: self.slider_width(),
            header_height: self.header_height,
            graph_height: self.config.header_graph_height,
        };
        let path = header_polyline(&self.header_series, geom, |frame| self.to_pos(frame as f64, true));
        self.header_path = path;
    }

    // ========== Zoom / scroll ==========

    /// Zoom so `[start, end]` fills the widget, centred on its midpoint.
    pub fn set_zoom_range(&mut self, start_val: f64, end_val: f64) {
        let zoom_range = end_val - start_val;
        self.zoom_factor = if zoom_range > 0.0 {
            (self.value_range() as f64 / zoom_range).max(1.0)
        } else {
            1.0
        };
        debug!("zoom to [{:.1}, {:.1}] -> factor {:.3}", start_val, end_val, self.zoom_factor);

        self.resize(self.view_width);

        let center_val = start_val + zoom_range / 2.0;
        let center_pos = self.to_pos(center_val, false);
        self.center_on(center_pos);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom_range(self.val_min as f64, self.val_max as f64);
    }

    fn max_scroll(&self) -> f32 {
        (self.box_rect.w - (self.view_width - 1.0)).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll());
    }

    /// Scroll so scene x sits in the middle of the widget.
    pub fn center_on(&mut self, x: f32) {
        self.scroll_x = x - self.view_width / 2.0;
        self.clamp_scroll();
    }

    pub fn scroll_by(&mut self, dx: f32) {
        self.scroll_x += dx;
        self.clamp_scroll();
    }

    /// Minimal scroll that brings the whole handle into view.
    pub fn ensure_handle_visible(&mut self) {
        let visible = self.view_width - 1.0;
        if self.handle.x < self.scroll_x {
            self.scroll_x = self.handle.x;
        } else if self.handle.right() > self.scroll_x + visible {
            self.scroll_x = self.handle.right() - visible;
        }
        self.clamp_scroll();
    }

    // ========== Boxes ==========

    pub(super) fn range_box(&self, a: i64, b: i64) -> SceneRect {
        let start_pos = self.to_pos(a.min(b) as f64, true);
        let end_pos = self.to_pos(a.max(b) as f64, true);
        SceneRect::new(start_pos, self.header_height, end_pos - start_pos, self.handle.h)
    }

    fn update_selection_boxes(&mut self) {
        if self.select_box.is_some() {
            let (a, b) = self.selection.get();
            self.select_box = Some(self.range_box(a, b));
        }
        if let Some(zoom_box) = self.zoom_box.as_mut() {
            zoom_box.y = self.header_height;
            zoom_box.h = self.handle.h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::EventBus;
    use crate::widgets::slider::mark::Rgb;

    /// Test: value -> position -> value round-trips over the whole range
    #[test]
    fn test_round_trip() {
        let mut slider = VideoSlider::new(0, 1000, 0, SliderConfig::default());
        slider.resize(640.0);
        for v in (0..=1000).step_by(7) {
            assert_eq!(slider.to_val(slider.to_pos(v as f64, false), false), v);
            assert_eq!(slider.to_val(slider.to_pos(v as f64, true), true), v);
        }
    }

    #[test]
    fn test_to_pos_extremes() {
        let slider = VideoSlider::new(10, 110, 10, SliderConfig::default());
        // box 199 wide, handle 6 -> slider width 193
        assert_eq!(slider.to_pos(10.0, false), 0.0);
        assert!((slider.to_pos(110.0, false) - 193.0).abs() < 1e-3);
        assert!((slider.to_pos(10.0, true) - 3.0).abs() < 1e-3);
    }

    /// Test: min == max degenerates to a constant without dividing by zero
    #[test]
    fn test_degenerate_range() {
        let slider = VideoSlider::new(5, 5, 5, SliderConfig::default());
        assert_eq!(slider.to_pos(5.0, false), 0.0);
        assert_eq!(slider.to_val(0.0, false), 5);
        assert!(slider.to_pos(5.0, false).is_finite());
    }

    #[test]
    fn test_set_value_clamps() {
        let mut slider = VideoSlider::new(0, 20, 0, SliderConfig::default());
        slider.set_value(50);
        assert_eq!(slider.value(), 20);
        slider.set_value(-3);
        assert_eq!(slider.value(), 0);
    }

    /// Test: set_marks stores exactly the supplied marks (no ticks in range)
    #[test]
    fn test_set_marks_exact() {
        let mut slider = VideoSlider::new(0, 20, 0, SliderConfig::default());
        slider.set_range(0, 5);
        slider.set_marks([3_i64, 4]);

        let mut starts: Vec<i64> = slider.get_marks(None).iter().map(|(_, m)| m.start).collect();
        starts.sort();
        assert_eq!(starts, vec![3, 4]);
        assert_eq!(slider.backend().len(), 2);
    }

    /// Test: with ticks in range, filtering by kind isolates the annotations
    #[test]
    fn test_set_marks_with_ticks() {
        let mut slider = VideoSlider::new(0, 20, 15, SliderConfig::default());
        slider.set_marks([10_i64, 15]);

        let mut simple: Vec<i64> = slider
            .get_marks(Some(MarkKind::Simple))
            .iter()
            .map(|(_, m)| m.start)
            .collect();
        simple.sort();
        assert_eq!(simple, vec![10, 15]);

        let mut ticks: Vec<i64> = slider
            .get_marks(Some(MarkKind::Tick))
            .iter()
            .map(|(_, m)| m.start)
            .collect();
        ticks.sort();
        assert_eq!(ticks, vec![9, 19]);
    }

    /// Test: marks outside [min, max] are silently rejected
    #[test]
    fn test_add_mark_out_of_range() {
        let mut slider = VideoSlider::new(0, 20, 0, SliderConfig::default());
        let before = slider.mark_count();
        assert!(slider.add_mark(Mark::simple(21)).is_none());
        assert!(slider.add_mark(Mark::simple(-1)).is_none());
        assert_eq!(slider.mark_count(), before);
        assert!(slider.add_mark(Mark::simple(20)).is_some());
    }

    /// Test: identical marks are distinct entries; removal is by identity
    #[test]
    fn test_duplicates_and_remove() {
        let mut slider = VideoSlider::new(0, 5, 0, SliderConfig::default());
        let a = slider.add_mark(Mark::simple(2)).unwrap();
        let b = slider.add_mark(Mark::simple(2)).unwrap();
        assert_ne!(a, b);
        assert_eq!(slider.get_marks(Some(MarkKind::Simple)).len(), 2);

        assert_eq!(slider.remove_mark(a), Some(Mark::simple(2)));
        assert!(slider.remove_mark(a).is_none());
        assert_eq!(slider.get_marks(Some(MarkKind::Simple)).len(), 1);
        assert!(slider.backend().get(b).is_some());
        assert!(slider.backend().get(a).is_none());
    }

    /// Test: ticks regenerate on zoom without piling up
    #[test]
    fn test_ticks_follow_zoom() {
        let mut slider = VideoSlider::new(0, 10_000, 0, SliderConfig::default());
        slider.resize(500.0);
        let wide = slider.get_marks(Some(MarkKind::Tick)).len();
        assert!(wide <= 25);

        slider.set_zoom_range(0.0, 100.0);
        let zoomed = slider.get_marks(Some(MarkKind::Tick));
        // finer step once zoomed in
        assert!(zoomed.iter().any(|(_, m)| m.start == 9));

        slider.reset_zoom();
        assert_eq!(slider.get_marks(Some(MarkKind::Tick)).len(), wide);
        assert_eq!(slider.zoom_factor(), 1.0);
    }

    #[test]
    fn test_zoom_factor() {
        let mut slider = VideoSlider::new(0, 1000, 0, SliderConfig::default());
        slider.resize(401.0);
        slider.set_zoom_range(100.0, 200.0);
        assert!((slider.zoom_factor() - 10.0).abs() < 1e-9);
        assert!((slider.box_rect().w - 4000.0).abs() < 1e-2);

        // viewport centred on frame 150
        let center = slider.to_pos(150.0, false);
        assert!((slider.scroll_x() + slider.view_width() / 2.0 - center).abs() < 1.0);

        slider.set_zoom_range(300.0, 300.0);
        assert_eq!(slider.zoom_factor(), 1.0);
        slider.set_zoom_range(300.0, 200.0);
        assert_eq!(slider.zoom_factor(), 1.0);
    }

    /// Test: track marks get lane offsets and range widths
    #[test]
    fn test_track_visual() {
        let mut slider = VideoSlider::new(0, 100, 0, SliderConfig::default());
        slider.set_tracks(3);
        let id = slider.add_mark(Mark::track(10, 60, 2, Rgb(9, 9, 9))).unwrap();
        let visual = slider.backend().get(id).unwrap().clone();

        let header = slider.header_height();
        assert_eq!(visual.rect.y, header + 1.0 + 2.0 + 10.0);
        assert_eq!(visual.rect.h, 2.0);
        let expected_w = 50.0 / 100.0 * slider.slider_width();
        assert!((visual.rect.w - expected_w).abs() < 1e-3);
        assert_eq!(visual.color, Rgb(9, 9, 9));
    }

    #[test]
    fn test_min_max_heights() {
        let mut slider = VideoSlider::new(0, 100, 0, SliderConfig::default());
        assert_eq!(slider.min_max_heights(), (39.0, 39.0));

        slider.set_tracks(2);
        assert_eq!(slider.min_max_heights(), (39.0, 39.0));

        slider.set_tracks(50);
        assert_eq!(slider.min_max_heights(), (128.0, 278.0));

        slider.set_tracks(500);
        assert_eq!(slider.min_max_heights(), (128.0, 628.0));
    }

    /// Test: header series grows the header and notifies height change
    #[test]
    fn test_header_series_height() {
        let bus = EventBus::new();
        let mut slider = VideoSlider::new(0, 100, 0, SliderConfig::default())
            .with_emitter(SliderEmitter::from_emitter(bus.emitter()));

        let series: BTreeMap<i64, f64> = (0..100).map(|i| (i, (i % 7) as f64)).collect();
        slider.set_header_series(series);
        assert_eq!(slider.header_height(), 50.0);
        assert!(!slider.header_path().is_empty());
        assert!(!bus.poll().is_empty());

        slider.clear_header();
        assert_eq!(slider.header_height(), 20.0);
        assert!(slider.header_path().is_empty());
    }

    #[test]
    fn test_ensure_handle_visible() {
        let mut slider = VideoSlider::new(0, 1000, 0, SliderConfig::default());
        slider.resize(201.0);
        slider.set_zoom_range(0.0, 100.0);
        slider.set_value(900);
        let h = slider.handle_rect();
        assert!(h.x >= slider.scroll_x());
        assert!(h.right() <= slider.scroll_x() + slider.view_width() - 1.0 + 1e-3);

        slider.set_value(0);
        assert_eq!(slider.scroll_x(), 0.0);
    }
}
