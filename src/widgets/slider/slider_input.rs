//! Video slider - selection, contiguous expansion, snapping and pointer input.
//!
//! # Interactions
//!
//! - **Drag**: move the handle, snapping to marks under it
//! - **Shift+drag**: select a range
//! - **Alt+drag**: zoom into the dragged range (padded 5% per side)
//! - **Shift+double-click**: select the contiguously marked run under the pointer
//!
//! The drag mode is fixed at press time and cleared on release, so at most one
//! drag behaviour is ever active.

use log::trace;

use super::mark::MarkKind;
use super::selection::SelectionOutcome;
use super::slider::{DragMode, DragState, VideoSlider};
use super::visuals::MarkBackend;
use crate::core::slider_events::{
    KeyInput, KeyPressEvent, KeyReleaseEvent, Modifiers, MouseMovedEvent, MousePressedEvent,
    MouseReleasedEvent, SelectionChangedEvent, ValueChangedEvent,
};

/// Fraction of the dragged zoom range added on each side.
const ZOOM_PADDING: f64 = 0.05;

impl<B: MarkBackend> VideoSlider<B> {
    // ========== Selection ==========

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.select_box = None;
    }

    /// Add the first endpoint of a selection pair.
    pub fn start_selection(&mut self, val: i64) {
        self.selection.start(val);
    }

    /// Add the closing endpoint and notify the host.
    ///
    /// `update_last` replaces the second endpoint of an existing pair. Equal
    /// endpoints clear the selection. The event fires even when the range is
    /// unchanged.
    pub fn end_selection(&mut self, val: i64, update_last: bool) {
        match self.selection.end(val, update_last) {
            SelectionOutcome::Active(a, b) => self.select_box = Some(self.range_box(a, b)),
            SelectionOutcome::Cleared => self.clear_selection(),
        }
        let (start, end) = self.get_selection();
        self.emitter.emit(SelectionChangedEvent { start, end });
    }

    pub fn set_selection(&mut self, start_val: i64, end_val: i64) {
        self.start_selection(start_val);
        self.end_selection(end_val, true);
    }

    /// Normalized `(start, end)`; `end` is exclusive, so a run reaching
    /// `max` reports `max + 1`.
    pub fn get_selection(&self) -> (i64, i64) {
        self.selection.get()
    }

    /// Zero-width selections count as none.
    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    fn clamp_to_box(&self, x: f32) -> f32 {
        x.max(0.0).min(self.box_rect.w)
    }

    /// Value under a selection drag, kept inside `[min, max]`.
    fn anchor_val(&self, x: f32) -> i64 {
        self.to_val(self.clamp_to_box(x), true).clamp(self.val_min, self.val_max)
    }

    /// Preview the selection between the anchor and the pointer.
    pub fn move_selection_anchor(&mut self, x: f32, _y: f32) {
        let anchor_val = self.anchor_val(x);
        if self.selection.is_even() {
            self.start_selection(anchor_val);
        }
        let other = self.selection.last().unwrap_or(anchor_val);
        self.select_box = Some(self.range_box(anchor_val, other));
    }

    pub fn release_selection_anchor(&mut self, x: f32, _y: f32) {
        let anchor_val = self.anchor_val(x);
        self.end_selection(anchor_val, false);
    }

    // ========== Zoom drag ==========

    pub fn move_zoom_drag(&mut self, x: f32, _y: f32) {
        let current = self.to_val(x, true);
        let anchor = *self.zoom_anchor.get_or_insert(current);
        self.zoom_box = Some(self.range_box(current, anchor));
    }

    pub fn release_zoom_drag(&mut self, x: f32, _y: f32) {
        self.zoom_box = None;

        let val_b = self.to_val(x, true);
        let val_a = self.zoom_anchor.take().unwrap_or(val_b);

        let mut start = val_a.min(val_b) as f64;
        let mut end = val_a.max(val_b) as f64;
        let range = end - start;
        start -= range * ZOOM_PADDING;
        end += range * ZOOM_PADDING;

        self.set_zoom_range(start, end);
    }

    // ========== Handle ==========

    /// Move the handle under the pointer, snapping to the nearest mark inside
    /// the handle (ties go to the lower value). Emits on change only.
    pub fn move_handle(&mut self, x: f32, _y: f32) {
        let hw = self.handle.w;
        let x = (x - hw / 2.0).max(0.0).min(self.box_rect.w - hw);

        let mut val = self.to_val(x, false);

        let handle_left = self.to_val(x - hw / 2.0, false);
        let handle_right = self.to_val(x + hw / 2.0, false);
        let snap = self
            .marks
            .values()
            .map(|m| m.start)
            .filter(|&m| handle_left < m && m < handle_right)
            .min_by_key(|&m| ((m - val).abs(), m > val));
        if let Some(m) = snap {
            val = m;
        }

        let old = self.val_main;
        self.set_value(val);
        if old != self.val_main {
            self.emitter.emit(ValueChangedEvent(self.val_main));
        }
    }

    // ========== Contiguous marks ==========

    /// Does an annotation (not a tick) sit on or cover `val`.
    pub fn is_marked_val(&self, val: i64) -> bool {
        self.marks
            .values()
            .any(|m| !m.kind.is_tick() && (m.start == val || m.covers(val)))
    }

    fn has_point_at(&self, val: i64) -> bool {
        self.marks.values().any(|m| !m.kind.is_tick() && m.start == val)
    }

    /// One step down within a contiguous marked run, or `val` if stuck.
    pub fn decrement_contiguous_marked_val(&self, val: i64) -> i64 {
        let dec_val = self
            .marks
            .values()
            .filter(|m| m.kind == MarkKind::Track)
            .filter_map(|m| m.end.filter(|&end| m.start < val && val <= end).map(|_| m.start))
            .min()
            .unwrap_or(val);
        if dec_val < val {
            return dec_val;
        }
        if self.has_point_at(val - 1) {
            return val - 1;
        }
        val
    }

    /// One step up within a contiguous marked run, or `val` if stuck.
    pub fn increment_contiguous_marked_val(&self, val: i64) -> i64 {
        let inc_val = self
            .marks
            .values()
            .filter(|m| m.covers(val))
            .filter_map(|m| m.end.map(|end| end - 1))
            .max()
            .unwrap_or(val);
        if inc_val > val {
            return inc_val;
        }
        if self.has_point_at(val + 1) {
            return val + 1;
        }
        val
    }

    /// Lowest frame of the marked run containing `val`.
    ///
    /// Every step strictly lowers the boundary, so there are at most
    /// `val - min` steps, each scanning all marks.
    pub fn start_contiguous_mark(&self, val: i64) -> i64 {
        let mut steps = 0usize;
        let mut last_val = val;
        let mut dec_val = self.decrement_contiguous_marked_val(last_val);
        while dec_val < last_val && dec_val > self.val_min {
            last_val = dec_val;
            dec_val = self.decrement_contiguous_marked_val(last_val);
            steps += 1;
        }
        trace!("contiguous start {} -> {} in {} steps", val, dec_val, steps);
        dec_val
    }

    /// Highest frame of the marked run containing `val`.
    pub fn end_contiguous_mark(&self, val: i64) -> i64 {
        let mut steps = 0usize;
        let mut last_val = val;
        let mut inc_val = self.increment_contiguous_marked_val(last_val);
        while inc_val > last_val && inc_val < self.val_max {
            last_val = inc_val;
            inc_val = self.increment_contiguous_marked_val(last_val);
            steps += 1;
        }
        trace!("contiguous end {} -> {} in {} steps", val, inc_val, steps);
        inc_val
    }

    /// Select the marked run around `val` as the half-open `[low, high + 1)`.
    /// No-op when `val` is unmarked.
    pub fn contiguous_selection_around_val(&mut self, val: i64) {
        if !self.is_marked_val(val) {
            return;
        }
        let low = self.start_contiguous_mark(val);
        let high = self.end_contiguous_mark(val);
        self.set_selection(low, high + 1);
    }

    // ========== Pointer / keys ==========

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Begin a drag. Ignored when disabled or outside the slider box.
    pub fn pointer_pressed(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        if !self.enabled || !self.box_rect.contains(x, y) {
            return;
        }

        let mode = if modifiers == Modifiers::SHIFT {
            self.clear_selection();
            DragMode::Select
        } else if modifiers.is_none() {
            DragMode::Handle
        } else if modifiers == Modifiers::ALT {
            DragMode::Zoom
        } else {
            DragMode::Passive
        };
        trace!("drag start {:?} at ({:.1}, {:.1})", mode, x, y);
        self.drag = DragState::Dragging(mode);

        self.dispatch_move(x, y);
        self.emitter.emit(MouseMovedEvent { x, y });
        self.emitter.emit(MousePressedEvent { x, y });
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.emitter.emit(MouseMovedEvent { x, y });
        self.dispatch_move(x, y);
    }

    /// Finish the active drag and return to idle.
    pub fn pointer_released(&mut self, x: f32, y: f32) {
        self.emitter.emit(MouseReleasedEvent { x, y });
        if let DragState::Dragging(mode) = std::mem::take(&mut self.drag) {
            match mode {
                DragMode::Select => self.release_selection_anchor(x, y),
                DragMode::Zoom => self.release_zoom_drag(x, y),
                DragMode::Handle | DragMode::Passive => {}
            }
        }
    }

    pub fn pointer_double_clicked(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        if !self.enabled || !self.box_rect.contains(x, y) {
            return;
        }
        if modifiers == Modifiers::SHIFT {
            self.contiguous_selection_around_val(self.to_val(x, false));
        }
    }

    fn dispatch_move(&mut self, x: f32, y: f32) {
        match self.drag {
            DragState::Dragging(DragMode::Handle) => self.move_handle(x, y),
            DragState::Dragging(DragMode::Select) => self.move_selection_anchor(x, y),
            DragState::Dragging(DragMode::Zoom) => self.move_zoom_drag(x, y),
            DragState::Dragging(DragMode::Passive) | DragState::Idle => {}
        }
    }

    pub fn key_pressed(&mut self, key: KeyInput) {
        self.emitter.emit(KeyPressEvent(key));
    }

    pub fn key_released(&mut self, key: KeyInput) {
        self.emitter.emit(KeyReleaseEvent(key));
    }
}

#[cfg(test)]
mod tests {
    use crate::core::event_bus::{EventBus, SliderEmitter, downcast_event};
    use crate::core::slider_events::*;
    use crate::widgets::slider::mark::{Mark, Rgb};
    use crate::widgets::slider::slider::{DragMode, DragState, SliderConfig, VideoSlider};

    fn slider(min: i64, max: i64) -> (VideoSlider, EventBus) {
        let bus = EventBus::new();
        let mut s = VideoSlider::new(min, max, min, SliderConfig::default())
            .with_emitter(SliderEmitter::from_emitter(bus.emitter()));
        s.resize(1001.0);
        bus.poll();
        (s, bus)
    }

    fn selections(bus: &EventBus) -> Vec<(i64, i64)> {
        bus.poll()
            .iter()
            .filter_map(|e| downcast_event::<SelectionChangedEvent>(e).map(|s| (s.start, s.end)))
            .collect()
    }

    #[test]
    fn test_set_selection_normalizes() {
        let (mut s, bus) = slider(0, 100);
        s.set_selection(5, 10);
        assert_eq!(s.get_selection(), (5, 10));
        s.set_selection(10, 5);
        assert_eq!(s.get_selection(), (5, 10));
        assert!(s.has_selection());
        assert!(s.selection_box().is_some());
        assert_eq!(selections(&bus), vec![(5, 10), (5, 10)]);
    }

    /// Test: repeated update_last calls keep one pair
    #[test]
    fn test_end_selection_update_last() {
        let (mut s, _bus) = slider(0, 100);
        s.start_selection(10);
        s.end_selection(20, true);
        s.end_selection(30, true);
        s.end_selection(40, true);
        assert_eq!(s.get_selection(), (10, 40));
        assert_eq!(s.selection.len(), 2);
    }

    /// Test: zero-width selection clears and still notifies
    #[test]
    fn test_zero_width_selection() {
        let (mut s, bus) = slider(0, 100);
        s.set_selection(7, 7);
        assert!(!s.has_selection());
        assert!(s.selection_box().is_none());
        assert_eq!(selections(&bus), vec![(0, 0)]);
    }

    /// Test: range mark [20, 30) with no neighbours selects (20, 30)
    #[test]
    fn test_contiguous_track() {
        let (mut s, _bus) = slider(0, 100);
        s.add_mark(Mark::track(20, 30, 0, Rgb::BLACK));
        s.contiguous_selection_around_val(25);
        assert_eq!(s.get_selection(), (20, 30));
    }

    /// Test: adjacent points and ranges join into one run
    #[test]
    fn test_contiguous_joins_neighbours() {
        let (mut s, _bus) = slider(0, 100);
        s.add_mark(Mark::track(20, 30, 0, Rgb::BLACK));
        s.add_mark(Mark::track(30, 35, 1, Rgb::BLACK));
        s.add_mark(Mark::simple(18));
        s.add_mark(Mark::simple(19));
        s.add_mark(Mark::simple(50));

        s.contiguous_selection_around_val(32);
        assert_eq!(s.get_selection(), (18, 35));
    }

    #[test]
    fn test_contiguous_points() {
        let (mut s, _bus) = slider(0, 100);
        s.set_marks([40_i64, 41, 42, 44]);
        s.contiguous_selection_around_val(41);
        assert_eq!(s.get_selection(), (40, 43));

        // unmarked value: nothing changes
        s.contiguous_selection_around_val(43);
        assert_eq!(s.get_selection(), (40, 43));
    }

    /// Test: expansion stops at the domain bounds
    #[test]
    fn test_contiguous_bounds() {
        let (mut s, _bus) = slider(10, 20);
        s.set_marks(10_i64..=20);
        s.contiguous_selection_around_val(15);
        assert_eq!(s.get_selection(), (10, 21));
    }

    /// Test: ticks are not annotations
    #[test]
    fn test_ticks_not_marked() {
        let (s, _bus) = slider(0, 100);
        assert!(s.get_marks(Some(crate::widgets::slider::MarkKind::Tick)).iter().any(|(_, m)| m.start == 9));
        assert!(!s.is_marked_val(9));
    }

    /// Test: handle snaps to a mark under it, preferring the lower on ties
    #[test]
    fn test_move_handle_snaps() {
        let (mut s, bus) = slider(0, 10_000);
        // ~0.1 px per frame: the 6px handle spans ~60 frames
        s.set_marks([5_000_i64, 5_020]);
        bus.poll();

        let x = s.to_pos(5_010.0, true);
        s.move_handle(x, 0.0);
        assert_eq!(s.value(), 5_000);

        let values: Vec<i64> = bus
            .poll()
            .iter()
            .filter_map(|e| downcast_event::<ValueChangedEvent>(e).map(|v| v.0))
            .collect();
        assert_eq!(values, vec![5_000]);

        // same spot again: no change, no event
        s.move_handle(x, 0.0);
        assert!(bus.poll().iter().all(|e| downcast_event::<ValueChangedEvent>(e).is_none()));
    }

    #[test]
    fn test_move_handle_no_marks() {
        let (mut s, _bus) = slider(0, 100);
        let x = s.to_pos(37.0, true);
        s.move_handle(x, 0.0);
        assert_eq!(s.value(), 37);

        s.move_handle(-50.0, 0.0);
        assert_eq!(s.value(), 0);
        s.move_handle(5_000.0, 0.0);
        assert_eq!(s.value(), 100);
    }

    /// Test: shift drag selects, release returns to idle
    #[test]
    fn test_shift_drag_selects() {
        let (mut s, bus) = slider(0, 100);
        let y = s.handle_rect().y + 1.0;
        let x0 = s.to_pos(20.0, true);
        let x1 = s.to_pos(60.0, true);

        s.pointer_pressed(x0, y, Modifiers::SHIFT);
        assert_eq!(s.drag_state(), DragState::Dragging(DragMode::Select));
        s.pointer_moved(x1, y);
        assert!(s.selection_box().is_some());
        s.pointer_released(x1, y);

        assert_eq!(s.drag_state(), DragState::Idle);
        assert_eq!(s.get_selection(), (20, 60));
        assert_eq!(selections(&bus), vec![(20, 60)]);
    }

    /// Test: dragging across the whole box stays inside the value range
    #[test]
    fn test_shift_drag_edges_clamped() {
        let (mut s, bus) = slider(0, 100);
        let y = s.handle_rect().y + 1.0;
        let right = s.box_rect().w;

        s.pointer_pressed(0.0, y, Modifiers::SHIFT);
        s.pointer_moved(right, y);
        s.pointer_released(right, y);
        assert_eq!(s.get_selection(), (0, 100));

        s.pointer_pressed(right, y, Modifiers::SHIFT);
        s.pointer_moved(-50.0, y);
        s.pointer_released(-50.0, y);
        assert_eq!(s.get_selection(), (0, 100));
        assert_eq!(selections(&bus), vec![(0, 100), (0, 100)]);
    }

    /// Test: alt drag zooms into the padded range
    #[test]
    fn test_alt_drag_zooms() {
        let (mut s, _bus) = slider(0, 1000);
        let y = s.handle_rect().y + 1.0;
        let x0 = s.to_pos(100.0, true);
        let x1 = s.to_pos(200.0, true);

        s.pointer_pressed(x0, y, Modifiers::ALT);
        s.pointer_moved(x1, y);
        assert!(s.zoom_box().is_some());
        s.pointer_released(x1, y);

        assert!(s.zoom_box().is_none());
        // 100 frames padded to 110
        assert!((s.zoom_factor() - 1000.0 / 110.0).abs() < 1e-6);
        assert_eq!(s.value(), 0);
    }

    /// Test: plain drag moves the handle and reports pointer events
    #[test]
    fn test_plain_drag_moves_handle() {
        let (mut s, bus) = slider(0, 100);
        let y = s.handle_rect().y + 1.0;
        s.pointer_pressed(s.to_pos(30.0, true), y, Modifiers::NONE);
        s.pointer_moved(s.to_pos(70.0, true), y);
        s.pointer_released(s.to_pos(70.0, true), y);
        assert_eq!(s.value(), 70);

        let events = bus.poll();
        assert!(events.iter().any(|e| downcast_event::<MousePressedEvent>(e).is_some()));
        assert!(events.iter().any(|e| downcast_event::<MouseReleasedEvent>(e).is_some()));
        let moved = events.iter().filter(|e| downcast_event::<MouseMovedEvent>(e).is_some()).count();
        assert_eq!(moved, 2);
    }

    #[test]
    fn test_press_ignored_outside_or_disabled() {
        let (mut s, _bus) = slider(0, 100);
        s.pointer_pressed(-10.0, -10.0, Modifiers::NONE);
        assert_eq!(s.drag_state(), DragState::Idle);

        s.set_enabled(false);
        s.pointer_pressed(10.0, s.handle_rect().y + 1.0, Modifiers::NONE);
        assert_eq!(s.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_ctrl_press_is_passive() {
        let (mut s, _bus) = slider(0, 100);
        let y = s.handle_rect().y + 1.0;
        s.pointer_pressed(s.to_pos(50.0, true), y, Modifiers::CTRL);
        assert_eq!(s.drag_state(), DragState::Dragging(DragMode::Passive));
        s.pointer_moved(s.to_pos(80.0, true), y);
        s.pointer_released(s.to_pos(80.0, true), y);
        assert_eq!(s.value(), 0);
        assert_eq!(s.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_shift_double_click() {
        let (mut s, _bus) = slider(0, 100);
        s.add_mark(Mark::track(20, 30, 0, Rgb::BLACK));
        let y = s.handle_rect().y + 1.0;
        s.pointer_double_clicked(s.to_pos(25.0, false), y, Modifiers::SHIFT);
        assert_eq!(s.get_selection(), (20, 30));
    }

    #[test]
    fn test_keys_forwarded() {
        let (mut s, bus) = slider(0, 100);
        s.key_pressed(KeyInput::new("ArrowRight", Modifiers::NONE));
        s.key_released(KeyInput::new("ArrowRight", Modifiers::NONE));
        let events = bus.poll();
        assert_eq!(
            downcast_event::<KeyPressEvent>(&events[0]).map(|k| k.0.key.as_str()),
            Some("ArrowRight")
        );
        assert!(downcast_event::<KeyReleaseEvent>(&events[1]).is_some());
    }
}
