//! Mark visuals: the side-table from mark identity to on-screen footprint.
//!
//! The slider computes geometry; a [`MarkBackend`] owns whatever the renderer
//! needs per mark. [`MarkVisuals`] is the retained default that the egui
//! painter reads every frame; a scene-graph or terminal backend can implement
//! the same three calls.

use std::collections::HashMap;

use super::mark::{MarkId, Rgb};

/// Axis-aligned rectangle in scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl SceneRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Everything a backend needs to draw one mark.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkVisual {
    pub rect: SceneRect,
    pub color: Rgb,
    pub filled: bool,
    pub z: u8,
    /// Header label (ticks only), anchored at `label_x`
    pub label: Option<String>,
    pub label_x: f32,
}

pub trait MarkBackend {
    fn create(&mut self, id: MarkId, visual: &MarkVisual);
    fn reposition(&mut self, id: MarkId, visual: &MarkVisual);
    fn destroy(&mut self, id: MarkId);
}

/// Retained visual table, one entry per live mark.
#[derive(Clone, Debug, Default)]
pub struct MarkVisuals {
    items: HashMap<MarkId, MarkVisual>,
}

impl MarkVisuals {
    pub fn get(&self, id: MarkId) -> Option<&MarkVisual> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visuals sorted back to front.
    pub fn by_z(&self) -> Vec<&MarkVisual> {
        let mut all: Vec<&MarkVisual> = self.items.values().collect();
        all.sort_by_key(|v| v.z);
        all
    }
}

impl MarkBackend for MarkVisuals {
    fn create(&mut self, id: MarkId, visual: &MarkVisual) {
        self.items.insert(id, visual.clone());
    }

    fn reposition(&mut self, id: MarkId, visual: &MarkVisual) {
        if let Some(item) = self.items.get_mut(&id) {
            *item = visual.clone();
        }
    }

    fn destroy(&mut self, id: MarkId) {
        self.items.remove(&id);
    }
}
