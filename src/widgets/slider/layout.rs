//! Track lane layout: packs track rows into stacked columns.
//!
//! The first column holds `max_stacked` rows. Every later column reserves its
//! top `skip_count` row slots for other UI, so it holds
//! `max_stacked - skip_count` rows.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackLayout {
    pub track_height: f32,
    pub max_stacked: usize,
    pub skip_count: usize,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            track_height: 5.0,
            max_stacked: 120,
            skip_count: 10,
        }
    }
}

impl TrackLayout {
    fn rows_per_later_col(&self) -> usize {
        self.max_stacked.saturating_sub(self.skip_count).max(1)
    }

    /// Map a raw track row to `(column, row within column)`.
    pub fn row_to_col_row(&self, row: usize) -> (usize, usize) {
        if row < self.max_stacked {
            return (0, row);
        }
        let segment = row - self.max_stacked;
        let per_col = self.rows_per_later_col();
        (1 + segment / per_col, segment % per_col)
    }

    /// Vertical pixel offset of a lane below the top of the mark area.
    pub fn col_row_to_vertical_offset(&self, col: usize, row: usize) -> f32 {
        if col == 0 {
            row as f32 * self.track_height
        } else {
            (self.skip_count as f32 * self.track_height) + (row as f32 * self.track_height)
        }
    }

    pub fn row_vertical_offset(&self, row: usize) -> f32 {
        let (col, row) = self.row_to_col_row(row);
        self.col_row_to_vertical_offset(col, row)
    }

    /// True where a column separator belongs (row 0 of any column).
    pub fn is_new_column_start(&self, row: usize) -> bool {
        self.row_to_col_row(row).1 == 0
    }
}
