//! Header sparkline: a per-frame series max-pooled to the slider's pixel width.

use std::collections::BTreeMap;

/// Header sparkline geometry input.
#[derive(Clone, Copy, Debug)]
pub struct HeaderGeometry {
    pub slider_width: f32,
    /// Full header height (labels + graph); the graph baseline sits here.
    pub header_height: f32,
    pub graph_height: f32,
}

/// Max-pool `series` into buckets of `step` frames.
///
/// Returns `(step, pooled)`; `pooled[i]` covers frames `i*step .. (i+1)*step`.
/// Frames at or past the last full bucket, and negative frames, are dropped.
pub fn pool_series(series: &BTreeMap<i64, f64>, slider_width: f32) -> (usize, Vec<f64>) {
    let Some((&frame_max, _)) = series.last_key_value() else {
        return (1, Vec::new());
    };
    if frame_max <= 0 {
        return (1, Vec::new());
    }
    let frame_max = frame_max as usize;
    let width = (slider_width as usize).max(1);
    let step = (frame_max / width).max(1);
    let count = frame_max / step * step;

    let mut sampled = vec![0.0_f64; count];
    for (&key, &val) in series {
        if key >= 0 && (key as usize) < count {
            sampled[key as usize] = val;
        }
    }

    let pooled = sampled
        .chunks(step)
        .map(|chunk| chunk.iter().copied().fold(f64::MIN, f64::max))
        .collect();
    (step, pooled)
}

/// Closed polyline for the sparkline in scene coordinates.
///
/// `to_pos` maps a frame to its centred x position. Empty when there is
/// nothing to draw.
pub fn header_polyline(
    series: &BTreeMap<i64, f64>,
    geom: HeaderGeometry,
    to_pos: impl Fn(i64) -> f32,
) -> Vec<[f32; 2]> {
    if series.is_empty() || geom.header_height <= 0.0 {
        return Vec::new();
    }
    let (step, pooled) = pool_series(series, geom.slider_width);
    if pooled.is_empty() {
        return Vec::new();
    }

    let series_min = pooled.iter().copied().fold(f64::MAX, f64::min) - 1.0;
    let series_max = pooled.iter().copied().fold(f64::MIN, f64::max);
    let scale = geom.graph_height as f64 / (series_max - series_min);
    let to_y = |val: f64| (geom.header_height as f64 - (val - series_min) * scale) as f32;

    let mut points = Vec::with_capacity(pooled.len() + 2);
    points.push([to_pos(0), to_y(series_min)]);
    for (i, &val) in pooled.iter().enumerate() {
        points.push([to_pos((i * step) as i64), to_y(val)]);
    }
    let last_frame = ((pooled.len() - 1) * step) as i64;
    points.push([to_pos(last_frame + 1), to_y(series_min)]);
    points
}
