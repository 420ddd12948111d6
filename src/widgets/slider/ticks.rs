//! Automatic tick marks, density-adjusted to the visible value range.

/// Smallest power-of-ten step (>= 10) keeping at most `max_visible` ticks.
pub fn tick_step(visible_range: i64, max_visible: i64) -> i64 {
    let mut step: i64 = 10;
    while visible_range.div_euclid(step) > max_visible {
        step = step.saturating_mul(10);
        if step == i64::MAX {
            break;
        }
    }
    step
}

/// Tick positions `min + step - 1, min + 2*step - 1, ...` below `max`.
pub fn tick_positions(min: i64, max: i64, step: i64) -> Vec<i64> {
    let step = step.max(1);
    let mut out = Vec::new();
    let mut pos = min + step - 1;
    while pos < max {
        out.push(pos);
        pos += step;
    }
    out
}

/// Header label for a tick: 1-based frame number, `%g` style.
///
/// Six significant digits; scientific notation from one million up.
pub fn tick_label(frame: i64) -> String {
    let n = frame + 1;
    if n.unsigned_abs() < 1_000_000 {
        return n.to_string();
    }
    let sci = format!("{:.5e}", n as f64);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: step coarsens by powers of ten as the view widens
    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(20, 24), 10);
        assert_eq!(tick_step(249, 24), 10);
        assert_eq!(tick_step(250, 24), 100);
        assert_eq!(tick_step(2_499, 24), 100);
        assert_eq!(tick_step(25_000, 24), 10_000);
        assert_eq!(tick_step(-5, 24), 10);
    }

    #[test]
    fn test_tick_count_bounded() {
        for range in [0_i64, 9, 99, 240, 241, 1_000, 123_456, 9_999_999] {
            let step = tick_step(range, 24);
            let ticks = tick_positions(0, range, step);
            assert!(ticks.len() <= 25, "range {} gave {} ticks", range, ticks.len());
        }
    }

    #[test]
    fn test_tick_positions() {
        assert_eq!(tick_positions(0, 20, 10), vec![9, 19]);
        assert_eq!(tick_positions(0, 19, 10), vec![9]);
        assert_eq!(tick_positions(5, 40, 10), vec![14, 24, 34]);
        assert!(tick_positions(0, 5, 10).is_empty());
    }

    #[test]
    fn test_tick_label() {
        assert_eq!(tick_label(9), "10");
        assert_eq!(tick_label(999_998), "999999");
        assert_eq!(tick_label(999_999), "1e+06");
        assert_eq!(tick_label(1_234_566), "1.23457e+06");
    }
}
