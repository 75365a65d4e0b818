//! Fan geometry for harness bundles.
//!
//! Each wire of a bundle runs from its pin row to a point inside a
//! fixed-thickness trunk band. Wire `i` of `n` enters the trunk at a height
//! interpolated linearly across the band, with the denominator floored at 1
//! so a single wire enters at the top of the band.

use pinline_core::geometry::Point;

/// Height at which wire `index` of `count` enters the trunk band.
///
/// ```
/// use pinline::layout::fan_trunk_y;
///
/// assert_eq!(fan_trunk_y(0, 1, 40.0, 48.0), 40.0);
/// assert_eq!(fan_trunk_y(2, 3, 40.0, 48.0), 48.0);
/// ```
pub fn fan_trunk_y(index: usize, count: usize, trunk_top: f32, trunk_bottom: f32) -> f32 {
    let denominator = count.saturating_sub(1).max(1) as f32;
    (trunk_bottom - trunk_top).mul_add(index as f32 / denominator, trunk_top)
}

/// Vertical extent of the trunk band, centered on `center_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrunkBand {
    top: f32,
    bottom: f32,
}

impl TrunkBand {
    pub fn centered(center_y: f32, thickness: f32) -> Self {
        let half = thickness.max(0.0) / 2.0;
        Self {
            top: center_y - half,
            bottom: center_y + half,
        }
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }
}

/// Straight segment from a wire's row to its entry point on the trunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanLine {
    start: Point,
    end: Point,
}

impl FanLine {
    /// Point on the wire's row.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Entry point on the trunk.
    pub fn end(&self) -> Point {
        self.end
    }
}

/// Fan lines from each wire row to the trunk entry at `trunk_x`.
///
/// `rows` are the wire anchor points in layout order.
pub fn fan_lines(rows: &[Point], trunk_x: f32, band: TrunkBand) -> Vec<FanLine> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| FanLine {
            start: *row,
            end: Point::new(
                trunk_x,
                fan_trunk_y(index, rows.len(), band.top(), band.bottom()),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_single_wire_enters_at_trunk_top() {
        assert_approx_eq!(f32, fan_trunk_y(0, 1, 36.0, 44.0), 36.0);
    }

    #[test]
    fn test_zero_count_does_not_divide_by_zero() {
        assert_approx_eq!(f32, fan_trunk_y(0, 0, 10.0, 20.0), 10.0);
    }

    #[test]
    fn test_wires_spread_across_band() {
        let ys: Vec<f32> = (0..5).map(|i| fan_trunk_y(i, 5, 0.0, 8.0)).collect();
        assert_approx_eq!(f32, ys[0], 0.0);
        assert_approx_eq!(f32, ys[2], 4.0);
        assert_approx_eq!(f32, ys[4], 8.0);
    }

    #[test]
    fn test_trunk_band_centered() {
        let band = TrunkBand::centered(50.0, 8.0);
        assert_approx_eq!(f32, band.top(), 46.0);
        assert_approx_eq!(f32, band.bottom(), 54.0);
    }

    #[test]
    fn test_fan_lines_keep_row_order() {
        let rows = [Point::new(0.0, 20.0), Point::new(0.0, 40.0), Point::new(0.0, 60.0)];
        let lines = fan_lines(&rows, 30.0, TrunkBand::centered(40.0, 8.0));

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].start(), rows[0]);
        assert_approx_eq!(f32, lines[0].end().y(), 36.0);
        assert_approx_eq!(f32, lines[2].end().y(), 44.0);
        assert!(lines.iter().all(|line| line.end().x() == 30.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Property Test Functions
    // ===================

    /// Entry points stay inside the band and are monotonic in the wire index.
    fn check_entries_within_band(
        count: usize,
        top: f32,
        thickness: f32,
    ) -> Result<(), TestCaseError> {
        let bottom = top + thickness;
        let mut previous = f32::NEG_INFINITY;
        for index in 0..count {
            let y = fan_trunk_y(index, count, top, bottom);
            prop_assert!(y.is_finite());
            prop_assert!(y >= top - 0.001 && y <= bottom + 0.001);
            prop_assert!(y >= previous);
            previous = y;
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn entries_within_band(
            count in 1usize..13,
            top in -100.0f32..100.0,
            thickness in 0.0f32..20.0
        ) {
            check_entries_within_band(count, top, thickness)?;
        }
    }
}
