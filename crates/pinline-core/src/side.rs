//! Logical-to-physical side mapping.
//!
//! A symbol declares each terminal on a *logical* side. The node's
//! [`MirrorState`] decides the *physical* side it appears on screen:
//! a horizontal flip exchanges Left and Right, a vertical flip exchanges
//! Top and Bottom. The two exchanges act on disjoint sides, so they commute.
//!
//! [`rotate_side`] is the older rotation-based mapping. It is kept for
//! single-terminal symbols and agrees with the flip mapping at 0° and 180°.

use std::fmt;

use crate::geometry::{Point, Size};

/// One of the four edges of a symbol shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in clockwise order starting at the top.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Returns the side across the shell from this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns true for Left and Right, whose pins are stacked vertically.
    pub fn is_vertical_edge(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns the lowercase name used in logs and SVG attributes.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Length of this side for a shell of the given size.
    pub fn length(self, size: Size) -> f32 {
        if self.is_vertical_edge() {
            size.height()
        } else {
            size.width()
        }
    }

    /// Point on this side of a shell whose top-left corner is the origin.
    ///
    /// `offset` is measured along the side: left-to-right on Top/Bottom,
    /// top-to-bottom on Left/Right.
    pub fn point_at(self, size: Size, offset: f32) -> Point {
        match self {
            Self::Top => Point::new(offset, 0.0),
            Self::Right => Point::new(size.width(), offset),
            Self::Bottom => Point::new(offset, size.height()),
            Self::Left => Point::new(0.0, offset),
        }
    }

    /// Unit vector pointing out of the shell through this side.
    pub fn outward(self) -> Point {
        match self {
            Self::Top => Point::new(0.0, -1.0),
            Self::Right => Point::new(1.0, 0.0),
            Self::Bottom => Point::new(0.0, 1.0),
            Self::Left => Point::new(-1.0, 0.0),
        }
    }

    fn clockwise(self) -> Self {
        match self {
            Self::Top => Self::Right,
            Self::Right => Self::Bottom,
            Self::Bottom => Self::Left,
            Self::Left => Self::Top,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Horizontal and vertical flip flags owned by a node.
///
/// The flags are independent; all four combinations are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MirrorState {
    flip_horizontal: bool,
    flip_vertical: bool,
}

impl MirrorState {
    pub fn new(flip_horizontal: bool, flip_vertical: bool) -> Self {
        Self {
            flip_horizontal,
            flip_vertical,
        }
    }

    pub fn flip_horizontal(self) -> bool {
        self.flip_horizontal
    }

    pub fn flip_vertical(self) -> bool {
        self.flip_vertical
    }

    /// Returns a copy with the horizontal flag inverted.
    pub fn toggle_horizontal(self) -> Self {
        Self {
            flip_horizontal: !self.flip_horizontal,
            ..self
        }
    }

    /// Returns a copy with the vertical flag inverted.
    pub fn toggle_vertical(self) -> Self {
        Self {
            flip_vertical: !self.flip_vertical,
            ..self
        }
    }

    /// Returns true when neither flag is set.
    pub fn is_identity(self) -> bool {
        !self.flip_horizontal && !self.flip_vertical
    }

    /// Resolves a logical side under this mirror state.
    pub fn resolve(self, side: Side) -> Side {
        map_side_by_flip(side, self.flip_horizontal, self.flip_vertical)
    }
}

/// Maps a logical side to the physical side under the given flips.
///
/// # Examples
///
/// ```
/// use pinline_core::side::{Side, map_side_by_flip};
///
/// assert_eq!(map_side_by_flip(Side::Left, true, false), Side::Right);
/// assert_eq!(map_side_by_flip(Side::Top, true, false), Side::Top);
/// assert_eq!(map_side_by_flip(Side::Top, false, true), Side::Bottom);
/// ```
pub fn map_side_by_flip(side: Side, flip_h: bool, flip_v: bool) -> Side {
    let side = match side {
        Side::Left | Side::Right if flip_h => side.opposite(),
        _ => side,
    };
    match side {
        Side::Top | Side::Bottom if flip_v => side.opposite(),
        _ => side,
    }
}

/// Maps a side through a clockwise rotation.
///
/// The angle is normalized modulo 360 first. Only multiples of 90° are
/// supported; any other angle returns `side` unchanged.
///
/// # Examples
///
/// ```
/// use pinline_core::side::{Side, rotate_side};
///
/// assert_eq!(rotate_side(Side::Top, 90), Side::Right);
/// assert_eq!(rotate_side(Side::Top, -90), Side::Left);
/// assert_eq!(rotate_side(Side::Top, 45), Side::Top);
/// ```
pub fn rotate_side(side: Side, angle_degrees: i32) -> Side {
    let steps = match angle_degrees.rem_euclid(360) {
        0 => 0,
        90 => 1,
        180 => 2,
        270 => 3,
        _ => return side,
    };
    (0..steps).fold(side, |side, _| side.clockwise())
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn side_strategy() -> impl Strategy<Value = Side> {
        prop_oneof![
            Just(Side::Top),
            Just(Side::Right),
            Just(Side::Bottom),
            Just(Side::Left),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_no_flip_is_identity(side: Side) -> Result<(), TestCaseError> {
        prop_assert_eq!(map_side_by_flip(side, false, false), side);
        Ok(())
    }

    /// Applying the same flips twice returns the original side.
    fn check_flip_is_self_inverse(side: Side, h: bool, v: bool) -> Result<(), TestCaseError> {
        prop_assert_eq!(map_side_by_flip(map_side_by_flip(side, h, v), h, v), side);
        Ok(())
    }

    /// Horizontal and vertical exchanges commute.
    fn check_flips_commute(side: Side) -> Result<(), TestCaseError> {
        let h_then_v = map_side_by_flip(map_side_by_flip(side, true, false), false, true);
        let v_then_h = map_side_by_flip(map_side_by_flip(side, false, true), true, false);
        prop_assert_eq!(h_then_v, v_then_h);
        prop_assert_eq!(h_then_v, map_side_by_flip(side, true, true));
        Ok(())
    }

    /// A half turn equals flipping both axes.
    fn check_half_turn_matches_double_flip(side: Side) -> Result<(), TestCaseError> {
        prop_assert_eq!(map_side_by_flip(side, true, true), rotate_side(side, 180));
        Ok(())
    }

    /// Four quarter turns are the identity for any starting angle.
    fn check_full_turn_is_identity(side: Side, turns: i32) -> Result<(), TestCaseError> {
        let mut rotated = side;
        for _ in 0..4 {
            rotated = rotate_side(rotated, 90 * turns);
        }
        prop_assert_eq!(rotated, side);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn no_flip_is_identity(side in side_strategy()) {
            check_no_flip_is_identity(side)?;
        }

        #[test]
        fn flip_is_self_inverse(side in side_strategy(), h in any::<bool>(), v in any::<bool>()) {
            check_flip_is_self_inverse(side, h, v)?;
        }

        #[test]
        fn flips_commute(side in side_strategy()) {
            check_flips_commute(side)?;
        }

        #[test]
        fn half_turn_matches_double_flip(side in side_strategy()) {
            check_half_turn_matches_double_flip(side)?;
        }

        #[test]
        fn full_turn_is_identity(side in side_strategy(), turns in -8i32..8) {
            check_full_turn_is_identity(side, turns)?;
        }
    }
}
