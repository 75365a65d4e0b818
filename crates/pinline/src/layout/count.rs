//! Supported ranges for count-parametrized pin sets.

use log::warn;

/// Inclusive range of pin counts a symbol supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    min: usize,
    max: usize,
}

impl CountRange {
    /// Up to twelve pins, used by standard ECUs and harness bundles.
    pub const STANDARD: Self = Self::new(1, 12);

    /// Up to eight pins, used by the programmable ECU.
    pub const COMPACT: Self = Self::new(1, 8);

    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn min(self) -> usize {
        self.min
    }

    pub fn max(self) -> usize {
        self.max
    }

    /// Clamps a requested count into this range.
    ///
    /// Requests may come straight from user input and can be negative.
    /// `what` names the parameter in the warning logged when clamping occurs.
    ///
    /// ```
    /// use pinline::layout::CountRange;
    ///
    /// assert_eq!(CountRange::STANDARD.clamp(15, "inputs"), 12);
    /// assert_eq!(CountRange::STANDARD.clamp(-3, "inputs"), 1);
    /// assert_eq!(CountRange::STANDARD.clamp(5, "inputs"), 5);
    /// ```
    pub fn clamp(self, requested: i64, what: &str) -> usize {
        let min = i64::try_from(self.min).unwrap_or(i64::MAX);
        let max = i64::try_from(self.max).unwrap_or(i64::MAX);
        let clamped = requested.clamp(min, max);
        if clamped != requested {
            warn!(
                parameter = what,
                requested = requested,
                clamped = clamped,
                min = self.min,
                max = self.max;
                "Pin count out of range, clamping"
            );
        }
        usize::try_from(clamped).unwrap_or(self.min)
    }
}
