//! Variable-pin layout: side partitioning, offsets and parametric sizing.
//!
//! Pins are resolved to their physical side, bucketed per side and spread
//! evenly along it. For symbols whose size depends on the pin count the size
//! is computed first and offsets are always derived from that final size, so
//! a layout is a pure function of `(pins, mirror, sizing, spec)` and never
//! carries coordinates over from an earlier count.

use std::collections::BTreeMap;

use log::{debug, trace};

use pinline_core::{
    draw::AnchorPlacement,
    geometry::{Point, Size},
    identifier::Id,
    pin::{LogicalPin, PinDirection, ResolvedPin, resolve_pins},
    side::{MirrorState, Side},
};

use crate::config::LayoutConfig;

/// Spacing constants consumed by [`layout_pins`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSpec {
    margin: f32,
    pin_spacing: f32,
    bin_spacing: f32,
}

impl LayoutSpec {
    pub fn new(margin: f32, pin_spacing: f32, bin_spacing: f32) -> Self {
        Self {
            margin,
            pin_spacing,
            bin_spacing,
        }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Spacing between neighbouring pins on `side`.
    pub fn spacing_for(&self, side: Side) -> f32 {
        if side.is_vertical_edge() {
            self.pin_spacing
        } else {
            self.bin_spacing
        }
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for LayoutSpec {
    fn from(config: &LayoutConfig) -> Self {
        Self::new(config.margin(), config.pin_spacing(), config.bin_spacing())
    }
}

/// How a symbol's shell size is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolSizing {
    /// Same size regardless of pins.
    Fixed(Size),
    /// Grows with the busiest side, never below `min`.
    Parametric { min: Size },
}

/// Evenly spaced offsets for `count` slots along a side of `length`.
///
/// Slots are centered within the band left after removing `margin` from both
/// ends. If they do not fit at `spacing`, the spacing shrinks to
/// `band / count` so no slot ever leaves the band. When the band is exactly
/// `count * spacing` wide this reduces to `margin + (i + 0.5) * spacing`.
///
/// ```
/// use pinline::layout::side_offsets;
///
/// assert_eq!(side_offsets(1, 80.0, 10.0, 20.0), vec![40.0]);
/// assert_eq!(side_offsets(3, 80.0, 10.0, 20.0), vec![20.0, 40.0, 60.0]);
/// assert!(side_offsets(0, 80.0, 10.0, 20.0).is_empty());
/// ```
pub fn side_offsets(count: usize, length: f32, margin: f32, spacing: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }

    let length = length.max(0.0);
    let margin = margin.clamp(0.0, length / 2.0);
    let band = length - 2.0 * margin;
    let spacing = spacing.max(0.0).min(band / count as f32);
    let start = margin + (band - count as f32 * spacing) / 2.0;

    (0..count)
        .map(|i| (i as f32 + 0.5).mul_add(spacing, start))
        .collect()
}

/// A pin with its final position on the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPin {
    resolved: ResolvedPin,
    offset: f32,
    point: Point,
    placement: AnchorPlacement,
}

impl PlacedPin {
    pub fn id(&self) -> Id {
        self.resolved.id()
    }

    pub fn pin(&self) -> &LogicalPin {
        self.resolved.pin()
    }

    pub fn direction(&self) -> PinDirection {
        self.resolved.pin().direction()
    }

    pub fn physical_side(&self) -> Side {
        self.resolved.physical_side()
    }

    /// Distance along the physical side, in pixels.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Anchor point relative to the shell's top-left corner.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Side and percentage handed to the host diagram engine.
    pub fn placement(&self) -> AnchorPlacement {
        self.placement
    }
}

/// Result of [`layout_pins`]: shell size plus every placed pin.
///
/// Pins are ordered by physical side (Top, Right, Bottom, Left) and then by
/// position along that side.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolLayout {
    size: Size,
    mirror: MirrorState,
    pins: Vec<PlacedPin>,
}

impl SymbolLayout {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn mirror(&self) -> MirrorState {
        self.mirror
    }

    pub fn pins(&self) -> &[PlacedPin] {
        &self.pins
    }

    pub fn pins_on(&self, side: Side) -> impl Iterator<Item = &PlacedPin> {
        self.pins
            .iter()
            .filter(move |pin| pin.physical_side() == side)
    }

    pub fn count_on(&self, side: Side) -> usize {
        self.pins_on(side).count()
    }

    pub fn pin(&self, id: impl Into<Id>) -> Option<&PlacedPin> {
        let id = id.into();
        self.pins.iter().find(|pin| pin.id() == id)
    }
}

/// Pins sharing one position on a side.
type Slot = Vec<ResolvedPin>;

/// Groups resolved pins by physical side.
///
/// Within a side pins are stable-sorted by `order`, so declaration order
/// breaks ties and the physical side never influences the sequence. Pins
/// naming the same junction collapse into one slot.
fn partition(resolved: Vec<ResolvedPin>) -> BTreeMap<Side, Vec<Slot>> {
    let mut by_side: BTreeMap<Side, Vec<ResolvedPin>> = BTreeMap::new();
    for pin in resolved {
        by_side.entry(pin.physical_side()).or_default().push(pin);
    }

    by_side
        .into_iter()
        .map(|(side, mut pins)| {
            pins.sort_by_key(|pin| pin.pin().order());

            let mut slots: Vec<Slot> = Vec::new();
            for pin in pins {
                let shared = pin.pin().junction().and_then(|junction| {
                    slots
                        .iter_mut()
                        .find(|slot| slot[0].pin().junction() == Some(junction))
                });
                match shared {
                    Some(slot) => slot.push(pin),
                    None => slots.push(vec![pin]),
                }
            }
            (side, slots)
        })
        .collect()
}

fn resolve_size(
    sizing: SymbolSizing,
    slots: &BTreeMap<Side, Vec<Slot>>,
    spec: &LayoutSpec,
) -> Size {
    match sizing {
        SymbolSizing::Fixed(size) => size,
        SymbolSizing::Parametric { min } => {
            let count = |side: Side| slots.get(&side).map_or(0, Vec::len);
            let stacked = count(Side::Left).max(count(Side::Right));
            let spread = count(Side::Top).max(count(Side::Bottom));

            let height = (stacked as f32).mul_add(spec.spacing_for(Side::Left), 2.0 * spec.margin);
            let width = (spread as f32).mul_add(spec.spacing_for(Side::Top), 2.0 * spec.margin);
            min.max(Size::new(width, height))
        }
    }
}

/// Lays out `pins` for a node with the given mirror state.
///
/// # Examples
///
/// ```
/// use pinline::layout::{LayoutSpec, SymbolSizing, layout_pins};
/// use pinline_core::geometry::Size;
/// use pinline_core::pin::LogicalPin;
/// use pinline_core::side::{MirrorState, Side};
///
/// let pins: Vec<_> = (0..4)
///     .map(|i| LogicalPin::target(format!("in{i}").as_str(), Side::Left))
///     .collect();
/// let layout = layout_pins(
///     &pins,
///     MirrorState::default(),
///     SymbolSizing::Parametric { min: Size::new(60.0, 40.0) },
///     &LayoutSpec::default(),
/// );
///
/// // 2 * margin + 4 * pin_spacing
/// assert_eq!(layout.size().height(), 100.0);
/// assert_eq!(layout.pin("in0").unwrap().offset(), 20.0);
/// ```
pub fn layout_pins(
    pins: &[LogicalPin],
    mirror: MirrorState,
    sizing: SymbolSizing,
    spec: &LayoutSpec,
) -> SymbolLayout {
    let slots = partition(resolve_pins(pins, mirror));
    let size = resolve_size(sizing, &slots, spec);

    debug!(
        width = size.width(),
        height = size.height(),
        pins = pins.len(),
        flip_h = mirror.flip_horizontal(),
        flip_v = mirror.flip_vertical();
        "Pin layout computed"
    );

    let mut placed = Vec::with_capacity(pins.len());
    for (side, side_slots) in slots {
        let offsets = side_offsets(
            side_slots.len(),
            side.length(size),
            spec.margin(),
            spec.spacing_for(side),
        );
        for (slot, offset) in side_slots.into_iter().zip(offsets) {
            let point = side.point_at(size, offset);
            let placement = AnchorPlacement::from_offset(side, size, offset);
            for resolved in slot {
                trace!(
                    pin:% = resolved.id(),
                    side = side.name(),
                    offset = offset;
                    "Pin placed"
                );
                placed.push(PlacedPin {
                    resolved,
                    offset,
                    point,
                    placement,
                });
            }
        }
    }

    SymbolLayout {
        size,
        mirror,
        pins: placed,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn relay_pins() -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("86", Side::Left),
            LogicalPin::source("85", Side::Left),
            LogicalPin::target("30", Side::Top),
            LogicalPin::source("87", Side::Right),
        ]
    }

    fn ids_on(layout: &SymbolLayout, side: Side) -> Vec<String> {
        layout.pins_on(side).map(|pin| pin.id().to_string()).collect()
    }

    #[test]
    fn test_single_pin_sits_at_midpoint() {
        let offsets = side_offsets(1, 57.0, 10.0, 20.0);
        assert_approx_eq!(f32, offsets[0], 28.5);
    }

    #[test]
    fn test_offsets_shrink_to_fit_band() {
        // 5 pins at 20px need 100px but the band is only 60px
        let offsets = side_offsets(5, 80.0, 10.0, 20.0);
        assert_eq!(offsets.len(), 5);
        assert_approx_eq!(f32, offsets[0], 16.0);
        assert_approx_eq!(f32, offsets[4], 64.0);
    }

    #[test]
    fn test_margin_larger_than_side_is_clamped() {
        let offsets = side_offsets(2, 10.0, 20.0, 5.0);
        assert!(offsets.iter().all(|offset| (0.0..=10.0).contains(offset)));
    }

    #[test]
    fn test_fixed_size_is_kept() {
        let layout = layout_pins(
            &relay_pins(),
            MirrorState::default(),
            SymbolSizing::Fixed(Size::new(100.0, 80.0)),
            &LayoutSpec::default(),
        );
        assert_eq!(layout.size(), Size::new(100.0, 80.0));
        assert_eq!(layout.count_on(Side::Left), 2);
        assert_eq!(layout.count_on(Side::Top), 1);
    }

    #[test]
    fn test_relay_flip_horizontal_moves_left_pins_right() {
        let layout = layout_pins(
            &relay_pins(),
            MirrorState::new(true, false),
            SymbolSizing::Fixed(Size::new(100.0, 80.0)),
            &LayoutSpec::default(),
        );

        assert_eq!(ids_on(&layout, Side::Right), vec!["86", "85"]);
        assert_eq!(ids_on(&layout, Side::Left), vec!["87"]);
        assert_eq!(ids_on(&layout, Side::Top), vec!["30"]);

        let coil = layout.pin("86").unwrap();
        assert_approx_eq!(f32, coil.point().x(), 100.0);
        assert_eq!(coil.placement().side(), Side::Right);
    }

    #[test]
    fn test_mirroring_keeps_order_within_side() {
        let spec = LayoutSpec::default();
        let sizing = SymbolSizing::Fixed(Size::new(100.0, 80.0));
        let plain = layout_pins(&relay_pins(), MirrorState::default(), sizing, &spec);
        let flipped = layout_pins(&relay_pins(), MirrorState::new(true, true), sizing, &spec);

        assert_eq!(ids_on(&plain, Side::Left), ids_on(&flipped, Side::Right));
        assert_approx_eq!(
            f32,
            plain.pin("85").unwrap().offset(),
            flipped.pin("85").unwrap().offset()
        );
    }

    #[test]
    fn test_order_overrides_declaration() {
        let pins = vec![
            LogicalPin::target("late", Side::Left).with_order(2),
            LogicalPin::target("early", Side::Left).with_order(1),
            LogicalPin::target("tie", Side::Left).with_order(2),
        ];
        let layout = layout_pins(
            &pins,
            MirrorState::default(),
            SymbolSizing::Fixed(Size::new(60.0, 100.0)),
            &LayoutSpec::default(),
        );
        assert_eq!(ids_on(&layout, Side::Left), vec!["early", "late", "tie"]);
    }

    #[test]
    fn test_junction_pins_share_position() {
        let pins = vec![
            LogicalPin::target("left_in", Side::Left).with_junction("left"),
            LogicalPin::source("left_out", Side::Left).with_junction("left"),
        ];
        let layout = layout_pins(
            &pins,
            MirrorState::default(),
            SymbolSizing::Fixed(Size::new(40.0, 40.0)),
            &LayoutSpec::default(),
        );

        let input = layout.pin("left_in").unwrap();
        let output = layout.pin("left_out").unwrap();
        assert_eq!(input.point(), output.point());
        assert_approx_eq!(f32, input.placement().percent(), 50.0);
        assert_ne!(input.direction(), output.direction());
    }

    #[test]
    fn test_parametric_size_tracks_busiest_side() {
        let pins: Vec<LogicalPin> = (0..6)
            .map(|i| LogicalPin::target(Id::indexed("in", i), Side::Left))
            .chain((0..2).map(|i| LogicalPin::source(Id::indexed("out", i), Side::Right)))
            .chain([LogicalPin::target("vbat", Side::Top)])
            .collect();
        let layout = layout_pins(
            &pins,
            MirrorState::default(),
            SymbolSizing::Parametric {
                min: Size::new(120.0, 80.0),
            },
            &LayoutSpec::default(),
        );

        assert_approx_eq!(f32, layout.size().height(), 140.0);
        assert_approx_eq!(f32, layout.size().width(), 120.0);
        assert_approx_eq!(f32, layout.pin("in0").unwrap().offset(), 20.0);
        assert_approx_eq!(f32, layout.pin("in5").unwrap().offset(), 120.0);
    }

    #[test]
    fn test_empty_pin_set() {
        let layout = layout_pins(
            &[],
            MirrorState::default(),
            SymbolSizing::Parametric {
                min: Size::new(30.0, 30.0),
            },
            &LayoutSpec::default(),
        );
        assert!(layout.pins().is_empty());
        assert_eq!(layout.size(), Size::new(30.0, 30.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn mirror_strategy() -> impl Strategy<Value = MirrorState> {
        (any::<bool>(), any::<bool>()).prop_map(|(h, v)| MirrorState::new(h, v))
    }

    fn left_pins(count: usize) -> Vec<LogicalPin> {
        (0..count)
            .map(|i| LogicalPin::target(Id::indexed("in", i), Side::Left))
            .collect()
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Offsets are strictly increasing, evenly spaced and inside the side.
    fn check_offsets_even(
        count: usize,
        length: f32,
        margin: f32,
        spacing: f32,
    ) -> Result<(), TestCaseError> {
        let offsets = side_offsets(count, length, margin, spacing);
        prop_assert_eq!(offsets.len(), count);

        for offset in &offsets {
            prop_assert!(*offset >= 0.0 && *offset <= length);
        }
        if count >= 2 {
            let step = offsets[1] - offsets[0];
            prop_assert!(step > 0.0);
            for pair in offsets.windows(2) {
                prop_assert!(approx_eq!(f32, pair[1] - pair[0], step, epsilon = 0.01));
            }
        }
        Ok(())
    }

    /// A single slot always lands on the side's midpoint.
    fn check_single_offset_is_midpoint(
        length: f32,
        margin: f32,
        spacing: f32,
    ) -> Result<(), TestCaseError> {
        let offsets = side_offsets(1, length, margin, spacing);
        prop_assert!(approx_eq!(f32, offsets[0], length / 2.0, epsilon = 0.01));
        Ok(())
    }

    /// Re-laying out after a count change equals a fresh layout at the new count.
    fn check_count_change_recomputes(
        from: usize,
        to: usize,
        mirror: MirrorState,
    ) -> Result<(), TestCaseError> {
        let spec = LayoutSpec::default();
        let sizing = SymbolSizing::Parametric {
            min: Size::new(60.0, 40.0),
        };

        let before = layout_pins(&left_pins(from), mirror, sizing, &spec);
        let after = layout_pins(&left_pins(to), mirror, sizing, &spec);
        let fresh = layout_pins(&left_pins(to), mirror, sizing, &spec);

        prop_assert_eq!(&after, &fresh);
        prop_assert_eq!(after.pins().len(), to);

        let expected_height = (2.0 * spec.margin() + to as f32 * 20.0).max(40.0);
        prop_assert!(approx_eq!(f32, after.size().height(), expected_height, epsilon = 0.01));
        if from != to {
            prop_assert_ne!(before.size(), after.size());
        }
        Ok(())
    }

    /// Mirroring never reorders pins along a side.
    fn check_mirror_keeps_sequence(count: usize, mirror: MirrorState) -> Result<(), TestCaseError> {
        let layout = layout_pins(
            &left_pins(count),
            mirror,
            SymbolSizing::Parametric {
                min: Size::new(60.0, 40.0),
            },
            &LayoutSpec::default(),
        );
        let side = mirror.resolve(Side::Left);
        let ids: Vec<Id> = layout.pins_on(side).map(PlacedPin::id).collect();
        let expected: Vec<Id> = (0..count).map(|i| Id::indexed("in", i)).collect();
        prop_assert_eq!(ids, expected);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn offsets_even(
            count in 0usize..16,
            length in 50.0f32..400.0,
            margin in 0.0f32..20.0,
            spacing in 1.0f32..40.0,
        ) {
            check_offsets_even(count, length, margin, spacing)?;
        }

        #[test]
        fn single_offset_is_midpoint(
            length in 1.0f32..400.0,
            margin in 0.0f32..50.0,
            spacing in 0.0f32..40.0,
        ) {
            check_single_offset_is_midpoint(length, margin, spacing)?;
        }

        #[test]
        fn count_change_recomputes(
            from in 1usize..13,
            to in 1usize..13,
            mirror in mirror_strategy()
        ) {
            check_count_change_recomputes(from, to, mirror)?;
        }

        #[test]
        fn mirror_keeps_sequence(count in 0usize..13, mirror in mirror_strategy()) {
            check_mirror_keeps_sequence(count, mirror)?;
        }
    }
}
