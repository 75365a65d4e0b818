//! Pin layout for schematic symbols.
//!
//! [`layout_pins`] turns a symbol's logical pins and the node's mirror state
//! into a [`SymbolLayout`]: the shell size and a placed anchor for every pin.
//! Count-parametrized symbols clamp their counts with [`CountRange`] before
//! generating pins, and harness bundles derive their fan-in guides with
//! [`fan_lines`].

mod bundle;
mod count;
mod pins;

pub use bundle::{FanLine, TrunkBand, fan_lines, fan_trunk_y};
pub use count::CountRange;
pub use pins::{LayoutSpec, PlacedPin, SymbolLayout, SymbolSizing, layout_pins, side_offsets};
