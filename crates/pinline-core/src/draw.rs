//! Drawable building blocks for schematic symbols.
//!
//! Every drawable implements [`Drawable`]: it renders into a
//! [`LayeredOutput`] at a given position and reports its size. Layers are
//! ordered once, at export time, so drawables can be composed in any order.

mod layer;
mod pin_row;
mod shell;
mod stroke;
mod terminal;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use pin_row::{PinRow, caption_placement};
pub use shell::{ShellStyle, SymbolShell};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
pub use terminal::{AnchorPlacement, TerminalAnchor, TerminalStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable with `position` as its center (or, for text,
    /// its anchor point).
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
