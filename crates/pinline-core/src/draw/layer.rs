//! Z-ordered layers for symbol SVG output.
//!
//! Drawables push nodes tagged with a [`RenderLayer`] into a
//! [`LayeredOutput`]. Rendering sorts them by layer and emits one
//! `<g data-layer="...">` group per non-empty layer, so terminals always sit
//! above artwork and labels above terminals regardless of push order.
//!
//! ```
//! use pinline_core::draw::{LayeredOutput, RenderLayer};
//! use svg::node::element::{Circle, Rectangle};
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Terminal, Box::new(Circle::new()));
//! output.add_to_layer(RenderLayer::Shell, Box::new(Rectangle::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Boxed SVG node.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Optional fill behind the whole symbol.
    Background,
    /// Selection glow, drawn under the shell border.
    Selection,
    /// Shell border and frame.
    Shell,
    /// Symbol illustration; the only layer affected by mirroring.
    Artwork,
    /// Terminal dots and pin stubs.
    Terminal,
    /// Live readouts (voltages, rpm).
    Readout,
    /// Pin labels and titles.
    Text,
}

impl RenderLayer {
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Selection => "selection",
            Self::Shell => "shell",
            Self::Artwork => "artwork",
            Self::Terminal => "terminal",
            Self::Readout => "readout",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` to `layer`, after anything already on that layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves every node of `other` into this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes pushed to `layer`.
    pub fn count_in_layer(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Consumes the output and returns one group per non-empty layer,
    /// bottom layer first. Push order is kept within a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        groups.push(Box::new(group));
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            groups.push(Box::new(group));
        }
        groups
    }
}
