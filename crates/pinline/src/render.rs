//! Symbol rendering.
//!
//! [`SymbolRenderer`] turns a symbol and the host's view of one node into
//! layered SVG. Only the artwork is drawn inside the mirror transform;
//! terminals, pin captions, readouts and the title are placed in the
//! physical frame so text is never drawn mirrored.
//!
//! Each render also syncs the node with the [`AnchorRegistry`] and flushes
//! pending geometry invalidations to the host.

use log::{info, trace};
use svg::node::element as svg_element;

use pinline_core::{
    draw::{
        Drawable, LayeredOutput, PinRow, RenderLayer, ShellStyle, SvgNode, SymbolShell,
        TerminalAnchor, TerminalStyle, Text, TextDefinition,
    },
    geometry::{Bounds, Point},
    identifier::{Id, TerminalKey},
    side::MirrorState,
    state::NodeVisualState,
};

use crate::{
    anchor::{AnchorRegistry, GeometrySink},
    config::{AppConfig, LayoutConfig},
    error::PinlineError,
    export,
    layout::{LayoutSpec, SymbolLayout, layout_pins},
    symbol::{PinPresentation, Symbol, SymbolContext, SymbolKind},
};

/// Distance between the bottom of the shell and the title's center line.
const TITLE_GAP: f32 = 12.0;

/// The host's view of one node: identity, orientation, selection and the
/// solver's latest values.
#[derive(Debug, Clone)]
pub struct NodeView {
    id: Id,
    mirror: MirrorState,
    selected: bool,
    state: NodeVisualState,
}

impl NodeView {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            mirror: MirrorState::default(),
            selected: false,
            state: NodeVisualState::new(),
        }
    }

    pub fn with_mirror(mut self, mirror: MirrorState) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_state(mut self, state: NodeVisualState) -> Self {
        self.state = state;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn mirror(&self) -> MirrorState {
        self.mirror
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn state(&self) -> &NodeVisualState {
        &self.state
    }

    pub fn set_mirror(&mut self, mirror: MirrorState) {
        self.mirror = mirror;
    }

    pub fn state_mut(&mut self) -> &mut NodeVisualState {
        &mut self.state
    }
}

/// Output of one render: the pin layout plus layered SVG in the symbol's
/// local frame.
#[derive(Debug)]
pub struct RenderedSymbol {
    node: Id,
    kind: SymbolKind,
    layout: SymbolLayout,
    output: LayeredOutput,
    bounds: Bounds,
    net_label: Option<String>,
}

impl RenderedSymbol {
    pub fn node(&self) -> Id {
        self.node
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn layout(&self) -> &SymbolLayout {
        &self.layout
    }

    pub fn output(&self) -> &LayeredOutput {
        &self.output
    }

    /// Area covered by everything drawn, the shell at the origin.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn net_label(&self) -> Option<&str> {
        self.net_label.as_deref()
    }

    /// Consumes the output and returns the symbol's root group.
    pub fn into_group(self) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("data-node", self.node.to_string())
            .set("data-kind", self.kind.name());
        if let Some(label) = &self.net_label {
            group = group.set("data-net-label", label.as_str());
        }
        self.output
            .render()
            .into_iter()
            .fold(group, |group, node| group.add(node))
    }
}

/// Renders symbols with one configuration and one anchor registry.
#[derive(Debug)]
pub struct SymbolRenderer {
    layout_config: LayoutConfig,
    spec: LayoutSpec,
    shell_style: ShellStyle,
    terminal_style: TerminalStyle,
    text: TextDefinition,
    readout: TextDefinition,
    anchors: AnchorRegistry,
}

impl SymbolRenderer {
    /// Builds a renderer from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PinlineError::Config`] if a configured color does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, PinlineError> {
        let style = config.style();

        let mut shell_style = ShellStyle::new();
        shell_style.set_background(style.background_color()?);
        shell_style.set_selection_color(style.selection_color()?);

        let mut text = TextDefinition::new();
        text.set_font_size(style.font_size());
        let readout = TextDefinition::readout(style.font_size().saturating_sub(1).max(1));

        Ok(Self {
            layout_config: config.layout().clone(),
            spec: LayoutSpec::from(config.layout()),
            shell_style,
            terminal_style: TerminalStyle::new(style.terminal_radius()),
            text,
            readout,
            anchors: AnchorRegistry::new(),
        })
    }

    pub fn anchors(&self) -> &AnchorRegistry {
        &self.anchors
    }

    /// Forgets `node`, e.g. after the host removed it.
    pub fn unmount(&mut self, node: Id) {
        self.anchors.unmount(node);
    }

    /// Renders `symbol` as seen by `view`.
    ///
    /// Geometry invalidations caused by this render are delivered to `sink`
    /// before returning.
    pub fn render(
        &mut self,
        view: &NodeView,
        symbol: &dyn Symbol,
        sink: &mut dyn GeometrySink,
    ) -> RenderedSymbol {
        let pins = symbol.pins();
        self.anchors.sync(view.id, view.mirror, &pins);

        let layout = layout_pins(&pins, view.mirror, symbol.sizing(), &self.spec);
        let size = layout.size();
        let ctx = SymbolContext::new(
            &layout,
            &view.state,
            &self.layout_config,
            &self.text,
            &self.readout,
        );
        let center = ctx.center();

        let shell = SymbolShell::new(&self.shell_style, size).with_selected(view.selected);
        let mut output = shell.render_to_layers(center);
        let mut bounds = center.to_bounds(size);

        let artwork = symbol.artwork(&ctx);
        if !artwork.is_empty() {
            output.add_to_layer(
                RenderLayer::Artwork,
                Box::new(artwork_group(artwork, view.mirror, &ctx)),
            );
        }

        let (overlay, overlay_bounds) = symbol.overlay(&ctx).into_parts();
        output.merge(overlay);
        if let Some(overlay_bounds) = overlay_bounds {
            bounds = bounds.merge(&overlay_bounds);
        }

        let presentation = symbol.pin_presentation();
        for placed in layout.pins() {
            let anchor = TerminalAnchor::new(&self.terminal_style)
                .with_tone(placed.pin().tone())
                .with_terminal(TerminalKey::new(view.id, placed.id()), placed.direction())
                .with_placement(placed.placement());
            let point = placed.point();

            match presentation {
                PinPresentation::Terminals => {
                    bounds = bounds.merge(&point.to_bounds(anchor.size()));
                    output.merge(anchor.render_to_layers(point));
                }
                PinPresentation::Rows => {
                    let caption = match placed.pin().label() {
                        "" => placed.id().as_string(),
                        label => label.to_string(),
                    };
                    let row = PinRow::new(anchor, &caption, &self.text, placed.physical_side());
                    bounds = bounds.merge(&row.bounds_at(point));
                    output.merge(row.render_to_layers(point));
                }
            }
        }

        if let Some(title) = symbol.title() {
            let text = Text::new(&self.text, &title);
            let point = Point::new(center.x(), size.height() + TITLE_GAP);
            bounds = bounds.merge(&text.bounds_at(point));
            output.merge(text.render_to_layers(point));
        }

        let notified = self.anchors.flush(sink);
        info!(
            node:% = view.id,
            kind = symbol.kind().name(),
            pins = pins.len(),
            notified = notified;
            "Symbol rendered"
        );

        RenderedSymbol {
            node: view.id,
            kind: symbol.kind(),
            layout,
            output,
            bounds,
            net_label: symbol.net_label().map(str::to_string),
        }
    }

    /// Renders `symbol` into a standalone SVG document.
    pub fn render_svg(
        &mut self,
        view: &NodeView,
        symbol: &dyn Symbol,
        sink: &mut dyn GeometrySink,
    ) -> String {
        let rendered = self.render(view, symbol, sink);
        export::svg::document(rendered, export::svg::DOCUMENT_MARGIN).to_string()
    }
}

/// Groups the logical artwork under the mirror transform of the node.
fn artwork_group(
    nodes: Vec<SvgNode>,
    mirror: MirrorState,
    ctx: &SymbolContext<'_>,
) -> svg_element::Group {
    let mut group = svg_element::Group::new();
    if !mirror.is_identity() {
        let size = ctx.size();
        let (sx, tx) = if mirror.flip_horizontal() {
            (-1.0, size.width())
        } else {
            (1.0, 0.0)
        };
        let (sy, ty) = if mirror.flip_vertical() {
            (-1.0, size.height())
        } else {
            (1.0, 0.0)
        };
        let transform = format!("matrix({sx} 0 0 {sy} {tx} {ty})");
        trace!(transform = transform.as_str(); "Mirroring artwork");
        group = group.set("transform", transform);
    }
    nodes.into_iter().fold(group, |group, node| group.add(node))
}
