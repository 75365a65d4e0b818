//! Standalone SVG documents.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use pinline_core::geometry::{Bounds, Insets};

use crate::{export, render::RenderedSymbol};

/// Space left around the symbol's drawn area.
pub const DOCUMENT_MARGIN: f32 = 12.0;

/// Wraps a rendered symbol in a document sized to its bounds.
///
/// The viewBox starts at the origin; the symbol group is translated so its
/// bounds, readouts and title included, sit `margin` away from every edge.
pub fn document(rendered: RenderedSymbol, margin: f32) -> Document {
    let bounds = rendered.bounds();
    let svg_size = bounds.to_size().add_padding(Insets::uniform(margin));
    debug!(width = svg_size.width(), height = svg_size.height(); "Final SVG dimensions");

    let placed = svg_element::Group::new()
        .set(
            "transform",
            format!(
                "translate({}, {})",
                margin - bounds.min_x(),
                margin - bounds.min_y()
            ),
        )
        .add(rendered.into_group());

    Document::new()
        .set(
            "viewBox",
            format!("0 0 {} {}", svg_size.width(), svg_size.height()),
        )
        .set("width", svg_size.width())
        .set("height", svg_size.height())
        .add(placed)
}

/// Writes rendered symbols to an SVG file.
#[derive(Debug, Clone)]
pub struct Svg {
    file_name: String,
    margin: f32,
}

impl Svg {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            margin: DOCUMENT_MARGIN,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name.as_str(); "Creating SVG file");
        let mut file = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name.as_str(), err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(file, "{doc}") {
            error!(file_name = self.file_name.as_str(), err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_symbol(&self, rendered: RenderedSymbol) -> Result<(), export::Error> {
        if !is_drawable(rendered.bounds()) {
            return Err(export::Error::Render(format!(
                "symbol `{}` has no drawable area",
                rendered.node()
            )));
        }
        let doc = document(rendered, self.margin);
        debug!("SVG document rendered");

        self.write_document(&doc)
    }
}

fn is_drawable(bounds: Bounds) -> bool {
    bounds.width().is_finite() && bounds.height().is_finite() && !bounds.to_size().is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_is_not_drawable() {
        assert!(!is_drawable(Bounds::default()));
        assert!(is_drawable(Bounds::new_from_top_left(
            pinline_core::geometry::Point::default(),
            pinline_core::geometry::Size::new(10.0, 4.0),
        )));
    }
}
