//! Pinline - schematic symbols with mirror-aware terminal layout.
//!
//! Symbols declare their pins on logical sides. When the host mirrors a node,
//! [`layout`] maps every pin to its physical side and spreads the pins of each
//! side evenly, [`anchor`] tells the host which nodes need their wire
//! endpoints recomputed, and [`render`] draws the symbol with its artwork
//! mirrored but its text upright.
//!
//! # Examples
//!
//! ```
//! use pinline::config::AppConfig;
//! use pinline::render::{NodeView, SymbolRenderer};
//! use pinline::symbol::{SymbolConfig, SymbolKind};
//! use pinline::identifier::Id;
//! use pinline::side::MirrorState;
//!
//! let mut renderer = SymbolRenderer::new(&AppConfig::default()).unwrap();
//! let relay = SymbolConfig::default_for(SymbolKind::Relay).build();
//! let view = NodeView::new("k1").with_mirror(MirrorState::new(true, false));
//!
//! let mut invalidated: Vec<Id> = Vec::new();
//! let svg = renderer.render_svg(&view, relay.as_ref(), &mut invalidated);
//!
//! assert!(svg.contains("<svg"));
//! assert_eq!(invalidated, vec![Id::new("k1")]);
//! ```

pub mod anchor;
pub mod config;
pub mod export;
pub mod layout;
pub mod render;
pub mod store;
pub mod symbol;

mod error;

pub use pinline_core::{color, draw, geometry, identifier, pin, side, state};

pub use error::PinlineError;
