//! Pinline Core Types
//!
//! Foundational types for rendering schematic symbols with correctly placed
//! terminals:
//!
//! - **Side mapping**: logical-to-physical side resolution under mirroring ([`side`])
//! - **Pins**: logical pin declarations and resolved pins ([`pin`])
//! - **Live state**: solver values keyed by node field or pin id ([`state`])
//! - **Draw**: terminals, pin rows, symbol shells and text ([`draw`])
//! - **Identifiers**, **colors** and **geometry** shared by all of the above

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod pin;
pub mod side;
pub mod state;
