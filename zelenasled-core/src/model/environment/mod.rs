//! Environmental datasets routes are scored against

pub mod hex_index;
pub mod noise_overlay;

pub use hex_index::HexIndex;
pub use noise_overlay::{NoiseOverlay, NoisePolygon};
