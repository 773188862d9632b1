//! Graph preparation run once per transport mode at startup:
//! parallel-edge reduction, noise attachment and combined weights.

pub mod combined;
pub mod noise;
pub mod reduce;

pub use combined::CombinedWeights;
pub use noise::{FALLBACK_NOISE_LEVEL, NoiseCoverage, attach_noise};
pub use reduce::{reduce_by, reduce_network};
