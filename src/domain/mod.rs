pub mod demand;
pub mod pipeline;
pub mod placement;
pub mod relaxation;
pub mod resource;
pub mod rounding;
pub mod service;
pub mod topology;
pub mod utils;

/// Tolerance applied to every capacity comparison, absorbing floating-point
/// drift from the relaxation arithmetic.
pub const EPSILON: f64 = 1e-6;
