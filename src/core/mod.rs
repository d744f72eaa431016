//! Core surface-generation modules

pub mod grid;
pub mod idw;
pub mod mask;
pub mod surface;
pub mod pipeline;

// Re-export main types
pub use grid::GridSpec;
pub use idw::{IdwInterpolator, IdwParams};
pub use mask::rasterize_boundary;
pub use surface::apply_mask;
pub use pipeline::{output_filename, run_batch, BatchSummary, SurfaceGenerator};
