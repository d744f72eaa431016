//! ThermoGrid: scattered temperature observations to masked GeoTIFF surfaces
//!
//! This library turns a sparse set of point temperature readings for a single
//! instant into a dense, georeferenced raster: a regular grid is laid over a
//! fixed bounding box, every cell is estimated with inverse-distance-weighted
//! interpolation, cells outside a boundary polygon are replaced by a no-data
//! sentinel, and the result is written as a single-band float32 GeoTIFF.

pub mod types;
pub mod io;
pub mod core;

// Re-export main types and functions for easier access
pub use types::{
    BoundingBox, GeoTransform, GridError, GridResult, Mask, Observation, RegionConfig, Surface,
};

pub use crate::core::{
    apply_mask, output_filename, rasterize_boundary, run_batch, BatchSummary, GridSpec,
    IdwInterpolator, IdwParams, SurfaceGenerator,
};

pub use crate::io::{
    BoundaryReader, GeoServerClient, ObservationSource, RasterEncoder, SupabaseStore,
};
