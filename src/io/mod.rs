//! I/O modules for boundary vectors, raster output and the observation store

pub mod boundary;
pub mod raster;
pub mod observations;
pub mod catalog;

pub use boundary::BoundaryReader;
pub use raster::RasterEncoder;
pub use observations::{ObservationSource, SupabaseStore};
pub use catalog::GeoServerClient;
