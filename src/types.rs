use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Interpolated value surface (rows are latitude, row 0 northernmost)
pub type Surface = Array2<f64>;

/// Binary inside/outside mask aligned with a Surface (1 = inside boundary)
pub type Mask = Array2<u8>;

/// A single point measurement at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Longitude in degrees (EPSG:4326)
    pub longitude: f64,
    /// Latitude in degrees (EPSG:4326)
    pub latitude: f64,
    /// Measured value (e.g. temperature in degrees C)
    pub value: f64,
}

/// Geographic bounding box of the region of interest
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn lon_extent(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_extent(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// Geospatial transformation parameters (GDAL affine convention)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoTransform {
    pub top_left_x: f64,
    pub pixel_width: f64,
    pub rotation_x: f64,
    pub top_left_y: f64,
    pub rotation_y: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// GDAL geotransform array ordering
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.top_left_x,
            self.pixel_width,
            self.rotation_x,
            self.top_left_y,
            self.rotation_y,
            self.pixel_height,
        ]
    }

    /// Map pixel (col, row) to the coordinate of the pixel's top-left corner
    pub fn pixel_to_world(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.top_left_x + col * self.pixel_width + row * self.rotation_x,
            self.top_left_y + col * self.rotation_y + row * self.pixel_height,
        )
    }
}

/// Immutable per-region configuration shared by every generated surface.
///
/// One value of this type describes one output product line: all rasters
/// generated from it share the same grid geometry and are mosaic-compatible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub bbox: BoundingBox,
    /// Cell size in degrees per pixel
    pub resolution: f64,
    /// Sentinel written outside the boundary; must lie outside the
    /// physically plausible range of the measured quantity
    #[serde(default = "default_no_data")]
    pub no_data: f64,
    /// Working coordinate reference system (observations and output)
    #[serde(default = "default_epsg")]
    pub epsg: u32,
}

fn default_no_data() -> f64 {
    -9999.0
}

fn default_epsg() -> u32 {
    4326
}

impl RegionConfig {
    pub fn new(bbox: BoundingBox, resolution: f64) -> Self {
        Self {
            bbox,
            resolution,
            no_data: default_no_data(),
            epsg: default_epsg(),
        }
    }

    /// Validate at startup; a failure here invalidates the whole run.
    pub fn validate(&self) -> GridResult<()> {
        if !(self.resolution > 0.0) {
            return Err(GridError::InvalidConfiguration(format!(
                "resolution must be positive, got {}",
                self.resolution
            )));
        }
        if self.bbox.lon_extent() <= 0.0 || self.bbox.lat_extent() <= 0.0 {
            return Err(GridError::InvalidConfiguration(format!(
                "bounding box has non-positive extent: {:?}",
                self.bbox
            )));
        }
        Ok(())
    }
}

/// Error types for surface generation
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no observations supplied")]
    NoObservations,

    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),

    #[error("shape mismatch: surface {surface:?} vs mask {mask:?}")]
    ShapeMismatch {
        surface: (usize, usize),
        mask: (usize, usize),
    },

    #[error("raster write failure: {0}")]
    WriteFailure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GridError {
    /// Whether the batch driver may log this error and move on to the next
    /// timestamp instead of aborting the run.
    pub fn is_per_item(&self) -> bool {
        matches!(self, GridError::NoObservations | GridError::WriteFailure(_))
    }
}

/// Result type for surface generation operations
pub type GridResult<T> = Result<T, GridError>;
