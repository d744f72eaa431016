use crate::types::{BoundingBox, GeoTransform, GridError, GridResult};

/// Regular sampling grid derived from a bounding box and a resolution.
///
/// The grid is anchored at the north-west corner of the bounding box with
/// square cells of `resolution` degrees. Row 0 is the northernmost row. The
/// same (bbox, resolution) pair always produces the same grid, so rasters
/// generated for different timestamps stay mosaic-compatible.
#[derive(Debug, Clone)]
pub struct GridSpec {
    bbox: BoundingBox,
    resolution: f64,
    width: usize,
    height: usize,
}

impl GridSpec {
    /// Derive grid dimensions from a bounding box and cell size.
    pub fn build(bbox: &BoundingBox, resolution: f64) -> GridResult<Self> {
        if !(resolution > 0.0) {
            return Err(GridError::InvalidConfiguration(format!(
                "resolution must be positive, got {}",
                resolution
            )));
        }
        if bbox.lon_extent() <= 0.0 || bbox.lat_extent() <= 0.0 {
            return Err(GridError::InvalidConfiguration(format!(
                "bounding box has non-positive extent: {:?}",
                bbox
            )));
        }

        let width = (bbox.lon_extent() / resolution).ceil() as usize;
        let height = (bbox.lat_extent() / resolution).ceil() as usize;

        log::debug!(
            "Grid for {:?} at {} deg/cell: {}x{} pixels",
            bbox,
            resolution,
            width,
            height
        );

        Ok(Self {
            bbox: *bbox,
            resolution,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (height, width), the ndarray dimension order
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Cell-center longitudes, west to east (length = width).
    ///
    /// Spacing is exactly `resolution`; when the bbox extent is not a whole
    /// multiple of the resolution the last column extends past `max_lon`,
    /// matching the ceil'd pixel extent of the affine transform.
    pub fn lon_centers(&self) -> Vec<f64> {
        (0..self.width)
            .map(|i| self.bbox.min_lon + self.resolution * (i as f64 + 0.5))
            .collect()
    }

    /// Cell-center latitudes, north to south (length = height).
    pub fn lat_centers(&self) -> Vec<f64> {
        (0..self.height)
            .map(|j| self.bbox.max_lat - self.resolution * (j as f64 + 0.5))
            .collect()
    }

    /// Center coordinate of the cell at (row, col)
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.bbox.min_lon + self.resolution * (col as f64 + 0.5),
            self.bbox.max_lat - self.resolution * (row as f64 + 0.5),
        )
    }

    /// North-up affine transform with origin at the NW corner of the bbox
    pub fn geo_transform(&self) -> GeoTransform {
        GeoTransform {
            top_left_x: self.bbox.min_lon,
            pixel_width: self.resolution,
            rotation_x: 0.0,
            top_left_y: self.bbox.max_lat,
            rotation_y: 0.0,
            pixel_height: -self.resolution,
        }
    }
}
