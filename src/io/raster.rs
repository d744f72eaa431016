use crate::core::grid::GridSpec;
use crate::types::{GridError, GridResult, Surface};
use gdal::raster::Buffer;
use gdal::spatial_ref::SpatialRef;
use gdal::DriverManager;
use std::path::Path;

/// Writes a masked surface as a single-band float32 GeoTIFF.
pub struct RasterEncoder;

impl RasterEncoder {
    /// Serialize the surface plus georeferencing metadata to `path`.
    ///
    /// Creates the containing directory if needed and overwrites an existing
    /// file. Any failure during encoding removes the partial output before
    /// returning `WriteFailure`, so a corrupt file is never left behind for
    /// the mosaic tooling to pick up.
    pub fn write<P: AsRef<Path>>(
        path: P,
        surface: &Surface,
        grid: &GridSpec,
        epsg: u32,
        no_data: f64,
    ) -> GridResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                // Per-item condition like the encode itself: the batch
                // driver may retry or skip, not abort the run
                std::fs::create_dir_all(parent).map_err(|e| {
                    GridError::WriteFailure(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        if let Err(e) = Self::write_dataset(path, surface, grid, epsg, no_data) {
            if path.exists() {
                let _ = std::fs::remove_file(path);
            }
            return Err(GridError::WriteFailure(format!(
                "{}: {}",
                path.display(),
                e
            )));
        }
        Ok(())
    }

    fn write_dataset(
        path: &Path,
        surface: &Surface,
        grid: &GridSpec,
        epsg: u32,
        no_data: f64,
    ) -> gdal::errors::Result<()> {
        let (height, width) = surface.dim();
        log::debug!("Writing {}x{} GeoTIFF to {}", width, height, path.display());

        let driver = DriverManager::get_driver_by_name("GTiff")?;
        let mut dataset =
            driver.create_with_band_type::<f32, _>(path, width as isize, height as isize, 1)?;

        dataset.set_geo_transform(&grid.geo_transform().to_gdal())?;
        dataset.set_spatial_ref(&SpatialRef::from_epsg(epsg)?)?;

        let mut rasterband = dataset.rasterband(1)?;
        let flat_data: Vec<f32> = surface.iter().map(|&v| v as f32).collect();
        let buffer = Buffer::new((width, height), flat_data);
        rasterband.write((0, 0), (width, height), &buffer)?;
        rasterband.set_no_data_value(Some(no_data))?;

        Ok(())
    }
}
