use crate::core::grid::GridSpec;
use crate::types::{GridError, GridResult, Mask};
use gdal::raster::{rasterize, RasterizeOptions};
use gdal::spatial_ref::SpatialRef;
use gdal::vector::Geometry;
use gdal::DriverManager;
use ndarray::Array2;

/// Burn boundary polygons onto the grid, producing a 0/1 inside mask.
///
/// Rasterization is all-touched: a cell is marked inside when a polygon
/// overlaps any part of the cell's footprint, not merely its center. The
/// conservative rule decides which border cells keep data versus receive the
/// no-data sentinel, so it must stay exactly as GDAL implements it.
pub fn rasterize_boundary(
    polygons: &[Geometry],
    grid: &GridSpec,
    epsg: u32,
) -> GridResult<Mask> {
    if polygons.is_empty() {
        return Err(GridError::InvalidBoundary(
            "no boundary polygons supplied".to_string(),
        ));
    }

    // Polygons must already be in the grid's CRS; the boundary reader
    // reprojects on load. A mismatching authority code here is a usage bug.
    for geom in polygons {
        if let Some(sr) = geom.spatial_ref() {
            match sr.auth_code() {
                Ok(code) if code as u32 != epsg => {
                    return Err(GridError::InvalidBoundary(format!(
                        "polygon CRS EPSG:{} does not match grid CRS EPSG:{}",
                        code, epsg
                    )));
                }
                _ => {}
            }
        }
    }

    let (height, width) = grid.shape();
    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut dataset =
        driver.create_with_band_type::<u8, _>("", width as isize, height as isize, 1)?;
    dataset.set_geo_transform(&grid.geo_transform().to_gdal())?;
    dataset.set_spatial_ref(&SpatialRef::from_epsg(epsg)?)?;

    // MEM bands are zero-filled, so untouched cells stay 0 (outside)
    let burn_values = vec![1.0; polygons.len()];
    let options = RasterizeOptions {
        all_touched: true,
        ..Default::default()
    };
    rasterize(&mut dataset, &[1], polygons, &burn_values, Some(options))?;

    let band = dataset.rasterband(1)?;
    let buffer = band.read_as::<u8>((0, 0), (width, height), (width, height), None)?;
    let mask = Array2::from_shape_vec((height, width), buffer.data).map_err(|e| {
        GridError::InvalidBoundary(format!("failed to reshape rasterized mask: {}", e))
    })?;

    let inside = mask.iter().filter(|&&v| v == 1).count();
    log::debug!(
        "Boundary mask: {}/{} cells inside ({:.1}%)",
        inside,
        height * width,
        inside as f64 / (height * width) as f64 * 100.0
    );

    Ok(mask)
}
