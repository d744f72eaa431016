use crate::types::{GridError, GridResult};
use gdal::spatial_ref::{CoordTransform, SpatialRef};
use gdal::vector::{Geometry, LayerAccess};
use gdal::Dataset;
use gdal_sys::OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER;
use std::path::Path;

/// Reads the boundary polygons that define the valid-data region.
///
/// The boundary is read once at startup and shared read-only for the process
/// lifetime. Any vector format GDAL understands works (shapefile, GeoJSON,
/// GeoPackage). Geometries are reprojected into the working CRS when the
/// source declares a different one.
pub struct BoundaryReader;

impl BoundaryReader {
    /// Read all feature geometries from the first layer, reprojected to
    /// `target_epsg` (lon/lat axis order).
    pub fn read<P: AsRef<Path>>(path: P, target_epsg: u32) -> GridResult<Vec<Geometry>> {
        let path = path.as_ref();
        log::info!("Reading boundary polygons from {}", path.display());

        let dataset = Dataset::open(path).map_err(|e| {
            GridError::InvalidBoundary(format!("cannot open {}: {}", path.display(), e))
        })?;
        let mut layer = dataset.layer(0).map_err(|e| {
            GridError::InvalidBoundary(format!("no vector layer in {}: {}", path.display(), e))
        })?;

        let mut target = SpatialRef::from_epsg(target_epsg)?;
        target.set_axis_mapping_strategy(OAMS_TRADITIONAL_GIS_ORDER);

        // Reproject only when the source declares a different CRS; an
        // undeclared CRS is assumed to already be the working one.
        let transform = match layer.spatial_ref() {
            Some(mut source) => {
                source.set_axis_mapping_strategy(OAMS_TRADITIONAL_GIS_ORDER);
                let same = matches!(source.auth_code(), Ok(code) if code as u32 == target_epsg);
                if same {
                    None
                } else {
                    log::info!(
                        "Reprojecting boundary from {} to EPSG:{}",
                        source.auth_code().map(|c| format!("EPSG:{}", c)).unwrap_or_else(|_| "unknown CRS".to_string()),
                        target_epsg
                    );
                    Some(CoordTransform::new(&source, &target)?)
                }
            }
            None => {
                log::warn!("Boundary source has no CRS, assuming EPSG:{}", target_epsg);
                None
            }
        };

        let mut polygons = Vec::new();
        for feature in layer.features() {
            if let Some(geometry) = feature.geometry() {
                let mut geometry = geometry.clone();
                if let Some(ref transform) = transform {
                    geometry.transform_inplace(transform)?;
                }
                geometry.set_spatial_ref(target.clone());
                polygons.push(geometry);
            }
        }

        if polygons.is_empty() {
            return Err(GridError::InvalidBoundary(format!(
                "no geometries found in {}",
                path.display()
            )));
        }

        log::info!("Loaded {} boundary polygon(s)", polygons.len());
        Ok(polygons)
    }
}
