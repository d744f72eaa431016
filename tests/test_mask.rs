use gdal::spatial_ref::SpatialRef;
use gdal::vector::Geometry;
use thermogrid::{rasterize_boundary, BoundingBox, GridError, GridSpec};

fn unit_grid(resolution: f64) -> GridSpec {
    let bbox = BoundingBox {
        min_lon: 0.0,
        max_lon: 1.0,
        min_lat: 0.0,
        max_lat: 1.0,
    };
    GridSpec::build(&bbox, resolution).expect("grid should build")
}

fn polygon(wkt: &str) -> Geometry {
    Geometry::from_wkt(wkt).expect("valid WKT")
}

#[test]
fn test_empty_polygons_rejected() {
    let grid = unit_grid(0.5);
    let err = rasterize_boundary(&[], &grid, 4326).unwrap_err();
    assert!(matches!(err, GridError::InvalidBoundary(_)));
}

#[test]
fn test_covering_polygon_marks_everything() {
    let grid = unit_grid(0.25);
    let poly = polygon("POLYGON((-0.5 -0.5,1.5 -0.5,1.5 1.5,-0.5 1.5,-0.5 -0.5))");

    let mask = rasterize_boundary(&[poly], &grid, 4326).expect("rasterize should succeed");
    assert_eq!(mask.dim(), (4, 4));
    assert!(mask.iter().all(|&v| v == 1));
}

#[test]
fn test_untouched_cells_stay_outside() {
    // Polygon well clear of the right column: left cells burned, right not
    let grid = unit_grid(0.5);
    let poly = polygon("POLYGON((-0.1 -0.1,0.4 -0.1,0.4 1.1,-0.1 1.1,-0.1 -0.1))");

    let mask = rasterize_boundary(&[poly], &grid, 4326).expect("rasterize should succeed");
    assert_eq!(mask[[0, 0]], 1);
    assert_eq!(mask[[1, 0]], 1);
    assert_eq!(mask[[0, 1]], 0);
    assert_eq!(mask[[1, 1]], 0);
}

#[test]
fn test_all_touched_includes_partial_overlap() {
    // Polygon overlapping only a sliver of the top-left cell's footprint,
    // nowhere near its center; the all-touched rule still burns it.
    let grid = unit_grid(0.5);
    let poly = polygon("POLYGON((-0.2 0.95,0.05 0.95,0.05 1.2,-0.2 1.2,-0.2 0.95))");

    let mask = rasterize_boundary(&[poly], &grid, 4326).expect("rasterize should succeed");
    assert_eq!(mask[[0, 0]], 1);
    assert_eq!(mask[[0, 1]], 0);
    assert_eq!(mask[[1, 0]], 0);
    assert_eq!(mask[[1, 1]], 0);
}

#[test]
fn test_multiple_polygons_union() {
    let grid = unit_grid(0.5);
    let left = polygon("POLYGON((-0.1 -0.1,0.4 -0.1,0.4 0.4,-0.1 0.4,-0.1 -0.1))");
    let right = polygon("POLYGON((0.6 0.6,1.1 0.6,1.1 1.1,0.6 1.1,0.6 0.6))");

    let mask = rasterize_boundary(&[left, right], &grid, 4326).expect("rasterize should succeed");
    assert_eq!(mask[[1, 0]], 1); // SW cell from the left polygon
    assert_eq!(mask[[0, 1]], 1); // NE cell from the right polygon
    assert_eq!(mask[[0, 0]], 0);
    assert_eq!(mask[[1, 1]], 0);
}

#[test]
fn test_wrong_crs_rejected() {
    let grid = unit_grid(0.5);
    let mut poly = polygon("POLYGON((-0.1 -0.1,0.4 -0.1,0.4 1.1,-0.1 1.1,-0.1 -0.1))");
    poly.set_spatial_ref(SpatialRef::from_epsg(3857).expect("valid EPSG"));

    let err = rasterize_boundary(&[poly], &grid, 4326).unwrap_err();
    assert!(matches!(err, GridError::InvalidBoundary(_)));
}
