use approx::assert_abs_diff_eq;
use thermogrid::{BoundingBox, GridError, GridSpec};

fn unit_bbox() -> BoundingBox {
    BoundingBox {
        min_lon: 0.0,
        max_lon: 1.0,
        min_lat: 0.0,
        max_lat: 1.0,
    }
}

#[test]
fn test_dimensions_from_bbox_and_resolution() {
    let grid = GridSpec::build(&unit_bbox(), 0.5).expect("grid should build");
    assert_eq!(grid.width(), 2);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.shape(), (2, 2));

    // Extent not a whole multiple of the resolution rounds up
    let grid = GridSpec::build(&unit_bbox(), 0.3).expect("grid should build");
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 4);
}

#[test]
fn test_cell_centers_unit_grid() {
    let grid = GridSpec::build(&unit_bbox(), 0.5).expect("grid should build");

    assert_eq!(grid.lon_centers(), vec![0.25, 0.75]);
    // Row 0 is the northernmost row
    assert_eq!(grid.lat_centers(), vec![0.75, 0.25]);
    assert_eq!(grid.cell_center(0, 0), (0.25, 0.75));
    assert_eq!(grid.cell_center(1, 1), (0.75, 0.25));
}

#[test]
fn test_center_spacing_equals_resolution() {
    let grid = GridSpec::build(&unit_bbox(), 0.25).expect("grid should build");
    let lons = grid.lon_centers();
    let lats = grid.lat_centers();
    for pair in lons.windows(2) {
        assert_eq!(pair[1] - pair[0], 0.25);
    }
    for pair in lats.windows(2) {
        assert_eq!(pair[0] - pair[1], 0.25);
    }

    let grid = GridSpec::build(&unit_bbox(), 0.3).expect("grid should build");
    for pair in grid.lon_centers().windows(2) {
        assert_abs_diff_eq!(pair[1] - pair[0], 0.3, epsilon = 1e-12);
    }
}

#[test]
fn test_transform_consistent_with_centers() {
    let grid = GridSpec::build(&unit_bbox(), 0.25).expect("grid should build");
    let gt = grid.geo_transform();

    assert_eq!(gt.top_left_x, 0.0);
    assert_eq!(gt.top_left_y, 1.0);
    assert_eq!(gt.pixel_width, 0.25);
    assert_eq!(gt.pixel_height, -0.25);
    assert_eq!(gt.rotation_x, 0.0);
    assert_eq!(gt.rotation_y, 0.0);

    // Half a pixel in from the origin lands on the first cell center
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let (x, y) = gt.pixel_to_world(col as f64 + 0.5, row as f64 + 0.5);
            let (cx, cy) = grid.cell_center(row, col);
            assert_abs_diff_eq!(x, cx, epsilon = 1e-12);
            assert_abs_diff_eq!(y, cy, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_deterministic_across_builds() {
    let a = GridSpec::build(&unit_bbox(), 0.3).expect("grid should build");
    let b = GridSpec::build(&unit_bbox(), 0.3).expect("grid should build");
    assert_eq!(a.shape(), b.shape());
    assert_eq!(a.lon_centers(), b.lon_centers());
    assert_eq!(a.lat_centers(), b.lat_centers());
    assert_eq!(a.geo_transform().to_gdal(), b.geo_transform().to_gdal());
}

#[test]
fn test_rejects_bad_configuration() {
    let err = GridSpec::build(&unit_bbox(), 0.0).unwrap_err();
    assert!(matches!(err, GridError::InvalidConfiguration(_)));

    let err = GridSpec::build(&unit_bbox(), -0.5).unwrap_err();
    assert!(matches!(err, GridError::InvalidConfiguration(_)));

    let inverted = BoundingBox {
        min_lon: 1.0,
        max_lon: 0.0,
        min_lat: 0.0,
        max_lat: 1.0,
    };
    let err = GridSpec::build(&inverted, 0.5).unwrap_err();
    assert!(matches!(err, GridError::InvalidConfiguration(_)));
}
