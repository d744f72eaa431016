use ndarray::{array, Array2};
use thermogrid::{apply_mask, GridError};

#[test]
fn test_mask_selects_exactly() {
    let surface = array![[1.5, 2.5], [3.5, 4.5]];
    let mask: Array2<u8> = array![[1, 0], [0, 1]];

    let masked = apply_mask(&surface, &mask, -9999.0).expect("shapes match");

    assert_eq!(masked[[0, 0]], 1.5);
    assert_eq!(masked[[0, 1]], -9999.0);
    assert_eq!(masked[[1, 0]], -9999.0);
    assert_eq!(masked[[1, 1]], 4.5);
}

#[test]
fn test_all_inside_is_identity() {
    let surface = array![[1.0, 2.0], [3.0, 4.0]];
    let mask: Array2<u8> = Array2::ones((2, 2));

    let masked = apply_mask(&surface, &mask, -9999.0).expect("shapes match");
    assert_eq!(masked, surface);
}

#[test]
fn test_all_outside_is_sentinel() {
    let surface = array![[1.0, 2.0], [3.0, 4.0]];
    let mask: Array2<u8> = Array2::zeros((2, 2));

    let masked = apply_mask(&surface, &mask, -9999.0).expect("shapes match");
    assert!(masked.iter().all(|&v| v == -9999.0));
}

#[test]
fn test_shape_mismatch_is_programming_error() {
    let surface = Array2::<f64>::zeros((2, 3));
    let mask = Array2::<u8>::zeros((3, 2));

    let err = apply_mask(&surface, &mask, -9999.0).unwrap_err();
    match err {
        GridError::ShapeMismatch { surface, mask } => {
            assert_eq!(surface, (2, 3));
            assert_eq!(mask, (3, 2));
        }
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
    // Not something the batch driver may swallow
    assert!(!apply_mask(&surface, &mask, -9999.0).unwrap_err().is_per_item());
}
