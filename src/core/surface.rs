use crate::types::{GridError, GridResult, Mask, Surface};
use ndarray::Zip;

/// Replace every cell outside the boundary with the no-data sentinel.
///
/// Cells with mask 1 keep the interpolated value exactly; cells with mask 0
/// become `no_data` exactly. A shape mismatch means the surface and mask were
/// built from different grids, which is a programming error upstream, not a
/// recoverable per-timestamp condition.
pub fn apply_mask(surface: &Surface, mask: &Mask, no_data: f64) -> GridResult<Surface> {
    if surface.dim() != mask.dim() {
        return Err(GridError::ShapeMismatch {
            surface: surface.dim(),
            mask: mask.dim(),
        });
    }

    Ok(Zip::from(surface)
        .and(mask)
        .map_collect(|&value, &inside| if inside == 1 { value } else { no_data }))
}
