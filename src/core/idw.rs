use crate::core::grid::GridSpec;
use crate::types::{GridError, GridResult, Observation, Surface};
use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};

/// Inverse-distance-weighting parameters
#[derive(Debug, Clone, Copy)]
pub struct IdwParams {
    /// Exponent controlling how sharply influence decays with distance
    pub power: f64,
    /// Substituted for a zero squared distance to avoid division by zero
    pub epsilon: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            epsilon: 1e-12,
        }
    }
}

/// Inverse-distance-weighted interpolator over a regular grid.
///
/// Every cell value is the weighted mean of all observations with weights
/// `d^-power`, i.e. a convex combination of the observed values. There is no
/// spatial pruning: the observation counts involved (tens to low hundreds)
/// are small next to the cell count, so O(cells x observations) is fine.
#[derive(Debug)]
pub struct IdwInterpolator {
    params: IdwParams,
}

impl IdwInterpolator {
    /// Create an interpolator with the default power of 2
    pub fn new() -> Self {
        Self {
            params: IdwParams::default(),
        }
    }

    pub fn with_params(params: IdwParams) -> Self {
        Self { params }
    }

    /// Estimate a value at every grid cell from the scattered observations.
    ///
    /// Fails with `NoObservations` when the input is empty; the batch driver
    /// treats that as a per-timestamp skip rather than a fatal error. The
    /// result does not depend on observation order beyond floating-point
    /// rounding of the two accumulator sums.
    pub fn interpolate(
        &self,
        observations: &[Observation],
        grid: &GridSpec,
    ) -> GridResult<Surface> {
        if observations.is_empty() {
            return Err(GridError::NoObservations);
        }

        log::debug!(
            "IDW over {} observations onto {}x{} grid (power={}, epsilon={})",
            observations.len(),
            grid.width(),
            grid.height(),
            self.params.power,
            self.params.epsilon
        );

        let lons = grid.lon_centers();
        let lats = grid.lat_centers();
        let half_power = self.params.power / 2.0;
        let epsilon = self.params.epsilon;

        let mut surface = Array2::<f64>::zeros(grid.shape());
        surface
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut line)| {
                let y = lats[row];
                for (col, cell) in line.iter_mut().enumerate() {
                    let x = lons[col];
                    let mut weighted_sum = 0.0;
                    let mut weight_total = 0.0;
                    for obs in observations {
                        let mut d2 = (x - obs.longitude).powi(2) + (y - obs.latitude).powi(2);
                        if d2 == 0.0 {
                            d2 = epsilon;
                        }
                        let w = d2.powf(-half_power);
                        weighted_sum += w * obs.value;
                        weight_total += w;
                    }
                    *cell = weighted_sum / weight_total;
                }
            });

        Ok(surface)
    }
}

impl Default for IdwInterpolator {
    fn default() -> Self {
        Self::new()
    }
}
