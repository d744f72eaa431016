use crate::core::grid::GridSpec;
use crate::core::idw::IdwInterpolator;
use crate::core::mask::rasterize_boundary;
use crate::core::surface::apply_mask;
use crate::io::observations::ObservationSource;
use crate::io::raster::RasterEncoder;
use crate::types::{GridError, GridResult, Mask, Observation, RegionConfig};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use gdal::vector::Geometry;
use std::path::{Path, PathBuf};

/// Orchestrates interpolation, masking and encoding for one timestamp.
///
/// The grid and the boundary mask are computed once at construction and
/// shared read-only across every `generate` call: they depend only on the
/// region configuration, never on the observations.
#[derive(Debug)]
pub struct SurfaceGenerator {
    config: RegionConfig,
    grid: GridSpec,
    mask: Mask,
    interpolator: IdwInterpolator,
}

impl SurfaceGenerator {
    /// Validate the configuration, build the grid and rasterize the boundary.
    ///
    /// Configuration and boundary failures abort here, before any timestamp
    /// is processed: every subsequent generation would be invalid.
    pub fn new(config: RegionConfig, boundary: &[Geometry]) -> GridResult<Self> {
        config.validate()?;
        let grid = GridSpec::build(&config.bbox, config.resolution)?;
        let mask = rasterize_boundary(boundary, &grid, config.epsg)?;

        log::info!(
            "Surface generator ready: {}x{} grid at {} deg/cell",
            grid.width(),
            grid.height(),
            grid.resolution()
        );

        Ok(Self {
            config,
            grid,
            mask,
            interpolator: IdwInterpolator::new(),
        })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Generate and write the masked raster for a single timestamp.
    ///
    /// Overwrites `output_path` unconditionally; skip-if-exists is the batch
    /// driver's job. `NoObservations` propagates for the caller to treat as
    /// a per-item skip.
    pub fn generate(
        &self,
        timestamp: &str,
        observations: &[Observation],
        output_path: &Path,
    ) -> GridResult<()> {
        log::info!(
            "Generating surface for {} ({} observations)",
            timestamp,
            observations.len()
        );

        let surface = self.interpolator.interpolate(observations, &self.grid)?;
        let masked = apply_mask(&surface, &self.mask, self.config.no_data)?;
        RasterEncoder::write(
            output_path,
            &masked,
            &self.grid,
            self.config.epsg,
            self.config.no_data,
        )?;

        log::info!("Wrote {}", output_path.display());
        Ok(())
    }
}

/// Parse the timestamps the observation store hands out (RFC 3339, or the
/// Postgres `YYYY-MM-DD HH:MM:SS+TZ` rendering).
fn parse_timestamp(ts: &str) -> GridResult<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S%#z") {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
    }
    Err(GridError::InvalidConfiguration(format!(
        "unparseable timestamp: {}",
        ts
    )))
}

/// Filename consumed by the downstream mosaic tooling: `temp_YYYY-MM-DD_HH.tif`,
/// hour-truncated. Pure function of the timestamp.
pub fn output_filename(timestamp: &str) -> GridResult<String> {
    let dt = parse_timestamp(timestamp)?;
    Ok(format!(
        "temp_{}_{}.tif",
        dt.format("%Y-%m-%d"),
        dt.format("%H")
    ))
}

/// Outcome of one batch run, reported to the user at the end.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Paths of rasters written during this run
    pub generated: Vec<PathBuf>,
    /// Timestamps skipped because their output file already existed
    pub skipped_existing: usize,
    /// Timestamps skipped because the store had no observations for them
    pub skipped_no_data: usize,
    /// Timestamps that failed with a recoverable write error
    pub failed: usize,
}

/// Drive `generate` over every pending timestamp the store knows about.
///
/// Per-item failures (`NoObservations`, `WriteFailure`) are logged and
/// counted so one bad timestamp never aborts the batch; everything else
/// propagates and aborts the run. A timestamp whose output file already
/// exists is never re-generated, which also makes a failed run safe to
/// re-drive: items without a file are simply retried next time.
pub fn run_batch(
    generator: &SurfaceGenerator,
    source: &dyn ObservationSource,
    output_dir: &Path,
) -> GridResult<BatchSummary> {
    let timestamps = source.list_timestamps()?;
    log::info!("Batch run over {} timestamps", timestamps.len());

    let mut summary = BatchSummary::default();

    for ts in &timestamps {
        let output_path = output_dir.join(output_filename(ts)?);
        if output_path.exists() {
            summary.skipped_existing += 1;
            continue;
        }

        let result = source
            .fetch_observations(ts)
            .and_then(|observations| generator.generate(ts, &observations, &output_path));

        match result {
            Ok(()) => summary.generated.push(output_path),
            Err(GridError::NoObservations) => {
                log::warn!("No observations for {}, skipping", ts);
                summary.skipped_no_data += 1;
            }
            Err(e) if e.is_per_item() => {
                log::warn!("Failed to generate {}: {}", ts, e);
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "Batch complete: {} generated, {} already present, {} without data, {} failed",
        summary.generated.len(),
        summary.skipped_existing,
        summary.skipped_no_data,
        summary.failed
    );

    Ok(summary)
}
