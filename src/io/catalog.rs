use crate::types::{GridError, GridResult};
use std::path::Path;
use std::time::Duration;

/// Tells a GeoServer ImageMosaic coverage store about a newly written raster.
///
/// Notification is strictly best-effort: the batch driver logs a failed
/// harvest and moves on, and the core never depends on whether it succeeded.
/// The mosaic index catches up on the next harvest either way.
pub struct GeoServerClient {
    base_url: String,
    user: String,
    password: String,
    workspace: String,
    coverage_store: String,
    /// URL prefix under which GeoServer itself sees the raster files
    /// (e.g. `file:///data/rasters/`); often not the local path
    external_root: String,
    client: reqwest::blocking::Client,
}

impl GeoServerClient {
    pub fn new(
        base_url: &str,
        user: &str,
        password: &str,
        workspace: &str,
        coverage_store: &str,
        external_root: &str,
    ) -> GridResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
            workspace: workspace.to_string(),
            coverage_store: coverage_store.to_string(),
            external_root: external_root.to_string(),
            client,
        })
    }

    /// Register one raster file with the coverage store's mosaic index.
    pub fn harvest(&self, raster_path: &Path) -> GridResult<()> {
        let file_name = raster_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                GridError::InvalidConfiguration(format!(
                    "raster path has no file name: {}",
                    raster_path.display()
                ))
            })?;
        let file_url = format!("{}{}", self.external_root, file_name);

        let url = format!(
            "{}/rest/workspaces/{}/coveragestores/{}/external.imagemosaic",
            self.base_url, self.workspace, self.coverage_store
        );
        log::debug!("Harvesting {} into {}", file_url, url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.password))
            .header("Content-Type", "text/plain")
            .body(file_url)
            .send()?;

        let status = response.status();
        if status.is_success() {
            log::info!("Harvested {} into mosaic index", file_name);
        } else {
            log::warn!(
                "Harvest of {} returned {}: {}",
                file_name,
                status,
                response.text().unwrap_or_default()
            );
        }
        Ok(())
    }
}
