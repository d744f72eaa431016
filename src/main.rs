use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use thermogrid::io::{BoundaryReader, GeoServerClient, SupabaseStore};
use thermogrid::{run_batch, BoundingBox, RegionConfig, SurfaceGenerator};

/// Generate boundary-masked IDW temperature rasters for every pending
/// timestamp in the observation store.
#[derive(Debug, Parser)]
#[command(name = "thermogrid", version, about)]
struct Args {
    /// Directory the GeoTIFFs are written to
    #[arg(long)]
    output_dir: PathBuf,

    /// Vector file with the boundary polygon(s) of the valid-data region
    #[arg(long)]
    boundary: PathBuf,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: String,

    /// Supabase service key
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    supabase_key: String,

    /// Observation table name
    #[arg(long, env = "SUPABASE_TABLE", default_value = "weather_raw")]
    table: String,

    /// Region of interest (defaults cover Seoul)
    #[arg(long, default_value_t = 126.76)]
    min_lon: f64,
    #[arg(long, default_value_t = 127.19)]
    max_lon: f64,
    #[arg(long, default_value_t = 37.41)]
    min_lat: f64,
    #[arg(long, default_value_t = 37.70)]
    max_lat: f64,

    /// Cell size in degrees per pixel
    #[arg(long, default_value_t = 0.001)]
    resolution: f64,

    /// No-data sentinel written outside the boundary
    #[arg(long, default_value_t = -9999.0, allow_hyphen_values = true)]
    no_data: f64,

    /// GeoServer base URL; when absent, no harvest notifications are sent
    #[arg(long, env = "GEOSERVER_URL")]
    geoserver_url: Option<String>,

    #[arg(long, env = "GEOSERVER_USER", default_value = "admin")]
    geoserver_user: String,

    #[arg(long, env = "GEOSERVER_PASS", default_value = "geoserver", hide_env_values = true)]
    geoserver_pass: String,

    #[arg(long, default_value = "weather")]
    geoserver_workspace: String,

    #[arg(long, default_value = "time_temp")]
    geoserver_store: String,

    /// URL prefix under which GeoServer sees the output directory
    #[arg(long, env = "GEOSERVER_ROOT")]
    geoserver_root: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = RegionConfig::new(
        BoundingBox {
            min_lon: args.min_lon,
            max_lon: args.max_lon,
            min_lat: args.min_lat,
            max_lat: args.max_lat,
        },
        args.resolution,
    );
    config.no_data = args.no_data;

    let boundary = BoundaryReader::read(&args.boundary, config.epsg)
        .context("failed to load boundary polygons")?;
    let generator =
        SurfaceGenerator::new(config, &boundary).context("failed to set up surface generator")?;
    let store = SupabaseStore::new(&args.supabase_url, &args.supabase_key, &args.table)
        .context("failed to set up observation store")?;

    let summary = run_batch(&generator, &store, &args.output_dir)?;

    match (&args.geoserver_url, &args.geoserver_root) {
        (Some(url), Some(root)) => {
            let catalog = GeoServerClient::new(
                url,
                &args.geoserver_user,
                &args.geoserver_pass,
                &args.geoserver_workspace,
                &args.geoserver_store,
                root,
            )?;
            for path in &summary.generated {
                if let Err(e) = catalog.harvest(path) {
                    log::warn!("Harvest notification failed for {}: {}", path.display(), e);
                }
            }
        }
        (None, None) => {}
        _ => log::warn!(
            "Harvest disabled: both --geoserver-url and --geoserver-root must be set, got only one"
        ),
    }

    println!(
        "Generated {} raster(s); skipped {} existing, {} without observations, {} failed",
        summary.generated.len(),
        summary.skipped_existing,
        summary.skipped_no_data,
        summary.failed
    );

    Ok(())
}
