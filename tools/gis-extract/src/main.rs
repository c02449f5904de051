use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use yerevan_transit::source::{load_stop_records, FeatureSource, ServiceEndpoints};
use yerevan_transit::source::arcgis::{DEFAULT_BASE_URL, DEFAULT_MAX_RECORDS};
use yerevan_transit::{RouteSynthesizer, StopCatalog, SynthesisConfig};

mod fetch;
mod output;
mod summary;

use fetch::{FileSource, HttpSource};
use output::{write_network_json, write_routes_geojson};
use summary::NetworkSummary;

#[derive(Parser, Debug)]
#[command(
    name = "gis-extract",
    author,
    version,
    about = "Fetch Yerevan stop layers and synthesize the bundled transport network",
    long_about = "Downloads bus stops and metro stations from the Yerevan municipal GIS \
                  (ArcGIS REST), synthesizes a route network that serves every stop, and \
                  writes the JSON document the mobile app seeds its database from.\n\n\
                  Routes are grouped radially around the city centre, along east-west and \
                  north-south corridors, around communities and along the metro line. \
                  Connector routes then pick up every stop left over."
)]
struct Args {
    /// Output JSON file consumed by the app
    #[arg(short, long, default_value = "app/src/main/assets/transport_data.json")]
    output: PathBuf,

    /// Also write route lines as GeoJSON to this file
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Read bus stops from a saved query response instead of the live service
    #[arg(long)]
    bus_input: Option<PathBuf>,

    /// Read metro stations from a saved query response (only with --bus-input)
    #[arg(long, requires = "bus_input")]
    metro_input: Option<PathBuf>,

    /// ArcGIS hosted services root
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Maximum features requested per layer
    #[arg(long, default_value_t = DEFAULT_MAX_RECORDS)]
    max_records: u32,

    /// JSON file overriding synthesis parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed seed for route headways (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<SynthesisConfig> {
    let Some(path) = path else {
        return Ok(SynthesisConfig::default());
    };
    log::info!("Config: {}", path.display());
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    SynthesisConfig::from_json(&json).context("Failed to parse synthesis config")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Yerevan Transport GIS Extractor ===");
    log::info!("Output: {}", args.output.display());

    let config = load_config(args.config.as_ref())?;
    let endpoints = ServiceEndpoints {
        base_url: args.base_url.clone(),
        max_records: args.max_records,
        ..Default::default()
    };

    // Phase 1: Fetch stop layers
    log::info!("");
    log::info!("[1/4] Fetching stop layers...");
    let source: Box<dyn FeatureSource> = match &args.bus_input {
        Some(bus_path) => {
            log::info!("  Reading saved layers from {}", bus_path.display());
            Box::new(FileSource::new(&endpoints, bus_path.clone(), args.metro_input.clone()))
        }
        None => {
            log::info!("  Querying {}", endpoints.base_url);
            Box::new(HttpSource::new(endpoints.clone()).context("Failed to build HTTP client")?)
        }
    };
    let records = load_stop_records(source.as_ref(), &endpoints)
        .await
        .context("Failed to load stop layers")?;

    if records.is_empty() {
        bail!("No stops retrieved. Is the GIS service reachable?");
    }

    // Phase 2: Build the stop catalog
    log::info!("");
    log::info!("[2/4] Building stop catalog...");
    let catalog = StopCatalog::new(records.bus, records.metro, config.center.point());
    log::info!(
        "  {} stops ({} bus, {} metro)",
        catalog.len(),
        catalog.bus_stops().len(),
        catalog.metro_stops().len()
    );
    log::info!("  {} communities", catalog.communities().len());

    // Phase 3: Synthesize routes
    log::info!("");
    log::info!("[3/4] Generating routes...");
    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("  Seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let network = RouteSynthesizer::new(config).synthesize(&catalog, &mut rng);
    network
        .verify_coverage()
        .context("Route synthesis left stops unserved; no output written")?;
    log::info!(
        "  {} routes, {} route-stop links",
        network.routes.len(),
        network.route_stop_refs.len()
    );

    // Phase 4: Write output
    log::info!("");
    log::info!("[4/4] Writing output...");
    write_network_json(&network, &args.output).context("Failed to write network JSON")?;

    if let Some(geojson_path) = &args.geojson {
        write_routes_geojson(&network, geojson_path).context("Failed to write route GeoJSON")?;
    }

    // Summary
    log::info!("");
    NetworkSummary::from_network(&network).log_summary();
    log::info!("");
    log::info!("Done!");

    Ok(())
}
