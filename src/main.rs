use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use street_merge_core::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OSM PBF extract to read
    pbf: PathBuf,

    /// Geometry encoding for emitted records
    #[arg(long, value_enum, default_value_t = Format::Polyline)]
    format: Format,

    /// Field delimiter (defaults to NUL)
    #[arg(long)]
    delim: Option<String>,

    /// Append midpoint, length and bounding box columns
    #[arg(long)]
    extended: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Polyline,
    Geojson,
    Wkt,
}

impl From<Format> for GeometryFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Polyline => GeometryFormat::Polyline,
            Format::Geojson => GeometryFormat::GeoJson,
            Format::Wkt => GeometryFormat::Wkt,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = OutputConfig {
        format: args.format.into(),
        extended: args.extended,
        ..OutputConfig::default()
    };
    if let Some(delim) = args.delim.filter(|delim| !delim.is_empty()) {
        config.delimiter = delim;
    }

    let store = StagingStore::create().context("Failed to create staging store")?;
    stage_pbf(&args.pbf, &store)
        .with_context(|| format!("Failed to stage {}", args.pbf.display()))?;

    let streets = generate_streets(&store).context("Failed to read staged ways")?;
    info!("extracted {} street fragments", streets.len());

    let mut normalizer = NameNormalizer::new(HttpNameParser::default());
    let clusters = cluster_by_name(streets, &mut normalizer)
        .context("Street name normalization failed")?;
    info!("{} distinct street names", clusters.len());

    let merged = merge_streets(clusters);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_streets(&merged, &config, &mut out).context("Failed to write output")?;
    out.flush()?;

    Ok(())
}
