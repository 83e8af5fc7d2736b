use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wboxer::models::Configuration;
use wboxer::services::archive;
use wboxer::services::converter::{Converter, OutputPaths, DEFAULT_ARCHIVE_PATH, DEFAULT_PREVIEW_PATH};
use wboxer::tiles::TileCatalog;

const DEFAULT_CONFIG_PATH: &str = "conf.json";

#[derive(Parser)]
#[command(name = "wboxer")]
#[command(version, about = "Turn an image into a WorldBox map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG or JPEG image into a map archive and a preview
    Convert {
        /// Source image
        image: PathBuf,

        /// Configuration file (JSON, or YAML by extension). Defaults to
        /// ./conf.json when present.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output archive
        #[arg(short, long, default_value = DEFAULT_ARCHIVE_PATH)]
        output: PathBuf,

        /// Output preview image
        #[arg(short, long, default_value = DEFAULT_PREVIEW_PATH)]
        preview: PathBuf,
    },
    /// Decode an archive, check it and print a summary
    Inspect {
        /// Archive to read
        archive: PathBuf,
    },
    /// List the tiles an image can be quantized to
    Tiles,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wboxer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            image,
            config,
            output,
            preview,
        } => run_convert_command(&image, config.as_deref(), output, preview),
        Commands::Inspect { archive } => run_inspect_command(&archive),
        Commands::Tiles => {
            run_tiles_command();
            Ok(())
        }
    }
}

/// An explicit config path must load; the default one may be absent.
fn load_config(path: Option<&Path>) -> anyhow::Result<Configuration> {
    match path {
        Some(path) => Ok(Configuration::load(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                Ok(Configuration::load(default_path)?)
            } else {
                tracing::warn!(
                    path = DEFAULT_CONFIG_PATH,
                    "No configuration found, using defaults"
                );
                Ok(Configuration::default())
            }
        }
    }
}

fn run_convert_command(
    image: &Path,
    config: Option<&Path>,
    output: PathBuf,
    preview: PathBuf,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let converter = Converter::new(config);

    let conversion = converter.convert_file(image)?;
    let paths = OutputPaths {
        archive: output,
        preview,
    };
    conversion.write(&paths)?;

    println!(
        "Wrote {} ({}x{} chunks, {} tiles, {}, {} bytes) and {}",
        paths.archive.display(),
        conversion.record.width,
        conversion.record.height,
        conversion.record.tile_map.len(),
        converter.algorithm(),
        conversion.archive.len(),
        paths.preview.display()
    );
    Ok(())
}

fn run_inspect_command(path: &Path) -> anyhow::Result<()> {
    let record = archive::read_archive(path)?;
    let (pixel_width, pixel_height) = record.pixel_size()?;
    let grid = record.grid();

    println!("{}", path.display());
    println!("  Name:         {}", record.map_stats.name);
    if !record.map_stats.description.is_empty() {
        println!("  Description:  {}", record.map_stats.description);
    }
    println!("  Save version: {}", record.save_version);
    println!(
        "  Size:         {}x{} chunks ({}x{} pixels)",
        record.width, record.height, pixel_width, pixel_height
    );
    println!(
        "  Runs:         {}",
        grid.tile_array.iter().map(Vec::len).sum::<usize>()
    );

    let total = u64::from(pixel_width) * u64::from(pixel_height);
    println!("\n  Tiles:");
    for (name, count) in grid.tile_counts() {
        let name = if name.is_empty() { "(unknown)" } else { name };
        let percent = if total > 0 {
            count as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        println!("    {name:<32} {count:>10} {percent:>6.2}%");
    }

    grid.validate(pixel_width, pixel_height)?;
    println!("\n  Grid OK");
    Ok(())
}

fn run_tiles_command() {
    let catalog = TileCatalog::global();
    for entry in catalog.entries() {
        let [r, g, b, _] = entry.color;
        let note = if catalog.shadowed().contains(&entry.name) {
            "  (color taken over by a later tile)"
        } else {
            ""
        };
        println!(
            "{:<18} {:<28} #{r:02x}{g:02x}{b:02x}{note}",
            entry.name, entry.save_id
        );
    }
}
