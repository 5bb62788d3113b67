use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use gridcity::config::{FileConfig, MapConfig};
use gridcity::generate;
use gridcity::geometry::Bounds;
use gridcity::map::{validate_records, write_map};

/// Generate procedural city layouts as JSON map files
///
/// Examples:
///   # Default 2km city
///   gridcity -o city.json
///
///   # Different seed, indented output for hand editing
///   gridcity --seed 7 --pretty -o city.json
///
///   # Small town with a tight downtown
///   gridcity --map-size 800 --downtown-size 400 --arterial-spacing 400 -o town.json
///
///   # Use a config file
///   gridcity --config my-city.toml
#[derive(Parser, Debug)]
#[command(name = "gridcity")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches gridcity.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output map file path (defaults to city_{seed}.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Total map extent in metres
    #[arg(long)]
    map_size: Option<i32>,

    /// Extent of the downtown square
    #[arg(long)]
    downtown_size: Option<i32>,

    /// Distance between arterial lines
    #[arg(long)]
    arterial_spacing: Option<i32>,

    /// Base grid pitch
    #[arg(long)]
    street_spacing: Option<i32>,

    /// Pitch of residential lines outside downtown
    #[arg(long)]
    suburb_block_size: Option<i32>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config: FileConfig = file_config.unwrap_or_default();

    let verbose = args.verbose || file_config.verbose;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "info" }),
    )
    .init();

    let config = merge_config(&args, &file_config);
    if let Err(e) = config.validate() {
        bail!("Invalid city configuration: {}", e);
    }

    let pretty = args.pretty || file_config.pretty;
    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from(format!("city_{}.json", config.seed)));

    println!("gridcity - Procedural City Layout Generator");
    println!("===========================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Map size: {}m", config.map_size);
        println!("  Downtown size: {}m", config.downtown_size);
        println!("  Arterial spacing: {}m", config.arterial_spacing);
        println!("  Street spacing: {}m", config.street_spacing);
        println!("  Suburb block size: {}m", config.suburb_block_size);
        println!(
            "  Lane keep: downtown {:.2}, suburb {:.2}",
            config.downtown_lane_keep, config.suburb_lane_keep
        );
        println!("  Seed: {}", config.seed);
        println!("  Output: {}", output_path.display());
        println!();
    }

    let spinner = create_spinner("Generating city layout...");
    let start = Instant::now();
    let city = generate(&config).context("Failed to generate city")?;
    spinner.finish_with_message(format!(
        "Generated {} records [{:.1}s]",
        city.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Validating layout...");
    let report = validate_records(&city.objects);
    spinner.finish_with_message(report.summary());
    for warning in &report.warnings {
        log::warn!("{}", warning);
    }
    if !report.is_valid() {
        bail!("Generated layout failed validation: {}", report.summary());
    }

    let spinner = create_spinner("Writing map file...");
    let start = Instant::now();
    write_map(&output_path, &city, pretty).context("Failed to write map file")?;
    let file_size = std::fs::metadata(&output_path).map(|m| m.len()).unwrap_or(0);
    spinner.finish_with_message(format!(
        "Wrote {} records ({:.1} KB) [{:.1}s]",
        city.len(),
        file_size as f64 / 1024.0,
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!("Records by type:");
    for (kind, count) in city.counts() {
        println!("  {:<22}{}", kind.registry_key(), count);
    }

    if verbose && let Some(bounds) = Bounds::from_records(&city.objects) {
        println!();
        println!(
            "Extent: x {:.1}..{:.1}, z {:.1}..{:.1} ({:.0}m x {:.0}m)",
            bounds.min_x,
            bounds.max_x,
            bounds.min_z,
            bounds.max_z,
            bounds.width(),
            bounds.depth()
        );
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());

    Ok(())
}

/// File settings with any command-line overrides applied
fn merge_config(args: &Args, file_config: &FileConfig) -> MapConfig {
    let base = file_config.map_config();
    MapConfig {
        map_size: args.map_size.unwrap_or(base.map_size),
        downtown_size: args.downtown_size.unwrap_or(base.downtown_size),
        arterial_spacing: args.arterial_spacing.unwrap_or(base.arterial_spacing),
        street_spacing: args.street_spacing.unwrap_or(base.street_spacing),
        suburb_block_size: args.suburb_block_size.unwrap_or(base.suburb_block_size),
        seed: args.seed.unwrap_or(base.seed),
        ..base
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
