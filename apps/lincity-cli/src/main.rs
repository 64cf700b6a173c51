use clap::{Parser, Subcommand};
use lincity_common::{SimulationSpeed, TileCoord};
use lincity_dialog::ConsolePresenter;
use lincity_kernel::{EngineConfig, EngineContext, World};
use lincity_persist::{PersistenceGateway, SaveFile};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Parser)]
#[command(name = "lincity-cli", about = "Found, save and load cities")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML engine config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and startup state
    Info,
    /// List registered construction types
    Registry,
    /// Found a city, simulate it for a while and save it
    New {
        /// Save path (defaults to the configured save directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        width: Option<u16>,
        #[arg(long)]
        height: Option<u16>,
        /// Number of constructions to try placing
        #[arg(short, long, default_value = "20")]
        buildings: usize,
        /// Number of ticks to simulate before saving
        #[arg(short, long, default_value = "10")]
        ticks: u64,
        /// Simulation speed: paused, slow, medium or fast
        #[arg(short, long)]
        speed: Option<SimulationSpeed>,
    },
    /// Load a saved city and print a summary
    Load {
        path: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct CitySummary {
    id: String,
    width: u16,
    height: u16,
    tick: u64,
    seed: u64,
    money: i64,
    constructions: usize,
    state_hash: String,
}

impl CitySummary {
    fn of(world: &World) -> Self {
        Self {
            id: world.id().to_string(),
            width: world.width(),
            height: world.height(),
            tick: world.tick(),
            seed: world.seed(),
            money: world.money(),
            constructions: world.placement_count(),
            state_hash: format!("{:#x}", world.state_hash()),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(
            std::io::stderr
                .with_max_level(tracing::Level::WARN)
                .or_else(std::io::stdout),
        )
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::default(),
    };

    let mut ctx = EngineContext::bootstrap_with(&config)?;
    let mut gateway = PersistenceGateway::new(SaveFile, ConsolePresenter::stderr());

    match cli.command {
        Commands::Info => {
            println!("lincity-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("construction types: {}", ctx.registry().len());
            println!("seed: {}", ctx.rng().seed());
            println!(
                "speed: {} ({} ms/tick)",
                ctx.simulation_speed(),
                ctx.simulation_speed().delay_ms()
            );
            println!("default save: {}", config.default_save_path().display());
        }
        Commands::Registry => {
            for ty in ctx.registry().iter() {
                println!(
                    "{:<16} {:<38} {:<11} {}x{:<3} {:>8}",
                    ty.id.as_str(),
                    ty.name,
                    format!("{:?}", ty.group),
                    ty.size,
                    ty.size,
                    ty.cost
                );
            }
        }
        Commands::New {
            out,
            width,
            height,
            buildings,
            ticks,
            speed,
        } => {
            if let Some(speed) = speed {
                ctx.set_simulation_speed(speed);
            }
            let width = width.unwrap_or(config.map_width);
            let height = height.unwrap_or(config.map_height);
            let mut world = found_city(&mut ctx, width, height, buildings);

            if ctx.simulation_speed().is_paused() {
                tracing::info!("simulation paused, skipping {ticks} ticks");
            } else {
                for _ in 0..ticks {
                    world.step();
                }
            }

            let path = out.unwrap_or_else(|| config.default_save_path());
            if !gateway.save(&ctx, &world, &path) {
                return Ok(ExitCode::FAILURE);
            }
            println!(
                "Founded city {}: tick={}, constructions={}, money={}",
                world.id(),
                world.tick(),
                world.placement_count(),
                world.money()
            );
        }
        Commands::Load { path, json } => {
            let Some(world) = gateway.load(&ctx, &path) else {
                return Ok(ExitCode::FAILURE);
            };
            let summary = CitySummary::of(&world);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "City {}: {}x{} tick={} seed={} money={} constructions={} hash={}",
                    summary.id,
                    summary.width,
                    summary.height,
                    summary.tick,
                    summary.seed,
                    summary.money,
                    summary.constructions,
                    summary.state_hash
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Scatter up to `buildings` random constructions over a fresh map.
/// Placements that collide or fall off the edge are skipped.
fn found_city(ctx: &mut EngineContext, width: u16, height: u16, buildings: usize) -> World {
    let seed = ctx.rng_mut().next_u64();
    let mut world = World::with_seed(width, height, seed);
    let kinds: Vec<_> = ctx.registry().iter().map(|ty| ty.id.clone()).collect();
    if kinds.is_empty() || width == 0 || height == 0 {
        return world;
    }

    for _ in 0..buildings {
        let rng = ctx.rng_mut();
        let kind = kinds[rng.below(kinds.len() as u64) as usize].clone();
        let tile = TileCoord::new(
            rng.below(u64::from(width)) as u16,
            rng.below(u64::from(height)) as u16,
        );
        if let Err(e) = world.place(ctx.registry(), tile, kind) {
            tracing::debug!("skipped placement: {e}");
        }
    }
    world
}
