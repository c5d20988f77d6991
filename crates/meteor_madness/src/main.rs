//! Meteor Madness command line entry point

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use rand::{rngs::StdRng, SeedableRng};

use meteor_engine::config::Config;
use meteor_engine::foundation::logging;
use meteor_engine::Engine;
use meteor_madness::api::{AsteroidApi, HttpAsteroidClient};
use meteor_madness::cards::AsteroidCard;
use meteor_madness::{MeteorConfig, MeteorMadnessApp, ScheduledAction};

const DEFAULT_FRAMES: u64 = 600;

fn cli() -> Command {
    Command::new("meteor_madness")
        .about("Simulates a meteor shower with explosions and an impact heatmap")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML or RON configuration file"),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(u64))
                .help("Number of frames to simulate"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .value_parser(clap::value_parser!(u64))
                .help("Random seed for a reproducible run"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(u32))
                .help("Canvas width"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(u32))
                .help("Canvas height"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PNG")
                .help("Write the final frame to this PNG file"),
        )
        .arg(
            Arg::new("action")
                .short('a')
                .long("action")
                .value_name("FRAME:ACTION")
                .action(ArgAction::Append)
                .help("Press start, pause or reset at a frame (repeatable)"),
        )
        .arg(
            Arg::new("realtime")
                .long("realtime")
                .action(ArgAction::SetTrue)
                .help("Pace the loop at the target frame rate"),
        )
        .arg(
            Arg::new("fetch-asteroids")
                .long("fetch-asteroids")
                .action(ArgAction::SetTrue)
                .help("Fetch near-Earth asteroids and print their cards before running"),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => MeteorConfig::load_from_file(path).with_context(|| format!("Failed to load config {}", path))?,
        None => MeteorConfig::default(),
    };

    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.simulation.seed = Some(*seed);
    }
    if let Some(width) = matches.get_one::<u32>("width") {
        config.canvas.width = *width;
    }
    if let Some(height) = matches.get_one::<u32>("height") {
        config.canvas.height = *height;
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config.output.snapshot_path = Some(output.clone());
    }
    if matches.get_flag("realtime") {
        config.engine.realtime = true;
    }
    let frames = matches
        .get_one::<u64>("frames")
        .copied()
        .or(config.engine.max_frames)
        .unwrap_or(DEFAULT_FRAMES);
    config.engine.max_frames = Some(frames);
    config.validate().context("Invalid configuration")?;

    logging::init(&config.engine.log_level);
    log::info!("Starting Meteor Madness ({} frames)", frames);

    let schedule = matches
        .get_many::<String>("action")
        .into_iter()
        .flatten()
        .map(|s| s.parse::<ScheduledAction>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()
        .context("Invalid --action")?;

    let mut app = MeteorMadnessApp::new(config.clone()).with_schedule(schedule);

    if matches.get_flag("fetch-asteroids") {
        show_asteroids(&config, &mut app);
    }

    Engine::run(config.engine.clone(), &config.canvas, &mut app).context("Simulation failed")?;

    let stats = app.stats();
    println!(
        "Total impacts: {} | meteors in flight: {} | live particles: {}",
        stats.impacts, stats.meteors, stats.particles
    );
    if let Some(path) = &config.output.snapshot_path {
        println!("Snapshot: {}", path);
    }
    Ok(())
}

fn show_asteroids(config: &MeteorConfig, app: &mut MeteorMadnessApp) {
    let client = HttpAsteroidClient::new(&config.api);
    let records = match client.fetch_asteroids() {
        Ok(records) => records,
        Err(e) => {
            log::error!("Could not fetch asteroids from {}: {}", client.base_url(), e);
            return;
        }
    };

    for record in &records {
        println!("{}\n", AsteroidCard::new(record));
    }

    let mut rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let globe = app.globe_mut();
    globe.set_asteroids(&records, &mut rng);
    let hazardous = globe.markers().iter().filter(|m| m.hazardous).count();
    println!(
        "Globe: {} asteroid markers ({} hazardous)",
        globe.markers().len(),
        hazardous
    );

    if let Some(first) = records.first() {
        let (lat, lng) = (0.0, 0.0);
        match AsteroidCard::new(first).simulate_impact(&client, lat, lng) {
            Ok(outcome) => println!("Simulated impact: {}", outcome),
            Err(e) => log::error!("Impact simulation failed: {}", e),
        }
        match client.terrain(lat, lng) {
            Ok(sample) => println!(
                "Terrain at ({}, {}): {} m",
                sample.latitude, sample.longitude, sample.elevation_meters
            ),
            Err(e) => log::error!("Terrain lookup failed: {}", e),
        }
    }
}
