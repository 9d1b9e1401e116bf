//! Hexhamlet - Entry Point
//!
//! Headless command loop for driving the village engine: click tiles to claim
//! frontier land, place buildings, and harvest resources. Time is advanced
//! explicitly with the `tick` command so sessions are reproducible.

use std::fs::File;
use std::io::{self, Write};

use clap::Parser;

use hexhamlet::core::config::VillageConfig;
use hexhamlet::core::error::Result;
use hexhamlet::core::types::Millis;
use hexhamlet::grid::coord::AxialCoord;
use hexhamlet::village::ledger::ResourceKind;
use hexhamlet::village::sim::{ClickOutcome, VillageSim};
use hexhamlet::village::snapshot;
use hexhamlet::village::tile::TileKind;

#[derive(Parser, Debug)]
#[command(name = "hexhamlet", about = "Hex-grid village builder simulation")]
struct Args {
    /// Diameter of the initial playable area, in tiles
    #[arg(long, default_value_t = 10)]
    size: i32,

    /// RNG seed for map generation and random conversions
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("hexhamlet=info")
        .init();

    let args = Args::parse();
    let config = VillageConfig {
        map_size: args.size,
        ..VillageConfig::default()
    };

    tracing::info!(size = args.size, seed = args.seed, "Hexhamlet starting...");
    let mut sim = VillageSim::new(config, args.seed)?;
    let mut now: Millis = 0;

    println!("\n=== HEXHAMLET ===");
    println!("A hex-grid village builder");
    println!();
    println!("Commands:");
    println!("  status / s        - Show map and resource totals");
    println!("  click <q> <r>     - Click the tile at axial (q, r)");
    println!("  tick <ms>         - Advance the clock by ms milliseconds");
    println!("  save <file>       - Write the tile snapshot as JSON");
    println!("  reset             - Regenerate the map");
    println!("  quit / q          - Exit");
    println!();

    loop {
        display_status(&sim, now);

        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => {}
            ["quit"] | ["q"] => break,
            ["status"] | ["s"] => {}
            ["tick", ms] => match ms.parse::<Millis>() {
                Ok(delta) => {
                    now += delta;
                    let changed = sim.tick(now);
                    println!("Advanced to {now} ms; {} tile(s) changed", changed.len());
                }
                Err(_) => println!("Usage: tick <ms>"),
            },
            ["click", q, r] => match (q.parse::<i32>(), r.parse::<i32>()) {
                (Ok(q), Ok(r)) => handle_click(&mut sim, AxialCoord::axial(q, r), now),
                _ => println!("Usage: click <q> <r>"),
            },
            ["save", path] => match File::create(path) {
                Ok(file) => match snapshot::save_to(sim.store(), file) {
                    Ok(()) => println!("Saved {} tiles to {path}", sim.store().len()),
                    Err(e) => println!("Save failed: {e}"),
                },
                Err(e) => println!("Cannot create {path}: {e}"),
            },
            ["reset"] => {
                sim.reset();
                println!("Map regenerated");
            }
            _ => println!("Unknown command: {}", line.trim()),
        }
    }

    tracing::info!("Hexhamlet shutting down");
    Ok(())
}

fn handle_click(sim: &mut VillageSim, coord: AxialCoord, now: Millis) {
    let Some(id) = sim.store().get_by_coord(coord).map(|t| t.id) else {
        println!("No tile at {coord}");
        return;
    };

    match sim.click(id, now) {
        Ok(ClickOutcome::Expanded { converted, created }) => {
            println!(
                "Claimed {} as {}; {} new border tile(s)",
                converted.coord,
                converted.kind.as_str(),
                created.len()
            );
        }
        Ok(ClickOutcome::ConstructionStarted { tile }) => {
            println!("Started building a {} at {}", tile.kind.as_str(), tile.coord);
        }
        Ok(ClickOutcome::Harvested { tile, delta }) => {
            println!(
                "Harvested {} {:?} at {}",
                delta.amount, delta.kind, tile.coord
            );
        }
        Ok(ClickOutcome::Ignored) => println!("Nothing happens"),
        Err(e) => println!("Click failed: {e}"),
    }
}

fn display_status(sim: &VillageSim, now: Millis) {
    let mut borders = 0;
    let mut harvestable = 0;
    let mut buildings = 0;
    for tile in sim.store().all() {
        match tile.kind {
            TileKind::Border => borders += 1,
            TileKind::Forest | TileKind::Grain => harvestable += 1,
            TileKind::Building(_) => buildings += 1,
            TileKind::Empty => {}
        }
    }
    println!(
        "[{} ms] tiles: {} (border {borders}, harvestable {harvestable}, buildings {buildings}) | grain: {} wood: {}",
        now,
        sim.store().len(),
        sim.resources(ResourceKind::Grain),
        sim.resources(ResourceKind::Wood),
    );
}
