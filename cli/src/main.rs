//! A small multi-tool for querying lane networks from the command line: reconstruct the route a
//! recorded trajectory drove, rank the lanes near a position, or measure progress along a lane.

#[macro_use]
extern crate log;

use anyhow::Result;
use structopt::StructOpt;

use geom::{Distance, Pt2D};
use lane_model::{nearest_lanes, progress_along, reconstruct_route, LaneID, Map};

#[derive(StructOpt)]
#[structopt(name = "lanematch", about = "Query tools for lane networks")]
enum Command {
    /// Reconstruct the chain of lanes a recorded trajectory drove through
    Route {
        /// The path to a JSON map file
        #[structopt(long)]
        map: String,
        /// The path to a JSON file with an ordered list of trajectory points
        #[structopt(long)]
        trajectory: String,
    },
    /// Rank the lanes whose bounding box is near a position, closest first
    Nearest {
        /// The path to a JSON map file
        #[structopt(long)]
        map: String,
        #[structopt(long)]
        x: f64,
        #[structopt(long)]
        y: f64,
        /// Ignore lanes whose bounding box is further away than this, in meters
        #[structopt(long, default_value = "30.0")]
        max_distance: f64,
    },
    /// Print how far along a lane a position lies, from 0 (start) to 1 (end)
    Progress {
        /// The path to a JSON map file
        #[structopt(long)]
        map: String,
        /// The ID of a lane in the map
        #[structopt(long)]
        lane: String,
        #[structopt(long)]
        x: f64,
        #[structopt(long)]
        y: f64,
    },
}

fn main() -> Result<()> {
    setup_logger();

    match Command::from_args() {
        Command::Route { map, trajectory } => route(map, trajectory),
        Command::Nearest {
            map,
            x,
            y,
            max_distance,
        } => nearest(map, Pt2D::new(x, y), Distance::meters(max_distance)),
        Command::Progress { map, lane, x, y } => progress(map, lane, Pt2D::new(x, y)),
    }
}

fn setup_logger() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}

fn route(map_path: String, trajectory_path: String) -> Result<()> {
    let map = Map::load(&map_path)?;
    let trajectory: Vec<Pt2D> = serde_json::from_slice(&fs_err::read(&trajectory_path)?)?;
    info!(
        "Matching a {}-sample trajectory against {}",
        trajectory.len(),
        map.get_name()
    );

    match reconstruct_route(&map, &trajectory)? {
        Some(route) => {
            for id in route.steps() {
                println!("{}", id);
            }
        }
        None => println!("No route found"),
    }
    Ok(())
}

fn nearest(map_path: String, pt: Pt2D, max_distance: Distance) -> Result<()> {
    let map = Map::load(&map_path)?;

    match nearest_lanes(&map, pt, max_distance)? {
        Some(ranked) => {
            for id in ranked {
                println!("{}", id);
            }
        }
        None => println!("No lanes within {} of {}", max_distance, pt),
    }
    Ok(())
}

fn progress(map_path: String, lane: String, pt: Pt2D) -> Result<()> {
    let map = Map::load(&map_path)?;
    let id = LaneID::new(lane);
    println!("{:.3}", progress_along(&map, pt, &id)?);
    Ok(())
}
