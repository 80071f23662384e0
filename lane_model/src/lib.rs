//! lane_model answers two questions about a digitized lane network: which lanes is a position
//! near, and which chain of lanes did a recorded trajectory drive through? It's built for
//! evaluation pipelines that need to turn raw (x, y) samples into discrete lane IDs.
//!
//! A `Map` is an immutable snapshot, built once from its raw serialized form and safe to share
//! between threads; queries never mutate it.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod lane;
mod map;
mod nearest;
mod progress;
pub mod raw;
mod route;

pub use crate::lane::{Lane, LaneID};
pub use crate::map::{Interpolation, Map};
pub use crate::nearest::{lanes_containing, nearest_lanes};
pub use crate::progress::progress_along;
pub use crate::route::{reconstruct_route, Route};

use geom::Distance;

/// Centerline resampling step used when ranking lanes by distance to a point.
pub const RANKING_STEP: Distance = Distance::const_meters(1.0);

/// How many evenly spaced centerline points to use for progress estimates. Deliberately denser
/// than `RANKING_STEP` sampling on ordinary lanes; progress needs the resolution, ranking doesn't.
pub const PROGRESS_POINTS: usize = 100;
