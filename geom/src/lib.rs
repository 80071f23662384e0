//! Basic 2D geometry for world-space maps: points, distances, bounding boxes, polylines, and a
//! coarse spatial index. Everything is in meters.

#[macro_use]
extern crate anyhow;

use serde::{Deserialize, Deserializer, Serializer};

mod bounds;
mod distance;
mod find_nearby;
mod polyline;
mod pt;

pub use crate::bounds::Bounds;
pub use crate::distance::Distance;
pub use crate::find_nearby::FindNearby;
pub use crate::polyline::PolyLine;
pub use crate::pt::Pt2D;

/// Segment lengths below this are considered degenerate.
pub const EPSILON_DIST: Distance = Distance::const_meters(0.0001);

// Round everything to 0.1 mm, so that serialized geometry is compact and comparisons don't chase
// floating-point dust.
pub(crate) fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

pub(crate) fn serialize_f64<S: Serializer>(x: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(*x)
}

pub(crate) fn deserialize_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let x = <f64>::deserialize(d)?;
    Ok(trim_f64(x))
}
