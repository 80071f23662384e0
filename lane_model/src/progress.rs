//! How far along a lane a position lies.

use anyhow::Result;

use geom::Pt2D;

use crate::{Interpolation, LaneID, Map, PROGRESS_POINTS};

/// Returns where the point falls along the lane's centerline, as a fraction in [0, 1]: 0 at the
/// start of the lane, 1 at its end. The estimate snaps to the nearest of a dense, evenly spaced
/// resampling, so a point far past either end just reports that end -- there's no extrapolation
/// outside [0, 1].
pub fn progress_along(map: &Map, pt: Pt2D, id: &LaneID) -> Result<f64> {
    let midpoints = map.interpolated_centerline(id, Interpolation::FixedPoints(PROGRESS_POINTS))?;

    // Evenly spaced, so midpoint i sits at fraction i / (n - 1). min_by_key takes the first of
    // equally near midpoints, so exact ties resolve towards the start of the lane.
    let (idx, _) = midpoints
        .iter()
        .enumerate()
        .min_by_key(|(_, mp)| mp.dist_to(pt))
        .unwrap();
    Ok((idx as f64) / ((midpoints.len() - 1) as f64))
}
