//! Point queries: which lanes contain a position, and which are closest to it.

use anyhow::Result;

use geom::{Distance, Pt2D};

use crate::{Interpolation, LaneID, Map, RANKING_STEP};

/// Lanes whose bounding box is within `max_distance` of the point, ordered by the true distance
/// from the point to each lane's nearest resampled centerline midpoint. `None` means no lane is
/// anywhere nearby -- the common case for positions off the network, and cheap to answer, since
/// nothing gets resampled.
///
/// Ties keep the candidate order the spatial index returned (the sort is stable).
pub fn nearest_lanes(
    map: &Map,
    pt: Pt2D,
    max_distance: Distance,
) -> Result<Option<Vec<LaneID>>> {
    if max_distance < Distance::ZERO {
        bail!("nearest_lanes needs a non-negative search radius, not {}", max_distance);
    }

    let candidates = map.lanes_near(pt, max_distance);
    if candidates.is_empty() {
        return Ok(None);
    }

    // The boxes are a poor proxy for distance when lanes curve or overlap, so rank candidates by
    // their nearest actual midpoint.
    let mut scored: Vec<(LaneID, Distance)> = Vec::new();
    for id in candidates {
        let midpoints = map.interpolated_centerline(&id, Interpolation::StepAlong(RANKING_STEP))?;
        let closest = midpoints
            .into_iter()
            .map(|mp| mp.dist_to(pt))
            .min()
            .unwrap();
        scored.push((id, closest));
    }
    scored.sort_by_key(|(_, dist)| *dist);

    Ok(Some(scored.into_iter().map(|(id, _)| id).collect()))
}

/// Every lane whose bounding box strictly contains the point, in lane ID order. A point exactly
/// on a box edge is in no lane.
pub fn lanes_containing(map: &Map, pt: Pt2D) -> Vec<LaneID> {
    map.all_lanes()
        .values()
        .filter(|lane| lane.covers(pt))
        .map(|lane| lane.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawLane, RawMap};

    fn rect_lane(id: &str, x1: f64, x2: f64, y: f64) -> RawLane {
        RawLane {
            id: id.to_string(),
            left_boundary: vec![Pt2D::new(x1, y + 2.0), Pt2D::new(x2, y + 2.0)],
            right_boundary: vec![Pt2D::new(x1, y - 2.0), Pt2D::new(x2, y - 2.0)],
            lanes_ahead: Vec::new(),
            lane_change_left: String::new(),
            lane_change_right: String::new(),
        }
    }

    fn map() -> Map {
        // Two parallel lanes: "low" centered on y=2, "high" centered on y=8.
        Map::create_from_raw(RawMap {
            name: "test map".to_string(),
            lanes: vec![
                rect_lane("low", 0.0, 10.0, 2.0),
                rect_lane("high", 0.0, 10.0, 8.0),
            ],
        })
        .unwrap()
    }

    #[test]
    fn ranks_by_true_midpoint_distance() {
        let map = map();
        // 2.5m from low's centerline, 3.5m from high's. Both boxes are within range.
        let ranked = nearest_lanes(&map, Pt2D::new(5.0, 4.5), Distance::meters(20.0))
            .unwrap()
            .unwrap();
        assert_eq!(ranked, vec![LaneID::new("low"), LaneID::new("high")]);

        let ranked = nearest_lanes(&map, Pt2D::new(5.0, 6.5), Distance::meters(20.0))
            .unwrap()
            .unwrap();
        assert_eq!(ranked, vec![LaneID::new("high"), LaneID::new("low")]);
    }

    #[test]
    fn none_when_nothing_nearby() {
        let map = map();
        assert_eq!(
            nearest_lanes(&map, Pt2D::new(500.0, 500.0), Distance::meters(20.0)).unwrap(),
            None
        );
    }

    #[test]
    fn negative_radius_fails_fast() {
        let map = map();
        assert!(nearest_lanes(&map, Pt2D::new(5.0, 2.0), Distance::meters(-1.0)).is_err());
    }

    #[test]
    fn containment_is_strict() {
        let map = map();
        assert_eq!(
            lanes_containing(&map, Pt2D::new(5.0, 2.0)),
            vec![LaneID::new("low")]
        );
        // y=4 is exactly the top edge of "low"'s box.
        assert!(lanes_containing(&map, Pt2D::new(5.0, 4.0)).is_empty());
        // Between the two lanes, in neither box.
        assert!(lanes_containing(&map, Pt2D::new(5.0, 5.0)).is_empty());
    }
}
