use std::collections::BTreeMap;

use anyhow::Result;

use geom::{Bounds, Distance, FindNearby, PolyLine, Pt2D};

use crate::raw::{RawLane, RawMap};
use crate::{Lane, LaneID};

/// An immutable snapshot of a lane network, validated and indexed for point queries.
pub struct Map {
    name: String,
    lanes: BTreeMap<LaneID, Lane>,
    bounds: Bounds,
    index: FindNearby<LaneID>,
}

/// How to resample a lane's centerline into an ordered list of midpoints.
#[derive(Clone, Copy, Debug)]
pub enum Interpolation {
    /// A midpoint every fixed distance along the centerline, endpoints included.
    StepAlong(Distance),
    /// A fixed number of evenly spaced midpoints, endpoints included. Must be at least 2.
    FixedPoints(usize),
}

impl Map {
    pub fn load(path: &str) -> Result<Map> {
        Map::create_from_raw(RawMap::load(path)?)
    }

    /// Validates the raw lanes, derives centerlines and bounding boxes from the boundary
    /// polylines, and normalizes the source's empty-string "no connection" sentinels into real
    /// options, so no downstream code ever sees them.
    pub fn create_from_raw(raw: RawMap) -> Result<Map> {
        let mut lanes: BTreeMap<LaneID, Lane> = BTreeMap::new();
        for r in raw.lanes {
            let id = LaneID::new(r.id.clone());
            if lanes.contains_key(&id) {
                bail!("{} appears twice in {}", id, raw.name);
            }
            let lane = build_lane(id.clone(), r)?;
            lanes.insert(id, lane);
        }
        if lanes.is_empty() {
            bail!("{} has no lanes", raw.name);
        }

        let mut bounds = Bounds::new();
        for lane in lanes.values() {
            bounds.union(lane.bounds.clone());
        }

        let mut index = FindNearby::new(&bounds);
        for (id, lane) in &lanes {
            index.add(id.clone(), lane.bounds.clone());
        }

        let dangling = lanes
            .values()
            .flat_map(|l| l.connections())
            .filter(|id| !lanes.contains_key(id))
            .count();
        if dangling > 0 {
            warn!(
                "{} has {} connections referencing lanes outside this map; they won't be \
                 traversable",
                raw.name, dangling
            );
        }
        info!("Built {} with {} lanes", raw.name, lanes.len());

        Ok(Map {
            name: raw.name,
            lanes,
            bounds,
            index,
        })
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn all_lanes(&self) -> &BTreeMap<LaneID, Lane> {
        &self.lanes
    }

    pub fn get_bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn maybe_get_l(&self, id: &LaneID) -> Option<&Lane> {
        self.lanes.get(id)
    }

    pub fn get_l(&self, id: &LaneID) -> &Lane {
        if let Some(lane) = self.lanes.get(id) {
            lane
        } else {
            panic!("Can't get_l({})", id);
        }
    }

    /// IDs of lanes whose bounding box lies within `radius` of the point. Coarse; the boxes may
    /// be much bigger than the lanes themselves.
    pub fn lanes_near(&self, pt: Pt2D, radius: Distance) -> Vec<LaneID> {
        self.index.query_pt(pt, radius)
    }

    /// The lane's centerline, resampled into ordered midpoints.
    pub fn interpolated_centerline(
        &self,
        id: &LaneID,
        interpolation: Interpolation,
    ) -> Result<Vec<Pt2D>> {
        let lane = match self.maybe_get_l(id) {
            Some(l) => l,
            None => bail!("{} isn't in {}", id, self.name),
        };
        let pts = match interpolation {
            Interpolation::StepAlong(step) => lane.center_pts.step_along(step),
            Interpolation::FixedPoints(n) => lane.center_pts.evenly_spaced_points(n),
        };
        Ok(pts)
    }
}

fn build_lane(id: LaneID, r: RawLane) -> Result<Lane> {
    let left = match PolyLine::deduping_new(r.left_boundary.clone()) {
        Ok(pl) => pl,
        Err(err) => bail!("{} has a degenerate left boundary: {}", id, err),
    };
    let right = match PolyLine::deduping_new(r.right_boundary.clone()) {
        Ok(pl) => pl,
        Err(err) => bail!("{} has a degenerate right boundary: {}", id, err),
    };

    // Resample both edges to a common density, then average them pointwise to get the centerline.
    let n = left.points().len().max(right.points().len());
    let center_pts: Vec<Pt2D> = left
        .evenly_spaced_points(n)
        .into_iter()
        .zip(right.evenly_spaced_points(n))
        .map(|(l, r)| l.center(r))
        .collect();
    let center_pts = match PolyLine::deduping_new(center_pts) {
        Ok(pl) => pl,
        Err(_) => bail!("{}'s boundaries collapse to a single point", id),
    };

    // The box covers both edges, not just the centerline.
    let mut bounds = Bounds::from(&r.left_boundary);
    bounds.union(Bounds::from(&r.right_boundary));

    Ok(Lane {
        id,
        center_pts,
        bounds,
        lanes_ahead: r
            .lanes_ahead
            .into_iter()
            .filter(|id| !id.is_empty())
            .map(LaneID::new)
            .collect(),
        lane_change_left: normalize_connection(r.lane_change_left),
        lane_change_right: normalize_connection(r.lane_change_right),
    })
}

fn normalize_connection(id: String) -> Option<LaneID> {
    if id.is_empty() {
        None
    } else {
        Some(LaneID::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A straight lane along +x, 4m wide, centered vertically on y.
    fn rect_lane(id: &str, x1: f64, x2: f64, y: f64, ahead: Vec<&str>) -> RawLane {
        RawLane {
            id: id.to_string(),
            left_boundary: vec![Pt2D::new(x1, y + 2.0), Pt2D::new(x2, y + 2.0)],
            right_boundary: vec![Pt2D::new(x1, y - 2.0), Pt2D::new(x2, y - 2.0)],
            lanes_ahead: ahead.into_iter().map(|x| x.to_string()).collect(),
            lane_change_left: String::new(),
            lane_change_right: String::new(),
        }
    }

    fn map(lanes: Vec<RawLane>) -> Map {
        Map::create_from_raw(RawMap {
            name: "test map".to_string(),
            lanes,
        })
        .unwrap()
    }

    #[test]
    fn centerline_splits_the_boundaries() {
        let map = map(vec![rect_lane("a", 0.0, 10.0, 2.0, vec![])]);
        let lane = map.get_l(&LaneID::new("a"));
        assert_eq!(lane.center_pts.first_pt(), Pt2D::new(0.0, 2.0));
        assert_eq!(lane.center_pts.last_pt(), Pt2D::new(10.0, 2.0));
        // The box covers the full width, not just the centerline.
        assert_eq!(lane.bounds.min_y, 0.0);
        assert_eq!(lane.bounds.max_y, 4.0);
        assert_eq!(map.get_bounds().max_x, 10.0);
    }

    #[test]
    fn sentinels_become_options() {
        let mut raw = rect_lane("a", 0.0, 10.0, 2.0, vec!["b", ""]);
        raw.lane_change_right = "c".to_string();
        let map = map(vec![raw]);
        let lane = map.get_l(&LaneID::new("a"));
        // The empty string in lanes_ahead is dropped, not kept as a fake ID.
        assert_eq!(lane.lanes_ahead, vec![LaneID::new("b")]);
        assert_eq!(lane.lane_change_left, None);
        assert_eq!(lane.lane_change_right, Some(LaneID::new("c")));
        // "b" and "c" aren't in this map; lookups on them must say so.
        assert!(map.maybe_get_l(&LaneID::new("b")).is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Map::create_from_raw(RawMap {
            name: "test map".to_string(),
            lanes: vec![
                rect_lane("a", 0.0, 10.0, 2.0, vec![]),
                rect_lane("a", 20.0, 30.0, 2.0, vec![]),
            ],
        });
        assert!(result.is_err());
    }

    #[test]
    fn degenerate_boundaries_rejected() {
        let mut raw = rect_lane("a", 0.0, 10.0, 2.0, vec![]);
        raw.left_boundary = vec![Pt2D::new(0.0, 4.0)];
        assert!(Map::create_from_raw(RawMap {
            name: "test map".to_string(),
            lanes: vec![raw],
        })
        .is_err());
    }

    #[test]
    fn interpolation_modes() {
        let map = map(vec![rect_lane("a", 0.0, 10.0, 2.0, vec![])]);
        let id = LaneID::new("a");

        let pts = map
            .interpolated_centerline(&id, Interpolation::FixedPoints(11))
            .unwrap();
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[5], Pt2D::new(5.0, 2.0));

        let pts = map
            .interpolated_centerline(&id, Interpolation::StepAlong(Distance::meters(2.0)))
            .unwrap();
        assert_eq!(pts[0], Pt2D::new(0.0, 2.0));
        assert_eq!(pts[1], Pt2D::new(2.0, 2.0));
        assert_eq!(*pts.last().unwrap(), Pt2D::new(10.0, 2.0));

        assert!(map
            .interpolated_centerline(&LaneID::new("nope"), Interpolation::FixedPoints(5))
            .is_err());
    }

    #[test]
    fn lanes_near_uses_the_boxes() {
        let map = map(vec![
            rect_lane("a", 0.0, 10.0, 2.0, vec![]),
            rect_lane("b", 50.0, 60.0, 2.0, vec![]),
        ]);
        let hits = map.lanes_near(Pt2D::new(12.0, 2.0), Distance::meters(5.0));
        assert_eq!(hits, vec![LaneID::new("a")]);
        assert!(map
            .lanes_near(Pt2D::new(30.0, 2.0), Distance::meters(5.0))
            .is_empty());
    }
}
