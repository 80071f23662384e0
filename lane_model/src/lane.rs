use std::fmt;

use geom::{Bounds, Distance, PolyLine, Pt2D};

/// A lane keeps the opaque ID assigned by the source map data.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LaneID(pub String);

impl LaneID {
    pub fn new(id: impl Into<String>) -> LaneID {
        LaneID(id.into())
    }
}

impl fmt::Display for LaneID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Lane #{}", self.0)
    }
}

/// A single directed lane: its centerline, a coarse bounding box, and direct connections to other
/// lanes. Immutable once the `Map` is built.
pub struct Lane {
    pub id: LaneID,
    /// Derived from the boundary polylines at ingestion; this is what distance and progress
    /// queries resample.
    pub center_pts: PolyLine,
    /// Covers both boundary polylines, not just the centerline. Coarse filtering only -- never a
    /// substitute for real distance checks.
    pub bounds: Bounds,
    /// Successors in the direction of travel. May name lanes missing from this map tile.
    pub lanes_ahead: Vec<LaneID>,
    pub lane_change_left: Option<LaneID>,
    pub lane_change_right: Option<LaneID>,
}

impl Lane {
    /// True if the point falls strictly inside this lane's bounding box. A point exactly on an
    /// edge is in no lane; downstream consumers depend on that edge policy, so don't relax it.
    pub fn covers(&self, pt: Pt2D) -> bool {
        pt.x() > self.bounds.min_x
            && pt.x() < self.bounds.max_x
            && pt.y() > self.bounds.min_y
            && pt.y() < self.bounds.max_y
    }

    /// The diagonal of the bounding box: an upper bound on the lane's length, cheap to compute.
    pub fn approx_length(&self) -> Distance {
        Distance::meters(self.bounds.width().hypot(self.bounds.height()))
    }

    /// Every lane directly reachable from this one: successors, then lane changes.
    pub fn connections(&self) -> Vec<LaneID> {
        let mut ids = self.lanes_ahead.clone();
        ids.extend(self.lane_change_left.clone());
        ids.extend(self.lane_change_right.clone());
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane() -> Lane {
        Lane {
            id: LaneID::new("a"),
            center_pts: PolyLine::must_new(vec![Pt2D::new(0.0, 2.0), Pt2D::new(10.0, 2.0)]),
            bounds: Bounds::from(&[Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 4.0)]),
            lanes_ahead: vec![LaneID::new("b"), LaneID::new("c")],
            lane_change_left: None,
            lane_change_right: Some(LaneID::new("d")),
        }
    }

    #[test]
    fn covers_is_strict() {
        let l = lane();
        assert!(l.covers(Pt2D::new(5.0, 2.0)));
        // Points exactly on an edge or corner don't count.
        assert!(!l.covers(Pt2D::new(0.0, 2.0)));
        assert!(!l.covers(Pt2D::new(5.0, 4.0)));
        assert!(!l.covers(Pt2D::new(10.0, 4.0)));
        assert!(!l.covers(Pt2D::new(11.0, 2.0)));
    }

    #[test]
    fn approx_length_is_the_diagonal() {
        // 10m x 4m box
        assert_eq!(
            lane().approx_length(),
            Distance::meters((10.0f64).hypot(4.0))
        );
    }

    #[test]
    fn connections_skip_missing_changes() {
        assert_eq!(
            lane().connections(),
            vec![LaneID::new("b"), LaneID::new("c"), LaneID::new("d")]
        );
    }
}
