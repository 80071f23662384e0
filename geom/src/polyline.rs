use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Bounds, Distance, Pt2D, EPSILON_DIST};

/// An ordered sequence of at least two distinct points, walked from the first point to the last.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
    // Cached; this gets asked for a lot during resampling.
    length: Distance,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        if pts.len() < 2 {
            bail!("Need at least two points for a PolyLine, got {}", pts.len());
        }
        for pair in pts.windows(2) {
            if pair[0].dist_to(pair[1]) < EPSILON_DIST {
                bail!("PolyLine has repeat adjacent points near {}", pair[0]);
            }
        }

        let length = pts
            .windows(2)
            .map(|pair| pair[0].dist_to(pair[1]))
            .sum();
        Ok(PolyLine { pts, length })
    }

    pub fn must_new(pts: Vec<Pt2D>) -> PolyLine {
        PolyLine::new(pts).unwrap()
    }

    /// Like `new`, but first collapses adjacent points closer than `EPSILON_DIST` into one.
    pub fn deduping_new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        let mut deduped: Vec<Pt2D> = Vec::new();
        for pt in pts {
            if let Some(last) = deduped.last() {
                if last.dist_to(pt) < EPSILON_DIST {
                    continue;
                }
            }
            deduped.push(pt);
        }
        PolyLine::new(deduped)
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt2D {
        *self.pts.last().unwrap()
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.pts)
    }

    /// The point this far along the polyline from its first point. Distances slightly past the end
    /// (within `EPSILON_DIST`) snap to the last point.
    pub fn dist_along(&self, dist: Distance) -> Result<Pt2D> {
        if dist < Distance::ZERO {
            bail!("dist_along({}) is negative", dist);
        }

        let mut dist_left = dist;
        let last_idx = self.pts.len() - 2;
        for (idx, pair) in self.pts.windows(2).enumerate() {
            let len = pair[0].dist_to(pair[1]);
            let slack = if idx == last_idx {
                EPSILON_DIST
            } else {
                Distance::ZERO
            };
            if dist_left <= len + slack {
                let pct = (dist_left / len).min(1.0);
                return Ok(Pt2D::new(
                    pair[0].x() + pct * (pair[1].x() - pair[0].x()),
                    pair[0].y() + pct * (pair[1].y() - pair[0].y()),
                ));
            }
            dist_left -= len;
        }
        bail!("dist_along({}) is longer than {}", dist, self.length);
    }

    pub fn must_dist_along(&self, dist: Distance) -> Pt2D {
        self.dist_along(dist).unwrap()
    }

    /// Points every `step` along the polyline, always including both endpoints.
    pub fn step_along(&self, step: Distance) -> Vec<Pt2D> {
        assert!(step > Distance::ZERO);

        let mut result = vec![self.first_pt()];
        let mut dist = step;
        while dist < self.length {
            result.push(self.must_dist_along(dist));
            dist += step;
        }
        result.push(self.last_pt());
        result
    }

    /// Exactly `count` points, evenly spaced from the first point to the last.
    pub fn evenly_spaced_points(&self, count: usize) -> Vec<Pt2D> {
        assert!(count >= 2);

        let step = self.length / ((count - 1) as f64);
        (0..count)
            .map(|idx| {
                if idx == count - 1 {
                    self.last_pt()
                } else {
                    self.must_dist_along(step * (idx as f64))
                }
            })
            .collect()
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PolyLine of length {} with {} points", self.length, self.pts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elbow() -> PolyLine {
        PolyLine::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 5.0),
        ])
    }

    #[test]
    fn length_sums_segments() {
        assert_eq!(elbow().length(), Distance::meters(15.0));
    }

    #[test]
    fn degenerate_input() {
        assert!(PolyLine::new(vec![Pt2D::new(1.0, 1.0)]).is_err());
        assert!(PolyLine::new(vec![Pt2D::new(1.0, 1.0), Pt2D::new(1.0, 1.0)]).is_err());
        assert!(PolyLine::deduping_new(vec![
            Pt2D::new(1.0, 1.0),
            Pt2D::new(1.0, 1.0),
            Pt2D::new(2.0, 1.0)
        ])
        .is_ok());
    }

    #[test]
    fn dist_along_interpolates() {
        let pl = elbow();
        assert_eq!(pl.must_dist_along(Distance::ZERO), Pt2D::new(0.0, 0.0));
        assert_eq!(pl.must_dist_along(Distance::meters(4.0)), Pt2D::new(4.0, 0.0));
        assert_eq!(
            pl.must_dist_along(Distance::meters(12.0)),
            Pt2D::new(10.0, 2.0)
        );
        assert_eq!(pl.must_dist_along(Distance::meters(15.0)), Pt2D::new(10.0, 5.0));
        assert!(pl.dist_along(Distance::meters(15.1)).is_err());
        assert!(pl.dist_along(Distance::meters(-1.0)).is_err());
    }

    #[test]
    fn step_along_covers_endpoints() {
        let pl = elbow();
        let pts = pl.step_along(Distance::meters(4.0));
        assert_eq!(pts[0], pl.first_pt());
        assert_eq!(*pts.last().unwrap(), pl.last_pt());
        // 0, 4, 8, 12, plus the endpoint
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[2], Pt2D::new(8.0, 0.0));
    }

    #[test]
    fn evenly_spaced_points() {
        let pl = PolyLine::must_new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0)]);
        let pts = pl.evenly_spaced_points(5);
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], Pt2D::new(0.0, 0.0));
        assert_eq!(pts[2], Pt2D::new(5.0, 0.0));
        assert_eq!(pts[4], Pt2D::new(10.0, 0.0));
    }
}
