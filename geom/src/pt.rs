use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{deserialize_f64, serialize_f64, trim_f64, Distance};

/// A point in 2D world-space, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    #[serde(serialize_with = "serialize_f64", deserialize_with = "deserialize_f64")]
    x: f64,
    #[serde(serialize_with = "serialize_f64", deserialize_with = "deserialize_f64")]
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }

        Pt2D {
            x: trim_f64(x),
            y: trim_f64(y),
        }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point.
    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::meters((self.x() - to.x()).hypot(self.y() - to.y()))
    }

    /// The midpoint of the segment between two points.
    pub fn center(self, other: Pt2D) -> Pt2D {
        Pt2D::new((self.x() + other.x()) / 2.0, (self.y() + other.y()) / 2.0)
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({}, {})", self.x(), self.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_to() {
        assert_eq!(
            Pt2D::new(0.0, 0.0).dist_to(Pt2D::new(3.0, 4.0)),
            Distance::meters(5.0)
        );
    }

    #[test]
    fn serde_trims() {
        let pt: Pt2D = serde_json::from_str("{\"x\": 1.00004, \"y\": 2.0}").unwrap();
        assert_eq!(pt, Pt2D::new(1.0, 2.0));
    }
}
