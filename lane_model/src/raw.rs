//! The raw, unvalidated form of a lane network, as decoded from an external map source. This is
//! the serialization boundary; `Map::create_from_raw` turns it into the validated runtime form.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::Pt2D;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawMap {
    pub name: String,
    pub lanes: Vec<RawLane>,
}

/// One lane record, as the map source encodes it. Connections use the source's conventions: a
/// lane-change field holds the empty string when there's no adjacent lane, and any connection may
/// name a lane that's missing from this map tile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawLane {
    pub id: String,
    /// The left edge of the lane, facing the direction of travel.
    pub left_boundary: Vec<Pt2D>,
    pub right_boundary: Vec<Pt2D>,
    /// Successor lanes in the direction of travel.
    pub lanes_ahead: Vec<String>,
    pub lane_change_left: String,
    pub lane_change_right: String,
}

impl RawMap {
    pub fn load(path: &str) -> Result<RawMap> {
        let raw: RawMap = serde_json::from_slice(&fs_err::read(path)?)?;
        Ok(raw)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        fs_err::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
