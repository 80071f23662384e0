//! Reconstructs the chain of lanes a recorded trajectory drove through. This never invents a
//! path: a lane only enters the chain if the trajectory actually passed through its bounding box,
//! step by step, along the lane graph's connections.

use std::collections::BTreeMap;

use anyhow::Result;

use geom::Pt2D;

use crate::{lanes_containing, LaneID, Map};

/// An ordered chain of lanes, from the lane the trajectory started in to the lane it ended in.
#[derive(Clone, Debug, PartialEq)]
pub struct Route(Vec<LaneID>);

impl Route {
    pub fn steps(&self) -> &Vec<LaneID> {
        &self.0
    }

    pub fn into_steps(self) -> Vec<LaneID> {
        self.0
    }
}

/// Replays the trajectory over the lane graph and returns the lanes it traversed, or `Ok(None)`
/// if no connected chain explains it (also the answer when the trajectory starts or ends off the
/// network). Fails fast on trajectories under 2 samples, and on frontier bookkeeping bugs --
/// those must never masquerade as an honest "no route".
pub fn reconstruct_route(map: &Map, trajectory: &[Pt2D]) -> Result<Option<Route>> {
    if trajectory.len() < 2 {
        bail!(
            "can't reconstruct a route from {} samples; need at least 2",
            trajectory.len()
        );
    }

    let initial_ids = lanes_containing(map, trajectory[0]);
    // The last sample tends to overshoot the lane the trajectory really ended in, so search for
    // the destination at the second-to-last sample instead.
    let final_ids = lanes_containing(map, trajectory[trajectory.len() - 2]);

    // Each entry maps a lane to the lane we reached it from (None for starting lanes). A lane
    // moves from unvisited to visited at the first sample inside its box, and never goes back --
    // that's what keeps the walk finite even on cyclic lane graphs.
    let mut visited: BTreeMap<LaneID, Option<LaneID>> = BTreeMap::new();
    let mut unvisited: BTreeMap<LaneID, Option<LaneID>> = BTreeMap::new();
    for id in &initial_ids {
        unvisited.insert(id.clone(), None);
    }

    for position in &trajectory[1..] {
        let current: Vec<LaneID> = unvisited
            .keys()
            .filter(|id| map.get_l(id).covers(*position))
            .cloned()
            .collect();

        for id in current {
            let parent = unvisited.remove(&id).unwrap();
            visited.insert(id.clone(), parent);

            for neighbor in map.get_l(&id).connections() {
                if visited.contains_key(&neighbor) {
                    continue;
                }
                // Connections into unloaded map tiles aren't traversable.
                if map.maybe_get_l(&neighbor).is_none() {
                    continue;
                }
                // If several lanes visited at this sample connect to the same neighbor, the last
                // one in lane ID order wins, since `current` is collected in map order.
                unvisited.insert(neighbor, Some(id.clone()));
            }
        }
    }

    // The destination is the first final candidate the walk actually reached.
    let destination = final_ids.iter().find(|id| visited.contains_key(*id));
    let mut current = match destination {
        Some(id) => id.clone(),
        None => {
            debug!("no lane containing the trajectory's end was ever reached");
            return Ok(None);
        }
    };

    // Walk parent pointers back to a starting lane, which is included in the route.
    let mut steps = Vec::new();
    loop {
        steps.push(current.clone());
        if initial_ids.contains(&current) {
            break;
        }
        match visited.get(&current).cloned().flatten() {
            Some(parent) => current = parent,
            None => bail!(
                "route backtrack hit {}, which has no parent but didn't start the trajectory",
                current
            ),
        }
    }
    steps.reverse();
    Ok(Some(Route(steps)))
}
