use std::collections::HashMap;

use aabb_quadtree::geom::{Point, Rect};
use aabb_quadtree::QuadTree;

use crate::{Bounds, Distance, Pt2D};

/// A coarse spatial index over bounding boxes, answering "which objects are within some radius of
/// this point?" The quadtree prunes most of the map; an exact point-to-box check against the
/// stored f64 bounds filters out the f32 slop it introduces.
pub struct FindNearby<K> {
    bounds: HashMap<K, Bounds>,
    quadtree: QuadTree<K>,
}

impl<K> FindNearby<K>
where
    K: Clone + std::cmp::Eq + std::hash::Hash + std::fmt::Debug,
{
    pub fn new(overall_bounds: &Bounds) -> FindNearby<K> {
        FindNearby {
            bounds: HashMap::new(),
            quadtree: QuadTree::default(overall_bounds.as_bbox()),
        }
    }

    pub fn add(&mut self, key: K, b: Bounds) {
        self.quadtree.insert_with_box(key.clone(), b.as_bbox());
        self.bounds.insert(key, b);
    }

    /// Every key whose bounding box lies within `radius` of the query point. An empty result just
    /// means nothing is nearby. Order is the quadtree's traversal order, which is fixed for a
    /// given construction sequence.
    pub fn query_pt(&self, query_pt: Pt2D, radius: Distance) -> Vec<K> {
        let query_bbox = Rect {
            top_left: Point {
                x: (query_pt.x() - radius.inner_meters()) as f32,
                y: (query_pt.y() - radius.inner_meters()) as f32,
            },
            bottom_right: Point {
                x: (query_pt.x() + radius.inner_meters()) as f32,
                y: (query_pt.y() + radius.inner_meters()) as f32,
            },
        };

        self.quadtree
            .query(query_bbox)
            .into_iter()
            .filter_map(|(key, _, _)| {
                if self.bounds[&key].dist_to_pt(query_pt) <= radius {
                    Some(key)
                } else {
                    None
                }
            })
            .collect()
    }
}
