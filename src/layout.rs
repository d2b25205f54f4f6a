use std::collections::HashMap;
use std::f64::consts::PI;

use glam::Vec3;

use crate::graph::{Node, NodeId};

pub const DEFAULT_RADIUS: f32 = 300.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPosition {
    pub node_id: NodeId,
    pub position: Vec3,
}

/// Positions for one visible node set, in visible order.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    positions: Vec<LayoutPosition>,
    index_by_id: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn get(&self, node_id: &str) -> Option<Vec3> {
        self.index_by_id
            .get(node_id)
            .map(|&index| self.positions[index].position)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.index_by_id.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutPosition> {
        self.positions.iter()
    }
}

/// Point `index` of `total` on a Fibonacci sphere of the given radius.
///
/// A lone node (or a degenerate `total` of zero) sits on the +z pole at
/// `(0, 0, radius)`; the general formula is never evaluated for it.
pub fn spherical_point(index: usize, total: usize, radius: f32) -> Vec3 {
    if total <= 1 {
        return Vec3::new(0.0, 0.0, radius);
    }

    let total_f = total as f64;
    let radius = radius as f64;
    let phi = (-1.0 + (2.0 * index as f64) / total_f).acos();
    let theta = (total_f * PI).sqrt() * phi;

    Vec3::new(
        (radius * theta.cos() * phi.sin()) as f32,
        (radius * theta.sin() * phi.sin()) as f32,
        (radius * phi.cos()) as f32,
    )
}

pub fn spherical_layout(nodes: &[&Node], radius: f32) -> Layout {
    let total = nodes.len();
    let mut positions = Vec::with_capacity(total);
    let mut index_by_id = HashMap::with_capacity(total);

    for (index, node) in nodes.iter().enumerate() {
        index_by_id.insert(node.id.clone(), index);
        positions.push(LayoutPosition {
            node_id: node.id.clone(),
            position: spherical_point(index, total, radius),
        });
    }

    Layout {
        positions,
        index_by_id,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::graph::NodeMode;

    fn nodes(count: usize) -> Vec<Node> {
        (0..count)
            .map(|index| Node {
                id: format!("node_{index}"),
                resource_type: "aws_instance".to_owned(),
                mode: NodeMode::Managed,
                provider: "aws".to_owned(),
                module: None,
                metadata: BTreeMap::new(),
            })
            .collect()
    }

    #[test]
    fn empty_input_produces_no_positions() {
        let layout = spherical_layout(&[], DEFAULT_RADIUS);
        assert!(layout.is_empty());
    }

    #[test]
    fn single_node_sits_on_the_pole() {
        let owned = nodes(1);
        let refs = owned.iter().collect::<Vec<_>>();
        let layout = spherical_layout(&refs, 300.0);
        assert_eq!(layout.get("node_0"), Some(Vec3::new(0.0, 0.0, 300.0)));
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let owned = nodes(4);
        let refs = owned.iter().collect::<Vec<_>>();
        let first = spherical_layout(&refs, 300.0);
        let second = spherical_layout(&refs, 300.0);
        assert_eq!(first.len(), 4);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.node_id, b.node_id);
            assert_eq!(a.position.to_array().map(f32::to_bits), b.position.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn every_point_lies_on_the_sphere() {
        for count in [2, 3, 17, 250] {
            let owned = nodes(count);
            let refs = owned.iter().collect::<Vec<_>>();
            let layout = spherical_layout(&refs, 300.0);
            for entry in layout.iter() {
                let distance = entry.position.length();
                assert!((distance - 300.0).abs() < 1e-2, "{count}: {distance}");
                assert!(entry.position.is_finite());
            }
        }
    }

    #[test]
    fn points_are_distinct() {
        let owned = nodes(64);
        let refs = owned.iter().collect::<Vec<_>>();
        let layout = spherical_layout(&refs, 300.0);
        let points = layout.iter().map(|entry| entry.position).collect::<Vec<_>>();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(*b) > 1e-3);
            }
        }
    }

    #[test]
    fn first_point_starts_at_the_south_pole() {
        let point = spherical_point(0, 4, 300.0);
        assert!((point.z + 300.0).abs() < 1e-3);
    }
}
