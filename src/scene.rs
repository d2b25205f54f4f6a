use eframe::egui::Color32;
use glam::Vec3;

use crate::graph::{Edge, Node, NodeId, NodeMode};
use crate::highlight::{HighlightStyle, apply_highlight};
use crate::layout::{Layout, spherical_layout};
use crate::picking::PickTarget;

pub const MANAGED_NODE_SIZE: f32 = 8.0;
pub const DATA_NODE_SIZE: f32 = 5.0;

pub const FALLBACK_PROVIDER_COLOR: Color32 = Color32::from_rgb(0x8b, 0x5c, 0xf6);
const EDGE_ALPHA: u8 = 77;

pub fn provider_color(provider: &str) -> Color32 {
    match provider.to_ascii_lowercase().as_str() {
        "aws" => Color32::from_rgb(0xff, 0x99, 0x00),
        "azurerm" => Color32::from_rgb(0x00, 0x78, 0xd4),
        "google" => Color32::from_rgb(0x42, 0x85, 0xf4),
        "kubernetes" => Color32::from_rgb(0x32, 0x6c, 0xe5),
        "helm" => Color32::from_rgb(0x0f, 0x16, 0x89),
        _ => FALLBACK_PROVIDER_COLOR,
    }
}

pub fn node_size(mode: NodeMode) -> f32 {
    match mode {
        NodeMode::Managed => MANAGED_NODE_SIZE,
        NodeMode::Data => DATA_NODE_SIZE,
    }
}

pub fn edge_color(kind: &str) -> Color32 {
    if kind == "depends_on" {
        Color32::from_rgba_unmultiplied(0x8b, 0x5c, 0xf6, EDGE_ALPHA)
    } else {
        Color32::from_rgba_unmultiplied(0x4b, 0x55, 0x63, EDGE_ALPHA)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub position: Vec3,
    pub color: Color32,
    pub size: f32,
    pub highlight: HighlightStyle,
}

impl SceneNode {
    pub fn pick_target(&self) -> PickTarget<'_> {
        PickTarget {
            id: &self.id,
            center: self.position,
            radius: self.size,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub source: Vec3,
    pub target: Vec3,
    pub color: Color32,
}

/// Everything the renderer needs for one visible set. Rebuilt whole on every
/// visibility change; only highlight styles are patched on selection changes.
#[derive(Clone, Debug, Default)]
pub struct SceneFrame {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    pub layout: Layout,
}

impl SceneFrame {
    pub fn build(nodes: &[&Node], edges: &[&Edge], radius: f32, selected: Option<&str>) -> Self {
        let layout = spherical_layout(nodes, radius);

        let scene_nodes = nodes
            .iter()
            .filter_map(|node| {
                let position = layout.get(&node.id)?;
                Some(SceneNode {
                    id: node.id.clone(),
                    position,
                    color: provider_color(&node.provider),
                    size: node_size(node.mode),
                    highlight: HighlightStyle::NEUTRAL,
                })
            })
            .collect();

        let scene_edges = edges
            .iter()
            .filter_map(|edge| {
                let source = layout.get(&edge.source)?;
                let target = layout.get(&edge.target)?;
                Some(SceneEdge {
                    source_id: edge.source.clone(),
                    target_id: edge.target.clone(),
                    source,
                    target,
                    color: edge_color(&edge.kind),
                })
            })
            .collect();

        let mut frame = Self {
            nodes: scene_nodes,
            edges: scene_edges,
            layout,
        };
        frame.restyle(selected);
        frame
    }

    pub fn restyle(&mut self, selected: Option<&str>) {
        let styles = apply_highlight(selected, &self.layout);
        for node in &mut self.nodes {
            node.highlight = styles
                .get(&node.id)
                .copied()
                .unwrap_or(HighlightStyle::NEUTRAL);
        }
    }

    pub fn pick_targets(&self) -> impl Iterator<Item = PickTarget<'_>> {
        self.nodes.iter().map(SceneNode::pick_target)
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
