use std::collections::HashMap;

use eframe::egui::Color32;

use crate::graph::NodeId;
use crate::layout::Layout;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightStyle {
    pub emissive: Color32,
    pub intensity: f32,
}

impl HighlightStyle {
    pub const NEUTRAL: Self = Self {
        emissive: Color32::BLACK,
        intensity: 0.0,
    };

    pub const SELECTED: Self = Self {
        emissive: Color32::WHITE,
        intensity: 0.5,
    };

    pub fn is_emphasized(&self) -> bool {
        self.intensity > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(NodeId),
}

impl Selection {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Selected(id) => Some(id.as_str()),
        }
    }

    pub fn is_selected(&self, node_id: &str) -> bool {
        self.id() == Some(node_id)
    }

    /// A hit selects it; a miss leaves the current state alone.
    pub fn apply_pick(&mut self, hit: Option<&str>) {
        if let Some(id) = hit {
            *self = Self::Selected(id.to_owned());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::None;
    }

    /// Drops a selection whose node is no longer laid out. Returns true if it did.
    pub fn retain_visible(&mut self, layout: &Layout) -> bool {
        match self {
            Self::Selected(id) if !layout.contains(id.as_str()) => {
                log::debug!("selection {id} left the visible set; clearing");
                *self = Self::None;
                true
            }
            _ => false,
        }
    }
}

pub fn apply_highlight(selected: Option<&str>, layout: &Layout) -> HashMap<NodeId, HighlightStyle> {
    let selected = selected.filter(|id| layout.contains(id));
    layout
        .iter()
        .map(|entry| {
            let style = if selected == Some(entry.node_id.as_str()) {
                HighlightStyle::SELECTED
            } else {
                HighlightStyle::NEUTRAL
            };
            (entry.node_id.clone(), style)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::graph::{Node, NodeMode};
    use crate::layout::spherical_layout;

    fn layout_of(ids: &[&str]) -> Layout {
        let nodes = ids
            .iter()
            .map(|id| Node {
                id: (*id).to_owned(),
                resource_type: "aws_s3_bucket".to_owned(),
                mode: NodeMode::Managed,
                provider: "aws".to_owned(),
                module: None,
                metadata: BTreeMap::new(),
            })
            .collect::<Vec<_>>();
        let refs = nodes.iter().collect::<Vec<_>>();
        spherical_layout(&refs, 300.0)
    }

    #[test]
    fn only_the_selected_node_is_emphasized() {
        let layout = layout_of(&["a", "b", "c"]);
        let styles = apply_highlight(Some("b"), &layout);
        assert_eq!(styles.len(), 3);
        assert_eq!(styles["b"], HighlightStyle::SELECTED);
        assert_eq!(styles["a"], HighlightStyle::NEUTRAL);
        assert_eq!(styles["c"], HighlightStyle::NEUTRAL);
    }

    #[test]
    fn invisible_or_missing_selection_is_all_neutral() {
        let layout = layout_of(&["a", "b"]);
        for selected in [None, Some("zzz")] {
            let styles = apply_highlight(selected, &layout);
            assert!(styles.values().all(|style| !style.is_emphasized()));
        }
    }

    #[test]
    fn miss_keeps_existing_selection() {
        let mut selection = Selection::Selected("a".to_owned());
        selection.apply_pick(None);
        assert_eq!(selection.id(), Some("a"));
        selection.apply_pick(Some("b"));
        assert_eq!(selection.id(), Some("b"));
        selection.clear();
        assert_eq!(selection, Selection::None);
    }

    #[test]
    fn retain_visible_drops_filtered_out_selection() {
        let mut selection = Selection::Selected("gone".to_owned());
        assert!(selection.retain_visible(&layout_of(&["a"])));
        assert_eq!(selection, Selection::None);

        let mut selection = Selection::Selected("a".to_owned());
        assert!(!selection.retain_visible(&layout_of(&["a"])));
        assert!(selection.is_selected("a"));
    }
}
