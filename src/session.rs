use crate::graph::{Graph, Node};
use crate::highlight::Selection;
use crate::layout::DEFAULT_RADIUS;
use crate::picking::{Ray, pick};
use crate::query::{FilterPredicate, filter_edges, filter_nodes, visible_ids};
use crate::scene::SceneFrame;

/// Owns the loaded graph, the active predicate, the selection and the frame
/// derived from them. All mutation goes through the pipeline methods here.
#[derive(Clone, Debug)]
pub struct Session {
    graph: Graph,
    predicate: FilterPredicate,
    selection: Selection,
    radius: f32,
    revision: u64,
    frame: SceneFrame,
}

impl Session {
    pub fn new(graph: Graph, radius: f32) -> Self {
        let radius = if radius.is_finite() && radius > 0.0 {
            radius
        } else {
            DEFAULT_RADIUS
        };

        let mut session = Self {
            graph,
            predicate: FilterPredicate::default(),
            selection: Selection::None,
            radius,
            revision: 0,
            frame: SceneFrame::default(),
        };
        session.rebuild();
        session
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn predicate(&self) -> &FilterPredicate {
        &self.predicate
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn frame(&self) -> &SceneFrame {
        &self.frame
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the predicate and recomputes the frame. Returns false when the
    /// predicate did not change.
    pub fn set_predicate(&mut self, predicate: FilterPredicate) -> bool {
        if predicate == self.predicate {
            return false;
        }

        self.predicate = predicate;
        self.rebuild();
        true
    }

    /// Resolves a pick against the current frame. A miss leaves the selection
    /// untouched.
    pub fn pick(&mut self, ray: &Ray) -> Option<String> {
        let hit = pick(ray, self.frame.pick_targets()).map(|hit| hit.id.to_owned());
        match &hit {
            Some(id) => {
                log::debug!("pick hit {id}");
                self.selection.apply_pick(Some(id.as_str()));
                self.frame.restyle(self.selection.id());
            }
            None => log::debug!("pick missed"),
        }
        hit
    }

    pub fn clear_selection(&mut self) {
        if self.selection.id().is_some() {
            self.selection.clear();
            self.frame.restyle(None);
        }
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.id().and_then(|id| self.graph.node(id))
    }

    fn rebuild(&mut self) {
        let nodes = filter_nodes(self.graph.nodes(), &self.predicate);
        let visible = visible_ids(&nodes);
        let edges = filter_edges(self.graph.edges(), &visible);

        let next = SceneFrame::build(&nodes, &edges, self.radius, None);
        self.selection.retain_visible(&next.layout);
        self.frame = next;
        self.frame.restyle(self.selection.id());
        self.revision = self.revision.wrapping_add(1);

        log::debug!(
            "rebuilt frame r{}: {} of {} nodes, {} edges",
            self.revision,
            self.frame.nodes.len(),
            self.graph.node_count(),
            self.frame.edges.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::graph::parse_graph_json;

    fn session() -> Session {
        let graph = parse_graph_json(
            r#"{"nodes": [
                {"id": "aws_instance.web", "type": "aws_instance", "mode": "managed", "provider": "aws"},
                {"id": "google_bucket.logs", "type": "google_bucket", "mode": "managed", "provider": "google"}
            ], "edges": []}"#,
        )
        .unwrap();
        Session::new(graph, 300.0)
    }

    fn ray_through(point: Vec3) -> Ray {
        let origin = point * 3.0;
        Ray::new(origin, point - origin)
    }

    #[test]
    fn unchanged_predicate_is_a_no_op() {
        let mut session = session();
        let revision = session.revision();
        assert!(!session.set_predicate(FilterPredicate::default()));
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn pick_selects_and_miss_keeps_selection() {
        let mut session = session();
        let position = session.frame().layout.get("aws_instance.web").unwrap();

        let hit = session.pick(&ray_through(position));
        assert_eq!(hit.as_deref(), Some("aws_instance.web"));
        assert_eq!(session.selected_node().map(|n| n.id.as_str()), Some("aws_instance.web"));

        let miss = Ray::new(Vec3::new(0.0, 1000.0, 0.0), Vec3::Y);
        assert!(session.pick(&miss).is_none());
        assert_eq!(session.selection().id(), Some("aws_instance.web"));
    }

    #[test]
    fn invalid_radius_falls_back_to_default() {
        let session = Session::new(Graph::empty(), f32::NAN);
        assert_eq!(session.radius(), DEFAULT_RADIUS);
        assert!(session.frame().is_empty());
    }
}
