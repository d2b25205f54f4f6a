use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::model::{Graph, Node};

pub const ROOT_MODULE: &str = "root";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub by_provider: BTreeMap<String, usize>,
    pub by_mode: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

/// Direct neighbors of a node, resolved to node records in graph order.
#[derive(Clone, Debug, Default)]
pub struct Dependencies<'a> {
    pub depends_on: Vec<&'a Node>,
    pub depended_by: Vec<&'a Node>,
}

pub fn unique_providers(graph: &Graph) -> Vec<&str> {
    graph
        .nodes()
        .iter()
        .map(|node| node.provider.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn unique_modules(graph: &Graph) -> Vec<&str> {
    graph
        .nodes()
        .iter()
        .filter_map(|node| node.module.as_deref())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn unique_modes(graph: &Graph) -> Vec<&'static str> {
    graph
        .nodes()
        .iter()
        .map(|node| node.mode.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn graph_stats(graph: &Graph) -> GraphStats {
    let mut stats = GraphStats {
        total_nodes: graph.node_count(),
        total_edges: graph.edge_count(),
        ..GraphStats::default()
    };

    for node in graph.nodes() {
        *stats.by_provider.entry(node.provider.clone()).or_insert(0) += 1;
        *stats.by_mode.entry(node.mode.as_str().to_owned()).or_insert(0) += 1;
        *stats.by_type.entry(node.resource_type.clone()).or_insert(0) += 1;
    }

    stats
}

pub fn node_dependencies<'a>(graph: &'a Graph, node_id: &str) -> Dependencies<'a> {
    let mut targets = HashSet::new();
    let mut sources = HashSet::new();
    for edge in graph.edges() {
        if edge.source == node_id {
            targets.insert(edge.target.as_str());
        }
        if edge.target == node_id {
            sources.insert(edge.source.as_str());
        }
    }

    let mut dependencies = Dependencies::default();
    for node in graph.nodes() {
        if targets.contains(node.id.as_str()) {
            dependencies.depends_on.push(node);
        }
        if sources.contains(node.id.as_str()) {
            dependencies.depended_by.push(node);
        }
    }
    dependencies
}

pub fn node_importance(graph: &Graph, node_id: &str) -> usize {
    graph
        .edges()
        .iter()
        .map(|edge| usize::from(edge.source == node_id) + usize::from(edge.target == node_id))
        .sum()
}

pub fn group_by_module<'a, I>(nodes: I) -> Vec<(&'a str, Vec<&'a Node>)>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut groups: Vec<(&'a str, Vec<&'a Node>)> = Vec::new();
    for node in nodes {
        let key = node.module.as_deref().unwrap_or(ROOT_MODULE);
        match groups.iter_mut().find(|(group, _)| *group == key) {
            Some((_, members)) => members.push(node),
            None => groups.push((key, vec![node])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::graph::{Edge, NodeMode};

    fn node(id: &str, provider: &str, mode: NodeMode, module: Option<&str>) -> Node {
        Node {
            id: id.to_owned(),
            resource_type: format!("{provider}_thing"),
            mode,
            provider: provider.to_owned(),
            module: module.map(str::to_owned),
            metadata: BTreeMap::new(),
        }
    }

    fn edge(source: &str, target: &str) -> Edge {
        Edge {
            source: source.to_owned(),
            target: target.to_owned(),
            kind: "depends_on".to_owned(),
        }
    }

    fn sample() -> Graph {
        Graph::new(
            vec![
                node("a", "aws", NodeMode::Managed, Some("module.net")),
                node("b", "aws", NodeMode::Data, None),
                node("c", "azurerm", NodeMode::Managed, Some("module.app")),
                node("d", "google", NodeMode::Managed, Some("module.net")),
            ],
            vec![edge("a", "b"), edge("c", "b"), edge("a", "ghost")],
        )
        .unwrap()
    }

    #[test]
    fn unique_lists_are_sorted_and_deduped() {
        let graph = sample();
        assert_eq!(unique_providers(&graph), vec!["aws", "azurerm", "google"]);
        assert_eq!(unique_modules(&graph), vec!["module.app", "module.net"]);
        assert_eq!(unique_modes(&graph), vec!["data", "managed"]);
    }

    #[test]
    fn counts_by_dimension() {
        let stats = graph_stats(&sample());
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.total_edges, 3);
        assert_eq!(stats.by_provider.get("aws"), Some(&2));
        assert_eq!(stats.by_mode.get("managed"), Some(&3));
        assert_eq!(stats.by_type.get("azurerm_thing"), Some(&1));
    }

    #[test]
    fn dependencies_resolve_to_nodes_and_skip_dangling() {
        let graph = sample();
        let deps = node_dependencies(&graph, "a");
        assert_eq!(deps.depends_on.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), vec!["b"]);
        assert!(deps.depended_by.is_empty());

        let deps = node_dependencies(&graph, "b");
        assert!(deps.depends_on.is_empty());
        assert_eq!(
            deps.depended_by.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn importance_counts_incoming_and_outgoing() {
        let graph = sample();
        assert_eq!(node_importance(&graph, "b"), 2);
        assert_eq!(node_importance(&graph, "a"), 2);
        assert_eq!(node_importance(&graph, "d"), 0);
    }

    #[test]
    fn groups_keep_first_seen_order_with_root_fallback() {
        let graph = sample();
        let groups = group_by_module(graph.nodes());
        let keys = groups.iter().map(|(key, _)| *key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["module.net", "root", "module.app"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn empty_graph_yields_empty_results() {
        let graph = Graph::empty();
        assert!(unique_providers(&graph).is_empty());
        assert!(group_by_module(graph.nodes()).is_empty());
        assert_eq!(graph_stats(&graph), GraphStats::default());
    }
}
