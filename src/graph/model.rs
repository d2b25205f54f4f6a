use std::collections::{BTreeMap, HashMap};
use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub type NodeId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    Managed,
    Data,
}

impl NodeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for NodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single metadata entry attached to a resource.
///
/// Nested objects are flattened into string mappings at load time; the one
/// mapping with display meaning is the `tags` entry.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataValue {
    String(String),
    Number(f64),
    Bool(bool),
    Mapping(BTreeMap<String, String>),
}

impl MetadataValue {
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Mapping(_))
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Mapping(map) => {
                let mut first = true;
                for (key, value) in map {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub resource_type: String,
    pub mode: NodeMode,
    pub provider: String,
    pub module: Option<String>,
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl Node {
    pub fn tags(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata.get("tags").and_then(MetadataValue::as_mapping)
    }

    pub fn scalar_metadata(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.metadata
            .iter()
            .filter(|(_, value)| value.is_scalar())
            .map(|(key, value)| (key.as_str(), value))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index_by_id: HashMap<NodeId, usize>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                bail!("duplicate node id in graph: {}", node.id);
            }
        }

        Ok(Self {
            nodes,
            edges,
            index_by_id,
        })
    }

    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            index_by_id: HashMap::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node {
            id: id.to_owned(),
            resource_type: "aws_instance".to_owned(),
            mode: NodeMode::Managed,
            provider: "aws".to_owned(),
            module: None,
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Graph::new(vec![node("a"), node("a")], Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn looks_up_nodes_by_id() {
        let graph = Graph::new(vec![node("a"), node("b")], Vec::new()).unwrap();
        assert_eq!(graph.node("b").map(|n| n.id.as_str()), Some("b"));
        assert!(graph.node("c").is_none());
        assert!(graph.contains("a"));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn tags_are_only_read_from_mappings() {
        let mut tagged = node("a");
        tagged.metadata.insert(
            "tags".to_owned(),
            MetadataValue::Mapping(BTreeMap::from([("env".to_owned(), "prod".to_owned())])),
        );
        tagged
            .metadata
            .insert("region".to_owned(), MetadataValue::String("us-east-1".to_owned()));
        assert_eq!(tagged.tags().and_then(|t| t.get("env")).map(String::as_str), Some("prod"));
        assert_eq!(tagged.scalar_metadata().count(), 1);

        let mut flat = node("b");
        flat.metadata
            .insert("tags".to_owned(), MetadataValue::String("none".to_owned()));
        assert!(flat.tags().is_none());
    }

    #[test]
    fn numbers_display_without_trailing_fraction() {
        assert_eq!(MetadataValue::Number(3.0).to_string(), "3");
        assert_eq!(MetadataValue::Number(2.5).to_string(), "2.5");
        assert_eq!(MetadataValue::Number(-4.0).to_string(), "-4");
        assert_eq!(
            MetadataValue::Number(1e20).to_string(),
            "100000000000000000000"
        );
        assert_eq!(MetadataValue::Bool(true).to_string(), "true");
    }
}
