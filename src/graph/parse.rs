use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::model::{Edge, Graph, MetadataValue, Node, NodeMode};

#[derive(Clone, Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    resource_type: String,
    mode: NodeMode,
    provider: String,
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawGraph {
    nodes: Vec<RawNode>,
    edges: Vec<Edge>,
}

pub fn load_graph_file(path: &Path) -> Result<Graph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    parse_graph_json(&raw).with_context(|| format!("failed to load graph from {}", path.display()))
}

pub fn parse_graph_json(raw: &str) -> Result<Graph> {
    let parsed: Value = serde_json::from_str(raw).context("invalid graph JSON")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("graph JSON must be an object with nodes and edges"))?;

    for field in ["nodes", "edges"] {
        match object.get(field) {
            Some(Value::Array(_)) => {}
            Some(_) => return Err(anyhow!("graph field `{field}` must be an array")),
            None => return Err(anyhow!("graph is missing required field `{field}`")),
        }
    }

    let raw_graph = RawGraph::deserialize(&parsed).context("invalid node or edge entry")?;
    let nodes = raw_graph.nodes.into_iter().map(normalize_node).collect();
    Graph::new(nodes, raw_graph.edges)
}

fn normalize_node(raw: RawNode) -> Node {
    let module = raw.module.filter(|module| !module.is_empty());

    let mut metadata = BTreeMap::new();
    for (key, value) in raw.metadata.unwrap_or_default() {
        match metadata_value(value) {
            Some(value) => {
                metadata.insert(key, value);
            }
            None => log::debug!("dropping non-scalar metadata `{key}` on {}", raw.id),
        }
    }

    Node {
        id: raw.id,
        resource_type: raw.resource_type,
        mode: raw.mode,
        provider: raw.provider,
        module,
        metadata,
    }
}

fn metadata_value(value: Value) -> Option<MetadataValue> {
    match value {
        Value::String(value) => Some(MetadataValue::String(value)),
        Value::Number(value) => value.as_f64().map(MetadataValue::Number),
        Value::Bool(value) => Some(MetadataValue::Bool(value)),
        Value::Object(entries) => Some(MetadataValue::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(text) => text,
                        other => other.to_string(),
                    };
                    (key, value)
                })
                .collect(),
        )),
        Value::Null | Value::Array(_) => None,
    }
}
