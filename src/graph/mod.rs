mod model;
mod parse;
pub mod stats;

pub use model::{Edge, Graph, MetadataValue, Node, NodeId, NodeMode};
pub use parse::{load_graph_file, parse_graph_json};
