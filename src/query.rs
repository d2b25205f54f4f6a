use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Node};

/// Conjunctive node filter. Absent or empty fields match every node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPredicate {
    pub provider: Option<String>,
    pub module: Option<String>,
    pub mode: Option<String>,
    pub search: Option<String>,
}

impl FilterPredicate {
    pub fn is_empty(&self) -> bool {
        [&self.provider, &self.module, &self.mode, &self.search]
            .into_iter()
            .all(|field| active(field).is_none())
    }

    pub fn matches(&self, node: &Node) -> bool {
        if let Some(provider) = active(&self.provider)
            && node.provider != provider
        {
            return false;
        }

        if let Some(module) = active(&self.module)
            && node.module.as_deref() != Some(module)
        {
            return false;
        }

        if let Some(mode) = active(&self.mode)
            && node.mode.as_str() != mode
        {
            return false;
        }

        if let Some(search) = active(&self.search) {
            let haystack =
                format!("{} {} {}", node.id, node.resource_type, node.provider).to_lowercase();
            if !haystack.contains(&search.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

pub fn filter_nodes<'a, I>(nodes: I, predicate: &FilterPredicate) -> Vec<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    nodes
        .into_iter()
        .filter(|node| predicate.matches(node))
        .collect()
}

pub fn visible_ids<'a>(nodes: &[&'a Node]) -> HashSet<&'a str> {
    nodes.iter().map(|node| node.id.as_str()).collect()
}

pub fn filter_edges<'a, I>(edges: I, visible: &HashSet<&str>) -> Vec<&'a Edge>
where
    I: IntoIterator<Item = &'a Edge>,
{
    edges
        .into_iter()
        .filter(|edge| {
            visible.contains(edge.source.as_str()) && visible.contains(edge.target.as_str())
        })
        .collect()
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Best fuzzy matches on node id, highest score first.
pub fn search_suggestions<'a, I>(nodes: I, query: &str, limit: usize) -> Vec<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = nodes
        .into_iter()
        .enumerate()
        .filter_map(|(order, node)| {
            fuzzy_match_score(&matcher, &node.id, query).map(|score| (score, order, node))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, _, node)| node).collect()
}
