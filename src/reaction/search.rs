use crate::Result;
use crate::schema::LoadedGraph;

use regex::RegexBuilder;
use serde::Serialize;
use std::collections::BTreeSet;

/// Nodes whose id matches a query, plus every link touching one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub nodes: BTreeSet<String>,
    /// Indices into `LoadedGraph::edges`.
    pub links: Vec<usize>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Case-insensitive literal substring match on node ids. A blank query matches nothing.
pub fn search(graph: &LoadedGraph, query: &str) -> Result<Highlight> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Highlight::default());
    }
    let re = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()?;

    let nodes: BTreeSet<String> = graph
        .nodes()
        .iter()
        .filter(|n| re.is_match(&n.id))
        .map(|n| n.id.clone())
        .collect();
    let links = graph
        .edges()
        .iter()
        .enumerate()
        .filter(|(_, e)| nodes.contains(&e.source) || nodes.contains(&e.target))
        .map(|(i, _)| i)
        .collect();

    Ok(Highlight { nodes, links })
}
