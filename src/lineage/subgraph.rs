//! Ancestor subgraph of a selected target.

use crate::schema::{Edge, LoadedGraph, Node, ScopeTable};

use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// Nodes and links reachable backward from a target. Borrowed from the loaded graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Subgraph<'g> {
    /// Target first, then ancestors in discovery order.
    pub nodes: Vec<&'g Node>,
    /// Every traversed edge, in traversal order.
    pub links: Vec<&'g Edge>,
}

impl<'g> Subgraph<'g> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Walk incoming edges from `target`, restricted to the target's scope.
///
/// An edge is taken only when both endpoints pass the predicate. An unknown
/// target, or one its own scope excludes, yields an empty subgraph.
pub fn build_subgraph<'g>(graph: &'g LoadedGraph, scopes: &ScopeTable, target: &str) -> Subgraph<'g> {
    if !graph.contains(target) {
        return Subgraph::default();
    }
    let allow = scopes.predicate_for(target);
    if !allow.allows(target) {
        return Subgraph::default();
    }

    let mut seen: HashSet<&'g str> = HashSet::new();
    let mut order: Vec<&'g str> = Vec::new();
    let mut links: Vec<&'g Edge> = Vec::new();
    let mut queue: VecDeque<&'g str> = VecDeque::new();

    let Some(root) = graph.node(target) else {
        return Subgraph::default();
    };
    seen.insert(root.id.as_str());
    order.push(root.id.as_str());
    queue.push_back(root.id.as_str());

    while let Some(v) = queue.pop_front() {
        for e in graph.incoming(v) {
            if !allow.allows(&e.source) || !allow.allows(&e.target) {
                continue;
            }
            links.push(e);
            if seen.insert(e.source.as_str()) {
                order.push(e.source.as_str());
                queue.push_back(e.source.as_str());
            }
        }
    }

    let nodes = order.into_iter().filter_map(|id| graph.node(id)).collect();
    Subgraph { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GraphDoc;
    use pretty_assertions::assert_eq;

    fn graph(json: &str) -> LoadedGraph {
        serde_json::from_str::<GraphDoc>(json)
            .unwrap()
            .validate_and_build()
            .unwrap()
    }

    fn ids(sub: &Subgraph<'_>) -> Vec<String> {
        sub.nodes.iter().map(|n| n.id.clone()).collect()
    }

    const CHAIN: &str = r#"{
        "nodes": [
            { "id": "A", "type": "stage" },
            { "id": "B", "type": "stage" },
            { "id": "C", "type": "species" },
            { "id": "D", "type": "stage" }
        ],
        "links": [
            { "source": "A", "target": "B", "kind": "result" },
            { "source": "B", "target": "C", "kind": "result" },
            { "source": "C", "target": "D", "kind": "result" }
        ]
    }"#;

    #[test]
    fn collects_ancestors_only() {
        let g = graph(CHAIN);
        let sub = build_subgraph(&g, &ScopeTable::default(), "C");
        assert_eq!(ids(&sub), vec!["C", "B", "A"]);
        assert_eq!(sub.links.len(), 2);
        assert!(!sub.contains("D"));
    }

    #[test]
    fn source_target_is_alone() {
        let g = graph(CHAIN);
        let sub = build_subgraph(&g, &ScopeTable::default(), "A");
        assert_eq!(ids(&sub), vec!["A"]);
        assert!(sub.links.is_empty());
    }

    #[test]
    fn unknown_target_is_empty() {
        let g = graph(CHAIN);
        let sub = build_subgraph(&g, &ScopeTable::default(), "Z");
        assert!(sub.is_empty());
        assert!(sub.links.is_empty());
    }

    #[test]
    fn scope_prunes_edges_and_nodes() {
        let g = graph(CHAIN);
        let scopes =
            ScopeTable::parse(r#"{ "rules": [{ "targets": ["C"], "allow": ["B", "C"] }] }"#).unwrap();
        let sub = build_subgraph(&g, &scopes, "C");
        assert_eq!(ids(&sub), vec!["C", "B"]);
        assert_eq!(sub.links.len(), 1);
        assert_eq!(sub.links[0].source, "B");
    }

    #[test]
    fn target_outside_its_own_scope_is_empty() {
        let g = graph(CHAIN);
        let scopes =
            ScopeTable::parse(r#"{ "rules": [{ "targets": ["C"], "allow": ["A", "B"] }] }"#).unwrap();
        assert!(build_subgraph(&g, &scopes, "C").is_empty());
    }

    #[test]
    fn cycles_visit_each_node_once() {
        let g = graph(
            r#"{
                "nodes": [{ "id": "A" }, { "id": "B" }, { "id": "T" }],
                "links": [
                    { "source": "A", "target": "B" },
                    { "source": "B", "target": "A" },
                    { "source": "B", "target": "T" }
                ]
            }"#,
        );
        let sub = build_subgraph(&g, &ScopeTable::default(), "T");
        assert_eq!(ids(&sub), vec!["T", "B", "A"]);
        assert_eq!(sub.links.len(), 3);
    }
}
