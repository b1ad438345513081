//! Graph documents (dag.json / reaction.json) and their normalized form.
//!
//! JSON shape:
//! {
//!   "nodes":     [{ "id": "Human", "type": "host", "source": "...", "image": "...", "description": "..." }],
//!   "processes": [{ "id": "Lay Egg" }, "Hatch Normal"],   // merged in with type = process
//!   "links":     [{ "source": "Human", "target": "Lay Egg", "kind": "host" }],
//!   "finalProducts": ["Offspring"]                        // optional extra targets
//! }
//!
//! Links whose endpoints are unknown are dropped; they are a filtering rule,
//! not an error.

use crate::Result;
use crate::diagnostics;
use crate::schema::node::{Edge, Node, NodeKind};

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphDoc {
    #[serde(default)]
    pub nodes: Vec<RawNode>,

    #[serde(default)]
    pub processes: Vec<RawProcess>,

    #[serde(default)]
    pub links: Vec<Edge>,

    #[serde(default, rename = "finalProducts")]
    pub final_products: Vec<String>,
}

/// Raw node shape as it appears in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: String,

    #[serde(default, rename = "type")]
    pub kind: Option<NodeKind>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Process entries come either as bare ids or as objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawProcess {
    Name(String),
    Detailed {
        id: String,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        image: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl RawProcess {
    fn into_node(self) -> Node {
        match self {
            RawProcess::Name(id) => Node {
                id,
                kind: NodeKind::Process,
                source: None,
                image: None,
                description: None,
            },
            RawProcess::Detailed {
                id,
                source,
                image,
                description,
            } => Node {
                id,
                kind: NodeKind::Process,
                source,
                image,
                description,
            },
        }
    }
}

/// Immutable, validated graph. Loaded once per view.
#[derive(Debug, Clone, Default)]
pub struct LoadedGraph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    /// Edge indices keyed by target id.
    incoming: HashMap<String, Vec<usize>>,
    final_products: Vec<String>,
}

impl GraphDoc {
    /// Read and parse a graph document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<GraphDoc> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| {
            diagnostics::error_message(format!("{} not found", display_name(path)))
        })?;
        serde_json::from_str(&text).with_context(|| {
            diagnostics::error_message(format!("{} is not a valid graph document", display_name(path)))
        })
    }

    /// Merge processes into the node set, drop dangling links and index the result.
    pub fn validate_and_build(self) -> Result<LoadedGraph> {
        let GraphDoc {
            nodes: raw_nodes,
            processes,
            links,
            final_products,
        } = self;

        let merged = raw_nodes
            .into_iter()
            .map(|raw| Node {
                id: raw.id,
                kind: raw.kind.unwrap_or(NodeKind::Other),
                source: raw.source,
                image: raw.image,
                description: raw.description,
            })
            .chain(processes.into_iter().map(RawProcess::into_node));

        // Phase 1: index nodes; a repeated id replaces the earlier entry in place.
        let mut nodes: Vec<Node> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for node in merged {
            if node.id.trim().is_empty() {
                bail!(
                    "{}",
                    diagnostics::error_message("graph document contains a node with an empty id")
                );
            }
            match index.get(&node.id) {
                Some(&slot) => {
                    diagnostics::warn(format!(
                        "duplicate node id '{}'; the later entry wins",
                        node.id
                    ));
                    nodes[slot] = node;
                }
                None => {
                    index.insert(node.id.clone(), nodes.len());
                    nodes.push(node);
                }
            }
        }
        if nodes.is_empty() {
            diagnostics::warn("graph document contained no nodes");
        }

        // Phase 2: keep only links whose endpoints exist.
        let total_links = links.len();
        let edges: Vec<Edge> = links
            .into_iter()
            .filter(|e| index.contains_key(&e.source) && index.contains_key(&e.target))
            .collect();
        if edges.len() < total_links {
            log::debug!(
                "dropped {} link(s) with unknown endpoints",
                total_links - edges.len()
            );
        }

        let mut incoming: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, e) in edges.iter().enumerate() {
            incoming.entry(e.target.clone()).or_default().push(i);
        }

        Ok(LoadedGraph {
            nodes,
            index,
            edges,
            incoming,
            final_products,
        })
    }
}

impl LoadedGraph {
    /// Read, parse and validate in one step.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedGraph> {
        GraphDoc::from_path(path)?.validate_and_build()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Edges pointing at `id`, in document order.
    pub fn incoming(&self, id: &str) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming
            .get(id)
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }

    /// Selectable lineage roots: species and hybrids in document order, then
    /// explicit final products not already listed.
    pub fn targets(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        let kinds = self
            .nodes
            .iter()
            .filter(|n| n.kind.is_target())
            .map(|n| n.id.as_str());
        for id in kinds.chain(self.final_products.iter().map(String::as_str)) {
            if seen.insert(id) {
                out.push(id.to_string());
            }
        }
        out
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(json: &str) -> LoadedGraph {
        let doc: GraphDoc = serde_json::from_str(json).unwrap();
        doc.validate_and_build().unwrap()
    }

    #[test]
    fn processes_merge_in_both_shapes() {
        let g = build(
            r#"{
                "nodes": [{ "id": "Human", "type": "host" }],
                "processes": ["Hatch", { "id": "Lay Egg", "description": "eggs" }],
                "links": []
            }"#,
        );
        let ids: Vec<&str> = g.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Human", "Hatch", "Lay Egg"]);
        assert_eq!(g.node("Hatch").unwrap().kind, NodeKind::Process);
        assert_eq!(
            g.node("Lay Egg").unwrap().description.as_deref(),
            Some("eggs")
        );
    }

    #[test]
    fn dangling_links_are_dropped() {
        let g = build(
            r#"{
                "nodes": [{ "id": "A", "type": "stage" }, { "id": "B", "type": "stage" }],
                "links": [
                    { "source": "A", "target": "B", "kind": "result" },
                    { "source": "A", "target": "Ghost", "kind": "result" },
                    { "source": "Ghost", "target": "B" }
                ]
            }"#,
        );
        assert_eq!(g.edges().len(), 1);
        assert_eq!(g.incoming("B").count(), 1);
        assert_eq!(g.incoming("Ghost").count(), 0);
    }

    #[test]
    fn duplicate_ids_keep_later_entry_in_first_slot() {
        let g = build(
            r#"{
                "nodes": [
                    { "id": "A", "type": "stage" },
                    { "id": "B", "type": "host" },
                    { "id": "A", "type": "species" }
                ]
            }"#,
        );
        assert_eq!(g.nodes().len(), 2);
        assert_eq!(g.nodes()[0].kind, NodeKind::Species);
    }

    #[test]
    fn targets_are_species_hybrids_then_final_products() {
        let g = build(
            r#"{
                "nodes": [
                    { "id": "Egg", "type": "artifact" },
                    { "id": "Drone", "type": "species" },
                    { "id": "Newborn", "type": "hybrid" },
                    { "id": "Offspring", "type": "organism" }
                ],
                "finalProducts": ["Offspring", "Drone", "Unlisted"]
            }"#,
        );
        assert_eq!(
            g.targets(),
            vec!["Drone", "Newborn", "Offspring", "Unlisted"]
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let doc: GraphDoc = serde_json::from_str(r#"{ "nodes": [{ "id": " " }] }"#).unwrap();
        assert!(doc.validate_and_build().is_err());
    }

    #[test]
    fn missing_file_mentions_the_file_name() {
        let err = GraphDoc::from_path("/definitely/not/here/dag.json").unwrap_err();
        assert_eq!(err.to_string(), "lineage-viz: dag.json not found");
    }
}
