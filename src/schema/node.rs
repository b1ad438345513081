//! Node and edge vocabulary shared by both graph views.

use serde::{Deserialize, Serialize};

/// Node category as it appears in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Host,
    Agent,
    Vector,
    Artifact,
    Stage,
    Species,
    Organism,
    Hybrid,
    Process,
    Meta,
    /// Any `type` string this build does not know about.
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Kinds shown in the legends, in display order.
    pub const LEGEND: [NodeKind; 9] = [
        NodeKind::Host,
        NodeKind::Agent,
        NodeKind::Vector,
        NodeKind::Artifact,
        NodeKind::Stage,
        NodeKind::Species,
        NodeKind::Organism,
        NodeKind::Hybrid,
        NodeKind::Process,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Host => "host",
            NodeKind::Agent => "agent",
            NodeKind::Vector => "vector",
            NodeKind::Artifact => "artifact",
            NodeKind::Stage => "stage",
            NodeKind::Species => "species",
            NodeKind::Organism => "organism",
            NodeKind::Hybrid => "hybrid",
            NodeKind::Process => "process",
            NodeKind::Meta => "meta",
            NodeKind::Other => "other",
        }
    }

    /// Fill colour used by both views.
    pub fn fill(self) -> &'static str {
        match self {
            NodeKind::Host => "#e7f1ff",
            NodeKind::Agent => "#efefef",
            NodeKind::Vector => "#fff0c2",
            NodeKind::Artifact => "#fff7db",
            NodeKind::Stage => "#f3f6f9",
            NodeKind::Species => "#e9f7ef",
            NodeKind::Organism => "#f1f8ff",
            NodeKind::Hybrid => "#f9e6ef",
            NodeKind::Process => "#fbecff",
            NodeKind::Meta => "#f0f0f0",
            NodeKind::Other => "#bbbbbb",
        }
    }

    /// Whether nodes of this kind are selectable lineage targets by default.
    pub fn is_target(self) -> bool {
        matches!(self, NodeKind::Species | NodeKind::Hybrid)
    }
}

/// A node after processes have been merged into the node set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A directed link whose endpoints both exist in the node set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: String,
}

impl Edge {
    /// Human verb for the edge kind; unknown kinds are shown as-is.
    pub fn verb(&self) -> &str {
        edge_verb(&self.kind)
    }
}

pub fn edge_verb(kind: &str) -> &str {
    match kind {
        "reproduction" => "lays/produces",
        "maturation" => "matures",
        "implantation" => "implants",
        "host" => "host",
        "evolution" => "evolves",
        "infection" => "infects",
        "contaminate" => "contaminates",
        "release" => "releases",
        "parasite" => "parasitic outcome",
        "biogenesis" => "forms egg",
        "experiment" => "experiment",
        "anomalous" => "anomalous birth",
        "origin" => "origin",
        "impregnation" => "impregnates",
        "result" => "result",
        "transmission" => "transmission",
        "cloning" => "cloning",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_type_maps_to_other() {
        let kind: NodeKind = serde_json::from_str("\"xenoform\"").unwrap();
        assert_eq!(kind, NodeKind::Other);
        let kind: NodeKind = serde_json::from_str("\"hybrid\"").unwrap();
        assert_eq!(kind, NodeKind::Hybrid);
    }

    #[test]
    fn edge_verbs_fall_back_to_kind() {
        assert_eq!(edge_verb("biogenesis"), "forms egg");
        assert_eq!(edge_verb("teleport"), "teleport");
        assert_eq!(edge_verb(""), "");
    }

    #[test]
    fn only_species_and_hybrids_are_targets() {
        let targets: Vec<NodeKind> = NodeKind::LEGEND
            .iter()
            .copied()
            .filter(|k| k.is_target())
            .collect();
        assert_eq!(targets, vec![NodeKind::Species, NodeKind::Hybrid]);
    }
}
