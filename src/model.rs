//! Report model: both views flattened into the payload embedded in the HTML report.

use crate::render::{self, SvgSurface};
use crate::schema::NodeKind;
use crate::view::{LineageView, ReactionView, ViewStatus};

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct NodeInfo {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub source: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub kind: &'static str,
    pub fill: &'static str,
    /// "circle", "diamond", "rounded" or "hexagon".
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineagePanel {
    pub status: ViewStatus,
    pub targets: Vec<String>,
    /// Pre-rendered SVG per target.
    pub drawings: BTreeMap<String, String>,
    pub nodes: BTreeMap<String, NodeInfo>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionPanel {
    pub status: ViewStatus,
    pub drawing: String,
    pub nodes: BTreeMap<String, NodeInfo>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub lineage: LineagePanel,
    pub reaction: ReactionPanel,
}

/// Render every lineage target and the reaction graph. Idle views carry
/// their notice and no drawings.
pub fn build_report_data(lineage: &LineageView, reaction: &ReactionView) -> ReportData {
    ReportData {
        lineage: lineage_panel(lineage),
        reaction: reaction_panel(reaction),
    }
}

fn lineage_panel(view: &LineageView) -> LineagePanel {
    let targets = view.targets();
    let mut drawings = BTreeMap::new();
    for t in &targets {
        if let Some(scene) = view.scene_for(t) {
            let mut surface = SvgSurface::new("dag");
            drawings.insert(t.clone(), render::draw_lineage(&mut surface, &scene));
        }
    }
    LineagePanel {
        status: view.status().clone(),
        targets,
        drawings,
        nodes: view.graph().map(node_infos).unwrap_or_default(),
        legend: legend(|kind| match kind {
            NodeKind::Process => Some("diamond"),
            NodeKind::Artifact => Some("rounded"),
            NodeKind::Vector => Some("hexagon"),
            NodeKind::Organism => None,
            _ => Some("circle"),
        }),
    }
}

fn reaction_panel(view: &ReactionView) -> ReactionPanel {
    let mut surface = SvgSurface::new("reaction");
    let drawing = match (view.status(), view.layout()) {
        (ViewStatus::Ready, Some(layout)) => {
            render::draw_reaction(&mut surface, layout, view.highlight(), &view.viewport())
        }
        (ViewStatus::Idle { notice }, _) => render::draw_notice(&mut surface, &view.viewport(), notice),
        (ViewStatus::Ready, None) => String::new(),
    };
    ReactionPanel {
        status: view.status().clone(),
        drawing,
        nodes: view.graph().map(node_infos).unwrap_or_default(),
        legend: legend(|kind| match kind {
            NodeKind::Process => Some("diamond"),
            _ => Some("circle"),
        }),
    }
}

fn node_infos(graph: &crate::schema::LoadedGraph) -> BTreeMap<String, NodeInfo> {
    graph
        .nodes()
        .iter()
        .map(|n| {
            (
                n.id.clone(),
                NodeInfo {
                    kind: n.kind,
                    source: n.source.clone(),
                    image: n.image.clone(),
                    description: n.description.clone(),
                },
            )
        })
        .collect()
}

/// Legend rows in display order; `icon` returning `None` leaves a kind out.
fn legend(icon: impl Fn(NodeKind) -> Option<&'static str>) -> Vec<LegendEntry> {
    NodeKind::LEGEND
        .iter()
        .filter_map(|&kind| {
            Some(LegendEntry {
                kind: kind.as_str(),
                fill: kind.fill(),
                icon: icon(kind)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GraphDoc, ScopeTable, Settings};
    use pretty_assertions::assert_eq;

    #[test]
    fn idle_views_still_produce_a_report() {
        let settings = Settings::default();
        let lineage = LineageView::open("/missing/dag.json", ScopeTable::default(), settings.clone());
        let reaction = ReactionView::open("/missing/reaction.json", &settings);
        let data = build_report_data(&lineage, &reaction);

        assert!(data.lineage.drawings.is_empty());
        assert!(data.lineage.targets.is_empty());
        assert!(data.reaction.drawing.contains("reaction.json not found — reaction graph idle."));
    }

    #[test]
    fn one_drawing_per_target() {
        let graph = serde_json::from_str::<GraphDoc>(
            r#"{
                "nodes": [{ "id": "A", "type": "species" }, { "id": "B", "type": "hybrid" }],
                "links": [{ "source": "A", "target": "B", "kind": "evolution" }],
                "finalProducts": ["Gone"]
            }"#,
        )
        .unwrap()
        .validate_and_build()
        .unwrap();
        let lineage = LineageView::from_graph(graph, ScopeTable::default(), Settings::default());
        let reaction = ReactionView::open("/missing/reaction.json", &Settings::default());
        let data = build_report_data(&lineage, &reaction);

        let keys: Vec<&str> = data.lineage.drawings.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A", "B", "Gone"]);
        assert!(data.lineage.drawings["Gone"].contains("No lineage for"));
        assert_eq!(data.lineage.legend.len(), 8);
        assert_eq!(data.reaction.legend.len(), 9);
    }
}
