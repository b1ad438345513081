//! Per-view state: one loaded graph, its load status, and the transient
//! render state rebuilt on every selection.
//!
//! Each view loads its document once. A failed load parks the view in
//! `ViewStatus::Idle` with a one-line notice; nothing else is computed for
//! it and the other view is unaffected.

use crate::Result;
use crate::diagnostics;
use crate::lineage::{self, Column, EdgeRoute, Point};
use crate::reaction::{self, Highlight, ReactionLayout};
use crate::schema::{LoadedGraph, NodeKind, ScopeTable, Settings, Viewport};

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewStatus {
    Ready,
    Idle { notice: String },
}

impl ViewStatus {
    fn idle(err: &anyhow::Error, what: &str) -> ViewStatus {
        let msg = err.to_string();
        ViewStatus::Idle {
            notice: format!("{} — {} idle.", diagnostics::without_prefix(&msg), what),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub column: usize,
    pub at: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Owned, render-ready result of one lineage selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageScene {
    pub target: String,
    pub viewport: Viewport,
    pub columns: Vec<Column>,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<EdgeRoute>,
}

impl LineageScene {
    fn from_lineage(lineage: lineage::Lineage<'_>, viewport: Viewport) -> LineageScene {
        let lineage::Lineage {
            target,
            subgraph,
            ranking,
            layout,
            routes,
        } = lineage;
        let nodes = subgraph
            .nodes
            .iter()
            .filter_map(|n| {
                let at = layout.position(&n.id)?;
                Some(SceneNode {
                    id: n.id.clone(),
                    kind: n.kind,
                    column: ranking.column(&n.id),
                    at,
                    source: n.source.clone(),
                    image: n.image.clone(),
                    description: n.description.clone(),
                })
            })
            .collect();
        LineageScene {
            target,
            viewport,
            columns: layout.columns,
            nodes,
            edges: routes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The layered lineage view.
#[derive(Debug, Clone)]
pub struct LineageView {
    graph: Option<LoadedGraph>,
    status: ViewStatus,
    scopes: ScopeTable,
    settings: Settings,
    selected: Option<String>,
    scene: Option<LineageScene>,
}

impl LineageView {
    /// Load the document once; a failure leaves the view idle.
    pub fn open(path: impl AsRef<Path>, scopes: ScopeTable, settings: Settings) -> LineageView {
        match LoadedGraph::load(path) {
            Ok(graph) => Self::from_graph(graph, scopes, settings),
            Err(err) => {
                diagnostics::warn(&err);
                LineageView {
                    graph: None,
                    status: ViewStatus::idle(&err, "DAG view"),
                    scopes,
                    settings,
                    selected: None,
                    scene: None,
                }
            }
        }
    }

    pub fn from_graph(graph: LoadedGraph, scopes: ScopeTable, settings: Settings) -> LineageView {
        LineageView {
            graph: Some(graph),
            status: ViewStatus::Ready,
            scopes,
            settings,
            selected: None,
            scene: None,
        }
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn graph(&self) -> Option<&LoadedGraph> {
        self.graph.as_ref()
    }

    pub fn targets(&self) -> Vec<String> {
        self.graph.as_ref().map(LoadedGraph::targets).unwrap_or_default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn scene(&self) -> Option<&LineageScene> {
        self.scene.as_ref()
    }

    /// First target, or the first node when no target exists.
    pub fn default_target(&self) -> Option<String> {
        let graph = self.graph.as_ref()?;
        graph
            .targets()
            .into_iter()
            .next()
            .or_else(|| graph.nodes().first().map(|n| n.id.clone()))
    }

    /// Compute a scene without touching the view's transient state.
    pub fn scene_for(&self, target: &str) -> Option<LineageScene> {
        let graph = self.graph.as_ref()?;
        let viewport = self.settings.viewport;
        let lineage = lineage::compute(
            graph,
            &self.scopes,
            target,
            &viewport,
            &self.settings.layout,
        );
        Some(LineageScene::from_lineage(lineage, viewport))
    }

    /// Replace the current selection; the previous scene is discarded.
    pub fn select(&mut self, target: &str) -> Option<&LineageScene> {
        self.scene = self.scene_for(target);
        self.selected = self.scene.as_ref().map(|_| target.to_string());
        self.scene.as_ref()
    }
}

/// The force-directed reaction view.
#[derive(Debug, Clone)]
pub struct ReactionView {
    graph: Option<LoadedGraph>,
    status: ViewStatus,
    layout: Option<ReactionLayout>,
    viewport: Viewport,
    query: String,
    highlight: Highlight,
}

impl ReactionView {
    pub fn open(path: impl AsRef<Path>, settings: &Settings) -> ReactionView {
        match LoadedGraph::load(path) {
            Ok(graph) => Self::from_graph(graph, settings),
            Err(err) => {
                diagnostics::warn(&err);
                ReactionView {
                    graph: None,
                    status: ViewStatus::idle(&err, "reaction graph"),
                    layout: None,
                    viewport: settings.viewport,
                    query: String::new(),
                    highlight: Highlight::default(),
                }
            }
        }
    }

    /// Lays the graph out once, up front.
    pub fn from_graph(graph: LoadedGraph, settings: &Settings) -> ReactionView {
        let layout = reaction::compute(&graph, &settings.viewport, &settings.force);
        ReactionView {
            graph: Some(graph),
            status: ViewStatus::Ready,
            layout: Some(layout),
            viewport: settings.viewport,
            query: String::new(),
            highlight: Highlight::default(),
        }
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn graph(&self) -> Option<&LoadedGraph> {
        self.graph.as_ref()
    }

    pub fn layout(&self) -> Option<&ReactionLayout> {
        self.layout.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Update the search query and the highlighted set.
    pub fn search(&mut self, query: &str) -> Result<&Highlight> {
        self.query = query.to_string();
        self.highlight = match &self.graph {
            Some(graph) => reaction::search(graph, query)?,
            None => Highlight::default(),
        };
        Ok(&self.highlight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GraphDoc;
    use pretty_assertions::assert_eq;

    fn graph() -> LoadedGraph {
        serde_json::from_str::<GraphDoc>(
            r#"{
                "nodes": [
                    { "id": "A", "type": "stage" },
                    { "id": "B", "type": "species" },
                    { "id": "C", "type": "hybrid" }
                ],
                "links": [
                    { "source": "A", "target": "B", "kind": "result" },
                    { "source": "B", "target": "C", "kind": "evolution" }
                ]
            }"#,
        )
        .unwrap()
        .validate_and_build()
        .unwrap()
    }

    #[test]
    fn missing_file_leaves_view_idle() {
        let view = LineageView::open(
            "/no/such/dir/dag.json",
            ScopeTable::default(),
            Settings::default(),
        );
        assert_eq!(
            view.status(),
            &ViewStatus::Idle {
                notice: "dag.json not found — DAG view idle.".to_string()
            }
        );
        assert!(view.targets().is_empty());
        assert!(view.scene_for("anything").is_none());
    }

    #[test]
    fn selecting_replaces_scene() {
        let mut view = LineageView::from_graph(graph(), ScopeTable::default(), Settings::default());
        assert_eq!(view.default_target().as_deref(), Some("B"));

        assert_eq!(view.select("C").unwrap().nodes.len(), 3);

        let scene = view.select("B").unwrap();
        assert_eq!(scene.target, "B");
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(view.selected(), Some("B"));
    }

    #[test]
    fn reaction_search_on_idle_view_is_empty() {
        let mut view = ReactionView::open("/no/such/reaction.json", &Settings::default());
        assert!(!view.status().is_ready());
        assert!(view.search("a").unwrap().is_empty());
        assert!(view.layout().is_none());
    }
}
