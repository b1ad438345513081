//! Lineage pipeline: ancestor filter -> layered ranking -> grid layout.
//!
//! Pure computation over a loaded graph; nothing here draws.

pub mod layout;
pub mod rank;
pub mod subgraph;

pub use layout::{Column, CubicPath, EdgeRoute, Layout, Point, layout, route_edges};
pub use rank::{Ranking, rank};
pub use subgraph::{Subgraph, build_subgraph};

use crate::schema::{LayoutConfig, LoadedGraph, ScopeTable, Viewport};

/// Everything computed for one target selection.
#[derive(Debug, Clone)]
pub struct Lineage<'g> {
    pub target: String,
    pub subgraph: Subgraph<'g>,
    pub ranking: Ranking,
    pub layout: Layout,
    pub routes: Vec<EdgeRoute>,
}

/// Run the full pipeline for `target`.
pub fn compute<'g>(
    graph: &'g LoadedGraph,
    scopes: &ScopeTable,
    target: &str,
    viewport: &Viewport,
    cfg: &LayoutConfig,
) -> Lineage<'g> {
    let subgraph = build_subgraph(graph, scopes, target);
    let ranking = rank(&subgraph.nodes, &subgraph.links, target);
    let layout = layout(&subgraph.nodes, &ranking, viewport, cfg);
    let routes = route_edges(&subgraph.links, &layout, &ranking);
    log::debug!(
        "lineage '{}': {} nodes, {} links, {} columns",
        target,
        subgraph.nodes.len(),
        subgraph.links.len(),
        layout.columns.len()
    );
    Lineage {
        target: target.to_string(),
        subgraph,
        ranking,
        layout,
        routes,
    }
}
