//! Reaction view: every node and link, placed by the force solver.

pub mod force;
pub mod search;

pub use force::force_layout;
pub use search::{Highlight, search};

use crate::lineage::Point;
use crate::schema::{ForceSettings, LoadedGraph, NodeKind, Viewport};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub at: Point,
}

/// Quadratic curve bowed upward by a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadPath {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadPath {
    const BOW: f64 = 12.0;

    pub fn bowed(from: Point, to: Point) -> QuadPath {
        QuadPath {
            from,
            ctrl: Point {
                x: (from.x + to.x) / 2.0,
                y: (from.y + to.y) / 2.0 - Self::BOW,
            },
            to,
        }
    }

    pub fn to_svg(&self) -> String {
        format!(
            "M{},{} Q{},{} {},{}",
            self.from.x, self.from.y, self.ctrl.x, self.ctrl.y, self.to.x, self.to.y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionEdge {
    pub source: String,
    pub target: String,
    pub kind: String,
    pub verb: String,
    pub path: QuadPath,
    pub label_at: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReactionLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<ReactionEdge>,
}

/// Lay out the whole graph. Node order follows the document.
pub fn compute(graph: &LoadedGraph, viewport: &Viewport, cfg: &ForceSettings) -> ReactionLayout {
    let positions = force_layout(graph, viewport, cfg);
    let centre = Point {
        x: viewport.width / 2.0,
        y: viewport.height / 2.0,
    };
    let at = |id: &str| positions.get(id).copied().unwrap_or(centre);

    let nodes = graph
        .nodes()
        .iter()
        .map(|n| PlacedNode {
            id: n.id.clone(),
            kind: n.kind,
            at: at(&n.id),
        })
        .collect();
    let edges = graph
        .edges()
        .iter()
        .map(|e| {
            let (from, to) = (at(&e.source), at(&e.target));
            ReactionEdge {
                source: e.source.clone(),
                target: e.target.clone(),
                kind: e.kind.clone(),
                verb: e.verb().to_string(),
                path: QuadPath::bowed(from, to),
                label_at: Point {
                    x: (from.x + to.x) / 2.0,
                    y: (from.y + to.y) / 2.0 - 6.0,
                },
            }
        })
        .collect();

    ReactionLayout { nodes, edges }
}
