//! Grid placement (column = rank) and curved edge routes.

use crate::lineage::rank::Ranking;
use crate::schema::{Edge, LayoutConfig, Node, Viewport};

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One column of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub rank: usize,
    pub x: f64,
    /// Vertical gap between consecutive nodes.
    pub spacing: f64,
    /// Node ids top to bottom.
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub columns: Vec<Column>,
    pub positions: BTreeMap<String, Point>,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }
}

/// Cubic Bezier with both control points on the horizontal midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicPath {
    pub from: Point,
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

impl CubicPath {
    pub fn horizontal(from: Point, to: Point) -> CubicPath {
        let mx = (from.x + to.x) / 2.0;
        CubicPath {
            from,
            c1: Point { x: mx, y: from.y },
            c2: Point { x: mx, y: to.y },
            to,
        }
    }

    /// SVG path data (`M .. C ..`).
    pub fn to_svg(&self) -> String {
        format!(
            "M{},{} C{},{} {},{} {},{}",
            self.from.x, self.from.y, self.c1.x, self.c1.y, self.c2.x, self.c2.y, self.to.x, self.to.y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRoute {
    pub source: String,
    pub target: String,
    pub kind: String,
    pub verb: String,
    pub path: CubicPath,
    /// Target column is not right of the source column.
    pub back: bool,
    /// Where the verb is drawn.
    pub label_at: Point,
}

/// Place every node: `x` from its rank, `y` evenly spread within its column.
pub fn layout(nodes: &[&Node], ranking: &Ranking, viewport: &Viewport, cfg: &LayoutConfig) -> Layout {
    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for n in nodes {
        groups
            .entry(ranking.column(&n.id))
            .or_default()
            .push(n.id.clone());
    }

    let usable = viewport.height - cfg.margin.top - cfg.margin.bottom;
    let mut out = Layout::default();
    for (rank, ids) in groups {
        let x = cfg.margin.left + rank as f64 * cfg.column_width;
        let spacing = usable / (ids.len() as f64 + 1.0);
        for (i, id) in ids.iter().enumerate() {
            let y = cfg.margin.top + (i as f64 + 1.0) * spacing;
            out.positions.insert(id.clone(), Point { x, y });
        }
        out.columns.push(Column {
            rank,
            x,
            spacing,
            ids,
        });
    }
    out
}

/// Route every link between its positioned endpoints. Links with an
/// unpositioned endpoint are skipped.
pub fn route_edges(links: &[&Edge], layout: &Layout, ranking: &Ranking) -> Vec<EdgeRoute> {
    links
        .iter()
        .filter_map(|e| {
            let from = layout.position(&e.source)?;
            let to = layout.position(&e.target)?;
            Some(EdgeRoute {
                source: e.source.clone(),
                target: e.target.clone(),
                kind: e.kind.clone(),
                verb: e.verb().to_string(),
                path: CubicPath::horizontal(from, to),
                back: ranking.column(&e.target) <= ranking.column(&e.source),
                label_at: Point {
                    x: (from.x + to.x) / 2.0,
                    y: (from.y + to.y) / 2.0 - 6.0,
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::rank::rank;
    use crate::schema::NodeKind;
    use pretty_assertions::assert_eq;

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            kind: NodeKind::Stage,
            source: None,
            image: None,
            description: None,
        }
    }

    fn edge(s: &str, t: &str) -> Edge {
        Edge {
            source: s.to_string(),
            target: t.to_string(),
            kind: "maturation".to_string(),
        }
    }

    #[test]
    fn columns_follow_rank_and_spread_evenly() {
        let nodes = [node("T"), node("A"), node("B"), node("C")];
        let edges = [edge("A", "T"), edge("B", "T"), edge("C", "T")];
        let nrefs: Vec<&Node> = nodes.iter().collect();
        let erefs: Vec<&Edge> = edges.iter().collect();
        let ranking = rank(&nrefs, &erefs, "T");
        let vp = Viewport {
            width: 960.0,
            height: 600.0,
        };
        let l = layout(&nrefs, &ranking, &vp, &LayoutConfig::default());

        assert_eq!(l.columns.len(), 2);
        let first = &l.columns[0];
        assert_eq!(first.rank, 0);
        assert_eq!(first.ids, vec!["A", "B", "C"]);
        assert_eq!(first.spacing, (600.0 - 40.0 - 40.0) / 4.0);
        assert_eq!(l.position("A"), Some(Point { x: 40.0, y: 170.0 }));
        assert_eq!(l.position("C"), Some(Point { x: 40.0, y: 430.0 }));
        assert_eq!(l.position("T"), Some(Point { x: 260.0, y: 300.0 }));
    }

    #[test]
    fn routes_use_midpoint_controls_and_flag_back_edges() {
        let nodes = [node("T"), node("A")];
        let edges = [edge("A", "T"), edge("T", "A")];
        let nrefs: Vec<&Node> = nodes.iter().collect();
        let forward: Vec<&Edge> = edges.iter().take(1).collect();
        let ranking = rank(&nrefs, &forward, "T");
        let l = layout(&nrefs, &ranking, &Viewport::default(), &LayoutConfig::default());

        let all: Vec<&Edge> = edges.iter().collect();
        let routes = route_edges(&all, &l, &ranking);
        assert_eq!(routes.len(), 2);
        assert!(!routes[0].back);
        assert!(routes[1].back);
        assert_eq!(routes[0].verb, "matures");
        assert_eq!(routes[0].path.to_svg(), "M40,300 C150,300 150,300 260,300");
        assert_eq!(routes[0].label_at, Point { x: 150.0, y: 294.0 });
    }

    #[test]
    fn unpositioned_endpoints_are_skipped() {
        let nodes = [node("A")];
        let edges = [edge("A", "Ghost")];
        let nrefs: Vec<&Node> = nodes.iter().collect();
        let erefs: Vec<&Edge> = edges.iter().collect();
        let ranking = rank(&nrefs, &[], "A");
        let l = layout(&nrefs, &ranking, &Viewport::default(), &LayoutConfig::default());
        assert!(route_edges(&erefs, &l, &ranking).is_empty());
    }

    #[test]
    fn empty_input_gives_empty_layout() {
        let l = layout(&[], &Ranking::default(), &Viewport::default(), &LayoutConfig::default());
        assert_eq!(l, Layout::default());
    }
}
