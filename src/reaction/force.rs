use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::lineage::Point;
use crate::schema::{ForceSettings, LoadedGraph, Viewport};

/// Run the solver for a fixed number of steps and read back positions.
///
/// Nodes start evenly on a circle around the viewport centre; the settled
/// layout is then translated so its bounding box is centred again.
pub fn force_layout(
    graph: &LoadedGraph,
    viewport: &Viewport,
    cfg: &ForceSettings,
) -> HashMap<String, Point> {
    let mut sim: ForceGraph<String, ()> = ForceGraph::new(SimulationParameters {
        force_charge: cfg.charge,
        force_spring: cfg.spring,
        force_max: cfg.max_force,
        node_speed: cfg.node_speed,
        damping_factor: cfg.damping,
    });

    let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
    let count = graph.nodes().len().max(1) as f64;
    let mut id_to_idx: HashMap<&str, DefaultNodeIdx> = HashMap::new();
    for (i, node) in graph.nodes().iter().enumerate() {
        let angle = (i as f64) * 2.0 * PI / count;
        let (x, y) = (
            (cx + cfg.seed_radius * angle.cos()) as f32,
            (cy + cfg.seed_radius * angle.sin()) as f32,
        );
        let idx = sim.add_node(NodeData {
            x,
            y,
            mass: cfg.node_mass,
            is_anchor: false,
            user_data: node.id.clone(),
        });
        id_to_idx.insert(node.id.as_str(), idx);
    }

    for e in graph.edges() {
        if let (Some(&src), Some(&tgt)) = (
            id_to_idx.get(e.source.as_str()),
            id_to_idx.get(e.target.as_str()),
        ) {
            sim.add_edge(src, tgt, EdgeData::default());
        }
    }

    for _ in 0..cfg.steps {
        sim.update(cfg.step_dt);
    }

    let mut out: HashMap<String, Point> = HashMap::new();
    sim.visit_nodes(|node| {
        let (x, y) = (node.x() as f64, node.y() as f64);
        // A diverged solver must not leak NaN into the drawing.
        let p = if x.is_finite() && y.is_finite() {
            Point { x, y }
        } else {
            Point { x: cx, y: cy }
        };
        out.insert(node.data.user_data.clone(), p);
    });

    recentre(&mut out, cx, cy);
    out
}

fn recentre(points: &mut HashMap<String, Point>, cx: f64, cy: f64) {
    if points.is_empty() {
        return;
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points.values() {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let (dx, dy) = (cx - (min_x + max_x) / 2.0, cy - (min_y + max_y) / 2.0);
    for p in points.values_mut() {
        p.x += dx;
        p.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GraphDoc;

    fn graph() -> LoadedGraph {
        serde_json::from_str::<GraphDoc>(
            r#"{
                "nodes": [{ "id": "A" }, { "id": "B" }, { "id": "C" }],
                "links": [{ "source": "A", "target": "B" }, { "source": "B", "target": "C" }]
            }"#,
        )
        .unwrap()
        .validate_and_build()
        .unwrap()
    }

    #[test]
    fn every_node_gets_a_finite_position() {
        let g = graph();
        let cfg = ForceSettings {
            steps: 20,
            ..ForceSettings::default()
        };
        let pos = force_layout(&g, &Viewport::default(), &cfg);
        assert_eq!(pos.len(), 3);
        assert!(pos.values().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn zero_steps_keeps_the_seed_circle_centred() {
        let g = graph();
        let cfg = ForceSettings {
            steps: 0,
            ..ForceSettings::default()
        };
        let vp = Viewport::default();
        let pos = force_layout(&g, &vp, &cfg);
        let xs: Vec<f64> = pos.values().map(|p| p.x).collect();
        let mid = (xs.iter().cloned().fold(f64::INFINITY, f64::min)
            + xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
            / 2.0;
        assert!((mid - vp.width / 2.0).abs() < 1e-3);
    }

    #[test]
    fn recentre_of_nothing_is_a_no_op() {
        let mut empty = HashMap::new();
        recentre(&mut empty, 10.0, 10.0);
        assert!(empty.is_empty());
    }
}
