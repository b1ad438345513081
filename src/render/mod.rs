//! Rendering: scenes -> drawing surface -> SVG / HTML.

pub mod html;
pub mod label;
pub mod surface;
pub mod svg;

pub use html::render_html_report;
pub use surface::{Glyph, Shape, Stroke, Surface};
pub use svg::SvgSurface;

use crate::reaction::{Highlight, ReactionLayout};
use crate::schema::{NodeKind, Viewport};
use crate::view::LineageScene;

use label::wrap_label;

const LINE_HEIGHT: f64 = 12.0;
const LABEL_CHARS: usize = 10;
const LABEL_LINES: usize = 2;

/// Node shape in the lineage view.
pub fn lineage_shape(kind: NodeKind) -> Shape {
    match kind {
        NodeKind::Process => Shape::Diamond { half: 18.0 },
        NodeKind::Artifact => Shape::RoundedRect {
            width: 72.0,
            height: 32.0,
            radius: 5.0,
        },
        NodeKind::Vector => Shape::Hexagon { r: 18.0 },
        _ => Shape::Circle { r: 20.0 },
    }
}

/// Node shape in the reaction view.
pub fn reaction_shape(kind: NodeKind) -> Shape {
    match kind {
        NodeKind::Process => Shape::Diamond { half: 17.0 },
        _ => Shape::Circle { r: 19.0 },
    }
}

/// Draw one lineage selection. An empty scene draws a notice instead.
pub fn draw_lineage<S: Surface + ?Sized>(surface: &mut S, scene: &LineageScene) -> String {
    surface.begin(&scene.viewport);
    if scene.is_empty() {
        surface.notice(&format!("No lineage for '{}'.", scene.target));
        return surface.finish();
    }

    for e in &scene.edges {
        surface.edge(&Stroke {
            source: &e.source,
            target: &e.target,
            d: e.path.to_svg(),
            back: e.back,
            highlighted: false,
            arrow: true,
        });
    }
    for e in &scene.edges {
        surface.edge_label(e.label_at, &e.verb);
    }
    for n in &scene.nodes {
        let label = wrap_label(&n.id, LABEL_CHARS, LABEL_LINES);
        let label_dy = -((label.len() as f64 - 1.0) * LINE_HEIGHT) / 2.0;
        surface.node(&Glyph {
            id: &n.id,
            kind: n.kind,
            at: n.at,
            shape: lineage_shape(n.kind),
            label,
            label_dy,
            highlighted: n.id == scene.target,
        });
    }
    surface.finish()
}

/// Draw the whole reaction graph, marking search hits.
pub fn draw_reaction<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &ReactionLayout,
    highlight: &Highlight,
    viewport: &Viewport,
) -> String {
    surface.begin(viewport);
    if layout.nodes.is_empty() {
        surface.notice("reaction graph is empty.");
        return surface.finish();
    }

    for e in &layout.edges {
        surface.edge(&Stroke {
            source: &e.source,
            target: &e.target,
            d: e.path.to_svg(),
            back: false,
            highlighted: highlight.nodes.contains(&e.source) || highlight.nodes.contains(&e.target),
            arrow: false,
        });
    }
    for e in &layout.edges {
        surface.edge_label(e.label_at, &e.verb);
    }
    for n in &layout.nodes {
        surface.node(&Glyph {
            id: &n.id,
            kind: n.kind,
            at: n.at,
            shape: reaction_shape(n.kind),
            label: vec![n.id.clone()],
            label_dy: -26.0,
            highlighted: highlight.nodes.contains(&n.id),
        });
    }
    surface.finish()
}

/// Drawing for a view that never loaded.
pub fn draw_notice<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, text: &str) -> String {
    surface.begin(viewport);
    surface.notice(text);
    surface.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GraphDoc, ScopeTable, Settings};
    use crate::view::LineageView;
    use pretty_assertions::assert_eq;

    fn view() -> LineageView {
        let graph = serde_json::from_str::<GraphDoc>(
            r#"{
                "nodes": [{ "id": "Egg (Ovomorph)", "type": "artifact" }, { "id": "Drone", "type": "species" }],
                "processes": ["Hatch"],
                "links": [
                    { "source": "Egg (Ovomorph)", "target": "Hatch", "kind": "maturation" },
                    { "source": "Hatch", "target": "Drone", "kind": "result" }
                ]
            }"#,
        )
        .unwrap()
        .validate_and_build()
        .unwrap();
        LineageView::from_graph(graph, ScopeTable::default(), Settings::default())
    }

    #[test]
    fn lineage_drawing_has_every_node_and_edge() {
        let scene = view().scene_for("Drone").unwrap();
        let svg = draw_lineage(&mut SvgSurface::new("dag"), &scene);
        assert_eq!(svg.matches("<g class=\"node ").count(), 3);
        assert_eq!(svg.matches("<path class=\"link").count(), 2);
        assert!(svg.contains("class=\"node species highlight\" data-id=\"Drone\""));
        assert!(svg.contains(">matures</text>"));
        assert!(svg.contains("<tspan x=\"0\" y=\"-6\">Egg</tspan><tspan x=\"0\" y=\"6\">(Ovomorph)</tspan>"));
    }

    #[test]
    fn empty_scene_draws_a_notice() {
        let scene = view().scene_for("Nobody").unwrap();
        let svg = draw_lineage(&mut SvgSurface::new("dag"), &scene);
        assert!(svg.contains("No lineage for &#39;Nobody&#39;."));
        assert!(!svg.contains("<g class=\"node "));
    }

    #[test]
    fn shapes_follow_kind() {
        assert_eq!(lineage_shape(NodeKind::Vector), Shape::Hexagon { r: 18.0 });
        assert_eq!(lineage_shape(NodeKind::Host), Shape::Circle { r: 20.0 });
        assert_eq!(reaction_shape(NodeKind::Artifact), Shape::Circle { r: 19.0 });
        assert_eq!(reaction_shape(NodeKind::Process), Shape::Diamond { half: 17.0 });
    }
}
