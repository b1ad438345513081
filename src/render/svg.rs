//! SVG implementation of [`Surface`].

use crate::lineage::Point;
use crate::render::label::escape_xml;
use crate::render::surface::{Glyph, Shape, Stroke, Surface};
use crate::schema::Viewport;

use std::fmt::Write;

/// Collects links, edge labels and nodes in separate layers, then assembles
/// one `<svg>` element. `id` prefixes element ids so several drawings can
/// share a page.
#[derive(Debug, Default)]
pub struct SvgSurface {
    id: String,
    viewport: Viewport,
    links: String,
    labels: String,
    nodes: String,
    notice: Option<String>,
}

impl SvgSurface {
    pub fn new(id: impl Into<String>) -> SvgSurface {
        SvgSurface {
            id: id.into(),
            ..SvgSurface::default()
        }
    }

    fn marker_id(&self) -> String {
        format!("{}-arrow", self.id)
    }
}

/// Compact coordinate formatting: at most two decimals, no trailing zeros.
pub fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

impl Surface for SvgSurface {
    fn begin(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        self.links.clear();
        self.labels.clear();
        self.nodes.clear();
        self.notice = None;
    }

    fn edge(&mut self, stroke: &Stroke<'_>) {
        let mut class = String::from("link");
        if stroke.back {
            class.push_str(" back");
        }
        if stroke.highlighted {
            class.push_str(" edge-highlight");
        }
        let marker = if stroke.arrow {
            format!(" marker-end=\"url(#{})\"", self.marker_id())
        } else {
            String::new()
        };
        let _ = writeln!(
            self.links,
            "<path class=\"{}\" d=\"{}\" data-source=\"{}\" data-target=\"{}\"{}/>",
            class,
            stroke.d,
            escape_xml(stroke.source),
            escape_xml(stroke.target),
            marker
        );
    }

    fn edge_label(&mut self, at: Point, text: &str) {
        if text.is_empty() {
            return;
        }
        let _ = writeln!(
            self.labels,
            "<text class=\"edge-label\" x=\"{}\" y=\"{}\">{}</text>",
            num(at.x),
            num(at.y),
            escape_xml(text)
        );
    }

    fn node(&mut self, glyph: &Glyph<'_>) {
        let fill = glyph.kind.fill();
        let shape = match glyph.shape {
            Shape::Circle { r } => format!("<circle r=\"{}\" fill=\"{}\"/>", num(r), fill),
            Shape::Diamond { half } => format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" transform=\"rotate(45)\" fill=\"{}\"/>",
                num(-half),
                num(-half),
                num(half * 2.0),
                num(half * 2.0),
                fill
            ),
            Shape::RoundedRect {
                width,
                height,
                radius,
            } => format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\"/>",
                num(-width / 2.0),
                num(-height / 2.0),
                num(width),
                num(height),
                num(radius),
                num(radius),
                fill
            ),
            Shape::Hexagon { r } => {
                let pts = [
                    (0.0, -r),
                    (r * 0.866, -r * 0.5),
                    (r * 0.866, r * 0.5),
                    (0.0, r),
                    (-r * 0.866, r * 0.5),
                    (-r * 0.866, -r * 0.5),
                ];
                let points: Vec<String> = pts
                    .iter()
                    .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
                    .collect();
                format!("<polygon points=\"{}\" fill=\"{}\"/>", points.join(" "), fill)
            }
        };

        let mut text = String::from("<text class=\"label\">");
        for (i, line) in glyph.label.iter().enumerate() {
            let _ = write!(
                text,
                "<tspan x=\"0\" y=\"{}\">{}</tspan>",
                num(glyph.label_dy + i as f64 * 12.0),
                escape_xml(line)
            );
        }
        text.push_str("</text>");

        let highlight = if glyph.highlighted { " highlight" } else { "" };
        let _ = writeln!(
            self.nodes,
            "<g class=\"node {}{}\" data-id=\"{}\" transform=\"translate({},{})\">{}{}</g>",
            glyph.kind.as_str(),
            highlight,
            escape_xml(glyph.id),
            num(glyph.at.x),
            num(glyph.at.y),
            shape,
            text
        );
    }

    fn notice(&mut self, text: &str) {
        self.notice = Some(text.to_string());
    }

    fn finish(&mut self) -> String {
        let (w, h) = (num(self.viewport.width), num(self.viewport.height));
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{}\" viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\">",
            escape_xml(&self.id),
            w,
            h,
            w,
            h
        );
        let _ = writeln!(
            out,
            "<defs><marker id=\"{}\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"#888\"/></marker></defs>",
            self.marker_id()
        );
        if let Some(notice) = &self.notice {
            let _ = writeln!(
                out,
                "<text class=\"notice\" x=\"{}\" y=\"{}\">{}</text>",
                num(self.viewport.width / 2.0),
                num(self.viewport.height / 2.0),
                escape_xml(notice)
            );
        }
        out.push_str("<g class=\"zoom\">\n<g class=\"links\">\n");
        out.push_str(&self.links);
        out.push_str(&self.labels);
        out.push_str("</g>\n<g class=\"nodes\">\n");
        out.push_str(&self.nodes);
        out.push_str("</g>\n</g>\n</svg>\n");
        out
    }
}
