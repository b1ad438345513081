//! Drawing capability consumed by the views. The layout core never sees it.

use crate::lineage::Point;
use crate::schema::{NodeKind, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { r: f64 },
    /// Square of side `2 * half` rotated 45 degrees.
    Diamond { half: f64 },
    RoundedRect { width: f64, height: f64, radius: f64 },
    /// Pointy-top hexagon with circumradius `r`.
    Hexagon { r: f64 },
}

/// A node as handed to a surface.
#[derive(Debug, Clone)]
pub struct Glyph<'a> {
    pub id: &'a str,
    pub kind: NodeKind,
    pub at: Point,
    pub shape: Shape,
    pub label: Vec<String>,
    /// Vertical offset of the first label line, relative to `at`.
    pub label_dy: f64,
    pub highlighted: bool,
}

/// An edge as handed to a surface.
#[derive(Debug, Clone)]
pub struct Stroke<'a> {
    pub source: &'a str,
    pub target: &'a str,
    /// SVG path data.
    pub d: String,
    pub back: bool,
    pub highlighted: bool,
    pub arrow: bool,
}

pub trait Surface {
    fn begin(&mut self, viewport: &Viewport);
    fn edge(&mut self, stroke: &Stroke<'_>);
    fn edge_label(&mut self, at: Point, text: &str);
    fn node(&mut self, glyph: &Glyph<'_>);
    /// One-line status text for an empty or idle drawing.
    fn notice(&mut self, text: &str);
    fn finish(&mut self) -> String;
}
