//! Life-cycle graph visualizer: ancestor lineages laid out in layered
//! columns, plus a force-directed overview of the whole reaction graph.

pub mod diagnostics;
pub mod lineage;
pub mod model;
pub mod reaction;
pub mod render;
pub mod schema;
pub mod view;

pub type Result<T> = anyhow::Result<T>;
