//! Schema layer: JSON inputs + validated in-memory structures.
//!
//! Owns:
//! - node / edge vocabulary
//! - graph documents (nodes, processes, links, final products)
//! - the scope table that curates lineage traversal
//! - optional layout / solver settings

pub mod graph;
pub mod node;
pub mod scope;
pub mod settings;

pub use graph::{GraphDoc, LoadedGraph};
pub use node::{Edge, Node, NodeKind};
pub use scope::{AllowPredicate, ScopeTable};
pub use settings::{ForceSettings, LayoutConfig, Settings, Viewport};
