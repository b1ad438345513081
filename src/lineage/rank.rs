//! Column assignment: longest path from any source, target pushed rightmost.

use crate::diagnostics;
use crate::schema::{Edge, Node};

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Rank per node id for one subgraph. Transient; rebuilt per selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ranking {
    ranks: BTreeMap<String, usize>,
    /// Set when the relaxation hit its ceiling (the subgraph has a cycle).
    #[serde(skip)]
    capped: bool,
}

impl Ranking {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    /// Rank with the default (0) for nodes no seed reached.
    pub fn column(&self, id: &str) -> usize {
        self.get(id).unwrap_or(0)
    }

    pub fn max_rank(&self) -> usize {
        self.ranks.values().copied().max().unwrap_or(0)
    }

    pub fn was_capped(&self) -> bool {
        self.capped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.ranks.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Rank `nodes` along `links`, then shift so `target` lands in the last column.
///
/// Seeds are nodes without incoming links (rank 0). A node's rank only ever
/// grows, and never beyond `nodes.len() - 1`; on a DAG that ceiling is never
/// reached, on a cycle it bounds the relaxation so the loop always ends.
pub fn rank(nodes: &[&Node], links: &[&Edge], target: &str) -> Ranking {
    let ceiling = nodes.len().saturating_sub(1);

    let mut indeg: HashMap<&str, usize> = nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
    let mut out: HashMap<&str, Vec<&str>> = HashMap::new();
    for e in links {
        *indeg.entry(e.target.as_str()).or_default() += 1;
        out.entry(e.source.as_str()).or_default().push(e.target.as_str());
    }

    let mut ranks: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    for n in nodes {
        if indeg.get(n.id.as_str()).copied().unwrap_or(0) == 0 {
            ranks.insert(n.id.as_str(), 0);
            queue.push_back(n.id.as_str());
        }
    }

    let mut capped = false;
    while let Some(u) = queue.pop_front() {
        let Some(&ru) = ranks.get(u) else { continue };
        let next = ru + 1;
        for &v in out.get(u).map(Vec::as_slice).unwrap_or(&[]) {
            if next > ceiling {
                capped = true;
                continue;
            }
            let improves = ranks.get(v).is_none_or(|&rv| next > rv);
            if improves {
                ranks.insert(v, next);
                queue.push_back(v);
            }
        }
    }

    let mut ranks: BTreeMap<String, usize> =
        ranks.into_iter().map(|(k, v)| (k.to_string(), v)).collect();

    // Target to the rightmost column.
    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let t_rank = ranks.get(target).copied().unwrap_or(max_rank);
    if t_rank < max_rank {
        let shift = max_rank - t_rank;
        for r in ranks.values_mut() {
            *r += shift;
        }
    }

    // Cyclic residue only: keep the target terminal.
    if capped {
        diagnostics::warn(format!(
            "lineage of '{}' contains a cycle; ranks were capped at {}",
            target, ceiling
        ));
        let pinned = ranks.get(target).copied().unwrap_or(max_rank);
        if nodes.iter().any(|n| n.id == target) {
            ranks.insert(target.to_string(), pinned);
        }
        for r in ranks.values_mut() {
            if *r > pinned {
                *r = pinned;
            }
        }
    }

    Ranking { ranks, capped }
}
