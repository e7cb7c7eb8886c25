//! Query-time re-bounding of a vertex's incident edges.
//!
//! A recipe can collect more than K incident edges over time, because later
//! insertions may pick it as one of their own top K. Queries therefore scan
//! every incident edge through a K-bounded min-heap and keep only the K
//! heaviest.

use crate::config::LinkThreshold;
use crate::similarity::graph::SimilarityGraph;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Returns up to `k` `(other, weight)` pairs for the heaviest edges incident
/// to `vertex`, ordered by descending weight. Equal weights keep edge
/// insertion order. Edges whose weight the threshold rejects are skipped.
pub fn top_k_edges(
    graph: &SimilarityGraph,
    vertex: u32,
    k: usize,
    threshold: LinkThreshold,
) -> Vec<(u32, f64)> {
    if k == 0 {
        return Vec::new();
    }

    // Min-heap keyed by (weight, -position): among equal weights the most
    // recent edge is the first to go.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<usize>, u32)>> =
        BinaryHeap::with_capacity(k.min(graph.degree(vertex)));

    for (position, edge) in graph.incident_edges(vertex).enumerate() {
        if edge.weight.is_nan() || !threshold.admits(edge.weight) {
            continue;
        }
        let entry = Reverse((OrderedFloat(edge.weight), Reverse(position), edge.other(vertex)));
        if heap.len() < k {
            heap.push(entry);
        } else if heap
            .peek()
            .is_some_and(|Reverse((min, _, _))| edge.weight > min.0)
        {
            heap.pop();
            heap.push(entry);
        }
    }

    let mut results: Vec<(OrderedFloat<f64>, usize, u32)> = heap
        .into_iter()
        .map(|Reverse((w, Reverse(pos), other))| (w, pos, other))
        .collect();
    results.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    results.into_iter().map(|(w, _, other)| (other, w.0)).collect()
}
