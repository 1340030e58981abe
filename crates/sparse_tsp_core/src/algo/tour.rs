use crate::graph::apsp::CompleteGraph;

/// Total cyclic cost of a tour over the completed distance table, including
/// the closing edge from the last node back to the first.
pub(crate) fn tour_cost(tour: &[usize], distances: &CompleteGraph<'_>) -> f64 {
    let n = tour.len();
    let mut sum = 0.0;
    for i in 0..n {
        sum += distances.distance(tour[i], tour[(i + 1) % n]);
    }
    sum
}

/// Rotates a cyclic tour so `start_node` comes first, preserving cyclic order.
pub(crate) fn rotate_cycle(tour: &[usize], start_node: usize) -> Vec<usize> {
    let Some(pos) = tour.iter().position(|&x| x == start_node) else {
        return tour.to_vec();
    };
    let mut out = Vec::with_capacity(tour.len());
    out.extend_from_slice(&tour[pos..]);
    out.extend_from_slice(&tour[..pos]);
    out
}
