use crate::{Result, algo::tour::rotate_cycle, graph::apsp::PathCompleter};

/// Rotates a cyclic tour so `anchor` comes first, then closes the loop by
/// repeating `anchor` at the end.
pub(crate) fn rotate_to_start(tour: &[usize], anchor: usize) -> Vec<usize> {
    let mut rotated = rotate_cycle(tour, anchor);
    rotated.push(anchor);
    rotated
}

/// Expands a rotated closed tour into a walk over real sparse arcs: each
/// consecutive pair contributes its source node plus the reconstructed
/// intermediates, and the closing anchor is emitted once at the end.
pub(crate) fn expand(rotated: &[usize], completer: &PathCompleter) -> Result<Vec<usize>> {
    let mut walk = Vec::with_capacity(rotated.len());

    for pair in rotated.windows(2) {
        walk.push(pair[0]);
        walk.extend(completer.reconstruct_path(pair[0], pair[1])?);
    }
    if let Some(&last) = rotated.last() {
        walk.push(last);
    }

    Ok(walk)
}
