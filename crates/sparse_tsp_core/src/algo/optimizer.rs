use crate::{
    algo::tour::tour_cost,
    graph::apsp::CompleteGraph,
    options::{MoveOperator, SweepMode},
};

/// Improves a tour in place by sweeping all unordered index pairs in the
/// fixed order `i = 0..n`, `j = 0..i`. Each pair perturbs a snapshot of the
/// current best tour; a candidate replaces it only on strictly lower cost, so
/// later pairs see whichever tour is best so far.
///
/// Returns the final tour cost.
pub(crate) fn optimize(
    tour: &mut Vec<usize>,
    distances: &CompleteGraph<'_>,
    mode: SweepMode,
    move_op: MoveOperator,
) -> f64 {
    let mut best_cost = tour_cost(tour, distances);
    log::debug!(
        "optimizer: start n={} mode={mode:?} move_op={move_op:?} cost={best_cost:.4}",
        tour.len()
    );

    let mut passes = 0usize;
    let mut total_accepted = 0usize;
    loop {
        let accepted = sweep(tour, &mut best_cost, distances, move_op);
        passes += 1;
        total_accepted += accepted;
        log::debug!("optimizer: pass={passes} accepted={accepted} cost={best_cost:.4}");

        match mode {
            SweepMode::Single => break,
            SweepMode::Converge => {
                if accepted == 0 {
                    break;
                }
            }
        }
    }

    log::debug!(
        "optimizer: complete passes={passes} accepted={total_accepted} cost={best_cost:.4}"
    );
    best_cost
}

fn sweep(
    tour: &mut Vec<usize>,
    best_cost: &mut f64,
    distances: &CompleteGraph<'_>,
    move_op: MoveOperator,
) -> usize {
    let n = tour.len();
    let mut accepted = 0usize;

    for i in 0..n {
        for j in 0..i {
            let mut candidate = tour.clone();
            apply_move(&mut candidate, i, j, move_op);

            let candidate_cost = tour_cost(&candidate, distances);
            if candidate_cost < *best_cost {
                *tour = candidate;
                *best_cost = candidate_cost;
                accepted += 1;
            }
        }
    }

    accepted
}

fn apply_move(tour: &mut [usize], i: usize, j: usize, move_op: MoveOperator) {
    match move_op {
        MoveOperator::Swap => tour.swap(i, j),
        // j < i by sweep order.
        MoveOperator::Reverse => tour[j..=i].reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::optimize;
    use crate::{
        algo::tour::tour_cost,
        graph::{apsp::PathCompleter, sparse::tests::unit_square_cycle},
        options::{MoveOperator, SweepMode},
    };

    fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for (idx, &head) in items.iter().enumerate() {
            let mut rest = items.to_vec();
            rest.remove(idx);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    fn is_permutation(tour: &[usize], n: usize) -> bool {
        let mut sorted = tour.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn every_starting_permutation_of_the_square_reaches_the_perimeter() {
        let completer = PathCompleter::complete(&unit_square_cycle()).expect("complete");
        let view = completer.complete_graph();

        for start in permutations(&[0, 1, 2, 3]) {
            let mut tour = start.clone();
            let cost = optimize(&mut tour, &view, SweepMode::Single, MoveOperator::Swap);
            assert!(
                (cost - 4.0).abs() < 1e-12,
                "start {start:?} ended at cost {cost}"
            );
            assert!(is_permutation(&tour, 4));
        }
    }

    #[test]
    fn optimize_never_increases_cost() {
        let completer = PathCompleter::complete(&unit_square_cycle()).expect("complete");
        let view = completer.complete_graph();

        for move_op in [MoveOperator::Swap, MoveOperator::Reverse] {
            for mode in [SweepMode::Single, SweepMode::Converge] {
                let mut tour = vec![2, 0, 3, 1];
                let initial = tour_cost(&tour, &view);
                let final_cost = optimize(&mut tour, &view, mode, move_op);
                assert!(final_cost <= initial + 1e-12);
                assert!((final_cost - tour_cost(&tour, &view)).abs() < 1e-12);
                assert!(is_permutation(&tour, 4));
            }
        }
    }

    #[test]
    fn converge_mode_is_at_least_as_good_as_a_single_sweep() {
        let completer = PathCompleter::complete(&unit_square_cycle()).expect("complete");
        let view = completer.complete_graph();

        for start in permutations(&[0, 1, 2, 3]) {
            let mut single = start.clone();
            let single_cost = optimize(&mut single, &view, SweepMode::Single, MoveOperator::Swap);

            let mut converged = start.clone();
            let converged_cost =
                optimize(&mut converged, &view, SweepMode::Converge, MoveOperator::Swap);

            assert!(converged_cost <= single_cost + 1e-12);
        }
    }

    #[test]
    fn reversal_operator_preserves_the_permutation() {
        let completer = PathCompleter::complete(&unit_square_cycle()).expect("complete");
        let view = completer.complete_graph();

        for start in permutations(&[0, 1, 2, 3]) {
            let mut tour = start.clone();
            optimize(&mut tour, &view, SweepMode::Converge, MoveOperator::Reverse);
            assert!(is_permutation(&tour, 4), "start {start:?} gave {tour:?}");
        }
    }

    #[test]
    fn optimize_is_deterministic_for_equal_inputs() {
        let completer = PathCompleter::complete(&unit_square_cycle()).expect("complete");
        let view = completer.complete_graph();

        let mut first = vec![3, 1, 0, 2];
        let mut second = vec![3, 1, 0, 2];
        let cost_a = optimize(&mut first, &view, SweepMode::Single, MoveOperator::Swap);
        let cost_b = optimize(&mut second, &view, SweepMode::Single, MoveOperator::Swap);

        assert_eq!(first, second);
        assert!((cost_a - cost_b).abs() < 1e-15);
    }
}
