use crate::{Error, Result, input::Arc, node::Point};

/// Adjacency view of the original sparse network. Weights are Euclidean
/// distances between arc endpoints; every arc is stored in both directions.
#[derive(Clone, Debug)]
pub struct SparseGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl SparseGraph {
    pub fn build(points: &[Point], arcs: &[Arc]) -> Result<Self> {
        let n = points.len();
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];

        for arc in arcs {
            if arc.a >= n || arc.b >= n {
                return Err(Error::invalid_input(format!(
                    "arc ({}, {}) is out of range for {n} points",
                    arc.a, arc.b
                )));
            }
            if arc.a == arc.b {
                return Err(Error::invalid_input(format!(
                    "arc ({}, {}) is a self-loop",
                    arc.a, arc.b
                )));
            }
            if Self::position(&adjacency[arc.a], arc.b).is_some() {
                continue;
            }
            let weight = points[arc.a].dist(&points[arc.b]);
            adjacency[arc.a].push((arc.b, weight));
            adjacency[arc.b].push((arc.a, weight));
        }

        Ok(Self { adjacency })
    }

    pub fn n(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        Self::position(&self.adjacency[a], b).is_some()
    }

    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        Self::position(&self.adjacency[a], b).map(|idx| self.adjacency[a][idx].1)
    }

    fn position(neighbors: &[(usize, f64)], node: usize) -> Option<usize> {
        neighbors.iter().position(|&(other, _)| other == node)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::SparseGraph;
    use crate::{input::Arc, node::Point};

    pub(crate) fn unit_square_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ]
    }

    pub(crate) fn unit_square_cycle_arcs() -> Vec<Arc> {
        vec![
            Arc::new(0, 1),
            Arc::new(1, 2),
            Arc::new(2, 3),
            Arc::new(3, 0),
        ]
    }

    pub(crate) fn unit_square_cycle() -> SparseGraph {
        SparseGraph::build(&unit_square_points(), &unit_square_cycle_arcs())
            .expect("build square graph")
    }

    #[test]
    fn build_stores_symmetric_euclidean_weights() {
        let graph = unit_square_cycle();
        assert_eq!(graph.n(), 4);
        assert!((graph.edge_weight(0, 1).expect("edge 0-1") - 1.0).abs() < 1e-12);
        assert!((graph.edge_weight(1, 0).expect("edge 1-0") - 1.0).abs() < 1e-12);
        assert!(graph.has_edge(3, 0));
        assert!(!graph.has_edge(0, 2));
    }

    #[test]
    fn build_skips_duplicate_arcs() {
        let points = unit_square_points();
        let mut arcs = unit_square_cycle_arcs();
        arcs.push(Arc::new(1, 0));
        arcs.push(Arc::new(0, 1));

        let graph = SparseGraph::build(&points, &arcs).expect("build graph");
        assert_eq!(graph.neighbors(0).len(), 2);
        assert_eq!(graph.neighbors(1).len(), 2);
    }

    #[test]
    fn build_rejects_out_of_range_arcs() {
        let err = SparseGraph::build(&unit_square_points(), &[Arc::new(0, 9)])
            .expect_err("range check");
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn build_rejects_self_loops() {
        let err =
            SparseGraph::build(&unit_square_points(), &[Arc::new(2, 2)]).expect_err("self loop");
        assert!(err.to_string().contains("self-loop"));
    }
}
