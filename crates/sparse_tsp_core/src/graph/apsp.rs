use crate::{Error, Result, graph::sparse::SparseGraph};

/// Completes a sparse graph into dense all-pairs shortest-path distances with
/// enough bookkeeping to reconstruct any shortest path. Trades sparsity for
/// uniformity: O(n^3) time and O(n^2) space regardless of arc count.
#[derive(Clone, Debug)]
pub struct PathCompleter {
    graph: SparseGraph,
    n: usize,
    dist: Vec<f64>,
    next: Vec<Option<usize>>,
}

impl PathCompleter {
    /// Runs the relaxation and rejects disconnected inputs.
    pub fn complete(graph: &SparseGraph) -> Result<Self> {
        let n = graph.n();
        log::info!("completer: start n={n}");

        let mut dist = vec![f64::INFINITY; n * n];
        let mut next: Vec<Option<usize>> = vec![None; n * n];

        for v in 0..n {
            dist[v * n + v] = 0.0;
        }
        for v in 0..n {
            for &(u, weight) in graph.neighbors(v) {
                dist[v * n + u] = weight;
            }
        }

        // Relaxation order k, then i, then j is load-bearing.
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let relaxed = dist[i * n + k] + dist[k * n + j];
                    if relaxed < dist[i * n + j] {
                        dist[i * n + j] = relaxed;
                        next[i * n + j] = Some(k);
                    }
                }
            }
        }

        for i in 0..n {
            for j in 0..n {
                if !dist[i * n + j].is_finite() {
                    return Err(Error::Disconnected { from: i, to: j });
                }
            }
        }

        log::info!("completer: complete n={n}");
        Ok(Self {
            graph: graph.clone(),
            n,
            dist,
            next,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Shortest-path cost from `i` to `j` in the original sparse graph.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.dist[i * self.n + j]
    }

    /// Read-only dense distance view for complete-graph tour heuristics.
    pub fn complete_graph(&self) -> CompleteGraph<'_> {
        CompleteGraph { completer: self }
    }

    /// Ordered intermediate node ids strictly between `from` and `to` on the
    /// recorded shortest path. Empty when the direct arc is shortest.
    ///
    /// Expands pairs with an explicit work stack so path length, not call
    /// depth, bounds memory.
    pub fn reconstruct_path(&self, from: usize, to: usize) -> Result<Vec<usize>> {
        enum Frame {
            Expand(usize, usize),
            Emit(usize),
        }

        let mut out = Vec::new();
        let mut stack = vec![Frame::Expand(from, to)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Emit(node) => out.push(node),
                Frame::Expand(i, j) => match self.next_hop(i, j) {
                    Some(k) => {
                        stack.push(Frame::Expand(k, j));
                        stack.push(Frame::Emit(k));
                        stack.push(Frame::Expand(i, k));
                    }
                    None => {
                        if !self.graph.has_edge(i, j) {
                            return Err(Error::invalid_data(format!(
                                "no intermediate recorded and no direct arc between {i} and {j}"
                            )));
                        }
                    }
                },
            }
        }

        Ok(out)
    }

    fn next_hop(&self, i: usize, j: usize) -> Option<usize> {
        self.next[i * self.n + j]
    }
}

/// Dense distance table derived from a completed sparse graph.
#[derive(Clone, Copy, Debug)]
pub struct CompleteGraph<'a> {
    completer: &'a PathCompleter,
}

impl CompleteGraph<'_> {
    pub fn len(&self) -> usize {
        self.completer.n()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.completer.distance(i, j)
    }
}
