//! Approximate closed tours over sparse 2D arc networks.
//! Completes the sparse graph into dense all-pairs shortest-path distances,
//! improves a seeded tour by pairwise-perturbation sweeps over the dense
//! table, then expands the winner back into a walk over real arcs.

mod algo;
mod error;
mod graph;
mod io;
pub mod logging;
mod node;
mod route;

pub(crate) use io::{input, options};

pub use algo::solver::solve_sparse_tour;
pub use error::{Error, Result};
pub use graph::apsp::{CompleteGraph, PathCompleter};
pub use graph::sparse::SparseGraph;
pub use io::input::{Arc, SolverInput, format_node_id};
pub use io::options::{LogFormat, LogLevel, MoveOperator, SolverOptions, SweepMode};
pub use node::Point;
pub use route::{Route, RouteMetrics};
